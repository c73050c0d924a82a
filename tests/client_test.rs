use serde_json::json;
use solscan_mcp::solscan::{SolscanError, SortDirection, TokenSortBy};
use solscan_mcp::SolscanClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn success_envelope() -> serde_json::Value {
    json!({"success": true, "data": {"block_height": 310000000}})
}

async fn mock_ok() -> (MockServer, SolscanClient) {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).expect("client should build");
    (mock, client)
}

async fn first_request(mock: &MockServer) -> wiremock::Request {
    mock.received_requests()
        .await
        .expect("requests recorded")
        .into_iter()
        .next()
        .expect("at least one request")
}

#[tokio::test]
async fn every_request_carries_the_fixed_browser_headers() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/common/chaininfo"))
        .and(header("accept", "application/json, text/plain, */*"))
        .and(header("accept-language", "en-US,en;q=0.9"))
        .and(header("origin", "https://solscan.io"))
        .and(header("referer", "https://solscan.io/"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope()))
        .expect(1)
        .mount(&mock)
        .await;

    let client = SolscanClient::new(mock.uri()).expect("client should build");
    client.chain_info().await.expect("chain info succeeds");
}

#[tokio::test]
async fn account_detail_sends_view_as_parameter() {
    let (mock, client) = mock_ok().await;
    client.account_detail("Addr1").await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/account");
    assert_eq!(req.url.query(), Some("address=Addr1&view_as=account"));
}

#[tokio::test]
async fn account_tokens_sends_fixed_position_sort() {
    let (mock, client) = mock_ok().await;
    client.account_tokens("Addr1", 1, 20).await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/account/positions");
    assert_eq!(
        req.url.query(),
        Some("address=Addr1&page=1&page_size=20&sort_by=position_value&sort_order=desc")
    );
}

#[tokio::test]
async fn account_nfts_filters_to_nonzero_nft_accounts() {
    let (mock, client) = mock_ok().await;
    client.account_nfts("Addr1", 1, 10).await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/account/tokenaccounts");
    assert_eq!(
        req.url.query(),
        Some("address=Addr1&page=1&page_size=10&type=nft&hide_zero=true")
    );
}

#[tokio::test]
async fn stake_accounts_sends_limit_before_page() {
    let (mock, client) = mock_ok().await;
    client.account_stake_accounts("Addr1", 1, 10).await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/account/stake");
    assert_eq!(req.url.query(), Some("address=Addr1&limit=10&page=1"));
}

#[tokio::test]
async fn token_list_maps_sort_key_and_direction() {
    let (mock, client) = mock_ok().await;
    client
        .token_list(TokenSortBy::Volume24h, SortDirection::Asc, 1, 30)
        .await
        .unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/token/leaderboard");
    assert_eq!(
        req.url.query(),
        Some("sort_by=volume_24h&sort_order=asc&page=1&page_size=30")
    );
}

#[tokio::test]
async fn transaction_detail_uses_tx_parameter() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"trans_id": "Sig1"}})),
        )
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    client.transaction_detail("Sig1").await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/transaction/detail");
    assert_eq!(req.url.query(), Some("tx=Sig1"));
}

#[tokio::test]
async fn chain_info_sends_no_query_string() {
    let (mock, client) = mock_ok().await;
    client.chain_info().await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/common/chaininfo");
    assert_eq!(req.url.query(), None);
}

#[tokio::test]
async fn adapter_returns_the_full_envelope_verbatim() {
    let envelope = json!({
        "success": true,
        "data": {"lamports": 5},
        "metadata": {"cached": false}
    });
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope.clone()))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    // Unknown upstream fields pass through untouched.
    let got = client.account_detail("Addr1").await.unwrap();
    assert_eq!(got, envelope);
}

#[tokio::test]
async fn non_success_status_fails_with_status_and_reason() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    let err = client.token_meta("Mint1").await.unwrap_err();
    match &err {
        SolscanError::RequestFailed { status, status_text } => {
            assert_eq!(*status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
    assert_eq!(err.to_string(), "API Request Failed: 404 Not Found");
}

#[tokio::test]
async fn unsuccessful_envelope_carries_the_identifier() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    let err = client.token_holders("Mint1", 1, 10).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "API returned unsuccessful response for token holders: Mint1"
    );
}

#[tokio::test]
async fn trending_tolerates_a_missing_success_flag() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    // Most endpoints would reject this; trending only fails on an
    // explicit success=false.
    client.trending_tokens(10).await.unwrap();

    let req = first_request(&mock).await;
    assert_eq!(req.url.path(), "/token/trending");
    assert_eq!(req.url.query(), Some("limit=10"));
}

#[tokio::test]
async fn block_transactions_fails_only_on_explicit_false() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    let err = client.block_transactions("12345").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "API returned unsuccessful response for block transactions: 12345"
    );
}

#[tokio::test]
async fn transaction_detail_requires_present_data() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    let err = client.transaction_detail("Sig1").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "API returned unsuccessful response or missing data for signature: Sig1"
    );
}

#[tokio::test]
async fn malformed_body_is_an_invalid_response() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock)
        .await;
    let client = SolscanClient::new(mock.uri()).unwrap();

    let err = client.chain_info().await.unwrap_err();
    assert!(matches!(err, SolscanError::InvalidResponse(_)));
}
