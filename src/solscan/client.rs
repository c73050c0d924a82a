use super::error::{Result, SolscanError};
use super::types::{SortDirection, TokenSortBy};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api-v2.solscan.io/v2";

/// Browser-identifying headers sent on every request. The upstream API
/// rejects requests without a recognized origin/referer/user-agent, so
/// these values must stay exactly as the solscan.io frontend sends them.
const ACCEPT: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const ORIGIN: &str = "https://solscan.io";
const REFERER: &str = "https://solscan.io/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Clone)]
pub struct SolscanClient {
    client: Client,
    base_url: String,
}

impl SolscanClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static(ACCEPT_LANGUAGE),
        );
        headers.insert(header::ORIGIN, header::HeaderValue::from_static(ORIGIN));
        headers.insert(header::REFERER, header::HeaderValue::from_static(REFERER));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(SolscanError::HttpRequest)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_detail(&self, address: &str) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("view_as", "account".to_string()),
        ];
        let envelope = self.get_envelope("/account", &query).await?;
        require_success(envelope, format!("address: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_transactions(&self, address: &str, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page_size", limit.to_string()),
            ("sort", "desc".to_string()),
        ];
        let envelope = self.get_envelope("/account/transaction", &query).await?;
        require_success(envelope, format!("address transactions: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_transfers(
        &self,
        address: &str,
        limit: u32,
        remove_spam: bool,
        exclude_amount_zero: bool,
    ) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", "1".to_string()),
            ("page_size", limit.to_string()),
            ("remove_spam", remove_spam.to_string()),
            ("exclude_amount_zero", exclude_amount_zero.to_string()),
        ];
        let envelope = self.get_envelope("/account/transfer", &query).await?;
        require_success(envelope, format!("address transfers: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_defi_activities(&self, address: &str, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", "1".to_string()),
            ("page_size", limit.to_string()),
        ];
        let envelope = self
            .get_envelope("/account/activity/dextrading", &query)
            .await?;
        require_success(envelope, format!("address defi activities: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_nft_activities(&self, address: &str, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", "1".to_string()),
            ("page_size", limit.to_string()),
        ];
        let envelope = self.get_envelope("/account/activity/nft", &query).await?;
        require_success(envelope, format!("address nft activities: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_tokens(&self, address: &str, page: u32, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", page.to_string()),
            ("page_size", limit.to_string()),
            ("sort_by", "position_value".to_string()),
            ("sort_order", "desc".to_string()),
        ];
        let envelope = self.get_envelope("/account/positions", &query).await?;
        require_success(envelope, format!("address positions: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_nfts(&self, address: &str, page: u32, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", page.to_string()),
            ("page_size", limit.to_string()),
            ("type", "nft".to_string()),
            ("hide_zero", "true".to_string()),
        ];
        let envelope = self.get_envelope("/account/tokenaccounts", &query).await?;
        require_success(envelope, format!("address nfts: {}", address))
    }

    // Upstream takes limit before page here, unlike the other paged endpoints.
    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn account_stake_accounts(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("limit", limit.to_string()),
            ("page", page.to_string()),
        ];
        let envelope = self.get_envelope("/account/stake", &query).await?;
        require_success(envelope, format!("address stake accounts: {}", address))
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn token_meta(&self, address: &str) -> Result<Value> {
        let query = [("address", address.to_string())];
        let envelope = self.get_envelope("/token/meta", &query).await?;
        require_success(envelope, format!("token meta: {}", address))
    }

    /// The upstream has no standalone price endpoint; token metadata
    /// already carries the price, so this is pure delegation.
    pub async fn token_price(&self, address: &str) -> Result<Value> {
        self.token_meta(address).await
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn token_holders(&self, address: &str, page: u32, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", page.to_string()),
            ("page_size", limit.to_string()),
        ];
        let envelope = self.get_envelope("/token/holders", &query).await?;
        require_success(envelope, format!("token holders: {}", address))
    }

    #[tracing::instrument(skip(self))]
    pub async fn trending_tokens(&self, limit: u32) -> Result<Value> {
        let query = [("limit", limit.to_string())];
        let envelope = self.get_envelope("/token/trending", &query).await?;
        reject_explicit_failure(envelope, "trending tokens")
    }

    #[tracing::instrument(skip(self), fields(address = %address))]
    pub async fn token_transfers(&self, address: &str, page: u32, limit: u32) -> Result<Value> {
        let query = [
            ("address", address.to_string()),
            ("page", page.to_string()),
            ("page_size", limit.to_string()),
        ];
        let envelope = self.get_envelope("/token/transfer", &query).await?;
        require_success(envelope, format!("token transfers: {}", address))
    }

    #[tracing::instrument(skip(self))]
    pub async fn token_list(
        &self,
        sort_by: TokenSortBy,
        direction: SortDirection,
        page: u32,
        limit: u32,
    ) -> Result<Value> {
        let query = [
            ("sort_by", sort_by.as_str().to_string()),
            ("sort_order", direction.as_str().to_string()),
            ("page", page.to_string()),
            ("page_size", limit.to_string()),
        ];
        let envelope = self.get_envelope("/token/leaderboard", &query).await?;
        require_success(envelope, "token list".to_string())
    }

    #[tracing::instrument(skip(self))]
    pub async fn chain_info(&self) -> Result<Value> {
        let envelope = self.get_envelope("/common/chaininfo", &[]).await?;
        require_success(envelope, "chain info".to_string())
    }

    #[tracing::instrument(skip(self), fields(block = %block))]
    pub async fn block_detail(&self, block: &str) -> Result<Value> {
        let query = [("block", block.to_string())];
        let envelope = self.get_envelope("/block/detail", &query).await?;
        require_success(envelope, format!("block detail: {}", block))
    }

    #[tracing::instrument(skip(self), fields(block = %block))]
    pub async fn block_transactions(&self, block: &str) -> Result<Value> {
        let query = [("block", block.to_string())];
        let envelope = self.get_envelope("/block/transactions", &query).await?;
        reject_explicit_failure(envelope, &format!("block transactions: {}", block))
    }

    #[tracing::instrument(skip(self), fields(signature = %signature))]
    pub async fn transaction_detail(&self, signature: &str) -> Result<Value> {
        let query = [("tx", signature.to_string())];
        let envelope = self.get_envelope("/transaction/detail", &query).await?;

        let success = envelope.get("success").and_then(Value::as_bool) == Some(true);
        if !success || is_empty_data(envelope.get("data")) {
            return Err(SolscanError::MissingTransaction {
                signature: signature.to_string(),
            });
        }
        Ok(envelope)
    }

    /// Single GET against the upstream: one attempt, no retries. Query
    /// pairs are joined in the order given, since the upstream expects
    /// the same parameter order the solscan.io frontend sends.
    async fn get_envelope(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let qs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            url.push('?');
            url.push_str(&qs.join("&"));
        }
        debug!(%url, "fetching solscan endpoint");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SolscanError::HttpRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolscanError::RequestFailed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(SolscanError::HttpRequest)?;
        serde_json::from_str(&body).map_err(|e| {
            SolscanError::InvalidResponse(format!(
                "failed to parse response (status {}): {}",
                status, e
            ))
        })
    }
}

fn require_success(envelope: Value, context: impl Into<String>) -> Result<Value> {
    if envelope.get("success").and_then(Value::as_bool) == Some(true) {
        Ok(envelope)
    } else {
        Err(SolscanError::Unsuccessful {
            context: context.into(),
        })
    }
}

// A few endpoints omit the success flag on valid responses, so only an
// explicit false counts as failure.
fn reject_explicit_failure(envelope: Value, context: &str) -> Result<Value> {
    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        Err(SolscanError::Unsuccessful {
            context: context.to_string(),
        })
    } else {
        Ok(envelope)
    }
}

/// Mirrors the upstream frontend's falsy check on the transaction-detail
/// payload: missing, null, false, zero, and empty string all count as no
/// data.
fn is_empty_data(data: Option<&Value>) -> bool {
    match data {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
