use crate::solscan::{
    effective_limit, AddressQuery, BlockQuery, PagedAddressQuery, SignatureQuery, SolscanClient,
    SolscanError, SortDirection, TokenListQuery, TokenSortBy, TransferQuery, TrendingQuery,
};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ServerHandler,
};
use std::sync::Arc;
use tracing::error;

/// Exposes every Solscan query as an MCP tool. Failures are normalized
/// into error results at this boundary; nothing below it surfaces as a
/// protocol fault.
#[derive(Clone)]
pub struct SolscanMcpServer {
    solscan: Arc<SolscanClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SolscanMcpServer {
    pub fn new(solscan: SolscanClient) -> Self {
        Self {
            solscan: Arc::new(solscan),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "get_transaction",
        description = "Get details of a Solana transaction from Solscan by its signature."
    )]
    async fn get_transaction(&self, params: Parameters<SignatureQuery>) -> CallToolResult {
        let q = params.0;
        match self.solscan.transaction_detail(&q.signature).await {
            Ok(envelope) => Self::envelope_result("getting transaction", envelope),
            Err(e) => Self::error_result("getting transaction", &e),
        }
    }

    #[tool(
        name = "get_account",
        description = "Get details of a Solana account from Solscan."
    )]
    async fn get_account(&self, params: Parameters<AddressQuery>) -> CallToolResult {
        let q = params.0;
        match self.solscan.account_detail(&q.address).await {
            Ok(envelope) => Self::envelope_result("getting account", envelope),
            Err(e) => Self::error_result("getting account", &e),
        }
    }

    #[tool(
        name = "get_account_transactions",
        description = "Get recent transactions of a Solana account from Solscan. Limit must be one of 10, 20, 30, 40."
    )]
    async fn get_account_transactions(
        &self,
        params: Parameters<PagedAddressQuery>,
    ) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.account_transactions(&q.address, limit).await {
            Ok(envelope) => Self::envelope_result("getting account transactions", envelope),
            Err(e) => Self::error_result("getting account transactions", &e),
        }
    }

    #[tool(
        name = "get_account_transfers",
        description = "Get SPL transfers of a Solana account from Solscan. Spam and zero-amount transfers are filtered out by default."
    )]
    async fn get_account_transfers(&self, params: Parameters<TransferQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self
            .solscan
            .account_transfers(
                &q.address,
                limit,
                q.remove_spam.unwrap_or(true),
                q.exclude_amount_zero.unwrap_or(true),
            )
            .await
        {
            Ok(envelope) => Self::envelope_result("getting account transfers", envelope),
            Err(e) => Self::error_result("getting account transfers", &e),
        }
    }

    #[tool(
        name = "get_account_defi_activities",
        description = "Get DeFi activities (dex trading) of a Solana account from Solscan."
    )]
    async fn get_account_defi_activities(
        &self,
        params: Parameters<PagedAddressQuery>,
    ) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.account_defi_activities(&q.address, limit).await {
            Ok(envelope) => Self::envelope_result("getting account defi activities", envelope),
            Err(e) => Self::error_result("getting account defi activities", &e),
        }
    }

    #[tool(
        name = "get_account_nft_activities",
        description = "Get NFT activities of a Solana account from Solscan."
    )]
    async fn get_account_nft_activities(
        &self,
        params: Parameters<PagedAddressQuery>,
    ) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.account_nft_activities(&q.address, limit).await {
            Ok(envelope) => Self::envelope_result("getting account nft activities", envelope),
            Err(e) => Self::error_result("getting account nft activities", &e),
        }
    }

    #[tool(
        name = "get_account_tokens",
        description = "Get token positions held by a Solana account from Solscan, sorted by position value."
    )]
    async fn get_account_tokens(&self, params: Parameters<PagedAddressQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.account_tokens(&q.address, 1, limit).await {
            Ok(envelope) => Self::envelope_result("getting account tokens", envelope),
            Err(e) => Self::error_result("getting account tokens", &e),
        }
    }

    #[tool(
        name = "get_account_nfts",
        description = "Get NFTs held by a Solana account from Solscan."
    )]
    async fn get_account_nfts(&self, params: Parameters<PagedAddressQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.account_nfts(&q.address, 1, limit).await {
            Ok(envelope) => Self::envelope_result("getting account NFTs", envelope),
            Err(e) => Self::error_result("getting account NFTs", &e),
        }
    }

    #[tool(
        name = "get_account_stake_accounts",
        description = "Get stake accounts held by a Solana account from Solscan."
    )]
    async fn get_account_stake_accounts(
        &self,
        params: Parameters<PagedAddressQuery>,
    ) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.account_stake_accounts(&q.address, 1, limit).await {
            Ok(envelope) => Self::envelope_result("getting account stake accounts", envelope),
            Err(e) => Self::error_result("getting account stake accounts", &e),
        }
    }

    #[tool(
        name = "get_token_meta",
        description = "Get metadata of a Solana token from Solscan, including supply, price and market data."
    )]
    async fn get_token_meta(&self, params: Parameters<AddressQuery>) -> CallToolResult {
        let q = params.0;
        match self.solscan.token_meta(&q.address).await {
            Ok(envelope) => Self::envelope_result("getting token meta", envelope),
            Err(e) => Self::error_result("getting token meta", &e),
        }
    }

    #[tool(
        name = "get_token_price",
        description = "Get the current price of a Solana token from Solscan (served from token metadata)."
    )]
    async fn get_token_price(&self, params: Parameters<AddressQuery>) -> CallToolResult {
        let q = params.0;
        match self.solscan.token_price(&q.address).await {
            Ok(envelope) => Self::envelope_result("getting token price", envelope),
            Err(e) => Self::error_result("getting token price", &e),
        }
    }

    #[tool(
        name = "get_token_holders",
        description = "Get the top holders of a Solana token from Solscan."
    )]
    async fn get_token_holders(&self, params: Parameters<PagedAddressQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.token_holders(&q.address, 1, limit).await {
            Ok(envelope) => Self::envelope_result("getting token holders", envelope),
            Err(e) => Self::error_result("getting token holders", &e),
        }
    }

    #[tool(
        name = "get_token_transfers",
        description = "Get recent transfers of a Solana token from Solscan."
    )]
    async fn get_token_transfers(&self, params: Parameters<PagedAddressQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.token_transfers(&q.address, 1, limit).await {
            Ok(envelope) => Self::envelope_result("getting token transfers", envelope),
            Err(e) => Self::error_result("getting token transfers", &e),
        }
    }

    #[tool(
        name = "get_token_list",
        description = "Get the Solana token leaderboard from Solscan. sortBy must be one of market_cap, volume_24h, price, holder; direction one of asc, desc."
    )]
    async fn get_token_list(&self, params: Parameters<TokenListQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        let sort_by = q.sort_by.unwrap_or(TokenSortBy::MarketCap);
        let direction = q.direction.unwrap_or(SortDirection::Desc);
        match self.solscan.token_list(sort_by, direction, 1, limit).await {
            Ok(envelope) => Self::envelope_result("getting token list", envelope),
            Err(e) => Self::error_result("getting token list", &e),
        }
    }

    #[tool(
        name = "get_token_trending",
        description = "Get currently trending Solana tokens from Solscan."
    )]
    async fn get_token_trending(&self, params: Parameters<TrendingQuery>) -> CallToolResult {
        let q = params.0;
        let limit = effective_limit(q.limit);
        match self.solscan.trending_tokens(limit).await {
            Ok(envelope) => Self::envelope_result("getting trending tokens", envelope),
            Err(e) => Self::error_result("getting trending tokens", &e),
        }
    }

    #[tool(
        name = "get_chain_info",
        description = "Get Solana chain information from Solscan, including current block height and TPS."
    )]
    async fn get_chain_info(&self) -> CallToolResult {
        match self.solscan.chain_info().await {
            Ok(envelope) => Self::envelope_result("getting chain info", envelope),
            Err(e) => Self::error_result("getting chain info", &e),
        }
    }

    #[tool(
        name = "get_block_detail",
        description = "Get details of a Solana block from Solscan by slot number or block hash."
    )]
    async fn get_block_detail(&self, params: Parameters<BlockQuery>) -> CallToolResult {
        let q = params.0;
        match self.solscan.block_detail(&q.block.to_string()).await {
            Ok(envelope) => Self::envelope_result("getting block detail", envelope),
            Err(e) => Self::error_result("getting block detail", &e),
        }
    }

    #[tool(
        name = "get_block_transactions",
        description = "Get the transactions of a Solana block from Solscan by slot number or block hash."
    )]
    async fn get_block_transactions(&self, params: Parameters<BlockQuery>) -> CallToolResult {
        let q = params.0;
        match self.solscan.block_transactions(&q.block.to_string()).await {
            Ok(envelope) => Self::envelope_result("getting block transactions", envelope),
            Err(e) => Self::error_result("getting block transactions", &e),
        }
    }

    fn envelope_result(doing: &str, envelope: serde_json::Value) -> CallToolResult {
        match serde_json::to_string_pretty(&envelope) {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => Self::error_result(doing, &SolscanError::Serialization(e)),
        }
    }

    fn error_result(doing: &str, err: &SolscanError) -> CallToolResult {
        error!(%err, operation = doing, "solscan query failed");
        CallToolResult::error(vec![Content::text(format!("Error {}: {}", doing, err))])
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SolscanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_instructions(
                "Solscan MCP server for reading Solana blockchain data. \
                Query accounts, transactions, tokens, blocks and chain info; \
                every tool returns the raw Solscan response as pretty-printed JSON.",
            )
            .with_server_info(Implementation::new(
                "solscan-mcp",
                env!("CARGO_PKG_VERSION"),
            ))
    }
}
