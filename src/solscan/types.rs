use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sizes the upstream API accepts. Anything else degrades to 10
/// instead of erroring, matching the upstream contract.
const VALID_LIMITS: [u32; 4] = [10, 20, 30, 40];

pub const DEFAULT_LIMIT: u32 = 10;

/// Clamps a requested page size to the allowed set, silently falling
/// back to the default for anything outside it.
pub fn effective_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(l) if VALID_LIMITS.contains(&l) => l,
        _ => DEFAULT_LIMIT,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SignatureQuery {
    /// Base58 transaction signature
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddressQuery {
    /// Base58 account or token mint address
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PagedAddressQuery {
    /// Base58 account or token mint address
    pub address: String,
    /// Page size, one of 10, 20, 30, 40 (defaults to 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransferQuery {
    /// Base58 account address
    pub address: String,
    /// Page size, one of 10, 20, 30, 40 (defaults to 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Filter out transfers flagged as spam (defaults to true)
    #[serde(rename = "removeSpam", skip_serializing_if = "Option::is_none")]
    pub remove_spam: Option<bool>,
    /// Filter out zero-amount transfers (defaults to true)
    #[serde(rename = "excludeAmountZero", skip_serializing_if = "Option::is_none")]
    pub exclude_amount_zero: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrendingQuery {
    /// Page size, one of 10, 20, 30, 40 (defaults to 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TokenListQuery {
    /// Page size, one of 10, 20, 30, 40 (defaults to 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Leaderboard sort key (defaults to market_cap)
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<TokenSortBy>,
    /// Sort direction (defaults to desc)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Closed set of leaderboard sort keys. Anything outside it is rejected
/// during schema deserialization, before any request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TokenSortBy {
    #[serde(rename = "market_cap")]
    MarketCap,
    #[serde(rename = "volume_24h")]
    Volume24h,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "holder")]
    Holder,
}

impl TokenSortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSortBy::MarketCap => "market_cap",
            TokenSortBy::Volume24h => "volume_24h",
            TokenSortBy::Price => "price",
            TokenSortBy::Holder => "holder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BlockQuery {
    /// Block slot number, or a block hash string
    pub block: BlockId,
}

/// The upstream block endpoints accept either a slot number or a hash.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum BlockId {
    Slot(u64),
    Hash(String),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Slot(slot) => write!(f, "{}", slot),
            BlockId::Hash(hash) => write!(f, "{}", hash),
        }
    }
}
