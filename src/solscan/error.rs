use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolscanError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("API Request Failed: {status} {status_text}")]
    RequestFailed { status: u16, status_text: String },

    #[error("API returned unsuccessful response for {context}")]
    Unsuccessful { context: String },

    #[error("API returned unsuccessful response or missing data for signature: {signature}")]
    MissingTransaction { signature: String },

    #[error("Invalid response from Solscan: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolscanError>;
