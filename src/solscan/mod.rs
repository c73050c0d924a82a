pub mod client;
pub mod error;
pub mod types;

pub use client::{SolscanClient, DEFAULT_API_URL};
pub use error::SolscanError;
pub use types::*;
