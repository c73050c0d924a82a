pub mod server;
pub mod solscan;

pub use server::SolscanMcpServer;
pub use solscan::{SolscanClient, SolscanError};
