use rmcp::ServiceExt;
use solscan_mcp::solscan::DEFAULT_API_URL;
use solscan_mcp::{SolscanClient, SolscanMcpServer};
use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the MCP framing.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,solscan_mcp=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let api_url = env::var("SOLSCAN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    info!(url = %api_url, "initializing solscan client");

    let client = SolscanClient::new(api_url)?;
    let server = SolscanMcpServer::new(client);

    info!("starting MCP server on stdio transport");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| anyhow::anyhow!("failed to initialize server: {}", e))?;

    info!("server initialized successfully");

    service
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    info!("server shutdown complete");

    Ok(())
}
