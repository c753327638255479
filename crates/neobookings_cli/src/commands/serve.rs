use std::sync::Arc;

use miette::Result;
use neobookings_core::NeobookingsConfig;
use neobookings_mcp::NeobookingsMcpServer;
use tracing::info;

/// Serve every tool over stdio until the client disconnects
pub async fn run(config: NeobookingsConfig) -> Result<()> {
    info!(
        base_url = %config.api.base_url,
        token_cache = config.token_cache.enabled,
        "Starting mcp-neobookings"
    );
    let server = NeobookingsMcpServer::from_config(Arc::new(config));
    server.run_stdio().await
}
