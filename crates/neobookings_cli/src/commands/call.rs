use std::sync::Arc;

use miette::{Result, miette};
use neobookings_core::{Gateway, NeobookingsConfig};
use neobookings_mcp::catalog;
use neobookings_mcp::error::McpError;
use neobookings_mcp::render;
use serde_json::{Map, Value};
use tracing::info;

use crate::output::Output;

/// Parse `--args` into the argument object of a tool call.
pub fn parse_arguments(tool: &str, raw: &str) -> std::result::Result<Map<String, Value>, McpError> {
    serde_json::from_str::<Map<String, Value>>(raw)
        .map_err(|cause| McpError::invalid_arguments(tool, raw, cause))
}

/// Run one tool against the configured upstream and print the result
pub async fn run(config: NeobookingsConfig, name: &str, raw_arguments: &str) -> Result<()> {
    let Some(tool) = catalog::find(name) else {
        return Err(McpError::tool_not_found(name).into());
    };
    let arguments = parse_arguments(name, raw_arguments)?;

    info!(tool = name, "Calling tool from the command line");
    let gateway = Gateway::new(Arc::new(config));
    let response = gateway.execute(tool, &arguments).await;

    Output::new().markdown(&render(tool, &response));

    if response.success {
        Ok(())
    } else {
        Err(miette!("{} failed: {}", name, response.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_must_be_a_json_object() {
        let arguments = parse_arguments("zone_search_rq", r#"{"order_by": "alphabetical"}"#).unwrap();
        assert_eq!(arguments["order_by"], "alphabetical");

        let error = parse_arguments("zone_search_rq", "[1, 2]").unwrap_err();
        assert!(matches!(error, McpError::InvalidArguments { .. }));
    }
}
