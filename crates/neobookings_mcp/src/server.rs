use std::sync::Arc;

use neobookings_core::{Gateway, Language, NeobookingsConfig};
use rmcp::{
    ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpErrorData, Implementation,
        JsonObject, ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
};
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::catalog::{self, ToolSpec};
use crate::error::McpError;
use crate::param::object_schema;
use crate::render::render;

/// Configuration for the MCP server
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    pub name: String,
    pub version: String,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            name: "mcp-neobookings".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Serves the tool catalog over MCP, one gateway shared by all calls.
#[derive(Clone)]
pub struct NeobookingsMcpServer {
    gateway: Gateway,
    config: McpServerConfig,
    tools: Arc<Vec<Tool>>,
}

impl NeobookingsMcpServer {
    pub fn new(gateway: Gateway) -> Self {
        Self::with_config(gateway, McpServerConfig::default())
    }

    pub fn with_config(gateway: Gateway, config: McpServerConfig) -> Self {
        let tools: Vec<Tool> = catalog::all().map(describe).collect();
        info!("Tool catalog initialized with {} tools", tools.len());
        Self {
            gateway,
            config,
            tools: Arc::new(tools),
        }
    }

    pub fn from_config(config: Arc<NeobookingsConfig>) -> Self {
        Self::new(Gateway::new(config))
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Run one tool and produce the client-facing result. Unknown tools
    /// yield an error result, never a protocol error.
    pub async fn dispatch(&self, name: &str, arguments: Map<String, Value>) -> CallToolResult {
        let Some(tool) = catalog::find(name) else {
            let error = McpError::tool_not_found(name);
            warn!(tool = name, "Unknown tool requested");
            return CallToolResult::error(vec![Content::text(error.client_text())]);
        };

        debug!(tool = name, "Dispatching tool call");
        let response = self.gateway.execute(tool, &arguments).await;
        let text = render(tool, &response);
        if response.success {
            CallToolResult::success(vec![Content::text(text)])
        } else {
            CallToolResult::error(vec![Content::text(text)])
        }
    }

    /// Run the MCP server on stdio transport
    pub async fn run_stdio(self) -> miette::Result<()> {
        info!("Starting MCP server on stdio transport");

        use tokio::io::{stdin, stdout};

        let transport = (stdin(), stdout());
        let server = rmcp::ServiceExt::serve(self, transport)
            .await
            .map_err(|e| McpError::transport_init("stdio", e))?;

        let quit_reason = server
            .waiting()
            .await
            .map_err(|e| McpError::server_stopped("stdio", e))?;

        info!("Server stopped: {:?}", quit_reason);
        Ok(())
    }
}

/// Advertised MCP tool for a catalog entry.
pub fn describe(tool: &ToolSpec) -> Tool {
    Tool::new(tool.name, tool.description, Arc::new(input_schema(tool)))
}

/// JSON Schema of a tool's arguments, `language` included.
pub fn input_schema(tool: &ToolSpec) -> JsonObject {
    let mut schema = object_schema(tool.params);
    let language = json!({
        "type": "string",
        "description": "Language code for the request",
        "enum": Language::codes(),
        "default": "es",
    });
    if let Some(Value::Object(properties)) = schema.get_mut("properties") {
        properties.insert("language".into(), language.clone());
        if let Some(alias) = tool.language_alias {
            properties.insert(alias.into(), language);
        }
    }
    schema
}

impl ServerHandler for NeobookingsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
            instructions: Some(
                "Neobookings hotel-booking API: availability, baskets, budgets, orders, packages, \
                 inventory and rewards. Every tool accepts an optional `language`."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpErrorData> {
        Ok(ListToolsResult {
            tools: self.tools.as_ref().clone(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpErrorData> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.dispatch(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_schema_is_closed_and_offers_language() {
        for tool in catalog::all() {
            let schema = input_schema(tool);
            assert_eq!(schema["type"], "object", "{}", tool.name);
            assert_eq!(schema["additionalProperties"], false, "{}", tool.name);
            assert_eq!(
                schema["properties"]["language"]["enum"],
                json!(["es", "en", "fr", "de", "it", "pt"])
            );
        }
    }

    #[test]
    fn required_arguments_are_advertised() {
        let schema = input_schema(catalog::find("order_payment_create_rq").unwrap());
        assert_eq!(
            schema["required"],
            json!(["order_id", "payment_method", "amount", "currency", "description"])
        );

        let modify = input_schema(catalog::find("order_data_modify_rq").unwrap());
        assert!(modify["properties"].get("request_language").is_some());
    }

    #[test]
    fn server_info_names_the_server() {
        let server = NeobookingsMcpServer::new(Gateway::new(Arc::new(NeobookingsConfig::default())));
        let info = server.get_info();
        assert_eq!(info.server_info.name, "mcp-neobookings");
        assert!(info.capabilities.tools.is_some());
        assert_eq!(server.tools().len(), 51);
    }
}
