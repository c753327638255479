use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::{self, Category};

#[derive(Error, Diagnostic, Debug)]
pub enum McpError {
    #[error("Transport initialization failed")]
    #[diagnostic(
        code(neobookings::mcp::transport_init_failed),
        help("Failed to initialize {transport_type} transport")
    )]
    TransportInitFailed {
        transport_type: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Server stopped unexpectedly")]
    #[diagnostic(
        code(neobookings::mcp::server_stopped),
        help("The {transport_type} session ended with an error")
    )]
    ServerStopped {
        transport_type: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Tool not registered")]
    #[diagnostic(
        code(neobookings::mcp::tool_not_registered),
        help("Tool '{tool_name}' is not registered. Categories: {}", categories.join(", "))
    )]
    ToolNotRegistered {
        tool_name: String,
        categories: Vec<String>,
        did_you_mean: Option<String>,
    },

    #[error("Invalid tool arguments")]
    #[diagnostic(
        code(neobookings::mcp::invalid_arguments),
        help("Tool '{tool_name}' expects a JSON object of arguments")
    )]
    InvalidArguments {
        tool_name: String,
        #[source_code]
        provided: String,
        #[source]
        cause: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, McpError>;

impl McpError {
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        let did_you_mean = catalog::suggest(&name).map(str::to_string);
        let categories = Category::ALL
            .iter()
            .map(|category| format!("{} ({} tools)", category.label(), category.tools().len()))
            .collect();

        Self::ToolNotRegistered {
            tool_name: name,
            categories,
            did_you_mean,
        }
    }

    pub fn invalid_arguments(tool_name: impl Into<String>, provided: impl Into<String>, cause: serde_json::Error) -> Self {
        Self::InvalidArguments {
            tool_name: tool_name.into(),
            provided: provided.into(),
            cause,
        }
    }

    pub fn transport_init(
        transport_type: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::TransportInitFailed {
            transport_type: transport_type.into(),
            cause: Box::new(cause),
        }
    }

    pub fn server_stopped(
        transport_type: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ServerStopped {
            transport_type: transport_type.into(),
            cause: Box::new(cause),
        }
    }

    /// Text returned to an MCP client that asked for an unknown tool.
    pub fn client_text(&self) -> String {
        match self {
            Self::ToolNotRegistered {
                tool_name,
                categories,
                did_you_mean,
            } => {
                let mut text = format!("Unknown tool: {}\n\nAvailable categories:\n", tool_name);
                for category in categories {
                    text.push_str(&format!("- {}\n", category));
                }
                if let Some(suggestion) = did_you_mean {
                    text.push_str(&format!("\nDid you mean '{}'?", suggestion));
                }
                text
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn tool_not_found_with_suggestion() {
        let error = McpError::tool_not_found("hotel_serch_rq");

        if let McpError::ToolNotRegistered {
            did_you_mean,
            categories,
            ..
        } = &error
        {
            assert_eq!(did_you_mean.as_deref(), Some("hotel_search_rq"));
            assert_eq!(categories.len(), 9);
        } else {
            panic!("Wrong error type");
        }

        let text = error.client_text();
        assert!(text.starts_with("Unknown tool: hotel_serch_rq"));
        assert!(text.contains("- Hotel & Inventory (15 tools)"));
        assert!(text.ends_with("Did you mean 'hotel_search_rq'?"));
    }

    #[test]
    fn diagnostics_render_help() {
        let error = McpError::tool_not_found("nothing_like_it");
        let output = format!("{:?}", Report::new(error));
        assert!(output.contains("tool_not_registered"));
        assert!(output.contains("Basket Management"));
    }
}
