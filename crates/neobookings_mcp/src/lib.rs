//! Neobookings MCP - the hotel-booking API as MCP tools
//!
//! The [`catalog`] declares every tool. Each catalog entry is an
//! [`Operation`](neobookings_core::Operation) run through the core
//! gateway, and [`server`] exposes the whole catalog over stdio.

pub mod catalog;
pub mod error;
pub mod operation;
pub mod param;
pub mod render;
pub mod server;
pub mod shape;
pub mod wire;

pub use catalog::{Category, ToolSpec};
pub use error::{McpError, Result};
pub use render::render;
pub use server::{McpServerConfig, NeobookingsMcpServer};
