//! MCP (Model Context Protocol) adapter
//!
//! Republishes the catalog read endpoints as MCP tools over a WebSocket
//! transport at `/mcp`. Tool visibility and tool execution are both decided
//! by the same permission table that guards the HTTP routes: each tool is
//! registered with the route template it republishes, and a key sees exactly
//! the tools whose routes it may reach.

pub mod context;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod tools;

pub use handler::mcp_handler;
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::McpRegistry;
