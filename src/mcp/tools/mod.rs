//! MCP Tools
//!
//! Tool implementations for the book catalog.

pub mod books;

use super::registry::McpRegistry;

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut McpRegistry) {
    books::register_tools(registry);
}
