//! MCP Tool Execution Context
//!
//! Provides access to server state for tool implementations.

use std::sync::Arc;

use crate::library::Library;

/// Context provided to tool handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// The API key the WebSocket connection was opened with, if any.
    /// Tools pass it through to the library, which makes the access call.
    pub api_key: Option<String>,

    /// Access to catalog reads
    pub library: Arc<Library>,
}

impl ToolContext {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}
