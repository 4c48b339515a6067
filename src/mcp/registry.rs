//! MCP Tool Registry
//!
//! Maps each registered tool to the HTTP route template it republishes, and
//! answers visibility queries against the permission table.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::context::ToolContext;
use super::protocol::{McpError, ToolDefinition, ToolsCallResult};
use crate::auth::{AllowedRoute, PermissionTable};

/// Result type for tool execution
pub type ToolResult = Result<ToolsCallResult, McpError>;

/// Boxed future for async tool execution
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool handler function type
pub type ToolHandler = Arc<dyn Fn(ToolContext, Value) -> ToolFuture + Send + Sync>;

/// A registered tool with metadata and handler
pub struct RegisteredTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    /// Route template this tool republishes; visibility follows the same
    /// table entry that guards the route itself.
    pub route: String,
    pub handler: ToolHandler,
}

/// Registry for MCP tools
pub struct McpRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl McpRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register_tool(&mut self, tool: RegisteredTool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Tools visible to the given API key.
    ///
    /// A missing or unknown key yields an empty list rather than an error:
    /// listing is a discovery query that MCP clients may issue before they
    /// authenticate, unlike route authorization, which fails closed on the
    /// same condition.
    pub fn visible_tools(
        &self,
        api_key: Option<&str>,
        table: &PermissionTable,
    ) -> Vec<ToolDefinition> {
        let allowed = match api_key.and_then(|key| table.allowed_routes(key)) {
            Some(allowed) => allowed,
            None => return Vec::new(),
        };

        self.tools
            .values()
            .filter(|tool| {
                allowed.iter().any(|r| match r {
                    AllowedRoute::Any => true,
                    AllowedRoute::Route(template) => *template == tool.route,
                })
            })
            .map(|tool| ToolDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                input_schema: tool.input_schema.clone(),
            })
            .collect()
    }

    /// Get a tool by name. No visibility filter here: execution goes through
    /// the library, which enforces the route permission itself.
    pub fn get_tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for McpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for registering a tool
pub struct ToolBuilder {
    name: String,
    description: String,
    input_schema: Value,
    route: String,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            route: route.into(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredTool
    where
        F: Fn(ToolContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        RegisteredTool {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema,
            route: self.route,
            handler: Arc::new(move |ctx, params| Box::pin(handler(ctx, params))),
        }
    }
}
