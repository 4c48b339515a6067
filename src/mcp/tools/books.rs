//! Book Tools
//!
//! Tools republishing the catalog read endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::library::{LibraryError, ROUTE_BOOKS, ROUTE_BOOK_BY_ID};
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register book tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(books_list_tool());
    registry.register_tool(books_get_tool());
}

/// Access failures become protocol errors; a missing book is a soft failure
/// reported in the tool result.
fn library_error_to_tool_result(err: LibraryError) -> Result<ToolsCallResult, McpError> {
    match err {
        LibraryError::Unauthenticated => Err(McpError::Unauthorized),
        LibraryError::Forbidden => Err(McpError::PermissionDenied(err.to_string())),
        LibraryError::BookNotFound(_) => Ok(ToolsCallResult::error(err.to_string())),
    }
}

// ============================================================================
// books.list
// ============================================================================

fn books_list_tool() -> RegisteredTool {
    ToolBuilder::new("books.list", ROUTE_BOOKS)
        .description("List every book in the catalog")
        .build(books_list_handler)
}

async fn books_list_handler(ctx: ToolContext, _params: Value) -> ToolResult {
    match ctx.library.list_books(ctx.api_key()) {
        Ok(books) => {
            ToolsCallResult::json(&books).map_err(|e| McpError::InternalError(e.to_string()))
        }
        Err(err) => library_error_to_tool_result(err),
    }
}

// ============================================================================
// books.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct BooksGetParams {
    id: String,
}

fn books_get_tool() -> RegisteredTool {
    ToolBuilder::new("books.get", ROUTE_BOOK_BY_ID)
        .description("Read a single book by its id")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Book id"
                }
            },
            "required": ["id"]
        }))
        .build(books_get_handler)
}

async fn books_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: BooksGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    match ctx.library.get_book(ctx.api_key(), &params.id) {
        Ok(book) => ToolsCallResult::json(book).map_err(|e| McpError::InternalError(e.to_string())),
        Err(err) => library_error_to_tool_result(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authorizer, PermissionTable};
    use crate::catalog::Catalog;
    use crate::library::Library;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn test_context(api_key: Option<&str>) -> ToolContext {
        let mut raw = HashMap::new();
        raw.insert("list-key".to_string(), vec![ROUTE_BOOKS.to_string()]);
        raw.insert("admin-key".to_string(), vec!["*".to_string()]);
        let table = Arc::new(PermissionTable::from_entries(raw).unwrap());
        let library = Library::new(Arc::new(Catalog::builtin()), Authorizer::new(table));
        ToolContext {
            api_key: api_key.map(str::to_string),
            library: Arc::new(library),
        }
    }

    #[tokio::test]
    async fn list_handler_returns_books() {
        let result = books_list_handler(test_context(Some("list-key")), serde_json::json!({}))
            .await
            .unwrap();
        assert!(result.is_error.is_none());
    }

    #[tokio::test]
    async fn list_handler_without_key_is_unauthorized() {
        let result = books_list_handler(test_context(None), serde_json::json!({})).await;
        assert!(matches!(result, Err(McpError::Unauthorized)));
    }

    #[tokio::test]
    async fn get_handler_denied_for_scoped_key() {
        let result = books_get_handler(
            test_context(Some("list-key")),
            serde_json::json!({"id": "1"}),
        )
        .await;
        assert!(matches!(result, Err(McpError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn get_handler_missing_book_is_soft_error() {
        let result = books_get_handler(
            test_context(Some("admin-key")),
            serde_json::json!({"id": "99"}),
        )
        .await
        .unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn get_handler_rejects_bad_params() {
        let result = books_get_handler(test_context(Some("admin-key")), serde_json::json!({})).await;
        assert!(matches!(result, Err(McpError::InvalidParams(_))));
    }
}
