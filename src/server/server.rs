use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::info;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{api_key::ApiKey, log_requests, state::*, ServerConfig};
use crate::auth::{Authorizer, PermissionTable};
use crate::catalog::Catalog;
use crate::library::{Library, LibraryError, ROUTE_BOOKS, ROUTE_BOOK_BY_ID};
use crate::mcp::handler::{create_mcp_state, mcp_handler};

#[derive(Serialize)]
struct ServerStats {
    pub message: String,
    pub version: String,
    pub uptime: String,
}

/// Error body shape shared by every failed request.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = match self {
            // The original wire contract answers 403 for unknown keys too;
            // the enum still keeps the two conditions distinct internally.
            LibraryError::Unauthenticated | LibraryError::Forbidden => StatusCode::FORBIDDEN,
            LibraryError::BookNotFound(_) => StatusCode::NOT_FOUND,
        };
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        message: "Welcome to the Book Management System!".to_string(),
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        uptime: format_uptime(state.start_time.elapsed()),
    };
    Json(stats)
}

async fn list_books(api_key: Option<ApiKey>, State(library): State<GuardedLibrary>) -> Response {
    match library.list_books(api_key.as_ref().map(ApiKey::as_str)) {
        Ok(books) => Json(books).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_book(
    api_key: Option<ApiKey>,
    State(library): State<GuardedLibrary>,
    Path(id): Path<String>,
) -> Response {
    match library.get_book(api_key.as_ref().map(ApiKey::as_str), &id) {
        Ok(book) => Json(book).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn make_app(config: ServerConfig, catalog: Catalog, table: PermissionTable) -> Router {
    let table = Arc::new(table);
    let authorizer = Authorizer::new(table.clone());
    let library = Arc::new(Library::new(Arc::new(catalog), authorizer));
    let mcp_state = Arc::new(create_mcp_state());

    let state = ServerState {
        config,
        start_time: Instant::now(),
        library,
        permission_table: table,
        mcp_state,
    };

    Router::new()
        .route("/", get(home))
        .route(ROUTE_BOOKS, get(list_books))
        .route(ROUTE_BOOK_BY_ID, get(get_book))
        .route("/mcp", get(mcp_handler))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(
    config: ServerConfig,
    catalog: Catalog,
    table: PermissionTable,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog, table);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
