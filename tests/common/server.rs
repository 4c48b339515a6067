//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own permission table and
//! catalog.

#![allow(dead_code)] // Each test binary uses its own subset

use super::constants::*;
use bookshelf_catalog_server::auth::PermissionTable;
use bookshelf_catalog_server::catalog::Catalog;
use bookshelf_catalog_server::library::{ROUTE_BOOKS, ROUTE_BOOK_BY_ID};
use bookshelf_catalog_server::server::server::make_app;
use bookshelf_catalog_server::server::{RequestsLoggingLevel, ServerConfig};
use std::collections::HashMap;
use tokio::net::TcpListener;

/// Test server instance with isolated permission table and catalog
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    // Dropping the sender triggers graceful shutdown
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Spawns a new test server on a random port with the demo catalog and
    /// the three-key permission table the tests are written against.
    pub async fn spawn() -> Self {
        let mut raw = HashMap::new();
        raw.insert(LIST_ONLY_KEY.to_string(), vec![ROUTE_BOOKS.to_string()]);
        raw.insert(GET_ONLY_KEY.to_string(), vec![ROUTE_BOOK_BY_ID.to_string()]);
        raw.insert(WILDCARD_KEY.to_string(), vec!["*".to_string()]);
        let table = PermissionTable::from_entries(raw).expect("test permission table is valid");

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: 0,
        };
        let app = make_app(config, Catalog::builtin(), table);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().expect("No local addr").port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            port,
            _shutdown_tx: shutdown_tx,
        }
    }
}
