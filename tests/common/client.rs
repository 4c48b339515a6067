//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all server endpoints.
//!
//! When API routes or request formats change, update only this file.

#![allow(dead_code)] // Each test binary uses its own subset

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// Header carrying the API key, as the server expects it.
pub const API_KEY_HEADER: &str = "X-Mcp-Key";

/// HTTP test client carrying an optional API key
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// The key attached to every request, if any
    api_key: Option<String>,
}

impl TestClient {
    /// Creates a client that sends no API key
    pub fn anonymous(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            api_key: None,
        }
    }

    /// Creates a client that attaches the given API key to every request
    pub fn with_key(base_url: String, api_key: &str) -> Self {
        let mut client = Self::anonymous(base_url);
        client.api_key = Some(api_key.to_string());
        client
    }

    async fn get(&self, path: &str) -> Response {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        request.send().await.expect("Request failed")
    }

    pub async fn home(&self) -> Response {
        self.get("/").await
    }

    pub async fn get_books(&self) -> Response {
        self.get("/books").await
    }

    pub async fn get_book(&self, id: &str) -> Response {
        self.get(&format!("/books/{}", id)).await
    }
}
