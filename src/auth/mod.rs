//! API key authorization.
//!
//! Routes are guarded by a static table mapping each API key to the route
//! templates it may reach. The table is built once at startup from config
//! and injected into everything that checks it.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Sentinel string accepted in config allow-lists meaning "every route".
pub const WILDCARD_ROUTE: &str = "*";

/// A route a key is allowed to reach. The wildcard is a dedicated variant,
/// not a pattern: `Route` values only ever match by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllowedRoute {
    /// A route template, e.g. `/books/{id}`.
    Route(String),
    /// Every route, registered or not.
    Any,
}

impl AllowedRoute {
    pub fn parse(raw: &str) -> Self {
        if raw == WILDCARD_ROUTE {
            AllowedRoute::Any
        } else {
            AllowedRoute::Route(raw.to_string())
        }
    }
}

/// Immutable mapping from API key to its allow-list.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    entries: HashMap<String, Vec<AllowedRoute>>,
}

impl PermissionTable {
    /// Build the table from raw config entries. Every allow-list must be
    /// non-empty; an empty list is a config mistake (a key that can reach
    /// nothing should not exist) and is rejected.
    pub fn from_entries(raw: HashMap<String, Vec<String>>) -> Result<Self> {
        let mut entries = HashMap::with_capacity(raw.len());
        for (key, routes) in raw {
            if routes.is_empty() {
                bail!("API key {:?} has an empty allow-list", key);
            }
            let routes = routes.iter().map(|r| AllowedRoute::parse(r)).collect();
            entries.insert(key, routes);
        }
        Ok(Self { entries })
    }

    /// The allow-list for a key, or `None` for an unknown key.
    pub fn allowed_routes(&self, api_key: &str) -> Option<&[AllowedRoute]> {
        self.entries.get(api_key).map(Vec::as_slice)
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The key is missing or not present in the table.
    #[error("Invalid API Key")]
    Unauthenticated,
    /// The key exists but its allow-list does not cover the route.
    #[error("API key does not have permission for this endpoint")]
    Forbidden,
}

/// Pure allow/deny decision over an API key and a requested route template.
#[derive(Clone)]
pub struct Authorizer {
    table: Arc<PermissionTable>,
}

impl Authorizer {
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    /// Decide whether `api_key` may reach `route`.
    ///
    /// `route` must be the template the endpoint was registered under
    /// (`/books/{id}`), never an instantiated path: permission is granted
    /// per endpoint shape, not per item.
    pub fn authorize(&self, api_key: Option<&str>, route: &str) -> Result<(), AccessError> {
        let api_key = api_key.ok_or(AccessError::Unauthenticated)?;
        let allowed = self
            .table
            .allowed_routes(api_key)
            .ok_or(AccessError::Unauthenticated)?;

        if allowed.contains(&AllowedRoute::Any) {
            return Ok(());
        }

        let granted = allowed
            .iter()
            .any(|r| matches!(r, AllowedRoute::Route(template) if template == route));
        if granted {
            Ok(())
        } else {
            Err(AccessError::Forbidden)
        }
    }
}
