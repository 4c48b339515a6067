use axum::extract::FromRef;

use crate::auth::PermissionTable;
use crate::library::Library;
use crate::mcp::handler::McpState;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedLibrary = Arc<Library>;
pub type GuardedPermissionTable = Arc<PermissionTable>;
pub type GuardedMcpState = Arc<McpState>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub library: GuardedLibrary,
    pub permission_table: GuardedPermissionTable,
    pub mcp_state: GuardedMcpState,
}

impl FromRef<ServerState> for GuardedLibrary {
    fn from_ref(input: &ServerState) -> Self {
        input.library.clone()
    }
}

impl FromRef<ServerState> for GuardedPermissionTable {
    fn from_ref(input: &ServerState) -> Self {
        input.permission_table.clone()
    }
}

impl FromRef<ServerState> for GuardedMcpState {
    fn from_ref(input: &ServerState) -> Self {
        input.mcp_state.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
