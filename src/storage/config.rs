use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the PostgreSQL connection
pub struct DatabaseConfig {
    /// Connection URL
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}
