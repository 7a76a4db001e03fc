//! Connection configuration for a TigerGraph server.

use serde::Deserialize;

/// Connection settings for one TigerGraph server and graph.
///
/// Loaded from `tigerviz.toml` or `TIGERVIZ__`-prefixed environment
/// variables by the CLI; library callers can build it directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Server base URL including scheme (e.g. "http://localhost").
    #[serde(default = "default_host")]
    pub host: String,

    /// Name of the graph to query.
    #[serde(default)]
    pub graph: String,

    /// Username for Basic auth.
    #[serde(default = "default_username")]
    pub username: String,

    /// Password for Basic auth.
    #[serde(default)]
    pub password: String,

    /// REST++ port (token and installed-query endpoints).
    #[serde(default = "default_rest_port")]
    pub rest_port: u16,

    /// GSQL server port (interpreted-query endpoint).
    #[serde(default = "default_gsql_port")]
    pub gsql_port: u16,
}

fn default_host() -> String {
    "http://localhost".to_string()
}

fn default_username() -> String {
    "tigergraph".to_string()
}

fn default_rest_port() -> u16 {
    9000
}

fn default_gsql_port() -> u16 {
    14240
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            graph: String::new(),
            username: default_username(),
            password: String::new(),
            rest_port: default_rest_port(),
            gsql_port: default_gsql_port(),
        }
    }
}
