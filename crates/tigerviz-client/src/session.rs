//! Credential and token state for a TigerGraph connection.

use tigerviz_core::ConnectionConfig;

/// Explicit session state: host, graph, and credentials, optionally paired
/// with a bearer token. Passed by reference to every client operation.
///
/// Token acquisition overwrites `token` in place. Callers sharing one
/// session across concurrent refreshes get last-writer-wins on the token;
/// no synchronization is provided.
#[derive(Debug, Clone)]
pub struct Session {
    config: ConnectionConfig,
    token: Option<String>,
}

impl Session {
    /// New session with no token. Installed-query calls through
    /// [`crate::TigerGraphClient::run_installed_query`] will acquire one
    /// on first use.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            token: None,
        }
    }

    /// New session with a previously acquired token.
    pub fn with_token(config: ConnectionConfig, token: String) -> Self {
        Self {
            config,
            token: Some(token),
        }
    }

    pub fn graph(&self) -> &str {
        &self.config.graph
    }

    pub fn username(&self) -> &str {
        &self.config.username
    }

    pub fn password(&self) -> &str {
        &self.config.password
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    // ── Endpoint URLs ────────────────────────────────────────────

    /// REST++ token endpoint.
    pub fn token_url(&self) -> String {
        format!(
            "{}:{}/requesttoken",
            self.config.host, self.config.rest_port
        )
    }

    /// GSQL server interpreted-query endpoint.
    pub fn interpreted_query_url(&self) -> String {
        format!(
            "{}:{}/gsqlserver/interpreted_query",
            self.config.host, self.config.gsql_port
        )
    }

    /// REST++ installed-query endpoint for a named query.
    pub fn installed_query_url(&self, query_name: &str) -> String {
        format!(
            "{}:{}/query/{}/{}",
            self.config.host, self.config.rest_port, self.config.graph, query_name
        )
    }
}
