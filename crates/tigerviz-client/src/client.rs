//! TigerGraph HTTP client: token acquisition, interpreted queries,
//! installed queries.

use reqwest::StatusCode;
use serde_json::Value;

use tigerviz_core::GraphData;

use crate::error::{ClientError, Result};
use crate::normalize;
use crate::queries;
use crate::session::Session;

/// HTTP client for a TigerGraph server.
///
/// Wraps a single `reqwest::Client`; clone is cheap. Each operation is one
/// network round trip ([`Self::run_installed_query`] may issue two,
/// strictly in sequence), with no retries, timeouts, or pooling beyond
/// what reqwest itself provides. A hung call hangs the caller.
#[derive(Clone, Default)]
pub struct TigerGraphClient {
    http: reqwest::Client,
}

impl TigerGraphClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Request a fresh bearer token for the session's graph.
    ///
    /// Stores the token on the session and returns it.
    pub async fn request_token(&self, session: &mut Session) -> Result<String> {
        let body = serde_json::json!({"graph": session.graph()});
        let response = self
            .http
            .post(session.token_url())
            .basic_auth(session.username(), Some(session.password()))
            .json(&body)
            .send()
            .await?;
        let envelope = read_envelope(response).await?;

        let token = envelope
            .pointer("/results/token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::UnexpectedShape("token response missing results.token".to_string())
            })?
            .to_string();

        tracing::debug!(graph = session.graph(), "Acquired bearer token");
        session.set_token(token.clone());
        Ok(token)
    }

    /// Fetch every vertex of the given types and every edge of the given
    /// types between them, as a normalized graph.
    pub async fn fetch_graph(
        &self,
        session: &Session,
        vertex_types: &[&str],
        edge_types: &[&str],
    ) -> Result<GraphData> {
        let program = queries::interpret_fetch_query(session.graph(), vertex_types, edge_types);
        let envelope = self.post_interpreted(session, program).await?;

        let vertices = envelope
            .pointer("/results/0/Seed")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ClientError::UnexpectedShape("fetch response missing results[0].Seed".to_string())
            })?;
        let edges = envelope
            .pointer("/results/1/edges")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ClientError::UnexpectedShape("fetch response missing results[1].edges".to_string())
            })?;

        normalize::normalize_typed(vertices, edges)
    }

    /// Run a caller-written interpreted GSQL program and normalize
    /// whatever result sets it prints.
    pub async fn run_interpreted_query(
        &self,
        session: &Session,
        program: &str,
    ) -> Result<GraphData> {
        let envelope = self.post_interpreted(session, program.to_string()).await?;
        normalize::normalize_generic(expect_results(&envelope)?)
    }

    /// Run an installed query by name. The session must already hold a
    /// valid bearer token; see [`Self::run_installed_query`] for the
    /// variant that acquires one.
    pub async fn run_query(
        &self,
        session: &Session,
        query_name: &str,
        params: Option<Value>,
    ) -> Result<GraphData> {
        tracing::debug!(graph = session.graph(), query = query_name, "Running installed query");
        let body = params.unwrap_or_else(|| serde_json::json!({}));
        let response = self
            .http
            .post(session.installed_query_url(query_name))
            .bearer_auth(session.token().unwrap_or_default())
            .json(&body)
            .send()
            .await?;
        let envelope = read_envelope(response).await?;
        normalize::normalize_generic(expect_results(&envelope)?)
    }

    /// Convenience entry point: acquire a token first when the session has
    /// none, then run the installed query. The two round trips are
    /// strictly sequential.
    pub async fn run_installed_query(
        &self,
        session: &mut Session,
        query_name: &str,
        params: Option<Value>,
    ) -> Result<GraphData> {
        if session.token().is_none() {
            self.request_token(session).await?;
        }
        self.run_query(session, query_name, params).await
    }

    async fn post_interpreted(&self, session: &Session, program: String) -> Result<Value> {
        tracing::debug!(graph = session.graph(), "Running interpreted query");
        let response = self
            .http
            .post(session.interpreted_query_url())
            .header("Content-Type", "application/json")
            .basic_auth(session.username(), Some(session.password()))
            .body(program)
            .send()
            .await?;
        read_envelope(response).await
    }
}

/// Read a response envelope: transport status first, then the body.
async fn read_envelope(response: reqwest::Response) -> Result<Value> {
    check_status(response.status())?;
    let body = response.text().await?;
    parse_envelope(&body)
}

/// Reject non-success transport statuses before any JSON parsing.
fn check_status(status: StatusCode) -> Result<()> {
    if !status.is_success() {
        return Err(ClientError::Transport {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Parse a transport-successful body and surface the service's own
/// `error: true` flag as an application error.
fn parse_envelope(body: &str) -> Result<Value> {
    let envelope: Value = serde_json::from_str(body)?;
    if envelope
        .get("error")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ClientError::Application { message });
    }
    Ok(envelope)
}

fn expect_results(envelope: &Value) -> Result<&Value> {
    envelope
        .get("results")
        .ok_or_else(|| ClientError::UnexpectedShape("response missing results".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_a_transport_error() {
        let err = check_status(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert!(matches!(err, ClientError::Transport { status: 500 }));

        let err = check_status(StatusCode::UNAUTHORIZED).unwrap_err();
        assert!(matches!(err, ClientError::Transport { status: 401 }));

        assert!(check_status(StatusCode::OK).is_ok());
    }

    #[test]
    fn error_flag_is_an_application_error() {
        let err = parse_envelope(r#"{"error": true, "message": "syntax error"}"#).unwrap_err();
        match err {
            ClientError::Application { message } => assert_eq!(message, "syntax error"),
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn clean_envelope_passes_through() {
        let envelope = parse_envelope(r#"{"error": false, "results": []}"#).unwrap();
        assert!(envelope.get("results").is_some());

        // Absent flag counts as no error.
        assert!(parse_envelope(r#"{"results": []}"#).is_ok());
    }

    #[test]
    fn unparseable_body_is_a_serialization_error() {
        let err = parse_envelope("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
