//! Integration tests for tigerviz-client against a live TigerGraph server.
//!
//! These expect a local TigerGraph with a "social" graph loaded (the
//! standard Social Network tutorial schema works). Credentials come from
//! TIGERVIZ_PASSWORD; host defaults to http://localhost.
//!
//! Run with: cargo test --package tigerviz-client --test integration -- --ignored

use tigerviz_client::{ClientError, Session, TigerGraphClient};
use tigerviz_core::ConnectionConfig;

fn local_session() -> Session {
    Session::new(ConnectionConfig {
        host: std::env::var("TIGERVIZ_HOST").unwrap_or_else(|_| "http://localhost".to_string()),
        graph: "social".to_string(),
        password: std::env::var("TIGERVIZ_PASSWORD").unwrap_or_default(),
        ..ConnectionConfig::default()
    })
}

#[tokio::test]
#[ignore = "requires live TigerGraph"]
async fn test_request_token_updates_session() {
    let client = TigerGraphClient::new();
    let mut session = local_session();

    let token = client.request_token(&mut session).await.unwrap();
    assert!(!token.is_empty());
    assert_eq!(session.token(), Some(token.as_str()));
}

#[tokio::test]
#[ignore = "requires live TigerGraph"]
async fn test_fetch_graph_returns_nodes_and_links() {
    let client = TigerGraphClient::new();
    let session = local_session();

    let graph = client
        .fetch_graph(&session, &["person"], &["friendship"])
        .await
        .unwrap();
    assert!(!graph.nodes.is_empty());
    for node in &graph.nodes {
        assert_eq!(node.id, format!("{}_{}", node.v_type, node.v_id));
    }
}

#[tokio::test]
#[ignore = "requires live TigerGraph"]
async fn test_interpreted_query_surfaces_syntax_errors() {
    let client = TigerGraphClient::new();
    let session = local_session();

    let err = client
        .run_interpreted_query(&session, "INTERPRET QUERY () FOR GRAPH social { nonsense }")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Application { .. }));
}

#[tokio::test]
#[ignore = "requires live TigerGraph"]
async fn test_installed_query_acquires_token_on_first_use() {
    let client = TigerGraphClient::new();
    let mut session = local_session();
    assert_eq!(session.token(), None);

    // Whatever the query outcome, the convenience path must have acquired
    // a token before issuing it.
    let _ = client.run_installed_query(&mut session, "neighbors", None).await;
    assert!(session.token().is_some());
}
