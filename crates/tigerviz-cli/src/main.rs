//! CLI entry point for the tigerviz TigerGraph connector.
//!
//! Queries a TigerGraph server and writes the normalized `{nodes, links}`
//! JSON to stdout, ready to feed a force-directed graph renderer. Logs go
//! to stderr so the JSON stream stays clean.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use tigerviz_client::{Session, TigerGraphClient};
use tigerviz_core::ConnectionConfig;

#[derive(Parser)]
#[command(name = "tigerviz")]
#[command(about = "Query TigerGraph and emit a normalized node/link graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: tigerviz).
    #[arg(short, long, default_value = "tigerviz", global = true)]
    config: String,

    /// Override the graph name from config.
    #[arg(long, global = true)]
    graph: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all vertices and edges of the given types.
    Fetch {
        /// Vertex type to seed from (repeatable).
        #[arg(long = "vertex-type", required = true)]
        vertex_types: Vec<String>,
        /// Edge type to traverse (repeatable).
        #[arg(long = "edge-type", required = true)]
        edge_types: Vec<String>,
    },
    /// Run an interpreted GSQL program read from stdin.
    Interpret,
    /// Run an installed query by name (acquires a token automatically).
    Query {
        /// Name of the installed query.
        name: String,
        /// Query parameters as a JSON object.
        #[arg(long)]
        params: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut connection = load_connection_config(&cli.config);
    if let Some(graph) = &cli.graph {
        connection.graph = graph.clone();
    }

    let client = TigerGraphClient::new();
    let mut session = Session::new(connection);

    let graph = match cli.command {
        Command::Fetch {
            vertex_types,
            edge_types,
        } => {
            let vertex_types: Vec<&str> = vertex_types.iter().map(String::as_str).collect();
            let edge_types: Vec<&str> = edge_types.iter().map(String::as_str).collect();
            client
                .fetch_graph(&session, &vertex_types, &edge_types)
                .await?
        }
        Command::Interpret => {
            let program = std::io::read_to_string(std::io::stdin())?;
            client.run_interpreted_query(&session, &program).await?
        }
        Command::Query { name, params } => {
            let params = params.as_deref().map(serde_json::from_str).transpose()?;
            client.run_installed_query(&mut session, &name, params).await?
        }
    };

    println!("{}", serde_json::to_string(&graph)?);
    Ok(())
}

fn load_connection_config(file_prefix: &str) -> ConnectionConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("TIGERVIZ")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => ConnectionConfig {
            host: c
                .get_string("host")
                .unwrap_or_else(|_| "http://localhost".to_string()),
            graph: c.get_string("graph").unwrap_or_default(),
            username: c
                .get_string("username")
                .unwrap_or_else(|_| "tigergraph".to_string()),
            password: c.get_string("password").unwrap_or_default(),
            rest_port: c
                .get_int("rest_port")
                .ok()
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(9000),
            gsql_port: c
                .get_int("gsql_port")
                .ok()
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(14240),
        },
        Err(_) => ConnectionConfig::default(),
    }
}
