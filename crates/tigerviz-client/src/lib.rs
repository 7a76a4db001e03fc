//! tigerviz-client: TigerGraph HTTP client and result normalization.
//!
//! Talks to a TigerGraph server over its REST++ (:9000) and GSQL (:14240)
//! HTTP endpoints and reshapes the weakly-typed JSON result sets into the
//! `{nodes, links}` contract defined in `tigerviz_core`. Normalization
//! itself is pure; the only side effect anywhere is the network call.

pub mod client;
pub mod error;
pub mod normalize;
pub mod queries;
pub mod session;

pub use client::TigerGraphClient;
pub use error::{ClientError, Result};
pub use session::Session;
