pub mod config;
pub mod http_client;
pub mod index;
pub mod ingest;
pub mod model;
pub mod query;
pub mod request;
pub mod source;

pub use index::Index;
pub use ingest::{IngestOptions, IngestSummary, IngestionFailure, load, load_with_summary};
pub use query::TeamStats;
pub use request::{Reply, Request, answer, parse_request};
