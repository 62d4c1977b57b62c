use std::path::PathBuf;
use thiserror::Error;

use crate::node_type::NodeKind;

/// Errors from the exchange codec and file packaging layer.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Malformed nodes blob: {0}")]
    MalformedBlob(#[source] serde_json::Error),

    #[error("Failed to serialize nodes blob: {0}")]
    BlobSerialize(#[source] serde_json::Error),

    #[error("Export record is missing required field: {0}")]
    MissingField(String),

    #[error("Exchange file has no data row: {0}")]
    EmptyFile(PathBuf),

    #[error("Failed to read or write exchange file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid delimited data: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Errors from the menu/node store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("Failed to read or write catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from node-type dispatch.
///
/// A missing fetcher is a configuration error: the registry was wired
/// without an implementation for a kind the menu actually uses. It is
/// reported immediately and never retried.
#[derive(Error, Debug)]
pub enum NodeTypeError {
    #[error("Unknown node type: {0}")]
    UnknownKind(String),

    #[error("No fetcher registered for node type: {0}")]
    MissingFetcher(NodeKind),

    #[error("Node type resource lookup failed: {0}")]
    Resource(String),
}

pub type NodeTypeResult<T> = Result<T, NodeTypeError>;
