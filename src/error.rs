//! Error types for board construction and configuration loading.

use crate::board::coord::{NodeId, NodeKind, RoadId};

/// Errors raised while naming coordinates or assembling a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{kind} coordinate ({row}, {col}) is outside the row-width table")]
    OutOfBounds { kind: NodeKind, row: i32, col: i32 },

    #[error("invalid board configuration: {0}")]
    InvalidConfiguration(String),

    #[error("duplicate node '{0}'")]
    DuplicateNode(NodeId),

    #[error("duplicate road between '{0}' and '{1}'")]
    DuplicateEdge(NodeId, NodeId),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("unknown road '{0}'")]
    UnknownRoad(RoadId),

    #[error("node '{id}' is not a {expected} node")]
    KindMismatch { id: NodeId, expected: NodeKind },

    #[error("invalid node identifier: '{0}'")]
    InvalidIdentifier(String),
}

/// Errors raised while loading a [`BoardConfig`](crate::config::BoardConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse board config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Board(#[from] BoardError),
}
