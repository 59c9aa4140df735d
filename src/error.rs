//! Error types
//!
//! `OracleError` is returned by every host call and is always recoverable:
//! the engine applies a fallback and moves on. `LayoutError` covers the few
//! conditions that stop a run before it starts.

use crate::host::FrameId;
use thiserror::Error;

/// Failure reported by a single host call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("frame `{name}` could not be created: {reason}")]
    Creation { name: String, reason: String },

    #[error("measuring frame {frame} failed: {reason}")]
    Measurement { frame: FrameId, reason: String },

    #[error("linking frame {from} to {to} failed: {reason}")]
    Link {
        from: FrameId,
        to: FrameId,
        reason: String,
    },

    #[error("resizing frame {frame} failed: {reason}")]
    Resize { frame: FrameId, reason: String },

    #[error("styling frame {frame} failed: {reason}")]
    Style { frame: FrameId, reason: String },

    #[error("page {page} is not available: {reason}")]
    Page { page: u32, reason: String },

    #[error("unknown frame {0}")]
    UnknownFrame(FrameId),
}

impl OracleError {
    /// Short name of the error kind, used in warnings and plan records
    pub fn kind(&self) -> &'static str {
        match self {
            OracleError::Creation { .. } => "creation",
            OracleError::Measurement { .. } => "measurement",
            OracleError::Link { .. } => "link",
            OracleError::Resize { .. } => "resize",
            OracleError::Style { .. } => "style",
            OracleError::Page { .. } => "page",
            OracleError::UnknownFrame(_) => "unknown-frame",
        }
    }
}

/// Fatal error: the run cannot start or its inputs cannot be read
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("host is not available")]
    HostUnavailable,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
