//! Error types for the navigation layer.
//!
//! Resolution misses are not errors: they are reported as `false` or `None` by the operations
//! that can miss. Only environment and input failures end up here.

use std::io;
use thiserror::Error;

/// Failures that stop a navigation scope from being built or refreshed.
#[derive(Debug, Error)]
pub enum NavError {
    /// The host cannot report viewport intersections.
    #[error("intersection observation is not supported by this host")]
    ObservationUnsupported,

    /// The attention window insets leave no band of the viewport.
    #[error("attention window insets {top}% + {bottom}% leave no visible band")]
    InvalidAttentionWindow {
        /// Inset from the top edge, in percent of viewport height.
        top: u8,
        /// Inset from the bottom edge, in percent of viewport height.
        bottom: u8,
    },

    /// The document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<NavError> for io::Error {
    fn from(err: NavError) -> Self {
        match err {
            NavError::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
