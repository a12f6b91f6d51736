use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::util::UrlValidationError;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by the subscription list.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the channel file failed
    #[error("Channel file error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The address to subscribe to is not a usable feed URL
    #[error("Cannot subscribe to '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: UrlValidationError,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of subscribing to a feed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadySubscribed,
}

/// Result of unsubscribing from a feed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotSubscribed,
}
