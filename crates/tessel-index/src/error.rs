//! Error types for index construction.

use std::error::Error;
use std::fmt;

/// Errors from building a point-location index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// A site cannot be triangulated (non-finite or out of the kernel's range).
    InvalidSite {
        /// Position of the site in the input.
        index: usize,
        /// Description of the rejection.
        reason: String,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSite { index, reason } => write!(f, "invalid site {index}: {reason}"),
        }
    }
}

impl Error for IndexError {}
