//! Error types for filter encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a filter string.
#[derive(Error, Debug)]
pub enum FilterError {
    /// An aggregation handed to the encoder (or a toggle) had an empty field name.
    /// `index` is the position of the aggregation in the input slice.
    #[error("Invalid aggregation at index {index}: field name is empty")]
    InvalidAggregation { index: usize },

    /// The input string was not a valid filter.
    /// `clause` is the 0-based clause index, `position` the byte offset in the input.
    #[error("Filter parse error in clause {clause} at byte {position}: {message}")]
    Parse {
        clause: usize,
        position: usize,
        message: String,
    },

    /// Aggregation or settings JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout refine-core.
pub type Result<T> = std::result::Result<T, FilterError>;
