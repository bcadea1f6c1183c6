//! Error types for the conversion pipeline.

use thiserror::Error;

/// Result type used by every conversion stage.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Everything that can stop a conversion.
///
/// Errors are raised where they are detected and bubble up unchanged; the
/// converter never retries and never cleans up after a failed write.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input is not well-formed XML
    #[error("failed to parse document: {0}")]
    Parse(#[from] roxmltree::Error),

    /// The bytes do not decode in the document's encoding
    #[error("document is not valid {encoding}")]
    InvalidEncoding { encoding: &'static str },

    /// A numeric array contains a token that is not a number
    #[error("invalid number `{value}` in {context}")]
    InvalidNumber { context: String, value: String },

    /// A `<matrix>` element does not hold exactly 16 values
    #[error("matrix in node {node} holds {count} values, expected 16")]
    InvalidMatrix { node: String, count: usize },

    /// A required element or attribute is absent
    #[error("missing {0}")]
    MissingData(String),

    /// The document uses a feature outside the single-mesh subset
    #[error("unsupported input: {0}")]
    Unsupported(String),

    /// A flat array is not aligned to its group size
    #[error("{what} has {len} values, which is not a multiple of {stride}")]
    Misaligned {
        what: &'static str,
        len: usize,
        stride: usize,
    },

    /// A face references an attribute that does not exist
    #[error("{attribute} index {index} out of bounds ({count} available)")]
    IndexOutOfRange {
        attribute: &'static str,
        index: usize,
        count: usize,
    },

    /// Reading the input or writing an output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingData(what.into())
    }

    /// True when the input itself could not be read as COLLADA text.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_)
                | Self::InvalidEncoding { .. }
                | Self::InvalidNumber { .. }
                | Self::InvalidMatrix { .. }
        )
    }

    /// True for the index-space failures (misalignment or out-of-range).
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            Self::Misaligned { .. } | Self::IndexOutOfRange { .. }
        )
    }
}
