use thiserror::Error;

/// Errors produced while building or validating a [`crate::SuffixTree`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuffixTreeError {
    /// The text passed to `set_text` contains the reserved end-marker byte.
    #[error("input text contains the reserved end marker byte {marker:#04x}")]
    InvalidInput {
        /// The end-marker byte that was found in the input.
        marker: u8,
    },

    /// `check_suffix_links` found a node whose suffix link does not point where it should.
    #[error("structural error: {reason}")]
    StructuralError {
        /// Description of the violated invariant.
        reason: String,
    },

    /// A construction-time invariant was violated. This indicates a bug in the
    /// builder, not a caller mistake.
    #[error("internal suffix tree invariant violated: {reason}")]
    InternalError {
        /// Description of what went wrong.
        reason: String,
    },
}

impl SuffixTreeError {
    pub(crate) fn internal(reason: impl Into<String>) -> Self {
        Self::InternalError {
            reason: reason.into(),
        }
    }

    pub(crate) fn structural(reason: impl Into<String>) -> Self {
        Self::StructuralError {
            reason: reason.into(),
        }
    }
}

/// A specialized `Result` for suffix tree operations.
pub type Result<T> = std::result::Result<T, SuffixTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = SuffixTreeError::InvalidInput { marker: 0x03 };
        assert_eq!(
            err.to_string(),
            "input text contains the reserved end marker byte 0x03"
        );

        let err = SuffixTreeError::structural("node 4 has no suffix link");
        assert_eq!(err.to_string(), "structural error: node 4 has no suffix link");

        let err = SuffixTreeError::internal("missing suffix link target");
        assert_eq!(
            err.to_string(),
            "internal suffix tree invariant violated: missing suffix link target"
        );
    }
}
