// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Engine Error Types
 * Error taxonomy for the context analysis engine
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Engine error type covering the full failure taxonomy
#[derive(Error, Debug)]
pub enum EngineError {
    /// Caller passed an absent input reference across a request boundary
    #[error("Invalid input: request carried no text to analyze")]
    InvalidInput,

    /// Analysis was attempted before a knowledge base was installed
    #[error("Knowledge base not loaded: install rule and payload data before analyzing")]
    DataNotLoaded,

    /// Load-time structural or referential inconsistency in rule/payload documents
    #[error("Malformed knowledge base data: {reason}")]
    MalformedData { reason: String },
}

impl EngineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        EngineError::MalformedData {
            reason: reason.into(),
        }
    }

    /// True for errors that indicate a caller bug rather than a data
    /// or lifecycle problem. Hosts surface lifecycle/data errors as an
    /// "analysis unavailable" state; caller bugs they do not.
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, EngineError::InvalidInput)
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(EngineError::InvalidInput.is_caller_bug());
        assert!(!EngineError::DataNotLoaded.is_caller_bug());
        assert!(!EngineError::malformed("x").is_caller_bug());
    }

    #[test]
    fn test_malformed_message_carries_reason() {
        let err = EngineError::malformed("payload catalog references unknown context 'foo'");
        assert!(err.to_string().contains("unknown context 'foo'"));
    }
}
