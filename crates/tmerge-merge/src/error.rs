//! Error types for merge assembly.

use tmerge_types::RecordKind;

/// Errors that can occur while assembling a merged document.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A selection named a side the record does not carry (for example
    /// choosing "left" on an added record, which has no left line).
    #[error("selection {index} chose the {side} side, but a {kind} record has no {side} line")]
    SideMissing {
        index: usize,
        side: &'static str,
        kind: RecordKind,
    },

    /// A choices file could not be parsed.
    #[error("invalid choices file: {0}")]
    InvalidChoices(#[from] serde_json::Error),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
