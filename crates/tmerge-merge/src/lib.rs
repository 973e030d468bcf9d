//! Merge assembly for tmerge.
//!
//! The aligner produces an immutable batch of records; this crate owns the
//! caller-side half of the workflow: recording which side of each changed
//! record the user wants to keep (or custom replacement text), and
//! assembling the final merged document from the batch plus those
//! selections.
//!
//! # Key Types
//!
//! - [`Choice`] — Keep the left line, the right line, or manual text
//! - [`SelectionMap`] — Choices keyed by position in the changed-record subsequence
//! - [`assemble`] — Produce the merged document, with unresolved placeholders

pub mod assemble;
pub mod error;
pub mod selection;

pub use assemble::assemble;
pub use error::{MergeError, MergeResult};
pub use selection::{Choice, SelectionMap};
