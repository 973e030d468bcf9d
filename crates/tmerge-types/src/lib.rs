//! Foundation types for tmerge.
//!
//! This crate provides the alignment record types shared by the aligner,
//! the merge assembler, and any front end that presents alignment results.
//!
//! # Key Types
//!
//! - [`DiffRecord`] — One aligned unit: a line pair, an insertion, or a deletion
//! - [`RecordKind`] — Classification of a record (unchanged/modified/added/deleted)

pub mod record;

pub use record::{DiffRecord, RecordKind};
