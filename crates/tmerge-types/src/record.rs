use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one aligned unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// The two lines' normalized forms are identical.
    Unchanged,
    /// Both documents have a line at this position but the forms differ.
    Modified,
    /// The line exists only in document B.
    Added,
    /// The line exists only in document A.
    Deleted,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Unchanged => "unchanged",
            RecordKind::Modified => "modified",
            RecordKind::Added => "added",
            RecordKind::Deleted => "deleted",
        };
        write!(f, "{s}")
    }
}

/// One unit of alignment output.
///
/// A record pairs a line of document A with a line of document B
/// ([`RecordKind::Unchanged`] or [`RecordKind::Modified`]), or carries a
/// line present on only one side ([`RecordKind::Added`] has no left side,
/// [`RecordKind::Deleted`] no right side). Each side keeps both the raw
/// line text and its normalized comparison form, plus the line's 0-based
/// position in its source document.
///
/// Records are produced as an immutable batch by one alignment call and
/// never mutated afterward. Reading the `left` fields in record order
/// reconstructs document A's line split exactly; likewise `right` for
/// document B.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Classification of this unit.
    pub kind: RecordKind,
    /// Raw line text from document A. `None` for [`RecordKind::Added`].
    pub left: Option<String>,
    /// Normalized form of the left line. `None` for [`RecordKind::Added`].
    pub left_clean: Option<String>,
    /// Raw line text from document B. `None` for [`RecordKind::Deleted`].
    pub right: Option<String>,
    /// Normalized form of the right line. `None` for [`RecordKind::Deleted`].
    pub right_clean: Option<String>,
    /// 0-based position in document A. `None` for [`RecordKind::Added`].
    pub left_index: Option<usize>,
    /// 0-based position in document B. `None` for [`RecordKind::Deleted`].
    pub right_index: Option<usize>,
}

impl DiffRecord {
    /// A record pairing two lines whose normalized forms match.
    pub fn unchanged(
        left: impl Into<String>,
        left_clean: impl Into<String>,
        right: impl Into<String>,
        right_clean: impl Into<String>,
        left_index: usize,
        right_index: usize,
    ) -> Self {
        Self {
            kind: RecordKind::Unchanged,
            left: Some(left.into()),
            left_clean: Some(left_clean.into()),
            right: Some(right.into()),
            right_clean: Some(right_clean.into()),
            left_index: Some(left_index),
            right_index: Some(right_index),
        }
    }

    /// A record pairing two lines whose normalized forms differ.
    pub fn modified(
        left: impl Into<String>,
        left_clean: impl Into<String>,
        right: impl Into<String>,
        right_clean: impl Into<String>,
        left_index: usize,
        right_index: usize,
    ) -> Self {
        Self {
            kind: RecordKind::Modified,
            left: Some(left.into()),
            left_clean: Some(left_clean.into()),
            right: Some(right.into()),
            right_clean: Some(right_clean.into()),
            left_index: Some(left_index),
            right_index: Some(right_index),
        }
    }

    /// A record for a line present only in document B.
    pub fn added(
        right: impl Into<String>,
        right_clean: impl Into<String>,
        right_index: usize,
    ) -> Self {
        Self {
            kind: RecordKind::Added,
            left: None,
            left_clean: None,
            right: Some(right.into()),
            right_clean: Some(right_clean.into()),
            left_index: None,
            right_index: Some(right_index),
        }
    }

    /// A record for a line present only in document A.
    pub fn deleted(
        left: impl Into<String>,
        left_clean: impl Into<String>,
        left_index: usize,
    ) -> Self {
        Self {
            kind: RecordKind::Deleted,
            left: Some(left.into()),
            left_clean: Some(left_clean.into()),
            right: None,
            right_clean: None,
            left_index: Some(left_index),
            right_index: None,
        }
    }

    /// Returns `true` if the record carries a line from document A.
    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    /// Returns `true` if the record carries a line from document B.
    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }
}
