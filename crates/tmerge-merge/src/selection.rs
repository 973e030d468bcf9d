//! Selection bookkeeping for changed records.
//!
//! Selections are keyed by a record's position in the *changed*
//! subsequence of an alignment (unchanged records need no decision), the
//! same index a front end would display the changes under.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tmerge_types::DiffRecord;

use crate::error::MergeResult;

/// What to keep for one changed record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Keep the line from document A.
    Left,
    /// Keep the line from document B.
    Right,
    /// Replace the line with custom text.
    Manual(String),
}

/// Choices for the changed records of one alignment, keyed by position in
/// the changed subsequence.
///
/// Serializes as a JSON object mapping index to choice, so a choices file
/// can drive a batch merge:
///
/// ```json
/// { "0": "left", "1": { "manual": "replacement text" }, "3": "right" }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMap {
    choices: BTreeMap<usize, Choice>,
}

impl SelectionMap {
    /// An empty selection map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a selection map from a JSON choices document.
    pub fn from_json(json: &str) -> MergeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Record a choice for the changed record at `index`.
    pub fn set(&mut self, index: usize, choice: Choice) {
        self.choices.insert(index, choice);
    }

    /// The choice for the changed record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Choice> {
        self.choices.get(&index)
    }

    /// Iterate over the recorded choices in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Choice)> {
        self.choices.iter().map(|(&index, choice)| (index, choice))
    }

    /// Number of recorded choices.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns `true` if no choices have been recorded.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Select the left side for every changed record that has one.
    /// Records without a left line are left undecided.
    pub fn select_all_left<'a>(&mut self, changed: impl Iterator<Item = &'a DiffRecord>) {
        for (index, rec) in changed.enumerate() {
            if rec.has_left() {
                self.choices.insert(index, Choice::Left);
            }
        }
    }

    /// Select the right side for every changed record that has one.
    /// Records without a right line are left undecided.
    pub fn select_all_right<'a>(&mut self, changed: impl Iterator<Item = &'a DiffRecord>) {
        for (index, rec) in changed.enumerate() {
            if rec.has_right() {
                self.choices.insert(index, Choice::Right);
            }
        }
    }
}
