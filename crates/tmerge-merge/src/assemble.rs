//! Merged-document assembly.

use tmerge_types::{DiffRecord, RecordKind};
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::selection::{Choice, SelectionMap};

/// Assemble the merged document from an alignment and the user's choices.
///
/// Records are walked in order. Unchanged records pass their line through.
/// For each changed record the selection at its changed-subsequence index
/// decides the output line; a changed record with no selection surfaces as
/// an `[UNRESOLVED - ...]` placeholder carrying its kind and original
/// content, so nothing is silently lost. Lines that resolve to nothing
/// (for example a deleted line the user chose to drop by selecting the
/// right side) are omitted from the output.
///
/// Fails only when a selection names a side its record does not carry.
pub fn assemble(records: &[DiffRecord], selections: &SelectionMap) -> MergeResult<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut changed_index = 0;

    for rec in records {
        let text = if rec.kind == RecordKind::Unchanged {
            rec.left.clone().or_else(|| rec.right.clone())
        } else {
            let resolved = resolve(rec, changed_index, selections.get(changed_index))?;
            changed_index += 1;
            resolved
        };

        // Empty resolutions drop out of the merged document.
        match text {
            Some(t) if !t.is_empty() => lines.push(t),
            _ => {}
        }
    }

    debug!(
        records = records.len(),
        changes = changed_index,
        selected = selections.len(),
        "assembled merged document"
    );

    Ok(lines.join("\n"))
}

fn resolve(
    rec: &DiffRecord,
    index: usize,
    choice: Option<&Choice>,
) -> MergeResult<Option<String>> {
    match choice {
        Some(Choice::Left) => match &rec.left {
            Some(left) => Ok(Some(left.clone())),
            None => Err(MergeError::SideMissing {
                index,
                side: "left",
                kind: rec.kind,
            }),
        },
        Some(Choice::Right) => match &rec.right {
            Some(right) => Ok(Some(right.clone())),
            None => Err(MergeError::SideMissing {
                index,
                side: "right",
                kind: rec.kind,
            }),
        },
        Some(Choice::Manual(text)) => Ok(Some(text.clone())),
        None => Ok(Some(unresolved_placeholder(rec))),
    }
}

fn unresolved_placeholder(rec: &DiffRecord) -> String {
    let left = rec.left.as_deref().unwrap_or_default();
    let right = rec.right.as_deref().unwrap_or_default();
    match rec.kind {
        RecordKind::Modified => {
            format!("[UNRESOLVED - DOC1]: {left} | [DOC2]: {right}")
        }
        RecordKind::Added => format!("[UNRESOLVED - ADDED]: {right}"),
        RecordKind::Deleted => format!("[UNRESOLVED - DELETED]: {left}"),
        // Unresolved is never asked of an unchanged record.
        RecordKind::Unchanged => left.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmerge_align::align;

    #[test]
    fn unchanged_lines_pass_through() {
        let alignment = align("a\nb\nc", "a\nb\nc", true);
        let merged = assemble(&alignment.records, &SelectionMap::new()).unwrap();
        assert_eq!(merged, "a\nb\nc");
    }

    #[test]
    fn left_and_right_choices() {
        let alignment = align("keep me\nfoo", "keep me\nbar", true);

        let mut map = SelectionMap::new();
        map.set(0, Choice::Left);
        assert_eq!(assemble(&alignment.records, &map).unwrap(), "keep me\nfoo");

        let mut map = SelectionMap::new();
        map.set(0, Choice::Right);
        assert_eq!(assemble(&alignment.records, &map).unwrap(), "keep me\nbar");
    }

    #[test]
    fn manual_text_wins() {
        let alignment = align("foo", "bar", true);
        let mut map = SelectionMap::new();
        map.set(0, Choice::Manual("handwritten".into()));
        assert_eq!(assemble(&alignment.records, &map).unwrap(), "handwritten");
    }

    #[test]
    fn unresolved_placeholders() {
        let alignment = align("a\nfoo\ngone\nz", "a\nbar\nz", true);
        // Changes: Modified(foo/bar), Deleted(gone).
        let merged = assemble(&alignment.records, &SelectionMap::new()).unwrap();
        assert_eq!(
            merged,
            "a\n[UNRESOLVED - DOC1]: foo | [DOC2]: bar\n[UNRESOLVED - DELETED]: gone\nz"
        );
    }

    #[test]
    fn unresolved_addition_placeholder() {
        let alignment = align("a\nz", "a\nextra\nz", true);
        let merged = assemble(&alignment.records, &SelectionMap::new()).unwrap();
        assert_eq!(merged, "a\n[UNRESOLVED - ADDED]: extra\nz");
    }

    #[test]
    fn manual_empty_text_drops_the_line() {
        let alignment = align("a\ngone\nz", "a\nz", true);
        let mut map = SelectionMap::new();
        map.set(0, Choice::Left);
        assert_eq!(assemble(&alignment.records, &map).unwrap(), "a\ngone\nz");

        let mut map = SelectionMap::new();
        map.set(0, Choice::Manual(String::new()));
        assert_eq!(assemble(&alignment.records, &map).unwrap(), "a\nz");
    }

    #[test]
    fn choosing_a_missing_side_fails() {
        let alignment = align("a\nz", "a\nextra\nz", true);
        let mut map = SelectionMap::new();
        map.set(0, Choice::Left); // the added record has no left line

        let err = assemble(&alignment.records, &map).unwrap_err();
        match err {
            MergeError::SideMissing { index, side, kind } => {
                assert_eq!(index, 0);
                assert_eq!(side, "left");
                assert_eq!(kind, RecordKind::Added);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn select_all_right_takes_document_b() {
        let alignment = align("a\nfoo\ngone\nz", "a\nbar\nz", true);
        let mut map = SelectionMap::new();
        map.select_all_right(alignment.changed());

        // The deleted record has no right side and stays unresolved.
        let merged = assemble(&alignment.records, &map).unwrap();
        assert_eq!(merged, "a\nbar\n[UNRESOLVED - DELETED]: gone\nz");
    }

    #[test]
    fn empty_resolutions_are_dropped() {
        let alignment = align("", "", true);
        let merged = assemble(&alignment.records, &SelectionMap::new()).unwrap();
        assert_eq!(merged, "");
    }
}
