//! Line alignment engine.
//!
//! [`align`] walks two documents line by line and classifies each line as
//! unchanged, modified, added, or deleted. Equality is decided on the
//! normalized form of each line (see `tmerge-normalize`), so an annotated
//! line and its clean counterpart align as unchanged.
//!
//! The walk is a greedy single-pass heuristic with a bounded lookahead of
//! [`LOOKAHEAD`] lines, not a longest-common-subsequence computation. When
//! the two cursors disagree, the aligner searches up to three lines ahead
//! on either side for a match; insertions and deletions further apart than
//! that collapse into runs of modified pairs. That tradeoff keeps the walk
//! O(n) and its output stable, and downstream behavior depends on it.

use tmerge_types::{DiffRecord, RecordKind};

/// How far ahead the aligner searches when the current lines disagree.
pub const LOOKAHEAD: usize = 3;

/// The result of aligning two documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    /// The aligned units, in document order.
    pub records: Vec<DiffRecord>,
}

impl Alignment {
    /// Returns `true` if every record is unchanged.
    pub fn is_identical(&self) -> bool {
        self.records
            .iter()
            .all(|r| r.kind == RecordKind::Unchanged)
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count(RecordKind::Added)
    }

    /// Number of deleted lines.
    pub fn deletions(&self) -> usize {
        self.count(RecordKind::Deleted)
    }

    /// Number of modified line pairs.
    pub fn modifications(&self) -> usize {
        self.count(RecordKind::Modified)
    }

    /// The non-unchanged records, in order. The position within this
    /// subsequence is the index a selection map is keyed by.
    pub fn changed(&self) -> impl Iterator<Item = &DiffRecord> {
        self.records
            .iter()
            .filter(|r| r.kind != RecordKind::Unchanged)
    }

    fn count(&self, kind: RecordKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }
}

/// Align two documents line by line.
///
/// Each document is split on `'\n'`; empty trailing segments are kept as
/// real (empty) lines, and an empty document is treated as a single empty
/// line. When `normalize` is `false` the raw line text is compared instead
/// of the normalized form (surrounding whitespace is still trimmed for the
/// comparison).
///
/// Total over all inputs: any two strings produce an alignment.
pub fn align(doc_a: &str, doc_b: &str, normalize: bool) -> Alignment {
    let lines_a: Vec<&str> = doc_a.split('\n').collect();
    let lines_b: Vec<&str> = doc_b.split('\n').collect();

    let clean_a: Vec<String> = lines_a.iter().map(|l| clean(l, normalize)).collect();
    let clean_b: Vec<String> = lines_b.iter().map(|l| clean(l, normalize)).collect();

    let mut records = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < lines_a.len() || j < lines_b.len() {
        if i >= lines_a.len() {
            // A exhausted: the rest of B is additions.
            records.push(DiffRecord::added(lines_b[j], clean_b[j].clone(), j));
            j += 1;
        } else if j >= lines_b.len() {
            // B exhausted: the rest of A is deletions.
            records.push(DiffRecord::deleted(lines_a[i], clean_a[i].clone(), i));
            i += 1;
        } else if clean_a[i].trim() == clean_b[j].trim() {
            records.push(DiffRecord::unchanged(
                lines_a[i],
                clean_a[i].clone(),
                lines_b[j],
                clean_b[j].clone(),
                i,
                j,
            ));
            i += 1;
            j += 1;
        } else {
            let mut matched = false;

            // Bounded lookahead: smaller offsets win, and at each offset
            // the insertion check runs before the deletion check.
            for k in 1..=LOOKAHEAD {
                if j + k < lines_b.len() && clean_a[i].trim() == clean_b[j + k].trim() {
                    // B[j..j+k] are insertions ahead of the match.
                    for l in 0..k {
                        records.push(DiffRecord::added(
                            lines_b[j + l],
                            clean_b[j + l].clone(),
                            j + l,
                        ));
                    }
                    j += k;
                    matched = true;
                    break;
                }

                if i + k < lines_a.len() && clean_b[j].trim() == clean_a[i + k].trim() {
                    // A[i..i+k] are deletions ahead of the match.
                    for l in 0..k {
                        records.push(DiffRecord::deleted(
                            lines_a[i + l],
                            clean_a[i + l].clone(),
                            i + l,
                        ));
                    }
                    i += k;
                    matched = true;
                    break;
                }
            }

            if !matched {
                records.push(DiffRecord::modified(
                    lines_a[i],
                    clean_a[i].clone(),
                    lines_b[j],
                    clean_b[j].clone(),
                    i,
                    j,
                ));
                i += 1;
                j += 1;
            }
        }
    }

    Alignment { records }
}

fn clean(line: &str, normalize: bool) -> String {
    if normalize {
        tmerge_normalize::normalize(line)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(alignment: &Alignment) -> Vec<RecordKind> {
        alignment.records.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn identical_documents_all_unchanged() {
        let doc = "one\ntwo\nthree";
        let alignment = align(doc, doc, true);

        assert!(alignment.is_identical());
        assert_eq!(alignment.records.len(), 3);
        for (n, rec) in alignment.records.iter().enumerate() {
            assert_eq!(rec.left_index, Some(n));
            assert_eq!(rec.right_index, Some(n));
        }
    }

    #[test]
    fn annotated_line_aligns_with_clean_counterpart() {
        let annotated = "[Speaker 1] [00:01:02] hello there";
        let clean = "hello there";

        let alignment = align(annotated, clean, true);
        assert!(alignment.is_identical());
        let rec = &alignment.records[0];
        assert_eq!(rec.left.as_deref(), Some(annotated));
        assert_eq!(rec.left_clean.as_deref(), Some("hello there"));
    }

    #[test]
    fn raw_mode_compares_raw_text() {
        let alignment = align("[x] a", "a", false);
        assert_eq!(kinds(&alignment), vec![RecordKind::Modified]);

        let alignment = align("[x] a", "a", true);
        assert!(alignment.is_identical());
    }

    #[test]
    fn insertion_within_window() {
        let alignment = align("A\nB", "A\nX\nB", true);
        assert_eq!(
            kinds(&alignment),
            vec![RecordKind::Unchanged, RecordKind::Added, RecordKind::Unchanged]
        );
        assert_eq!(alignment.records[1].right.as_deref(), Some("X"));
        assert_eq!(alignment.records[1].right_index, Some(1));
    }

    #[test]
    fn deletion_within_window() {
        let alignment = align("A\nX\nB", "A\nB", true);
        assert_eq!(
            kinds(&alignment),
            vec![RecordKind::Unchanged, RecordKind::Deleted, RecordKind::Unchanged]
        );
        assert_eq!(alignment.records[1].left.as_deref(), Some("X"));
        assert_eq!(alignment.records[1].left_index, Some(1));
    }

    #[test]
    fn three_line_insertion_still_within_window() {
        let alignment = align("A\nB", "A\nX\nY\nZ\nB", true);
        assert_eq!(
            kinds(&alignment),
            vec![
                RecordKind::Unchanged,
                RecordKind::Added,
                RecordKind::Added,
                RecordKind::Added,
                RecordKind::Unchanged,
            ]
        );
    }

    #[test]
    fn four_line_insertion_exceeds_window() {
        // One past the lookahead bound: the walk falls back to modified
        // pairs instead of finding the distant match.
        let alignment = align("A\nB", "A\nW\nX\nY\nZ\nB", true);
        assert_eq!(alignment.records[0].kind, RecordKind::Unchanged);
        assert_eq!(alignment.records[1].kind, RecordKind::Modified);
    }

    #[test]
    fn modification_fallback() {
        let alignment = align("foo", "bar", true);
        assert_eq!(kinds(&alignment), vec![RecordKind::Modified]);
        let rec = &alignment.records[0];
        assert_eq!(rec.left.as_deref(), Some("foo"));
        assert_eq!(rec.right.as_deref(), Some("bar"));
    }

    #[test]
    fn insertion_check_wins_over_deletion_at_same_offset() {
        // Both checks would succeed at k = 1; the insertion check runs
        // first, so B's extra line is reported as added.
        let alignment = align("X\nQ", "Q\nX", true);
        assert_eq!(
            kinds(&alignment),
            vec![RecordKind::Added, RecordKind::Unchanged, RecordKind::Deleted]
        );
    }

    #[test]
    fn empty_documents_align_as_one_empty_line() {
        let alignment = align("", "", true);
        assert_eq!(alignment.records.len(), 1);
        let rec = &alignment.records[0];
        assert_eq!(rec.kind, RecordKind::Unchanged);
        assert_eq!(rec.left.as_deref(), Some(""));
        assert_eq!(rec.right.as_deref(), Some(""));
    }

    #[test]
    fn trailing_newline_is_a_real_empty_line() {
        let alignment = align("a\n", "a", true);
        assert_eq!(
            kinds(&alignment),
            vec![RecordKind::Unchanged, RecordKind::Deleted]
        );
        assert_eq!(alignment.records[1].left.as_deref(), Some(""));
    }

    #[test]
    fn trailing_additions_after_exhaustion() {
        let alignment = align("a", "a\nb\nc", true);
        assert_eq!(
            kinds(&alignment),
            vec![RecordKind::Unchanged, RecordKind::Added, RecordKind::Added]
        );
        assert_eq!(alignment.additions(), 2);
        assert_eq!(alignment.deletions(), 0);
    }

    #[test]
    fn changed_skips_unchanged_records() {
        let alignment = align("a\nfoo\nc", "a\nbar\nc", true);
        let changed: Vec<_> = alignment.changed().collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].kind, RecordKind::Modified);
        assert_eq!(alignment.modifications(), 1);
    }

    fn doc_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[ab\\[\\]]{0,6}", 0..8).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn left_lines_reconstruct_doc_a(a in doc_strategy(), b in doc_strategy()) {
            let alignment = align(&a, &b, true);
            let lefts: Vec<&str> = alignment
                .records
                .iter()
                .filter_map(|r| r.left.as_deref())
                .collect();
            let expected: Vec<&str> = a.split('\n').collect();
            prop_assert_eq!(lefts, expected);
        }

        #[test]
        fn right_lines_reconstruct_doc_b(a in doc_strategy(), b in doc_strategy()) {
            let alignment = align(&a, &b, true);
            let rights: Vec<&str> = alignment
                .records
                .iter()
                .filter_map(|r| r.right.as_deref())
                .collect();
            let expected: Vec<&str> = b.split('\n').collect();
            prop_assert_eq!(rights, expected);
        }

        #[test]
        fn indices_strictly_increase(a in doc_strategy(), b in doc_strategy()) {
            let alignment = align(&a, &b, true);
            let lefts: Vec<usize> = alignment
                .records
                .iter()
                .filter_map(|r| r.left_index)
                .collect();
            let rights: Vec<usize> = alignment
                .records
                .iter()
                .filter_map(|r| r.right_index)
                .collect();
            prop_assert!(lefts.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(rights.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn self_alignment_is_identical(a in doc_strategy()) {
            prop_assert!(align(&a, &a, true).is_identical());
        }
    }
}
