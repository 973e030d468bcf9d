//! Transcript markup normalizer.
//!
//! Annotated transcripts carry bracket codes: `[[editorial]]` spans, tagged
//! spans like `[FEL: scared]`, timestamps `[00:12:34]`, speaker labels
//! `[Speaker 1]`, and narrative wrappers `[NAR: ...]`. [`normalize`] strips
//! all of them from one line, yielding the canonical form used for equality
//! comparison during alignment.
//!
//! The passes run in a fixed order because later passes sweep up brackets
//! exposed by earlier ones (e.g. unwrapping `[NAR:` leaves a trailing `]`
//! that the stray-bracket pass removes).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `[[...]]` editorial spans, shortest match, content removed.
    static ref DOUBLE_BRACKET: Regex = Regex::new(r"\[\[.*?\]\]").unwrap();
    /// Tagged spans whose content is removed along with the tag.
    static ref TAGGED_SPAN: Regex = Regex::new(r"(?i)\[(?:FEL|ACTION|SOUND):[^\]]*\]").unwrap();
    /// Timestamps like `[00:12:34]`.
    static ref TIMESTAMP: Regex = Regex::new(r"\[\d+:\d+:\d+\]").unwrap();
    /// Speaker labels like `[Speaker 1]`.
    static ref SPEAKER: Regex = Regex::new(r"(?i)\[Speaker \d+\]").unwrap();
    /// Opening delimiter of narrative wrappers. Content is kept; the
    /// alternation lists longer keywords first so `[NARR:` is not split
    /// into `[NAR` + `R:`.
    static ref NARRATIVE_OPEN: Regex = Regex::new(r"(?i)\[(?:NARRATIVE|NARR|NAR):\s*").unwrap();
    /// Catch-all for any remaining bracketed code, content removed.
    static ref BRACKET_SPAN: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
    /// Whitespace runs, collapsed to a single space.
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip transcript markup from one line.
///
/// Pure and total: any input string produces a result, including lines with
/// unbalanced or malformed brackets (stray delimiters are swept in the final
/// bracket pass rather than failing). Idempotent once whitespace is
/// collapsed. The result contains no `[` or `]` characters.
///
/// ```
/// let line = "[NAR: Call my mom [FEL: scared] it is a spy].";
/// assert_eq!(tmerge_normalize::normalize(line), "Call my mom it is a spy.");
/// ```
pub fn normalize(line: &str) -> String {
    let cleaned = DOUBLE_BRACKET.replace_all(line, "");
    let cleaned = TAGGED_SPAN.replace_all(&cleaned, "");
    let cleaned = TIMESTAMP.replace_all(&cleaned, "");
    let cleaned = SPEAKER.replace_all(&cleaned, "");
    let cleaned = NARRATIVE_OPEN.replace_all(&cleaned, "");
    let cleaned = BRACKET_SPAN.replace_all(&cleaned, "");
    let cleaned = cleaned.replace(['[', ']'], "");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Normalize every line of a document, preserving the line structure.
///
/// Splitting and rejoining happens on `'\n'`; applying [`normalize`] to a
/// whole document directly would collapse its newlines.
pub fn normalize_document(text: &str) -> String {
    text.split('\n')
        .map(normalize)
        .collect::<Vec<_>>()
        .join("\n")
}
