//! Text repairs applied to a record file before evaluation
//!
//! Hand-written record files often drop the comma between two string
//! literals on consecutive lines. These substitutions put it back. They are
//! plain pattern matches, not a grammar, and can fire where no comma was
//! missing; the evaluator downstream sees exactly what they produce.

use regex::Regex;
use std::sync::OnceLock;

/// Drop every line whose first non-whitespace character is `#`.
///
/// Only whole-line comments are removed. A `#` later in a line is left for
/// the evaluator, which skips comments between tokens.
pub fn strip_comment_lines(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| !line.trim().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply the three missing-comma repairs, in order
pub fn repair(content: &str) -> String {
    static WORD_QUOTE_RE: OnceLock<Regex> = OnceLock::new();
    static SLASH_RE: OnceLock<Regex> = OnceLock::new();
    static ADJACENT_RE: OnceLock<Regex> = OnceLock::new();

    // `word"` at a line end followed by a line opening with `"`
    let word_quote_re = WORD_QUOTE_RE.get_or_init(|| Regex::new(r#"(\w+)"\s*\n\s*""#).unwrap());

    // `word" / "word"`
    let slash_re = SLASH_RE.get_or_init(|| Regex::new(r#"(\w+)"\s*/\s*"(\w+)""#).unwrap());

    // two quoted strings separated only by whitespace spanning a line break
    let adjacent_re = ADJACENT_RE
        .get_or_init(|| Regex::new(r#""([^"]+)"\s*\n\s*"([^"]+)""#).unwrap());

    let text = word_quote_re.replace_all(content, "${1}\",\n        \"");
    let text = slash_re.replace_all(&text, "${1}\", \"${2}\"");
    let text = adjacent_re.replace_all(&text, "\"${1}\",\n        \"${2}\"");

    text.into_owned()
}

/// Find the first `name = {...}` assignment and return the `{...}` part.
///
/// The literal runs to the last `}` in the text.
pub fn extract_assignment(content: &str) -> Option<&str> {
    static ASSIGN_RE: OnceLock<Regex> = OnceLock::new();
    let assign_re = ASSIGN_RE.get_or_init(|| Regex::new(r"(?s)(\w+)\s*=\s*(\{.*\})").unwrap());

    assign_re
        .captures(content)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Run the full pre-evaluation pipeline: strip comments, repair, extract
pub fn prepare(content: &str) -> Option<String> {
    let cleaned = strip_comment_lines(content);
    let repaired = repair(&cleaned);
    if repaired != cleaned {
        tracing::debug!("repair heuristics rewrote record text");
    }
    extract_assignment(&repaired).map(str::to_string)
}
