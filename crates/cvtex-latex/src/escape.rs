//! LaTeX escaping
//!
//! Record text is mostly plain, but some fields already carry LaTeX (a
//! highlight with `**bold**` converted to `\textbf{..}`, a skill list joined
//! with `\textbar{}`). Text that looks like markup only gets the characters
//! that are never part of a command escaped; everything else is escaped
//! fully.

use regex::Regex;
use std::sync::OnceLock;

/// Command prefixes that mark text as already containing LaTeX
pub const MARKUP_COMMANDS: [&str; 15] = [
    "\\textbar{}",
    "\\textbf{",
    "\\textcolor{",
    "\\cvtag{",
    "\\cvevent{",
    "\\href{",
    "\\faExternalLink",
    "\\faMortarBoard",
    "\\vspace{",
    "\\cvsection{",
    "\\begin{",
    "\\end{",
    "\\item",
    "\\switchcolumn",
    "\\newpage",
];

/// Check whether text already contains LaTeX commands
pub fn is_preformatted(text: &str) -> bool {
    text.contains('\\') && MARKUP_COMMANDS.iter().any(|cmd| text.contains(cmd))
}

/// Escape text for LaTeX.
///
/// Plain text escapes `\ { } _ ^ ~ $ # & %`. Pre-formatted text (see
/// [`is_preformatted`]) only escapes `_ ^ ~ $ % #`, leaving backslashes,
/// braces and `&` alone. Every character is replaced at most once, so the
/// braces of `\textbackslash{}` are never escaped again.
///
/// Not idempotent: escape raw values exactly once.
pub fn escape_latex(text: &str) -> String {
    let preformatted = is_preformatted(text);
    let mut out = String::with_capacity(text.len() + text.len() / 4);

    for ch in text.chars() {
        let replacement = if preformatted {
            preformatted_token(ch)
        } else {
            plain_token(ch)
        };
        match replacement {
            Some(token) => out.push_str(token),
            None => out.push(ch),
        }
    }

    out
}

fn plain_token(ch: char) -> Option<&'static str> {
    match ch {
        '\\' => Some("\\textbackslash{}"),
        '{' => Some("\\{"),
        '}' => Some("\\}"),
        '&' => Some("\\&"),
        other => preformatted_token(other),
    }
}

/// Markup-mode tokens. `&` is deliberately absent: text that already
/// carries commands keeps its ampersands raw, so a stray `&` there must be
/// written as `\&` in the record itself.
fn preformatted_token(ch: char) -> Option<&'static str> {
    match ch {
        '_' => Some("\\_"),
        '^' => Some("\\^{}"),
        '~' => Some("\\textasciitilde{}"),
        '$' => Some("\\$"),
        '%' => Some("\\%"),
        '#' => Some("\\#"),
        _ => None,
    }
}

/// Turn `**text**` spans into `\textbf{text}`
pub fn markdown_bold(text: &str) -> String {
    static BOLD_RE: OnceLock<Regex> = OnceLock::new();
    let bold_re = BOLD_RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
    bold_re.replace_all(text, r"\textbf{${1}}").into_owned()
}

/// Link label for a url: only underscores are escaped
pub fn url_label(url: &str) -> String {
    url.replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_latex("Hello World"), "Hello World");
    }

    #[test]
    fn test_plain_special_characters() {
        assert_eq!(escape_latex("a_b"), "a\\_b");
        assert_eq!(escape_latex("x^2"), "x\\^{}2");
        assert_eq!(escape_latex("~home"), "\\textasciitilde{}home");
        assert_eq!(escape_latex("$5"), "\\$5");
        assert_eq!(escape_latex("#1"), "\\#1");
        assert_eq!(escape_latex("R&D"), "R\\&D");
        assert_eq!(escape_latex("30%"), "30\\%");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
    }

    #[test]
    fn test_backslash_token_not_reescaped() {
        assert_eq!(escape_latex("C:\\dir"), "C:\\textbackslash{}dir");
        assert_eq!(
            escape_latex("\\{"),
            "\\textbackslash{}\\{"
        );
    }

    #[test]
    fn test_preformatted_path() {
        let input = "\\textbf{Fast} parser_v2 at 100% & more";
        assert!(is_preformatted(input));
        assert_eq!(
            escape_latex(input),
            "\\textbf{Fast} parser\\_v2 at 100\\% & more"
        );
    }

    #[test]
    fn test_preformatted_needs_known_command() {
        // a backslash alone is not enough
        assert!(!is_preformatted("path\\to"));
        // a command name without a backslash is not enough either
        assert!(!is_preformatted("textbf{x}"));
        assert!(is_preformatted("Rust \\textbar{} Go"));
    }

    #[test]
    fn test_preformatted_commands_survive() {
        for cmd in MARKUP_COMMANDS {
            let input = format!("{} a_b", cmd);
            let out = escape_latex(&input);
            assert!(out.starts_with(cmd), "{} was altered: {}", cmd, out);
            assert!(out.ends_with("a\\_b"));
        }
    }

    #[test]
    fn test_markdown_bold() {
        assert_eq!(
            markdown_bold("Led the **event pipeline** work"),
            "Led the \\textbf{event pipeline} work"
        );
        assert_eq!(markdown_bold("**a** and **b**"), "\\textbf{a} and \\textbf{b}");
        assert_eq!(markdown_bold("no bold"), "no bold");
    }

    #[test]
    fn test_bold_then_escape() {
        let out = escape_latex(&markdown_bold("**fast** parser_v2 at 50%"));
        assert_eq!(out, "\\textbf{fast} parser\\_v2 at 50\\%");
    }

    #[test]
    fn test_url_label() {
        assert_eq!(
            url_label("https://github.com/x/my_repo"),
            "https://github.com/x/my\\_repo"
        );
    }
}
