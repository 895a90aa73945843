//! Node kinds the resolver gives meaning to.

/// Kind of a command invocation.
pub const COMMAND: &str = "command";
/// Kind of a `$name` reference.
pub const VARIABLE_EXPANSION: &str = "variable_expansion";
/// Kind of a redirect to or from a file.
pub const FILE_REDIRECT: &str = "file_redirect";
/// Kind of a redirect to another descriptor.
pub const STREAM_REDIRECT: &str = "stream_redirect";

/// Tokens separating commands.
pub const SEPARATORS: &[&str] = &[";", "&", "|", "&&", "||", "\n", "\r", "\r\n"];

/// Reserved words that complete like commands on their own.
pub const KEYWORD_COMMANDS: &[&str] = &[
    "begin", "else", "end", "for", "in", "function", "if", "switch", "case", "while", "break",
    "continue", "return", "not", "and", "or",
];

/// Returns true for node kinds that give a cursor command context.
pub fn is_context(kind: &str) -> bool {
    matches!(
        kind,
        COMMAND | VARIABLE_EXPANSION | FILE_REDIRECT | STREAM_REDIRECT
    )
}

/// Returns true for kinds that may start with a sigil or operator in front of their target.
pub fn is_prefixed_target(kind: &str) -> bool {
    matches!(kind, VARIABLE_EXPANSION | FILE_REDIRECT | STREAM_REDIRECT)
}

/// Returns true if `kind` separates commands.
pub fn is_separator(kind: &str) -> bool {
    SEPARATORS.contains(&kind)
}

/// Returns true if `kind` is a reserved word that completes like a command.
pub fn is_keyword_command(kind: &str) -> bool {
    KEYWORD_COMMANDS.contains(&kind)
}

/// A pair of delimiters that must balance, with the text used to synthesize each side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pair {
    /// Kind of the opening token.
    pub open: &'static str,
    /// Kind of the closing token.
    pub close: &'static str,
    /// Text inserted when the opener is missing.
    pub open_text: &'static str,
    /// Text inserted when the closer is missing.
    pub close_text: &'static str,
}

impl Pair {
    const fn block(open: &'static str, open_text: &'static str) -> Self {
        // Keywords get a line break so they never fuse with neighbouring words.
        Self {
            open,
            close: "end",
            open_text,
            close_text: "\nend",
        }
    }

    const fn punctuation(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            open_text: open,
            close_text: close,
        }
    }

    /// Returns true if opener and closer are the same token.
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

/// Delimiter pairs, in lookup order.
pub const PAIRS: &[Pair] = &[
    Pair::block("function", "function\n"),
    Pair::block("switch", "switch\n"),
    Pair::block("for", "for\n"),
    Pair::block("while", "while\n"),
    Pair::block("if", "if\n"),
    Pair::block("begin", "begin\n"),
    Pair::punctuation("(", ")"),
    Pair::punctuation("[", "]"),
    Pair::punctuation("{", "}"),
    Pair::punctuation("\"", "\""),
    Pair::punctuation("'", "'"),
];

/// Returns the pair opened by `kind`.
pub fn opened_by(kind: &str) -> Option<&'static Pair> {
    PAIRS.iter().find(|pair| pair.open == kind)
}

/// Returns the pair closed by `kind`. Several blocks share `end`; a stray `end` is taken to
/// close a `begin`.
pub fn closed_by(kind: &str) -> Option<&'static Pair> {
    PAIRS.iter().rev().find(|pair| pair.close == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stray_end_closes_begin() {
        let pair = closed_by("end").unwrap();
        assert_eq!(pair.open_text, "begin\n");
        assert_eq!(pair.close_text, "\nend");
    }

    #[test]
    fn quotes_are_symmetric() {
        assert!(opened_by("\"").unwrap().is_symmetric());
        assert!(!opened_by("(").unwrap().is_symmetric());
        assert!(opened_by("end").is_none());
    }
}
