//! Text rendering of syntax trees for inspection.

use std::fmt::{Display, Write};

use crate::syntax::{SyntaxNode, SyntaxTree};

/// Renders a node and its descendants, one node per line, children indented by a tab.
///
/// Each node is rendered as `field: (kind[start-end]: text`, followed by its children and a
/// closing parenthesis. The field prefix appears only for nodes occupying a field, and `missing`
/// precedes the kind of nodes inserted by the parser. Kinds and text are escaped the way JSON
/// string literals are.
pub struct TreeDump<'a, N> {
    node: N,
    text: &'a str,
}

impl<'a, N: SyntaxNode> TreeDump<'a, N> {
    /// Returns a renderer for `node`, taking node text from `text`, the text the tree was
    /// parsed from.
    pub const fn new(node: N, text: &'a str) -> Self {
        Self { node, text }
    }
}

impl<N: SyntaxNode> Display for TreeDump<'_, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.node;

        if let Some(field) = node.field_name() {
            write!(f, "{field}: ")?;
        }

        f.write_char('(')?;
        if node.is_missing() {
            f.write_str("missing ")?;
        }

        let text = self
            .text
            .get(node.start_index()..node.end_index())
            .unwrap_or_default();

        write!(
            f,
            "{}[{}-{}]: {}",
            escape(node.kind())?,
            node.start_index(),
            node.end_index(),
            escape(text)?
        )?;

        for child in node.children() {
            writeln!(f)?;
            write!(
                indenter::indented(f).with_str("\t"),
                "{}",
                TreeDump::new(child, self.text)
            )?;
        }

        f.write_char(')')
    }
}

/// Renders a whole tree; see [`TreeDump`].
pub fn dump_tree<T: SyntaxTree>(tree: &T) -> String {
    TreeDump::new(tree.root_node(), tree.text()).to_string()
}

/// Escapes `value` as the contents of a JSON string literal.
fn escape(value: &str) -> Result<String, std::fmt::Error> {
    let quoted = serde_json::to_string(value).map_err(|_| std::fmt::Error)?;

    Ok(quoted
        .strip_prefix('"')
        .and_then(|quoted| quoted.strip_suffix('"'))
        .unwrap_or_default()
        .to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FishParser, SyntaxParser};

    fn dump(source: &str) -> String {
        dump_tree(&FishParser.parse(source).unwrap()).replace('\t', "    ")
    }

    #[test]
    fn dump_command() {
        insta::assert_snapshot!(dump("echo foo"), @r"
        (program[0-9]: echo foo\n
            (command[0-8]: echo foo
                name: (word[0-4]: echo)
                argument: (word[5-8]: foo))
            (\n[8-9]: \n))
        ");
    }

    #[test]
    fn dump_errors() {
        insta::assert_snapshot!(dump("echo \"a"), @r#"
        (program[0-8]: echo \"a\n
            (ERROR[0-8]: echo \"a\n
                (word[0-4]: echo)
                (\"[5-6]: \")))
        "#);
    }

    #[test]
    fn dump_missing_node() {
        let dumped = dump("echo {a (b}");
        assert!(dumped.contains("\n            (missing }[8-8]: )"), "{dumped}");
    }

    #[test]
    fn dump_escapes_like_json() {
        // JSON leaves DEL and the C1 controls alone.
        let dumped = dump("echo a\u{7f}\u{85}b\u{1}");
        assert!(dumped.contains("(word[5-11]: a\u{7f}\u{85}b\\u0001)"), "{dumped}");
    }
}
