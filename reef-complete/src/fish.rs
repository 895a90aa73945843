//! Binds the tree-sitter fish grammar to the resolver's syntax traits.

use crate::error::CompletionError;
use crate::syntax::{SyntaxNode, SyntaxParser, SyntaxTree};
use crate::trace_categories;

/// Parses fish scripts with the tree-sitter fish grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct FishParser;

/// A fish script parsed by [`FishParser`], together with the text it was parsed from.
#[derive(Clone, Debug)]
pub struct FishTree {
    tree: tree_sitter::Tree,
    text: String,
    source_len: usize,
}

impl FishTree {
    /// Returns the underlying tree-sitter tree.
    pub const fn inner(&self) -> &tree_sitter::Tree {
        &self.tree
    }
}

impl SyntaxParser for FishParser {
    type Tree = FishTree;

    fn parse(&self, source: &str) -> Result<Self::Tree, CompletionError> {
        let mut text = source.to_owned();
        if !text.ends_with('\n') {
            text.push('\n');
        }

        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_fish::language())?;

        let tree = parser
            .parse(&text, None)
            .ok_or(CompletionError::ParseFailed)?;

        tracing::debug!(
            target: trace_categories::PARSE,
            "parsed {source:?}: {}",
            tree.root_node().to_sexp()
        );

        Ok(FishTree {
            tree,
            text,
            source_len: source.len(),
        })
    }
}

impl SyntaxTree for FishTree {
    type Node<'a> = tree_sitter::Node<'a>;

    fn root_node(&self) -> Self::Node<'_> {
        self.tree.root_node()
    }

    fn source(&self) -> &str {
        self.text.get(..self.source_len).unwrap_or_default()
    }

    fn text(&self) -> &str {
        &self.text
    }
}

impl SyntaxNode for tree_sitter::Node<'_> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn start_index(&self) -> usize {
        self.start_byte()
    }

    fn end_index(&self) -> usize {
        self.end_byte()
    }

    fn is_error(&self) -> bool {
        tree_sitter::Node::is_error(self)
    }

    fn is_missing(&self) -> bool {
        tree_sitter::Node::is_missing(self)
    }

    fn field_name(&self) -> Option<&str> {
        let parent = tree_sitter::Node::parent(self)?;
        let mut cursor = parent.walk();
        if !cursor.goto_first_child() {
            return None;
        }

        loop {
            if cursor.node() == *self {
                return cursor.field_name();
            }
            if !cursor.goto_next_sibling() {
                return None;
            }
        }
    }

    fn parent(&self) -> Option<Self> {
        tree_sitter::Node::parent(self)
    }

    fn first_child(&self) -> Option<Self> {
        self.child(0)
    }

    fn last_child(&self) -> Option<Self> {
        self.child_count()
            .checked_sub(1)
            .and_then(|last| self.child(last))
    }

    fn next_sibling(&self) -> Option<Self> {
        tree_sitter::Node::next_sibling(self)
    }

    fn prev_sibling(&self) -> Option<Self> {
        tree_sitter::Node::prev_sibling(self)
    }
}
