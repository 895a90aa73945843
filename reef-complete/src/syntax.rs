//! Capability traits describing the parse trees the resolver works on.
//!
//! The resolver never depends on a particular grammar implementation: anything that produces
//! immutable trees of typed nodes with byte spans, tree navigation, and error/missing flags can
//! back it. The tree-sitter fish grammar binding lives in [`crate::fish`].

use crate::{CompletionError, Range};

/// A node of a concrete syntax tree.
///
/// Nodes are lightweight handles borrowed from their tree; the resolver copies them freely and
/// never mutates them.
pub trait SyntaxNode: Copy {
    /// Returns the node's type, e.g. `"command"`, `"ERROR"`, or `";"` for anonymous tokens.
    fn kind(&self) -> &str;

    /// Returns the byte offset of the node's start.
    fn start_index(&self) -> usize;

    /// Returns the byte offset just past the node's end.
    fn end_index(&self) -> usize;

    /// Returns true if the node is an error region.
    fn is_error(&self) -> bool;

    /// Returns true if the parser inserted the node in place of absent input.
    fn is_missing(&self) -> bool;

    /// Returns the name of the field the node occupies in its parent, if any.
    fn field_name(&self) -> Option<&str>;

    /// Returns the node's parent.
    fn parent(&self) -> Option<Self>;

    /// Returns the node's first child.
    fn first_child(&self) -> Option<Self>;

    /// Returns the node's last child.
    fn last_child(&self) -> Option<Self>;

    /// Returns the next child of the node's parent.
    fn next_sibling(&self) -> Option<Self>;

    /// Returns the previous child of the node's parent.
    fn prev_sibling(&self) -> Option<Self>;

    /// Returns the node's span.
    fn range(&self) -> Range {
        Range::new(self.start_index(), self.end_index())
    }

    /// Returns an iterator over the node's children, in order.
    fn children(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.first_child(), Self::next_sibling)
    }
}

/// An immutable parse tree together with the exact source it was parsed from.
pub trait SyntaxTree {
    /// The node handle type of the tree.
    type Node<'a>: SyntaxNode
    where
        Self: 'a;

    /// Returns the root node.
    fn root_node(&self) -> Self::Node<'_>;

    /// Returns the source the tree was parsed from, without any terminator appended for
    /// parsing.
    fn source(&self) -> &str;

    /// Returns the text the parser actually saw, including an appended terminator.
    fn text(&self) -> &str;
}

/// A parser producing [`SyntaxTree`]s.
pub trait SyntaxParser {
    /// The tree type produced by the parser.
    type Tree: SyntaxTree;

    /// Parses `source`. Implementations append a line terminator to the parsed text when the
    /// source does not end with one, but must report the unmodified source from
    /// [`SyntaxTree::source`].
    ///
    /// Syntax errors are part of the tree; an error here means no tree could be built at all.
    fn parse(&self, source: &str) -> Result<Self::Tree, CompletionError>;
}
