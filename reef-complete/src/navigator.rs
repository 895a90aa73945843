//! Generic navigation over syntax trees.

use crate::syntax::SyntaxNode;

/// Returns the chain of nodes from `root` down to the deepest node at or just after `index`.
///
/// At each level, children ending before `index` are skipped; the first child reaching
/// `index` is descended into. When every child ends before `index`, the last child is taken.
/// The starting node itself is never left for one of its siblings.
pub fn nodes_at_index<N: SyntaxNode>(root: N, index: usize) -> Vec<N> {
    let mut nodes = vec![];
    let mut current = root;

    loop {
        if !nodes.is_empty() && current.end_index() < index {
            if let Some(sibling) = current.next_sibling() {
                current = sibling;
                continue;
            }
        }

        nodes.push(current);

        match current.first_child() {
            Some(child) => current = child,
            None => break,
        }
    }

    nodes
}

/// Returns the next node in pre-order that is not a descendant of `node`: its own next sibling,
/// or else the nearest ancestor's next sibling.
pub fn next_sibling<N: SyntaxNode>(node: N) -> Option<N> {
    let mut current = Some(node);

    while let Some(node) = current {
        if let Some(sibling) = node.next_sibling() {
            return Some(sibling);
        }
        current = node.parent();
    }

    None
}

/// Returns the first leaf of the subtree rooted at `node`.
pub fn first_leaf<N: SyntaxNode>(node: N) -> N {
    let mut current = node;
    while let Some(child) = current.first_child() {
        current = child;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FishParser, FishTree, SyntaxParser, SyntaxTree};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> FishTree {
        FishParser.parse(source).unwrap()
    }

    fn spine(source: &str, index: usize) -> Vec<&'static str> {
        let tree = parse(source);
        nodes_at_index(tree.root_node(), index)
            .iter()
            .map(tree_sitter::Node::kind)
            .collect()
    }

    #[test]
    fn spine_descends_to_word() {
        assert_eq!(spine("echo foo", 6), ["program", "command", "word"]);
    }

    #[test]
    fn spine_stops_at_node_ending_at_index() {
        assert_eq!(spine("echo foo ;", 10), ["program", ";"]);
        assert_eq!(spine("echo foo ;", 8), ["program", "command", "word"]);
    }

    #[test]
    fn spine_skips_earlier_siblings() {
        assert_eq!(spine("echo a;  ls", 8), ["program", "command", "word"]);
    }

    #[test]
    fn spine_past_end_takes_last_child() {
        assert_eq!(spine("echo a\n", 50), ["program", "\n"]);
    }

    #[test]
    fn spine_never_leaves_starting_node() {
        let tree = parse("echo a; ls");
        let first = tree.root_node().first_child().unwrap();
        let nodes = nodes_at_index(first, 9);
        assert_eq!(nodes.first(), Some(&first));
    }

    #[test]
    fn next_sibling_climbs_ancestors() {
        let tree = parse("echo foo; ls");
        let command = tree.root_node().first_child().unwrap();
        let argument = command.last_child().unwrap();

        assert_eq!(SyntaxNode::next_sibling(&argument), None);
        assert_eq!(next_sibling(argument).unwrap().kind(), ";");
        assert_eq!(next_sibling(tree.root_node()), None);
    }

    #[test]
    fn first_leaf_descends_first_children() {
        let tree = parse("if true; end");
        let statement = tree.root_node().first_child().unwrap();
        assert_eq!(statement.kind(), "if_statement");
        assert_eq!(first_leaf(statement).kind(), "if");
        assert_eq!(first_leaf(tree.root_node()).kind(), "if");
    }
}
