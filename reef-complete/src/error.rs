/// Errors returned when a completion target cannot be resolved at all.
///
/// Syntax problems in the script are never reported here; they are part of the result
/// ([`crate::CompletionTarget::Error`]). These variants signal caller mistakes, a parser that
/// could not produce a tree, or violated internal invariants.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum CompletionError {
    /// The cursor offset lies past the end of the source.
    #[error("cursor offset {index} is out of range for source of length {len}")]
    IndexOutOfRange {
        /// The requested offset.
        index: usize,
        /// The length of the source.
        len: usize,
    },

    /// The cursor offset falls inside a multi-byte character.
    #[error("cursor offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    /// A node the resolver relies on was absent from the tree.
    #[error("syntax tree is missing an expected node: {0}")]
    MissingNode(&'static str),

    /// The grammar could not be loaded into the parser.
    #[error("failed to load shell grammar")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree.
    #[error("failed to parse script")]
    ParseFailed,
}
