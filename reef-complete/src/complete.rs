use crate::error::CompletionError;
use crate::syntax::{SyntaxNode, SyntaxParser, SyntaxTree};
use crate::{CompletionTarget, FishParser, Range, kinds, navigator, trace_categories};

/// Options controlling completion target resolution.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResolverOptions {
    /// How many nested rounds of error correction may run for one query. Each round re-parses
    /// text that was itself synthesized by the previous round.
    pub max_correction_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_correction_depth: 2,
        }
    }
}

/// Resolves cursor offsets in shell scripts into completion targets.
///
/// The resolver holds the parser it uses to re-parse corrected text while resolving cursors
/// that sit inside syntax errors.
#[derive(bon::Builder, Clone, Debug, Default)]
pub struct Resolver<P> {
    /// The parser used for scripts and corrected text.
    parser: P,
    /// Resolution options.
    #[builder(default)]
    options: ResolverOptions,
}

impl<P: SyntaxParser> Resolver<P> {
    /// Returns a new resolver.
    ///
    /// # Arguments
    ///
    /// * `parser` - The parser to use.
    /// * `options` - The options to use when resolving.
    pub const fn new(parser: P, options: ResolverOptions) -> Self {
        Self { parser, options }
    }

    /// Returns the resolver's options.
    pub const fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Returns the resolver's parser.
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    /// Parses a script with the resolver's parser.
    ///
    /// # Arguments
    ///
    /// * `source` - The script to parse.
    pub fn parse(&self, source: &str) -> Result<P::Tree, CompletionError> {
        self.parser.parse(source)
    }

    /// Resolves the completion target at `index` in a parsed script.
    ///
    /// # Arguments
    ///
    /// * `tree` - The parsed script.
    /// * `index` - Byte offset of the cursor in the script's source.
    pub fn get_completion_targets<T: SyntaxTree>(
        &self,
        tree: &T,
        index: usize,
    ) -> Result<CompletionTarget, CompletionError> {
        self.get_completion_targets_with_depth(tree, index, 0)
    }

    /// Resolves the completion target at `index`, treating the query as if `correction_depth`
    /// rounds of error correction had already run.
    ///
    /// # Arguments
    ///
    /// * `tree` - The parsed script.
    /// * `index` - Byte offset of the cursor in the script's source.
    /// * `correction_depth` - Rounds of error correction already spent.
    pub fn get_completion_targets_with_depth<T: SyntaxTree>(
        &self,
        tree: &T,
        index: usize,
        correction_depth: usize,
    ) -> Result<CompletionTarget, CompletionError> {
        let source = tree.source();
        if index > source.len() {
            return Err(CompletionError::IndexOutOfRange {
                index,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(index) {
            return Err(CompletionError::NotCharBoundary(index));
        }

        let target = self.classify(tree, index, correction_depth)?;

        tracing::debug!(target: trace_categories::COMPLETION, "target at {index}: {target}");

        Ok(target)
    }

    /// Classifies the cursor position against the tree's structure.
    ///
    /// Where several enclosing nodes qualify, the innermost one wins.
    pub(crate) fn classify<T: SyntaxTree>(
        &self,
        tree: &T,
        index: usize,
        correction_depth: usize,
    ) -> Result<CompletionTarget, CompletionError> {
        let len = tree.source().len();
        let nodes = navigator::nodes_at_index(tree.root_node(), index);
        let node = *nodes.last().ok_or(CompletionError::MissingNode("root"))?;

        tracing::trace!(
            target: trace_categories::COMPLETION,
            "spine at {index}: {:?}",
            nodes.iter().map(|node| node.kind()).collect::<Vec<_>>()
        );

        let ancestor = nodes.iter().rev().find(|node| kinds::is_context(node.kind()));
        let command_index = nodes
            .iter()
            .rposition(|node| node.kind() == kinds::COMMAND);

        // The cursor is within a command.
        if let Some(command_index) = command_index
            && let Some(command) = nodes.get(command_index)
            && command.start_index() <= index
        {
            // Past the sigil or operator of a prefixed target, the target itself is the
            // argument. Leaf redirects such as `2>&1` have no separate operator.
            let prefixed_target = ancestor
                .filter(|ancestor| kinds::is_prefixed_target(ancestor.kind()))
                .filter(|ancestor| {
                    ancestor
                        .first_child()
                        .is_some_and(|operator| operator.end_index() <= index)
                })
                .and_then(|ancestor| ancestor.last_child());

            let argument = prefixed_target.or_else(|| nodes.get(command_index + 1).copied());

            return Ok(CompletionTarget::Inside {
                command: clamped(*command, len),
                argument: argument
                    .filter(|argument| argument.start_index() <= index)
                    .map(|argument| clamped(argument, len)),
            });
        }

        // The cursor is on a reserved word that completes on its own.
        if kinds::is_keyword_command(node.kind()) && node.range().touches(index) {
            return Ok(keyword_target(node, len));
        }

        // The cursor is right after a finished command.
        if ((kinds::is_separator(node.kind()) && node.start_index() == index)
            || node.start_index() > index)
            && let Some(previous) = node.prev_sibling()
            && previous.kind() == kinds::COMMAND
        {
            return Ok(CompletionTarget::Beside {
                command: clamped(previous, len),
            });
        }

        // The cursor is in whitespace right before the next command or keyword.
        if let Some(next) = navigator::next_sibling(node)
            && next.start_index() <= index
        {
            if next.kind() == kinds::COMMAND {
                return Ok(CompletionTarget::Inside {
                    command: clamped(next, len),
                    argument: next.first_child().map(|child| clamped(child, len)),
                });
            }

            let leaf = navigator::first_leaf(next);
            if kinds::is_keyword_command(leaf.kind()) {
                return Ok(keyword_target(leaf, len));
            }
        }

        if node.start_index() > index {
            return Ok(CompletionTarget::Outside);
        }

        let Some(error) = nodes.iter().rev().find(|node| node.is_error()) else {
            return Ok(CompletionTarget::Outside);
        };

        let corrected = self.correct(tree.source(), *error, index, correction_depth)?;

        Ok(corrected.unwrap_or(CompletionTarget::Error {
            error: clamped(*error, len),
        }))
    }
}

/// Resolves the completion target at `index` in `source`, using the fish grammar and default
/// options.
///
/// # Arguments
///
/// * `source` - The script.
/// * `index` - Byte offset of the cursor in the script.
pub fn get_completion_targets(
    source: &str,
    index: usize,
) -> Result<CompletionTarget, CompletionError> {
    let resolver = Resolver::builder().parser(FishParser).build();

    let tree = resolver.parse(source)?;
    resolver.get_completion_targets(&tree, index)
}

/// Returns the node's range, limited to the source length; trees may cover a terminator that
/// was appended for parsing.
fn clamped<N: SyntaxNode>(node: N, len: usize) -> Range {
    node.range().clamp_to(len)
}

fn keyword_target<N: SyntaxNode>(keyword: N, len: usize) -> CompletionTarget {
    CompletionTarget::Inside {
        command: clamped(keyword, len),
        argument: Some(clamped(keyword, len)),
    }
}
