//! Heuristic correction of syntax errors around the cursor.
//!
//! Scripts being edited are often transiently unbalanced: an open quote, an `if` without its
//! `end`. To still find the command under the cursor, the tokens of the error region are
//! scanned for unbalanced delimiters, the missing ones are synthesized, and the patched text
//! is parsed and resolved again. Ranges found in the patched text are then mapped back to the
//! original text.

use crate::complete::Resolver;
use crate::error::CompletionError;
use crate::kinds::{self, Pair};
use crate::mapping::OffsetMapping;
use crate::syntax::{SyntaxNode, SyntaxParser};
use crate::{CompletionTarget, Range, trace_categories};

/// One step in building corrected text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Patch {
    /// Copy original text up to the given offset.
    Source(usize),
    /// Insert synthetic text.
    Synthetic(&'static str),
}

/// Corrected text for an error region.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Correction {
    /// The corrected text.
    pub text: String,
    /// The cursor offset within the corrected text.
    pub index: usize,
    /// Maps offsets in the corrected text back to the original text.
    pub mapping: OffsetMapping,
}

/// Returns the tokens of an error region, with nested error regions expanded in place.
pub fn error_tokens<N: SyntaxNode>(error: N) -> Vec<N> {
    let mut tokens = vec![];
    collect_error_tokens(error, &mut tokens);
    tokens
}

fn collect_error_tokens<N: SyntaxNode>(error: N, tokens: &mut Vec<N>) {
    for child in error.children() {
        if child.is_error() {
            collect_error_tokens(child, tokens);
        } else {
            tokens.push(child);
        }
    }
}

/// Plans the patches that balance the delimiters of an error region.
///
/// A closer that matches no open delimiter closes every delimiter opened after its partner, or
/// gets its opener synthesized right before it when none is open. Delimiters still open at
/// the end of the region are closed there, innermost first.
pub fn plan_patches<N: SyntaxNode>(error: N) -> Vec<Patch> {
    let mut patches = vec![];
    let mut open: Vec<&'static Pair> = vec![];
    let mut last = error.start_index();

    for token in error_tokens(error) {
        let kind = token.kind();

        // Text the parser left out of the tree, e.g. string contents.
        if token.start_index() != last {
            last = token.start_index();
            patches.push(Patch::Source(last));
        }

        let closes = match kinds::opened_by(kind) {
            Some(pair) if pair.is_symmetric() => open.last().is_some_and(|top| top.close == kind),
            _ => kinds::closed_by(kind).is_some(),
        };

        if closes {
            while let Some(top) = open.last()
                && top.close != kind
            {
                patches.push(Patch::Synthetic(top.close_text));
                open.pop();
            }

            if open.pop().is_none() {
                if let Some(pair) = kinds::closed_by(kind) {
                    patches.push(Patch::Synthetic(pair.open_text));
                }
            }
        } else if let Some(pair) = kinds::opened_by(kind) {
            open.push(pair);
        }

        last = token.end_index();
        patches.push(Patch::Source(last));
    }

    if error.end_index() != last {
        patches.push(Patch::Source(error.end_index()));
    }

    patches.extend(
        open.iter()
            .rev()
            .map(|pair| Patch::Synthetic(pair.close_text)),
    );

    patches
}

/// Builds corrected text for the error region `error` of `source`.
///
/// Returns `None` when the patches insert nothing, or when the cursor lies before the region.
///
/// # Arguments
///
/// * `source` - The text the error region was found in.
/// * `error` - The extent of the error region.
/// * `patches` - The patches planned for the region.
/// * `index` - The cursor offset in `source`.
pub fn apply_patches(
    source: &str,
    error: Range,
    patches: &[Patch],
    index: usize,
) -> Option<Correction> {
    let mut text = String::new();
    let mut cursor = index.checked_sub(error.start)?;
    let mut mapping = OffsetMapping::new(error.start, error.end.min(source.len()));
    let mut copied = error.start;

    for patch in patches {
        match patch {
            Patch::Source(offset) => {
                // Error regions may cover the terminator appended for parsing; it is not part
                // of the source.
                let end = (*offset).min(source.len());
                let start = copied.min(end);
                text.push_str(source.get(start..end)?);
                copied = *offset;
            }
            Patch::Synthetic(insert) => {
                if cursor > text.len() {
                    cursor += insert.len();
                }
                mapping.insert(text.len(), insert.len());
                text.push_str(insert);
            }
        }
    }

    if mapping.is_identity() {
        return None;
    }

    Some(Correction {
        text,
        index: cursor,
        mapping,
    })
}

impl<P: SyntaxParser> Resolver<P> {
    /// Tries to resolve the cursor by correcting the error region it sits in.
    ///
    /// Returns `Ok(None)` when no correction applies: the depth limit was reached, or nothing
    /// in the region could be balanced.
    pub(crate) fn correct<N: SyntaxNode>(
        &self,
        source: &str,
        error: N,
        index: usize,
        correction_depth: usize,
    ) -> Result<Option<CompletionTarget>, CompletionError> {
        if correction_depth >= self.options().max_correction_depth {
            tracing::debug!(
                target: trace_categories::CORRECTION,
                "correction depth {correction_depth} reached; giving up on error {}",
                error.range()
            );
            return Ok(None);
        }

        let patches = plan_patches(error);
        let Some(correction) = apply_patches(source, error.range(), &patches, index) else {
            tracing::debug!(
                target: trace_categories::CORRECTION,
                "nothing to correct in error {}",
                error.range()
            );
            return Ok(None);
        };

        tracing::debug!(
            target: trace_categories::CORRECTION,
            "error {} corrected to {:?} (cursor {}, depth {correction_depth})",
            error.range(),
            correction.text,
            correction.index
        );

        let tree = self.parse(&correction.text)?;
        let target = self.classify(&tree, correction.index, correction_depth + 1)?;

        Ok(Some(
            target.map_ranges(|range| correction.mapping.map_range(range)),
        ))
    }
}
