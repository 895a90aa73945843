use std::fmt::Display;

/// A half-open byte range `[start, end)` in a script's source text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Offset of the first byte in the range.
    pub start: usize,
    /// Offset just past the last byte in the range.
    pub end: usize,
}

impl Range {
    /// Returns a new range covering `start..end`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns an empty range positioned at `offset`.
    pub const fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Returns the length of the range in bytes.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `index` lies within the range, counting its end.
    pub const fn touches(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Returns the range with both ends limited to `limit`.
    #[must_use]
    pub fn clamp_to(self, limit: usize) -> Self {
        let end = self.end.min(limit);
        Self::new(self.start.min(end), end)
    }

    /// Returns the range with both ends passed through `map`.
    #[must_use]
    pub fn map(self, mut map: impl FnMut(usize) -> usize) -> Self {
        Self::new(map(self.start), map(self.end))
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(value: std::ops::Range<usize>) -> Self {
        Self::new(value.start, value.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(value: Range) -> Self {
        value.start..value.end
    }
}

/// What a cursor position in a script refers to, for the purpose of completion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum CompletionTarget {
    /// The cursor is within a command invocation.
    Inside {
        /// The command the cursor is in.
        command: Range,
        /// The argument, redirect target or variable name under the cursor. Absent until the
        /// cursor has reached the start of one.
        argument: Option<Range>,
    },
    /// The cursor sits on a separator right after a finished command.
    Beside {
        /// The finished command.
        command: Range,
    },
    /// The cursor is not associated with any command.
    Outside,
    /// The cursor is inside a syntax error that could not be corrected.
    Error {
        /// The extent of the error region.
        error: Range,
    },
}

impl CompletionTarget {
    /// Returns the target with every range passed through `map`.
    #[must_use]
    pub fn map_ranges(self, mut map: impl FnMut(Range) -> Range) -> Self {
        match self {
            Self::Inside { command, argument } => Self::Inside {
                command: map(command),
                argument: argument.map(&mut map),
            },
            Self::Beside { command } => Self::Beside {
                command: map(command),
            },
            Self::Outside => Self::Outside,
            Self::Error { error } => Self::Error { error: map(error) },
        }
    }

    /// Returns the command range, for targets that have one.
    pub const fn command(&self) -> Option<Range> {
        match self {
            Self::Inside { command, .. } | Self::Beside { command } => Some(*command),
            Self::Outside | Self::Error { .. } => None,
        }
    }

    /// Returns the argument range, if the cursor is on an argument.
    pub const fn argument(&self) -> Option<Range> {
        match self {
            Self::Inside { argument, .. } => *argument,
            _ => None,
        }
    }

    /// Returns true if completion is possible at this target.
    pub const fn is_completable(&self) -> bool {
        matches!(self, Self::Inside { .. } | Self::Beside { .. })
    }

    /// Returns the range of source text a completion inserted at `index` should replace.
    ///
    /// This is the argument under the cursor, widened to reach the cursor, when there is one.
    /// Otherwise the completion is inserted at the cursor, whatever the target.
    pub fn replacement_range(&self, index: usize) -> Range {
        match self.argument() {
            Some(argument) => Range::new(argument.start.min(index), argument.end.max(index)),
            None => Range::empty(index),
        }
    }
}

impl Display for CompletionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inside { command, argument } => {
                write!(f, "inside command={command}")?;
                if let Some(argument) = argument {
                    write!(f, " argument={argument}")?;
                }
                Ok(())
            }
            Self::Beside { command } => write!(f, "beside command={command}"),
            Self::Outside => write!(f, "outside"),
            Self::Error { error } => write!(f, "error range={error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamp_keeps_range_ordered() {
        assert_eq!(Range::new(2, 9).clamp_to(5), Range::new(2, 5));
        assert_eq!(Range::new(7, 9).clamp_to(5), Range::new(5, 5));
        assert_eq!(Range::new(1, 3).clamp_to(5), Range::new(1, 3));
    }

    #[test]
    fn display_targets() {
        let inside = CompletionTarget::Inside {
            command: Range::new(0, 8),
            argument: Some(Range::new(5, 8)),
        };
        assert_eq!(inside.to_string(), "inside command=[0,8) argument=[5,8)");

        let inside = CompletionTarget::Inside {
            command: Range::new(0, 4),
            argument: None,
        };
        assert_eq!(inside.to_string(), "inside command=[0,4)");

        let beside = CompletionTarget::Beside {
            command: Range::new(0, 6),
        };
        assert_eq!(beside.to_string(), "beside command=[0,6)");
        assert_eq!(CompletionTarget::Outside.to_string(), "outside");

        let error = CompletionTarget::Error {
            error: Range::new(0, 6),
        };
        assert_eq!(error.to_string(), "error range=[0,6)");
    }

    #[test]
    fn replacement_ranges() {
        let inside = CompletionTarget::Inside {
            command: Range::new(0, 8),
            argument: Some(Range::new(5, 8)),
        };
        assert_eq!(inside.replacement_range(7), Range::new(5, 8));

        let beside = CompletionTarget::Beside {
            command: Range::new(0, 6),
        };
        assert_eq!(beside.replacement_range(7), Range::empty(7));
        assert_eq!(CompletionTarget::Outside.replacement_range(0), Range::empty(0));

        let error = CompletionTarget::Error {
            error: Range::new(0, 6),
        };
        assert_eq!(error.replacement_range(6), Range::empty(6));

        assert!(beside.is_completable());
        assert!(!error.is_completable());
    }

    #[test]
    fn replacement_reaches_cursor() {
        // A corrected argument can end before the cursor.
        let inside = CompletionTarget::Inside {
            command: Range::new(0, 8),
            argument: Some(Range::new(5, 8)),
        };
        assert_eq!(inside.replacement_range(9), Range::new(5, 9));
    }

    #[test]
    fn map_ranges_visits_every_range() {
        let inside = CompletionTarget::Inside {
            command: Range::new(0, 8),
            argument: Some(Range::new(5, 8)),
        };
        let shifted = inside.map_ranges(|range| range.map(|offset| offset + 10));
        assert_eq!(shifted.command(), Some(Range::new(10, 18)));
        assert_eq!(shifted.argument(), Some(Range::new(15, 18)));
    }
}
