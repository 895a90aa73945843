use crate::Range;

/// Synthetic text inserted into corrected text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Insertion {
    /// Offset in the corrected text where the inserted text starts.
    pub at: usize,
    /// Length of the inserted text in bytes.
    pub len: usize,
}

/// Maps offsets in corrected text back to offsets in the original text.
///
/// Corrected text is a copy of a region of the original text, starting at `base`, with
/// synthetic text inserted at a few places. Mapping an offset subtracts the synthetic bytes
/// that precede it; an offset inside synthetic text maps to where that text was inserted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OffsetMapping {
    base: usize,
    limit: usize,
    insertions: Vec<Insertion>,
}

impl OffsetMapping {
    /// Returns a mapping for corrected text copied from the original text starting at `base`.
    /// Mapped offsets never exceed `limit`.
    pub const fn new(base: usize, limit: usize) -> Self {
        Self {
            base,
            limit,
            insertions: vec![],
        }
    }

    /// Records `len` bytes of synthetic text inserted at corrected-text offset `at`. Insertions
    /// must be recorded in increasing order of `at`.
    pub fn insert(&mut self, at: usize, len: usize) {
        self.insertions.push(Insertion { at, len });
    }

    /// Returns the recorded insertions.
    pub fn insertions(&self) -> &[Insertion] {
        &self.insertions
    }

    /// Returns true if no synthetic text was recorded.
    pub fn is_identity(&self) -> bool {
        self.insertions.is_empty()
    }

    /// Maps a corrected-text offset to the original text.
    pub fn map_index(&self, index: usize) -> usize {
        let synthetic: usize = self
            .insertions
            .iter()
            .take_while(|insertion| insertion.at < index)
            .map(|insertion| (index - insertion.at).min(insertion.len))
            .sum();

        (self.base + index - synthetic).min(self.limit)
    }

    /// Maps both ends of a corrected-text range to the original text.
    pub fn map_range(&self, range: Range) -> Range {
        range.map(|index| self.map_index(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn map_without_insertions_adds_base() {
        let mapping = OffsetMapping::new(6, 100);
        assert_eq!(mapping.map_index(0), 6);
        assert_eq!(mapping.map_index(7), 13);
        assert!(mapping.is_identity());
    }

    #[test]
    fn map_subtracts_preceding_insertions() {
        // "ab" + "XY" + "cd": original "abcd"
        let mut mapping = OffsetMapping::new(0, 100);
        mapping.insert(2, 2);

        assert_eq!(mapping.map_index(2), 2);
        assert_eq!(mapping.map_index(3), 2);
        assert_eq!(mapping.map_index(4), 2);
        assert_eq!(mapping.map_index(5), 3);
        assert_eq!(mapping.map_index(6), 4);
    }

    #[test]
    fn map_multiple_insertions() {
        // "if" + "\nend" + "x" + ")": base 10
        let mut mapping = OffsetMapping::new(10, 100);
        mapping.insert(2, 4);
        mapping.insert(7, 1);

        assert_eq!(mapping.map_index(1), 11);
        assert_eq!(mapping.map_index(6), 12);
        assert_eq!(mapping.map_index(7), 13);
        assert_eq!(mapping.map_index(8), 13);
    }

    #[test]
    fn map_clamps_to_limit() {
        let mut mapping = OffsetMapping::new(0, 9);
        mapping.insert(9, 1);

        assert_eq!(mapping.map_range(Range::new(5, 10)), Range::new(5, 9));
        assert_eq!(mapping.map_index(12), 9);
    }
}
