//! Page index
//!
//! Ordered byte offsets marking where each discovered page starts. The
//! first page always starts at offset 0. Pages are discovered strictly
//! forward and an entry, once recorded, is never changed.

/// Start offsets of every page discovered so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndex {
    offsets: Vec<usize>,
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PageIndex {
    /// Create an index holding only the first page
    pub fn new() -> Self {
        Self { offsets: vec![0] }
    }

    /// Number of pages discovered
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false: there is at least one page
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Start offset of page `page`
    pub fn start(&self, page: usize) -> Option<usize> {
        self.offsets.get(page).copied()
    }

    /// Index of the last discovered page
    pub fn last_page(&self) -> usize {
        self.offsets.len() - 1
    }

    /// All recorded offsets
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Record the start of the next page.
    ///
    /// Returns `false` and leaves the index unchanged if `offset` does not
    /// lie strictly after the last recorded start.
    pub fn push(&mut self, offset: usize) -> bool {
        let last = self.offsets[self.offsets.len() - 1];
        if offset <= last {
            tracing::warn!(offset, last, "rejected non-increasing page offset");
            return false;
        }
        self.offsets.push(offset);
        tracing::debug!(page = self.offsets.len(), offset, "page discovered");
        true
    }
}
