//! Line storage and soft-wrap bookkeeping for the pager's display engine.
//!
//! A [`Line`] owns its raw byte content plus two derived, independently
//! invalidated annotations: wrap offsets (recomputed by [`Line::rewrap`] on
//! resize) and match ranges (recomputed by the search engine). Matches are
//! byte-indexed into `content` and are therefore unaffected by a rewrap.

pub mod wrap;

use thiserror::Error;

/// Longest line the pager will hold in memory before splitting it at
/// ingestion time. Ingestion itself lives outside this crate; this constant
/// is exposed so callers (the pipe/file loaders) can apply the same bound.
pub const MAX_LINE_LENGTH: usize = 2048;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("match range ({start}, {end}) is invalid for a line of length {len}")]
    InvalidMatchRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// A single logical (file) line: raw bytes plus derived wrap/match geometry.
#[derive(Debug, Clone, Default)]
pub struct Line {
    content: Vec<u8>,
    wrap_offsets: Vec<usize>,
    matches: Vec<(usize, usize)>,
}

impl Line {
    /// Create a line from owned bytes. Wrap offsets start empty (one visual
    /// row) until [`Line::rewrap`] is called; matches start empty.
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            content,
            wrap_offsets: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn wrap_offsets(&self) -> &[usize] {
        &self.wrap_offsets
    }

    /// Number of visual rows this line occupies, always at least 1.
    pub fn wrapped_lines(&self) -> usize {
        self.wrap_offsets.len() + 1
    }

    /// Recompute wrap offsets for the given screen width. Matches are left
    /// untouched: they are byte-indexed and independent of wrap geometry.
    pub fn rewrap(&mut self, screen_width: usize) {
        self.wrap_offsets = wrap::compute_wrap_offsets(&self.content, screen_width);
    }

    /// Byte range `[start, end)` of the `wrap_index`-th visual row. Out of
    /// range indices clamp to the last row.
    pub fn segment_range(&self, wrap_index: usize) -> (usize, usize) {
        let idx = wrap_index.min(self.wrap_offsets.len());
        let start = if idx == 0 { 0 } else { self.wrap_offsets[idx - 1] };
        let end = if idx < self.wrap_offsets.len() {
            self.wrap_offsets[idx]
        } else {
            self.content.len()
        };
        (start, end)
    }

    pub fn matches(&self) -> &[(usize, usize)] {
        &self.matches
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Drop all recorded matches, releasing the backing allocation.
    pub fn clear_matches(&mut self) {
        self.matches = Vec::new();
    }

    /// Append a match range, maintaining the sorted, non-overlapping
    /// invariant demanded of callers (the search engine appends in scan
    /// order, which is already ascending).
    pub fn push_match(&mut self, start: usize, end: usize) -> Result<(), TextError> {
        if start >= end || end > self.content.len() {
            return Err(TextError::InvalidMatchRange {
                start,
                end,
                len: self.content.len(),
            });
        }
        self.matches.push((start, end));
        Ok(())
    }
}
