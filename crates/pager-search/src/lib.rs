//! Multi-match regex search over a buffer.
//!
//! Compiles the pattern once per call as a newline-sensitive byte regex
//! (`^`/`$` match at line boundaries, `.` never matches `\n`), sweeps the
//! buffer from the cursor with wrap-around, and annotates every match on
//! every line it touches so highlighting is never limited to the line that
//! satisfied the search.

use pager_model::Buffer;
use regex::bytes::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Compile `pattern` under the newline-sensitive rules this pager commits
/// to: `.` never matches `\n`, and `^`/`$` match at every line boundary
/// rather than only buffer start/end.
fn compile(pattern: &str) -> Result<Regex, SearchError> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(SearchError::InvalidPattern)
}

/// Find every match on one line, stopping early on a zero-width match so a
/// pattern like `a*` cannot loop forever re-matching the same position. A
/// zero-width match is never recorded: `Line::push_match` requires
/// `start < end`, and an empty match carries nothing to highlight anyway.
fn matches_in_line(re: &Regex, content: &[u8]) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut offset = 0usize;
    while offset <= content.len() {
        match re.find_at(content, offset) {
            Some(m) => {
                let (start, end) = (m.start(), m.end());
                if end == start {
                    break;
                }
                found.push((start, end));
                offset = end;
            }
            None => break,
        }
    }
    found
}

/// Clear every line's prior matches and re-annotate in sweep order. Returns
/// the file-line index of the first line (in sweep order) that matched, or
/// `None` if nothing matched anywhere.
fn sweep(buffer: &mut Buffer, re: &Regex, order: impl Iterator<Item = usize>) -> Option<usize> {
    for line in buffer.lines_mut() {
        line.clear_matches();
    }
    let mut target = None;
    for i in order {
        let content = buffer.line(i).expect("index from sweep order is in range");
        let found = matches_in_line(re, content.content());
        if found.is_empty() {
            continue;
        }
        let line = buffer
            .line_mut(i)
            .expect("index from sweep order is in range");
        for (start, end) in found {
            // Ranges come from the regex engine against this line's own
            // content, so they are always valid; an error here would mean a
            // logic bug, not bad input.
            line.push_match(start, end)
                .expect("regex match range is valid for its own line");
        }
        if target.is_none() {
            target = Some(i);
        }
    }
    target
}

/// Search forward from (and including) the current line, wrapping around to
/// the start of the buffer. On success, repositions the buffer's cursor and
/// viewport to the matched line and returns `true`. On failure, the buffer
/// is left exactly where it was except that match annotations have been
/// cleared (nothing matched, so there is nothing to highlight).
pub fn search_forward(buffer: &mut Buffer, pattern: &str) -> Result<bool, SearchError> {
    let re = compile(pattern)?;
    let n = buffer.line_count();
    if n == 0 {
        return Ok(false);
    }
    let start = buffer.current_line();
    let order = (start..n).chain(0..start);
    let target = sweep(buffer, &re, order);
    trace!(pattern, ?target, "search_forward");
    if let Some(t) = target {
        buffer.jump_to_line(t);
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Search backward starting just before the current line, wrapping around
/// to the end of the buffer, ending back at the current line. Same success
/// contract as [`search_forward`].
pub fn search_backward(buffer: &mut Buffer, pattern: &str) -> Result<bool, SearchError> {
    let re = compile(pattern)?;
    let n = buffer.line_count();
    if n == 0 {
        return Ok(false);
    }
    let start = buffer.current_line();
    let order = (0..start).rev().chain((start..n).rev());
    let target = sweep(buffer, &re, order);
    trace!(pattern, ?target, "search_backward");
    if let Some(t) = target {
        buffer.jump_to_line(t);
        Ok(true)
    } else {
        Ok(false)
    }
}
