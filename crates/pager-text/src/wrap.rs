//! Soft-wrap computation.
//!
//! Pure function over a line's byte content and a screen width: no I/O, no
//! allocation beyond the returned offset vector. Mirrors the greedy
//! whitespace-preferring wrap strategy used by terminal pagers: accumulate a
//! display-column counter, expand tabs to the next multiple of [`TAB_SIZE`],
//! and when the counter reaches the screen width, backtrack to the most
//! recent whitespace if it falls within the current window.

/// Tab stop width in display columns, matching the bounded-line-buffer pager
/// this crate reimplements.
pub const TAB_SIZE: usize = 8;

/// Smallest screen width the wrap algorithm will operate at. A terminal
/// reporting 0 or 1 columns is clamped here rather than special-cased by
/// every caller.
const MIN_SCREEN_WIDTH: usize = 2;

/// Display width of a single byte: a tab is not resolved here (callers must
/// track the running column to expand it to the next stop); printable ASCII
/// bytes occupy one column; anything else (control bytes, high bytes of a
/// multi-byte UTF-8 sequence) contributes zero, per the byte-wise ASCII width
/// model this pager commits to (no grapheme clustering).
fn byte_width(b: u8) -> usize {
    if b.is_ascii_graphic() || b == b' ' {
        1
    } else {
        0
    }
}

/// Display width of a byte slice, expanding tabs to the next multiple of
/// [`TAB_SIZE`] starting from column 0. Used both during the wrap scan (to
/// re-seed the column counter after a wrap point) and by callers that need to
/// know how wide a segment renders.
pub fn display_width(bytes: &[u8]) -> usize {
    let mut width = 0usize;
    for &b in bytes {
        if b == b'\t' {
            width += TAB_SIZE - (width % TAB_SIZE);
        } else {
            width += byte_width(b);
        }
    }
    width
}

/// Compute the ordered byte offsets at which `content` must be wrapped so
/// that every resulting visual row fits within `screen_width` display
/// columns (tab stops every [`TAB_SIZE]` columns), preferring to break at the
/// most recent whitespace when one is available within the current window.
///
/// Returns an empty vector for empty content or content that never reaches
/// `screen_width`. Offsets are strictly increasing and satisfy
/// `0 < offset <= content.len()`.
pub fn compute_wrap_offsets(content: &[u8], screen_width: usize) -> Vec<usize> {
    if content.is_empty() {
        return Vec::new();
    }
    let width = screen_width.max(MIN_SCREEN_WIDTH);

    let mut offsets = Vec::new();
    let mut current_width = 0usize;
    let mut last_wrap = 0usize;
    let mut last_space: Option<usize> = None;

    for (i, &b) in content.iter().enumerate() {
        if b == b'\t' {
            current_width += TAB_SIZE - (current_width % TAB_SIZE);
        } else {
            current_width += byte_width(b);
        }

        if b.is_ascii_whitespace() {
            last_space = Some(i);
        }

        if current_width > width {
            let wrap_at = match last_space {
                Some(s) if s > last_wrap && s - last_wrap < width => s,
                _ => i,
            };
            offsets.push(wrap_at);
            last_wrap = wrap_at;
            current_width = display_width(&content[wrap_at..=i]);
            last_space = None;
        }
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_has_no_wraps() {
        assert_eq!(compute_wrap_offsets(b"", 80), Vec::<usize>::new());
    }

    #[test]
    fn short_line_has_no_wraps() {
        assert_eq!(compute_wrap_offsets(b"hello", 80), Vec::<usize>::new());
    }

    #[test]
    fn exact_multiple_of_width_wraps_at_boundaries() {
        let content = vec![b'a'; 200];
        let offsets = compute_wrap_offsets(&content, 80);
        assert_eq!(offsets, vec![80, 160]);
    }

    #[test]
    fn whitespace_preference_within_window() {
        let content = b"aaaa bbbb cccc dddd";
        let offsets = compute_wrap_offsets(content, 10);
        // last whitespace before width=10 is reached is at index 9 ('d' boundary at index 9 is space)
        assert_eq!(offsets, vec![9]);
    }

    #[test]
    fn tab_expands_to_next_stop() {
        // A single tab at column 0 advances to column 8.
        assert_eq!(display_width(b"\t"), 8);
        assert_eq!(display_width(b"a\tb"), 9);
    }

    #[test]
    fn wrap_is_idempotent() {
        let content = vec![b'x'; 250];
        let first = compute_wrap_offsets(&content, 80);
        let second = compute_wrap_offsets(&content, 80);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_width_clamped_to_minimum() {
        let content = vec![b'x'; 10];
        let offsets = compute_wrap_offsets(&content, 0);
        assert_eq!(offsets, vec![2, 4, 6, 8]);
    }

    #[test]
    fn line_of_exactly_width_has_no_wrap() {
        let content = vec![b'a'; 80];
        assert_eq!(compute_wrap_offsets(&content, 80), Vec::<usize>::new());
    }

    #[test]
    fn non_printable_bytes_contribute_zero_width() {
        let content = [7u8, b'a', b'b']; // BEL, a, b
        assert_eq!(display_width(&content), 2);
    }
}
