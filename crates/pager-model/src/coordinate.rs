//! Screen-line <-> file-line coordinate mapping.
//!
//! The only authority on viewport position: every other component asks this
//! module where a screen row lands in file-line space, or vice versa. Both
//! directions are deliberately O(file_line) linear scans over the line
//! table; the buffers this pager is built for do not warrant an
//! acceleration index, and a linear scan keeps the invariant "matches the
//! cumulative wrapped-row sum" trivially auditable.

use pager_text::Line;

/// Map a screen-line (a visual row counted from the top of the buffer) to
/// the file-line whose cumulative wrapped-row range contains it, and the
/// zero-based wrap segment within that file-line.
///
/// A `screen_line` past the last visual row clamps to the last line's last
/// segment rather than panicking, matching the renderer's need to always
/// have a valid anchor even immediately after a resize shrinks the content.
pub fn screen_to_file(lines: &[Line], screen_line: usize) -> (usize, usize) {
    let mut cumulative = 0usize;
    for (i, line) in lines.iter().enumerate() {
        let rows = line.wrapped_lines();
        if cumulative + rows > screen_line {
            return (i, screen_line - cumulative);
        }
        cumulative += rows;
    }
    match lines.len() {
        0 => (0, 0),
        n => (n - 1, lines[n - 1].wrapped_lines() - 1),
    }
}

/// Sum of wrapped-row counts for every line strictly before `file_line`:
/// the screen-line of that file-line's first visual row.
pub fn file_to_screen(lines: &[Line], file_line: usize) -> usize {
    lines
        .iter()
        .take(file_line)
        .map(Line::wrapped_lines)
        .sum()
}

/// Total wrapped-row count across every line, cached by [`crate::Buffer`]
/// after each rewrap but recomputable here for verification.
pub fn total_wrapped_lines(lines: &[Line]) -> usize {
    lines.iter().map(Line::wrapped_lines).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pager_text::Line;

    /// Build lines whose `wrapped_lines()` match `rows` exactly. At the
    /// minimum clamped screen width (2 columns) a run of `2r - 1` printable
    /// bytes wraps into exactly `r` visual rows.
    fn lines_with_rows(rows: &[usize]) -> Vec<Line> {
        rows.iter()
            .map(|&r| {
                let mut l = Line::new(vec![b'a'; 2 * r - 1]);
                l.rewrap(2);
                assert_eq!(l.wrapped_lines(), r, "helper miscalibrated for r={r}");
                l
            })
            .collect()
    }

    #[test]
    fn round_trip_scenario() {
        // wrapped_lines = [1, 3, 2, 1]
        let lines = lines_with_rows(&[1, 3, 2, 1]);
        assert_eq!(screen_to_file(&lines, 0), (0, 0));
        assert_eq!(screen_to_file(&lines, 1), (1, 0));
        assert_eq!(screen_to_file(&lines, 3), (1, 2));
        assert_eq!(screen_to_file(&lines, 4), (2, 0));
        assert_eq!(screen_to_file(&lines, 6), (3, 0));
        // out of range clamps to last line, last segment
        assert_eq!(screen_to_file(&lines, 99), (3, 0));
    }

    #[test]
    fn file_to_screen_matches_cumulative_sum() {
        let lines = lines_with_rows(&[1, 3, 2, 1]);
        assert_eq!(file_to_screen(&lines, 0), 0);
        assert_eq!(file_to_screen(&lines, 1), 1);
        assert_eq!(file_to_screen(&lines, 2), 4);
        assert_eq!(file_to_screen(&lines, 3), 6);
    }

    #[test]
    fn round_trip_is_inverse_for_every_valid_line() {
        let lines = lines_with_rows(&[2, 1, 4, 3, 1]);
        for i in 0..lines.len() {
            let screen = file_to_screen(&lines, i);
            assert_eq!(screen_to_file(&lines, screen), (i, 0));
        }
    }

    #[test]
    fn empty_buffer_maps_to_origin() {
        let lines: Vec<Line> = Vec::new();
        assert_eq!(screen_to_file(&lines, 0), (0, 0));
        assert_eq!(total_wrapped_lines(&lines), 0);
    }
}
