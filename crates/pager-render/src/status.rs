//! Status footer composition: a two-stage pipeline (compose segments, then
//! render them to a string) so tests can assert on structure without
//! re-deriving the exact format string, mirroring how the rest of this
//! pager keeps data and layout separate.

use pager_model::Mode;

pub struct StatusContext<'a> {
    pub buffer_index: usize,
    pub buffer_count: usize,
    pub name: &'a str,
    pub current_line: usize,
    pub total_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    BufferPosition { index_1: usize, count: usize },
    Name(&'a str),
    LinePosition { line_1: usize, total: usize, percent: usize },
    Hint(&'static str),
}

const HINT: &str = "q:quit  n:next  p:prev  j:goto  s:search  l:line#";

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let percent = if ctx.total_lines == 0 {
        0
    } else {
        ((ctx.current_line + 1) * 100 / ctx.total_lines).min(100)
    };
    vec![
        StatusSegment::BufferPosition {
            index_1: ctx.buffer_index + 1,
            count: ctx.buffer_count,
        },
        StatusSegment::Name(ctx.name),
        StatusSegment::LinePosition {
            line_1: ctx.current_line + 1,
            total: ctx.total_lines,
            percent,
        },
        StatusSegment::Hint(HINT),
    ]
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(64);
    for seg in segments {
        match seg {
            StatusSegment::BufferPosition { index_1, count } => {
                let _ = write!(s, "[{}/{}] ", index_1, count);
            }
            StatusSegment::Name(name) => {
                let _ = write!(s, "{}  ", name);
            }
            StatusSegment::LinePosition {
                line_1,
                total,
                percent,
            } => {
                let _ = write!(s, "Ln {}/{} ({}%)  ", line_1, total, percent);
            }
            StatusSegment::Hint(hint) => s.push_str(hint),
        }
    }
    s
}

pub fn build_status(ctx: &StatusContext) -> String {
    format_status(&compose_status(ctx))
}

/// The bottom row: the active command/search line while editing it, the
/// normal-mode hint text otherwise. Returns the leading sigil (`:` or the
/// search direction's `/`/`?`) concatenated with the buffer's content.
pub fn build_input_line(mode: Mode, command_line: &str, search_line: &str, search_sigil: char) -> String {
    match mode {
        Mode::Command => format!(":{}", command_line),
        Mode::Search => format!("{}{}", search_sigil, search_line),
        Mode::Normal => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_status_with_percent() {
        let ctx = StatusContext {
            buffer_index: 0,
            buffer_count: 2,
            name: "a.txt",
            current_line: 49,
            total_lines: 100,
        };
        let s = build_status(&ctx);
        assert_eq!(s, "[1/2] a.txt  Ln 50/100 (50%)  q:quit  n:next  p:prev  j:goto  s:search  l:line#");
    }

    #[test]
    fn empty_buffer_shows_zero_percent() {
        let ctx = StatusContext {
            buffer_index: 0,
            buffer_count: 1,
            name: "empty",
            current_line: 0,
            total_lines: 0,
        };
        let s = build_status(&ctx);
        assert!(s.contains("Ln 1/0 (0%)"));
    }

    #[test]
    fn command_mode_input_line_has_colon_sigil() {
        assert_eq!(build_input_line(Mode::Command, "q", "", '/'), ":q");
    }

    #[test]
    fn search_mode_input_line_uses_direction_sigil() {
        assert_eq!(build_input_line(Mode::Search, "foo", "foo", '/'), "/foo");
        assert_eq!(build_input_line(Mode::Search, "foo", "foo", '?'), "?foo");
    }

    #[test]
    fn normal_mode_input_line_is_empty() {
        assert_eq!(build_input_line(Mode::Normal, "", "", '/'), "");
    }
}
