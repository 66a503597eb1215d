//! Single-pass syntax highlighter over one wrapped segment's bytes.
//!
//! Each call starts in [`HighlightState::Default`]; comment and string state
//! is never carried from one segment to the next, so a block comment that
//! spans a wrap boundary (or a line boundary) loses its color after the
//! first segment. That is a known limitation of highlighting independently
//! per displayed segment rather than re-lexing the whole file on every
//! frame.

mod keywords;

use keywords::KEYWORDS;

/// The color bucket a run of bytes should be painted with. The renderer owns
/// turning these into actual terminal attributes (and turns all of them into
/// no-ops when the terminal has no color support); this crate only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Preprocessor,
    KeywordA,
    KeywordB,
    Comment,
    StringOrChar,
    Number,
    Operator,
    Default,
}

/// The five-state machine this highlighter walks per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HighlightState {
    Default,
    InString,
    InChar,
    InLineComment,
    InBlockComment,
}

/// One contiguous run of bytes sharing a [`ColorClass`], as a half-open range
/// local to the segment passed to [`highlight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub class: ColorClass,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Match the longest-declared keyword starting exactly at `i`, honoring word
/// boundaries on both sides (adjacent bytes, if any, must not themselves be
/// alphanumeric). Ties go to whichever table entry is declared first.
fn match_keyword(segment: &[u8], i: usize) -> Option<(usize, ColorClass)> {
    for (literal, class) in KEYWORDS {
        let bytes = literal.as_bytes();
        let len = bytes.len();
        if i + len > segment.len() {
            continue;
        }
        if &segment[i..i + len] != bytes {
            continue;
        }
        if i > 0 && is_word_byte(segment[i - 1]) {
            continue;
        }
        if i + len < segment.len() && is_word_byte(segment[i + len]) {
            continue;
        }
        return Some((len, *class));
    }
    None
}

const OPERATOR_BYTES: &[u8] = b"+-*/%=<>!&|^~.,:;()[]{}";

/// Classify and run-length-encode one segment of raw bytes into colored
/// spans. Entry state is always [`HighlightState::Default`]; see the module
/// docs for the cross-segment limitation this implies.
pub fn highlight(segment: &[u8]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut state = HighlightState::Default;
    let mut prev_byte: Option<u8> = None;
    let mut run: Option<(usize, ColorClass)> = None;
    let mut i = 0usize;

    while i < segment.len() {
        let b = segment[i];
        let mut consumed = 1usize;
        let class;

        match state {
            HighlightState::Default => {
                if b == b'/' && segment.get(i + 1) == Some(&b'*') {
                    state = HighlightState::InBlockComment;
                    class = ColorClass::Comment;
                    consumed = 2;
                } else if b == b'/' && segment.get(i + 1) == Some(&b'/') {
                    state = HighlightState::InLineComment;
                    class = ColorClass::Comment;
                    consumed = 2;
                } else if b == b'"' && prev_byte != Some(b'\\') {
                    state = HighlightState::InString;
                    class = ColorClass::StringOrChar;
                } else if b == b'\'' && prev_byte != Some(b'\\') {
                    state = HighlightState::InChar;
                    class = ColorClass::StringOrChar;
                } else if let Some((len, kw_class)) = match_keyword(segment, i) {
                    class = kw_class;
                    consumed = len;
                } else if b.is_ascii_digit()
                    || (b == b'-'
                        && segment
                            .get(i + 1)
                            .is_some_and(u8::is_ascii_digit))
                {
                    class = ColorClass::Number;
                } else if OPERATOR_BYTES.contains(&b) {
                    class = ColorClass::Operator;
                } else {
                    class = ColorClass::Default;
                }
            }
            HighlightState::InBlockComment => {
                if b == b'*' && segment.get(i + 1) == Some(&b'/') {
                    class = ColorClass::Comment;
                    consumed = 2;
                    state = HighlightState::Default;
                } else {
                    class = ColorClass::Comment;
                }
            }
            HighlightState::InLineComment => {
                class = ColorClass::Comment;
                if b == b'\n' {
                    state = HighlightState::Default;
                }
            }
            HighlightState::InString => {
                class = ColorClass::StringOrChar;
                if b == b'"' && prev_byte != Some(b'\\') {
                    state = HighlightState::Default;
                }
            }
            HighlightState::InChar => {
                class = ColorClass::StringOrChar;
                if b == b'\'' && prev_byte != Some(b'\\') {
                    state = HighlightState::Default;
                }
            }
        }

        match run {
            Some((start, c)) if c == class => {
                run = Some((start, c));
            }
            _ => {
                if let Some((start, c)) = run {
                    spans.push(Span {
                        start,
                        end: i,
                        class: c,
                    });
                }
                run = Some((i, class));
            }
        }

        prev_byte = Some(segment[i + consumed - 1]);
        i += consumed;
    }

    if let Some((start, class)) = run {
        spans.push(Span {
            start,
            end: segment.len(),
            class,
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_segment_has_no_spans() {
        assert!(highlight(b"").is_empty());
    }

    #[test]
    fn plain_text_is_one_default_span() {
        let spans = highlight(b"hello world");
        assert_eq!(
            spans,
            vec![Span {
                start: 0,
                end: 11,
                class: ColorClass::Default
            }]
        );
    }

    #[test]
    fn keyword_is_isolated_from_surrounding_default_text() {
        let spans = highlight(b"return x");
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, 6);
        assert_eq!(spans[0].class, ColorClass::KeywordA);
        assert_eq!(spans[1].class, ColorClass::Default);
    }

    #[test]
    fn keyword_inside_a_longer_identifier_does_not_match() {
        let spans = highlight(b"returning");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].class, ColorClass::Default);
    }

    #[test]
    fn preprocessor_directive_is_classified() {
        let spans = highlight(b"#include <stdio.h>");
        assert_eq!(spans[0].class, ColorClass::Preprocessor);
        assert_eq!(spans[0].end, 8);
    }

    #[test]
    fn line_comment_runs_to_end_of_segment() {
        let spans = highlight(b"x = 1 // trailing note");
        let last = spans.last().unwrap();
        assert_eq!(last.class, ColorClass::Comment);
        assert_eq!(last.end, 23);
    }

    #[test]
    fn line_comment_stops_at_embedded_newline() {
        let spans = highlight(b"// comment\ncode");
        assert_eq!(spans[0].class, ColorClass::Comment);
        assert_eq!(spans[0].end, 11);
        assert_eq!(spans[1].class, ColorClass::Default);
    }

    #[test]
    fn block_comment_closes_within_segment() {
        let spans = highlight(b"/* c */ rest");
        assert_eq!(spans[0].class, ColorClass::Comment);
        assert_eq!(spans[0].end, 7);
        assert_eq!(spans[1].class, ColorClass::Default);
    }

    #[test]
    fn unterminated_block_comment_consumes_rest_of_segment() {
        let spans = highlight(b"text /* never closes");
        let last = spans.last().unwrap();
        assert_eq!(last.class, ColorClass::Comment);
        assert_eq!(last.end, 21);
    }

    #[test]
    fn string_literal_is_classified_including_quotes() {
        let spans = highlight(b"let s = \"hi\";");
        let string_span = spans
            .iter()
            .find(|s| s.class == ColorClass::StringOrChar)
            .unwrap();
        assert_eq!(&b"let s = \"hi\";"[string_span.start..string_span.end], b"\"hi\"");
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let spans = highlight(br#""a\"b""#);
        let s = spans
            .iter()
            .find(|s| s.class == ColorClass::StringOrChar)
            .unwrap();
        assert_eq!(s.end, 6);
    }

    #[test]
    fn char_literal_is_classified() {
        let spans = highlight(b"'a'");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].class, ColorClass::StringOrChar);
    }

    #[test]
    fn number_and_negative_number_are_classified() {
        let spans = highlight(b"x -5 y");
        assert!(spans.iter().any(|s| s.class == ColorClass::Number));
    }

    #[test]
    fn operator_bytes_are_classified() {
        let spans = highlight(b"a+b");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].class, ColorClass::Operator);
    }

    #[test]
    fn keyword_b_type_is_classified() {
        let spans = highlight(b"size_t n");
        assert_eq!(spans[0].class, ColorClass::KeywordB);
    }

    #[test]
    fn spans_cover_segment_with_no_gaps_or_overlaps() {
        let segment: &[u8] = b"#define MAX 10 // limit\nreturn \"ok\" + size_t;";
        let spans = highlight(segment);
        let mut cursor = 0usize;
        for s in &spans {
            assert_eq!(s.start, cursor);
            assert!(s.end > s.start);
            cursor = s.end;
        }
        assert_eq!(cursor, segment.len());
    }
}
