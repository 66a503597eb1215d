//! Maps [`pager_syntax::ColorClass`] and the search match overlay onto
//! concrete terminal colors.
//!
//! The match overlay is a distinct color reserved from every highlighter
//! class, so a matched region is never accidentally indistinguishable from
//! a keyword or string it happens to fall inside; overlay always wins.

use crossterm::style::Color;
use pager_syntax::ColorClass;

/// A resolved color for one run of bytes. `None` means "use the terminal's
/// default foreground" and is also what every variant resolves to when
/// color support is disabled.
pub fn resolve(class: ColorClass, colors_enabled: bool) -> Option<Color> {
    if !colors_enabled {
        return None;
    }
    Some(match class {
        ColorClass::Preprocessor => Color::Magenta,
        ColorClass::KeywordA => Color::Yellow,
        ColorClass::KeywordB => Color::Cyan,
        ColorClass::Comment => Color::DarkGrey,
        ColorClass::StringOrChar => Color::Green,
        ColorClass::Number => Color::Blue,
        ColorClass::Operator => Color::White,
        ColorClass::Default => return None,
    })
}

/// The color a search match is painted with, bypassing whatever the
/// highlighter would have chosen for that byte range.
pub fn match_color(colors_enabled: bool) -> Option<Color> {
    colors_enabled.then_some(Color::Black)
}

/// The background a search match is painted with.
pub fn match_background(colors_enabled: bool) -> Option<Color> {
    colors_enabled.then_some(Color::Yellow)
}
