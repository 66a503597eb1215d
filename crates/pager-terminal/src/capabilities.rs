//! Color capability probing.
//!
//! Cheap, once-at-startup detection the renderer consults to decide whether
//! to emit color attributes at all. When the terminal has no color support,
//! the highlighter's classifications and the match overlay both become
//! no-ops rather than the renderer special-casing every call site.

use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ColorCapabilities {
    pub colors_enabled: bool,
}

impl ColorCapabilities {
    pub fn new(colors_enabled: bool) -> Self {
        Self { colors_enabled }
    }

    /// `NO_COLOR` (https://no-color.org) disables color unconditionally.
    /// Otherwise color is enabled only when stdout is an actual terminal,
    /// since a pipe or redirected file has no use for escape sequences.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let is_tty = std::io::stdout().is_terminal();
        Self {
            colors_enabled: !no_color && is_tty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_env_disables_regardless_of_tty() {
        // SAFETY: single-threaded test process; no other thread reads env concurrently.
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        let caps = ColorCapabilities::detect();
        assert!(!caps.colors_enabled);
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }
}
