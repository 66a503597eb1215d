//! Terminal backend abstraction and crossterm implementation.
//!
//! `crossterm` delivers a resize as an ordinary `Event::Resize(w, h)` from
//! the blocking read loop, not a raw `SIGWINCH` handler, so there is no
//! signal-safety hazard to guard against directly. [`PendingResize`] still
//! exists to preserve the discipline the original implementation needed for
//! its real signal handler: never act on a resize mid-frame, only record
//! that one happened and react to it once, right before the next render.

use anyhow::Result;
use crossterm::{
    cursor::Hide,
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod capabilities;
pub use capabilities::ColorCapabilities;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// A single `bool` flag, set from wherever a resize event is observed and
/// cleared by whoever acts on it. Kept as its own type (rather than a bare
/// `bool` on the event loop) so the "only ever set, never read-modify-write
/// outside the main loop" contract is explicit at the call site.
#[derive(Default)]
pub struct PendingResize(AtomicBool);

impl PendingResize {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn mark(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether a resize was pending, clearing the flag as a side
    /// effect. Call once per frame, before rendering.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}
