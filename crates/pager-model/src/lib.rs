//! Buffer and editor state: the part of the display engine that owns what
//! is on screen and where the viewport sits within it.
//!
//! `pager-text` owns one [`pager_text::Line`]; this crate owns the ordered
//! collection of lines that makes up a [`Buffer`], the collection of buffers
//! and modal input state that makes up an [`Editor`], and the coordinate
//! mapper that ties screen rows to file lines.

pub mod coordinate;

use pager_text::{Line, MAX_LINE_LENGTH, TextError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long a status-row error flash (invalid regex, invalid command, bad
/// goto target) stays visible before the renderer falls back to the normal
/// mode-line content.
pub const FLASH_DURATION: Duration = Duration::from_secs(1);

/// Hard cap on lines held by a single buffer, matching the bounded-buffer
/// pager this crate reimplements.
pub const MAX_LINES: usize = 100_000;
/// Hard cap on simultaneously open buffers.
pub const MAX_BUFFERS: usize = 100;
/// Capacity of the command-line and search-line text buffers.
pub const INPUT_LINE_CAP: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("buffer '{name}' is at its {MAX_LINES}-line capacity")]
    LineCapacityExceeded { name: String },
    #[error("editor already holds the maximum of {MAX_BUFFERS} buffers")]
    BufferCapacityExceeded,
    #[error("editor has no buffers")]
    NoBuffers,
    #[error(transparent)]
    Text(#[from] TextError),
}

/// One open document: an ordered line sequence plus the viewport/cursor
/// state needed to render and navigate it.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Line>,
    name: String,
    current_line: usize,
    screen_line: usize,
    total_wrapped_lines: usize,
    show_line_numbers: bool,
}

impl Buffer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            name: name.into(),
            current_line: 0,
            screen_line: 0,
            total_wrapped_lines: 0,
            show_line_numbers: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line, splitting content longer than [`MAX_LINE_LENGTH`] - 1
    /// bytes at that boundary to match the bounded-line-buffer contract.
    pub fn append_raw(&mut self, content: Vec<u8>) -> Result<(), ModelError> {
        if content.len() <= MAX_LINE_LENGTH - 1 {
            return self.push_line(content);
        }
        for chunk in content.chunks(MAX_LINE_LENGTH - 1) {
            self.push_line(chunk.to_vec())?;
        }
        Ok(())
    }

    fn push_line(&mut self, content: Vec<u8>) -> Result<(), ModelError> {
        if self.lines.len() >= MAX_LINES {
            return Err(ModelError::LineCapacityExceeded {
                name: self.name.clone(),
            });
        }
        self.lines.push(Line::new(content));
        Ok(())
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// Set the logical current line, clamped to the valid range.
    pub fn set_current_line(&mut self, line: usize) {
        self.current_line = if self.lines.is_empty() {
            0
        } else {
            line.min(self.lines.len() - 1)
        };
    }

    pub fn screen_line(&self) -> usize {
        self.screen_line
    }

    /// Set the top visible visual row, clamped so it never exceeds the last
    /// row of content (per the open question in the design notes: free
    /// scrolling past the end desyncs the coordinate mapper, so we clamp
    /// rather than let `screen_line` run past `total_wrapped_lines`).
    pub fn set_screen_line(&mut self, screen_line: usize) {
        self.screen_line = if self.total_wrapped_lines == 0 {
            0
        } else {
            screen_line.min(self.total_wrapped_lines - 1)
        };
    }

    pub fn total_wrapped_lines(&self) -> usize {
        self.total_wrapped_lines
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
    }

    /// Recompute wrap offsets for every line at the given screen width and
    /// refresh the cached total. Called at load time and on every resize.
    pub fn rewrap_all(&mut self, screen_width: usize) {
        for line in &mut self.lines {
            line.rewrap(screen_width);
        }
        self.total_wrapped_lines = coordinate::total_wrapped_lines(&self.lines);
    }

    /// Move `current_line` to match the file-line under `screen_line` via
    /// the coordinate mapper; used after any viewport scroll.
    pub fn sync_current_line_to_screen(&mut self) {
        let (file_line, _) = coordinate::screen_to_file(&self.lines, self.screen_line);
        self.current_line = file_line;
    }

    /// Place the viewport so `screen_line` is the first visible row of
    /// `file_line`, then sync the cursor; used after a successful jump or
    /// search.
    pub fn jump_to_line(&mut self, file_line: usize) {
        self.set_current_line(file_line);
        self.screen_line = coordinate::file_to_screen(&self.lines, self.current_line);
    }

    pub fn line_mut(&mut self, idx: usize) -> Option<&mut Line> {
        self.lines.get_mut(idx)
    }

    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Top-level state: the buffer list plus the modal command/search input
/// lines. `last_search_direction` is retained (per the design notes) even
/// though `n`/`p` do not currently consult it.
#[derive(Debug)]
pub struct Editor {
    buffers: Vec<Buffer>,
    current_buffer: usize,
    command_line: String,
    search_line: String,
    mode: Mode,
    last_search_direction: SearchDirection,
    last_pattern: String,
    flash: Option<(String, Instant)>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            current_buffer: 0,
            command_line: String::new(),
            search_line: String::new(),
            mode: Mode::Normal,
            last_search_direction: SearchDirection::Forward,
            last_pattern: String::new(),
            flash: None,
        }
    }

    /// Arm a one-second status-row error flash (invalid regex, invalid
    /// command, out-of-range goto). The renderer shows it in place of the
    /// normal mode line until it expires.
    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some((message.into(), Instant::now() + FLASH_DURATION));
    }

    /// The current flash message, if one is armed and has not yet expired.
    pub fn flash_message(&self) -> Option<&str> {
        self.flash
            .as_ref()
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(message, _)| message.as_str())
    }

    pub fn new_buffer(&mut self, name: impl Into<String>) -> Result<usize, ModelError> {
        if self.buffers.len() >= MAX_BUFFERS {
            return Err(ModelError::BufferCapacityExceeded);
        }
        self.buffers.push(Buffer::new(name));
        Ok(self.buffers.len() - 1)
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn buffers_mut(&mut self) -> &mut [Buffer] {
        &mut self.buffers
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn current_buffer_index(&self) -> usize {
        self.current_buffer
    }

    pub fn current_buffer(&self) -> Option<&Buffer> {
        self.buffers.get(self.current_buffer)
    }

    pub fn current_buffer_mut(&mut self) -> Option<&mut Buffer> {
        self.buffers.get_mut(self.current_buffer)
    }

    /// Access a buffer by index, independent of which one is current; used
    /// by startup buffer loading, which fills each buffer in turn without
    /// switching the editor's focus to it.
    pub fn buffer_mut(&mut self, idx: usize) -> Option<&mut Buffer> {
        self.buffers.get_mut(idx)
    }

    /// Close the current buffer. Returns `true` if the editor is now empty
    /// (the caller should exit the program).
    pub fn close_current_buffer(&mut self) -> bool {
        if self.buffers.is_empty() {
            return true;
        }
        self.buffers.remove(self.current_buffer);
        if self.buffers.is_empty() {
            return true;
        }
        if self.current_buffer >= self.buffers.len() {
            self.current_buffer = self.buffers.len() - 1;
        }
        false
    }

    pub fn next_buffer(&mut self) {
        if self.current_buffer + 1 < self.buffers.len() {
            self.current_buffer += 1;
        }
    }

    pub fn prev_buffer(&mut self) {
        self.current_buffer = self.current_buffer.saturating_sub(1);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn search_line(&self) -> &str {
        &self.search_line
    }

    pub fn last_pattern(&self) -> &str {
        &self.last_pattern
    }

    pub fn set_last_pattern(&mut self, pattern: impl Into<String>) {
        self.last_pattern = pattern.into();
    }

    pub fn last_search_direction(&self) -> SearchDirection {
        self.last_search_direction
    }

    pub fn set_last_search_direction(&mut self, dir: SearchDirection) {
        self.last_search_direction = dir;
    }

    pub fn enter_command_mode(&mut self) {
        self.command_line.clear();
        self.mode = Mode::Command;
    }

    pub fn enter_search_mode(&mut self) {
        self.search_line.clear();
        self.mode = Mode::Search;
    }

    pub fn return_to_normal_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    fn push_char(buf: &mut String, c: char) {
        if buf.len() < INPUT_LINE_CAP {
            buf.push(c);
        }
    }

    pub fn push_command_char(&mut self, c: char) {
        Self::push_char(&mut self.command_line, c);
    }

    pub fn push_search_char(&mut self, c: char) {
        Self::push_char(&mut self.search_line, c);
    }

    pub fn backspace_command(&mut self) {
        self.command_line.pop();
    }

    pub fn backspace_search(&mut self) {
        self.search_line.pop();
    }

    pub fn clear_command_line(&mut self) {
        self.command_line.clear();
    }

    pub fn clear_search_line(&mut self) {
        self.search_line.clear();
    }
}
