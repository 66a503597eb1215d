//! Modal input state machine: translates crossterm key events into buffer
//! and editor mutations according to the current [`Mode`].
//!
//! Reading events is the caller's job (a single blocking `crossterm::event::read`
//! per iteration of the main loop, per this pager's single-threaded,
//! cooperative event model) — this crate only decides what a given event
//! means once it has one. User-recoverable failures (an invalid regex, an
//! unrecognized command, an out-of-range goto target) never propagate as
//! errors; they arm a status-row flash on the [`Editor`] and the pager keeps
//! running.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pager_model::{Editor, Mode, SearchDirection};
use tracing::debug;

/// Run a search, arming a one-second status-row flash instead of surfacing
/// an invalid pattern as a hard error — the pager stays usable after a typo.
fn run_search(editor: &mut Editor, pattern: &str, direction: SearchDirection) -> bool {
    let Some(buffer) = editor.current_buffer_mut() else {
        return false;
    };
    let result = match direction {
        SearchDirection::Forward => pager_search::search_forward(buffer, pattern),
        SearchDirection::Backward => pager_search::search_backward(buffer, pattern),
    };
    match result {
        Ok(found) => found,
        Err(e) => {
            editor.set_flash(e.to_string());
            false
        }
    }
}

/// What the main loop should do after handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
    Resized(u16, u16),
}

/// Handle one terminal event against the editor's current mode. `content_rows`
/// is how many rows of buffer text are visible, needed to size a page
/// scroll; it is always `rows - 2` (the footer takes the last two rows).
pub fn handle_event(editor: &mut Editor, event: Event, content_rows: u16) -> Action {
    match event {
        Event::Resize(cols, rows) => Action::Resized(cols, rows),
        Event::Key(key) => handle_key(editor, key, content_rows),
        _ => Action::Continue,
    }
}

fn handle_key(editor: &mut Editor, key: KeyEvent, content_rows: u16) -> Action {
    match editor.mode() {
        Mode::Normal => handle_normal_key(editor, key, content_rows),
        Mode::Command => handle_command_key(editor, key),
        Mode::Search => handle_search_key(editor, key),
    }
}

/// `content_rows` is `rows - 2` (the footer). Page-scroll steps use the
/// original pager's `LINES - 3` page size, one row short of that, so the
/// destination line stays visible beneath the freshly scrolled footer.
fn handle_normal_key(editor: &mut Editor, key: KeyEvent, content_rows: u16) -> Action {
    let page_size = content_rows.saturating_sub(1) as usize;
    let last_pattern = editor.last_pattern().to_string();
    let Some(buffer) = editor.current_buffer_mut() else {
        if matches!(key.code, KeyCode::Char('q')) {
            return Action::Quit;
        }
        return Action::Continue;
    };
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char(':') => editor.enter_command_mode(),
        KeyCode::Char('/') => {
            editor.set_last_search_direction(SearchDirection::Forward);
            editor.enter_search_mode();
        }
        KeyCode::Char('n') => {
            if !last_pattern.is_empty() {
                run_search(editor, &last_pattern, SearchDirection::Forward);
            }
        }
        KeyCode::Char('p') => {
            if !last_pattern.is_empty() {
                run_search(editor, &last_pattern, SearchDirection::Backward);
            }
        }
        KeyCode::Down => {
            buffer.set_screen_line(buffer.screen_line() + 1);
            buffer.sync_current_line_to_screen();
        }
        KeyCode::Up => {
            if buffer.screen_line() > 0 {
                buffer.set_screen_line(buffer.screen_line() - 1);
                buffer.sync_current_line_to_screen();
            }
        }
        KeyCode::Char(' ') => {
            buffer.set_screen_line(buffer.screen_line() + page_size);
            buffer.sync_current_line_to_screen();
        }
        KeyCode::Char('b') => {
            buffer.set_screen_line(buffer.screen_line().saturating_sub(page_size));
            buffer.sync_current_line_to_screen();
        }
        KeyCode::Char(']') => editor.next_buffer(),
        KeyCode::Char('[') => editor.prev_buffer(),
        _ => {}
    }
    Action::Continue
}

fn handle_command_key(editor: &mut Editor, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => {
            editor.clear_command_line();
            editor.return_to_normal_mode();
        }
        KeyCode::Backspace => editor.backspace_command(),
        KeyCode::Char(c) => editor.push_command_char(c),
        KeyCode::Enter => {
            let command = editor.command_line().to_string();
            editor.clear_command_line();
            editor.return_to_normal_mode();
            return execute_command(editor, &command);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_search_key(editor: &mut Editor, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => {
            editor.clear_search_line();
            editor.return_to_normal_mode();
        }
        KeyCode::Backspace => editor.backspace_search(),
        KeyCode::Char(c) => editor.push_search_char(c),
        KeyCode::Enter => {
            let pattern = editor.search_line().to_string();
            let direction = editor.last_search_direction();
            editor.clear_search_line();
            editor.return_to_normal_mode();
            if pattern.is_empty() {
                return Action::Continue;
            }
            editor.set_last_pattern(pattern.clone());
            if !run_search(editor, &pattern, direction) {
                debug!(pattern, "search had no matches");
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Execute one completed `:`-command line against the editor vocabulary:
/// `q` (close current buffer, quit if it was the last), `n` (next buffer),
/// `p` (previous buffer), `l` (toggle line numbers), `j<N>` (goto 1-based
/// line N), `s/<pattern>` (forward search) and `s?<pattern>` (backward
/// search). Anything else, or a malformed `j`/`s` argument, arms a
/// status-row flash rather than failing the event loop.
fn execute_command(editor: &mut Editor, command: &str) -> Action {
    let command = command.trim();
    match command {
        "q" => {
            return if editor.close_current_buffer() {
                Action::Quit
            } else {
                Action::Continue
            };
        }
        "n" => {
            editor.next_buffer();
            return Action::Continue;
        }
        "p" => {
            editor.prev_buffer();
            return Action::Continue;
        }
        "l" => {
            if let Some(buffer) = editor.current_buffer_mut() {
                buffer.toggle_line_numbers();
            }
            return Action::Continue;
        }
        _ => {}
    }
    if let Some(rest) = command.strip_prefix('j') {
        match rest.parse::<usize>() {
            Ok(line_1) if line_1 >= 1 => {
                if let Some(buffer) = editor.current_buffer_mut() {
                    buffer.jump_to_line(line_1 - 1);
                }
            }
            _ => editor.set_flash(format!("invalid line number: {rest}")),
        }
        return Action::Continue;
    }
    if let Some(pattern) = command.strip_prefix("s/") {
        editor.set_last_search_direction(SearchDirection::Forward);
        editor.set_last_pattern(pattern);
        run_search(editor, pattern, SearchDirection::Forward);
        return Action::Continue;
    }
    if let Some(pattern) = command.strip_prefix("s?") {
        editor.set_last_search_direction(SearchDirection::Backward);
        editor.set_last_pattern(pattern);
        run_search(editor, pattern, SearchDirection::Backward);
        return Action::Continue;
    }
    editor.set_flash(format!("invalid command: {command}"));
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editor_with_lines(lines: &[&str]) -> Editor {
        let mut editor = Editor::new();
        editor.new_buffer("test").unwrap();
        let buf = editor.current_buffer_mut().unwrap();
        for l in lines {
            buf.append_raw(l.as_bytes().to_vec()).unwrap();
        }
        buf.rewrap_all(80);
        editor
    }

    #[test]
    fn q_in_normal_mode_quits() {
        let mut editor = editor_with_lines(&["one"]);
        let action = handle_key(&mut editor, key(KeyCode::Char('q')), 20);
        assert_eq!(action, Action::Quit);
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut editor = editor_with_lines(&["one"]);
        handle_key(&mut editor, key(KeyCode::Char(':')), 20);
        assert_eq!(editor.mode(), Mode::Command);
    }

    #[test]
    fn slash_enters_search_mode_forward() {
        let mut editor = editor_with_lines(&["one"]);
        handle_key(&mut editor, key(KeyCode::Char('/')), 20);
        assert_eq!(editor.mode(), Mode::Search);
        assert_eq!(editor.last_search_direction(), SearchDirection::Forward);
    }

    #[test]
    fn command_q_quits_after_enter() {
        let mut editor = editor_with_lines(&["one"]);
        handle_key(&mut editor, key(KeyCode::Char(':')), 20);
        handle_key(&mut editor, key(KeyCode::Char('q')), 20);
        let action = handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(action, Action::Quit);
    }

    #[test]
    fn command_q_closes_buffer_without_quitting_when_others_remain() {
        let mut editor = editor_with_lines(&["one"]);
        editor.new_buffer("second").unwrap();
        handle_key(&mut editor, key(KeyCode::Char(':')), 20);
        handle_key(&mut editor, key(KeyCode::Char('q')), 20);
        let action = handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(action, Action::Continue);
        assert_eq!(editor.buffer_count(), 1);
    }

    #[test]
    fn command_goto_line_moves_cursor() {
        let mut editor = editor_with_lines(&["a", "b", "c", "d"]);
        for c in "j3".chars() {
            handle_key(&mut editor, key(KeyCode::Char(':')), 20);
            handle_key(&mut editor, key(KeyCode::Char(c)), 20);
        }
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(editor.current_buffer().unwrap().current_line(), 2);
    }

    #[test]
    fn command_goto_line_with_bad_argument_flashes_and_does_not_move() {
        let mut editor = editor_with_lines(&["a", "b", "c"]);
        editor.current_buffer_mut().unwrap().set_current_line(0);
        for c in "jxyz".chars() {
            handle_key(&mut editor, key(KeyCode::Char(':')), 20);
            handle_key(&mut editor, key(KeyCode::Char(c)), 20);
        }
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(editor.current_buffer().unwrap().current_line(), 0);
        assert!(editor.flash_message().is_some());
    }

    #[test]
    fn unrecognized_command_arms_a_flash() {
        let mut editor = editor_with_lines(&["one"]);
        for c in "zzz".chars() {
            handle_key(&mut editor, key(KeyCode::Char(':')), 20);
            handle_key(&mut editor, key(KeyCode::Char(c)), 20);
        }
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert!(editor.flash_message().is_some());
    }

    #[test]
    fn invalid_search_pattern_arms_a_flash_instead_of_erroring() {
        let mut editor = editor_with_lines(&["one"]);
        handle_key(&mut editor, key(KeyCode::Char('/')), 20);
        for c in "[unterminated".chars() {
            handle_key(&mut editor, key(KeyCode::Char(c)), 20);
        }
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(editor.mode(), Mode::Normal);
        assert!(editor.flash_message().is_some());
    }

    #[test]
    fn escape_from_command_mode_returns_to_normal() {
        let mut editor = editor_with_lines(&["one"]);
        handle_key(&mut editor, key(KeyCode::Char(':')), 20);
        handle_key(&mut editor, key(KeyCode::Esc), 20);
        assert_eq!(editor.mode(), Mode::Normal);
        assert_eq!(editor.command_line(), "");
    }

    #[test]
    fn search_enter_runs_forward_search() {
        let mut editor = editor_with_lines(&["foo", "bar baz", "qux"]);
        handle_key(&mut editor, key(KeyCode::Char('/')), 20);
        for c in "bar".chars() {
            handle_key(&mut editor, key(KeyCode::Char(c)), 20);
        }
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(editor.mode(), Mode::Normal);
        assert_eq!(editor.current_buffer().unwrap().current_line(), 1);
    }

    #[test]
    fn resize_event_is_reported_as_action() {
        let mut editor = editor_with_lines(&["one"]);
        let action = handle_event(&mut editor, Event::Resize(100, 40), 20);
        assert_eq!(action, Action::Resized(100, 40));
    }

    #[test]
    fn key_event_kind_release_does_not_panic() {
        let mut editor = editor_with_lines(&["one"]);
        let mut k = key(KeyCode::Char('j'));
        k.kind = KeyEventKind::Release;
        handle_key(&mut editor, k, 20);
    }

    #[test]
    fn command_n_switches_to_next_buffer() {
        let mut editor = editor_with_lines(&["one"]);
        editor.new_buffer("second").unwrap();
        assert_eq!(editor.current_buffer_index(), 0);
        handle_key(&mut editor, key(KeyCode::Char(':')), 20);
        handle_key(&mut editor, key(KeyCode::Char('n')), 20);
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(editor.current_buffer_index(), 1);
        handle_key(&mut editor, key(KeyCode::Char(':')), 20);
        handle_key(&mut editor, key(KeyCode::Char('p')), 20);
        handle_key(&mut editor, key(KeyCode::Enter), 20);
        assert_eq!(editor.current_buffer_index(), 0);
    }

    #[test]
    fn bracket_keys_switch_buffers_in_normal_mode() {
        let mut editor = editor_with_lines(&["one"]);
        editor.new_buffer("second").unwrap();
        handle_key(&mut editor, key(KeyCode::Char(']')), 20);
        assert_eq!(editor.current_buffer_index(), 1);
        handle_key(&mut editor, key(KeyCode::Char('[')), 20);
        assert_eq!(editor.current_buffer_index(), 0);
    }

    #[test]
    fn n_key_repeats_last_search_forward() {
        let mut editor = editor_with_lines(&["foo", "bar", "foo"]);
        editor.set_last_pattern("foo");
        editor.current_buffer_mut().unwrap().set_current_line(1);
        handle_key(&mut editor, key(KeyCode::Char('n')), 20);
        assert_eq!(editor.current_buffer().unwrap().current_line(), 2);
    }

    #[test]
    fn n_key_is_a_no_op_with_no_prior_pattern() {
        let mut editor = editor_with_lines(&["one"]);
        let action = handle_key(&mut editor, key(KeyCode::Char('n')), 20);
        assert_eq!(action, Action::Continue);
    }

    #[test]
    fn space_and_b_page_the_viewport() {
        let lines: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut editor = editor_with_lines(&refs);
        handle_key(&mut editor, key(KeyCode::Char(' ')), 20);
        let after_down = editor.current_buffer().unwrap().screen_line();
        assert_eq!(after_down, 19);
        handle_key(&mut editor, key(KeyCode::Char('b')), 20);
        assert_eq!(editor.current_buffer().unwrap().screen_line(), 0);
    }
}
