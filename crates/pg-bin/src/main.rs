//! Pager entrypoint.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pager_model::{Buffer, Editor, ModelError};
use pager_render::writer::Writer;
use pager_terminal::{ColorCapabilities, CrosstermBackend, PendingResize, TerminalBackend, TerminalGuard};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::{Command as ShellCommand, Stdio};
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pg",
    version,
    about = "A read-only terminal pager with syntax highlighting, regex search, and multi-buffer navigation",
    disable_version_flag = true
)]
struct Args {
    /// Files to open, each as its own buffer.
    files: Vec<PathBuf>,

    /// Run CMD in a shell and load its stdout as a new buffer. Repeatable.
    #[arg(long = "multi", value_name = "CMD")]
    multi: Vec<String>,

    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = std::path::Path::new(".");
        let log_path = log_dir.join("pg.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }
        let file_appender = tracing_appender::rolling::never(log_dir, "pg.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(()) => self.log_guard = Some(guard),
            Err(_) => {
                // A global subscriber is already installed (e.g. under test); drop the
                // guard immediately since nothing will read through this writer.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct LoadTelemetry {
    buffers_loaded: usize,
    open_failures: usize,
}

/// Split already-decoded text into lines on `\n`, tolerating a single
/// trailing newline without producing a spurious empty final line.
fn load_text_into_buffer(buffer: &mut Buffer, text: &[u8]) -> Result<(), ModelError> {
    let text = text.strip_suffix(b"\n").unwrap_or(text);
    if text.is_empty() {
        return Ok(());
    }
    for line in text.split(|&b| b == b'\n') {
        buffer.append_raw(line.to_vec())?;
    }
    Ok(())
}

fn load_file(editor: &mut Editor, path: &PathBuf, telemetry: &mut LoadTelemetry) {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    match std::fs::read(path) {
        Ok(bytes) => match editor.new_buffer(name) {
            Ok(idx) => {
                let buffer = editor.buffer_mut(idx).expect("just created");
                if let Err(e) = load_text_into_buffer(buffer, &bytes) {
                    warn!(path = %path.display(), error = %e, "buffer capacity exceeded while loading file");
                }
                telemetry.buffers_loaded += 1;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "could not open a buffer for file"),
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to open file, skipping");
            telemetry.open_failures += 1;
        }
    }
}

fn load_multi_command(editor: &mut Editor, cmd: &str, telemetry: &mut LoadTelemetry) {
    let output = ShellCommand::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .output();
    match output {
        Ok(out) => match editor.new_buffer(cmd.to_string()) {
            Ok(idx) => {
                let buffer = editor.buffer_mut(idx).expect("just created");
                if let Err(e) = load_text_into_buffer(buffer, &out.stdout) {
                    warn!(cmd, error = %e, "buffer capacity exceeded while loading command output");
                }
                telemetry.buffers_loaded += 1;
            }
            Err(e) => warn!(cmd, error = %e, "could not open a buffer for command output"),
        },
        Err(e) => {
            warn!(cmd, error = %e, "failed to run --multi command, skipping");
            telemetry.open_failures += 1;
        }
    }
}

/// If stdin is a pipe (not a terminal), split it on NUL bytes into one
/// buffer per chunk, named `pipe-1`, `pipe-2`, ... Reading a real terminal's
/// stdin here would block forever waiting for EOF, so this is skipped
/// whenever stdin is interactive.
fn load_stdin_pipe(editor: &mut Editor, telemetry: &mut LoadTelemetry) {
    if std::io::stdin().is_terminal() {
        return;
    }
    let mut raw = Vec::new();
    if std::io::stdin().read_to_end(&mut raw).is_err() {
        return;
    }
    for (i, chunk) in raw.split(|&b| b == 0).enumerate() {
        if chunk.is_empty() {
            continue;
        }
        let name = format!("pipe-{}", i + 1);
        match editor.new_buffer(name) {
            Ok(idx) => {
                let buffer = editor.buffer_mut(idx).expect("just created");
                if load_text_into_buffer(buffer, chunk).is_ok() {
                    telemetry.buffers_loaded += 1;
                }
            }
            Err(e) => warn!(error = %e, "could not open a buffer for piped input"),
        }
    }
}

fn rewrap_buffer(buffer: &mut Buffer, cols: u16) {
    let gutter = pager_render::gutter_width(buffer);
    let width = cols.saturating_sub(gutter).max(1) as usize;
    buffer.rewrap_all(width);
}

fn build_editor(args: &Args, telemetry: &mut LoadTelemetry) -> Editor {
    let mut editor = Editor::new();
    for cmd in &args.multi {
        load_multi_command(&mut editor, cmd, telemetry);
    }
    load_stdin_pipe(&mut editor, telemetry);
    for path in &args.files {
        load_file(&mut editor, path, telemetry);
    }
    editor
}

fn run(args: Args, guard: TerminalGuard<'_>) -> Result<i32> {
    let mut telemetry = LoadTelemetry::default();
    let mut editor = build_editor(&args, &mut telemetry);

    if editor.buffer_count() == 0 {
        drop(guard);
        eprintln!("pg: no buffers to display (no readable files, commands, or piped input)");
        return Ok(1);
    }

    info!(
        buffers_loaded = telemetry.buffers_loaded,
        open_failures = telemetry.open_failures,
        "startup complete"
    );

    let (cols, rows) = crossterm::terminal::size().context("could not query terminal size")?;
    for buffer in editor.buffers_mut() {
        rewrap_buffer(buffer, cols);
    }

    let caps = ColorCapabilities::detect();
    let resize_pending = PendingResize::new();
    let (mut cols, mut rows) = (cols, rows);

    loop {
        if resize_pending.take() {
            if let Ok((w, h)) = crossterm::terminal::size() {
                cols = w;
                rows = h;
            }
            for buffer in editor.buffers_mut() {
                rewrap_buffer(buffer, cols);
            }
        }

        let content_rows = rows.saturating_sub(pager_render::FOOTER_ROWS);
        let mut writer = Writer::new();
        pager_render::render(&mut writer, &editor, caps, rows, cols)?;
        writer.flush()?;

        let event = crossterm::event::read().context("failed to read a terminal event")?;
        if let crossterm::event::Event::Resize(_, _) = event {
            resize_pending.mark();
            continue;
        }
        match pager_input::handle_event(&mut editor, event, content_rows) {
            pager_input::Action::Quit => {
                drop(guard);
                return Ok(0);
            }
            pager_input::Action::Resized(w, h) => {
                cols = w;
                rows = h;
                for buffer in editor.buffers_mut() {
                    rewrap_buffer(buffer, cols);
                }
            }
            pager_input::Action::Continue => {}
        }
    }
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();

    let args = Args::parse();

    startup.backend.set_title("pg")?;
    let guard = startup.backend.enter_guard()?;

    let exit_code = match run(args, guard) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "fatal error");
            eprintln!("pg: {e:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
