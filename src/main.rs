//! treemate - TreeMap Mate
//!
//! A terminal control surface for multi-instance treemap visualization:
//! - Live-editable tree data (JSON), per-instance colors & rendering modes
//! - Responsive shell with a slide-out control panel
//! - On-hover inspection of any node (counts, children tree, custom data)
//!
//! Usage: treemate [--help] [--version]
//! Pipe:  cat tree.json | treemate

mod app;
mod modules;
mod settings;
mod types;
mod ui;
mod viz;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout, IsTerminal, Read};
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("treemate {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Check for piped input BEFORE starting TUI
    let piped_input = read_piped_input();

    // If stdin was a pipe, reattach to /dev/tty so crossterm can read key events
    if piped_input.is_some() {
        reattach_stdin_to_tty()
            .context("Failed to reattach stdin to terminal. Are you running in a TTY?")?;
    }

    let result = run_app(piped_input);

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Read all of stdin if it's a pipe (not a terminal).
/// Returns None if stdin is a terminal (normal interactive mode).
/// Limits input to 4 MB so an accidental binary pipe cannot balloon memory.
fn read_piped_input() -> Option<String> {
    if io::stdin().is_terminal() {
        return None;
    }

    const MAX_PIPE_SIZE: usize = 4 * 1024 * 1024;

    let mut input = String::new();
    match io::stdin().take(MAX_PIPE_SIZE as u64).read_to_string(&mut input) {
        Ok(_) => {}
        Err(_) => return None, // Non-UTF8 or read error
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.to_string())
}

/// After reading piped stdin, reopen /dev/tty as fd 0 so crossterm
/// can read keyboard events. This is the standard Unix approach used
/// by tools like fzf, bat, less, etc.
#[cfg(unix)]
fn reattach_stdin_to_tty() -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let tty = std::fs::File::open("/dev/tty")
        .context("Cannot open /dev/tty — pipe mode requires a controlling terminal")?;

    let tty_fd = tty.as_raw_fd();
    let result = unsafe { libc::dup2(tty_fd, libc::STDIN_FILENO) };
    if result == -1 {
        anyhow::bail!("dup2 failed: could not reattach stdin to /dev/tty");
    }

    // Let `tty` drop naturally — it closes the original fd, but fd 0 now
    // independently points to /dev/tty via the dup2 copy.
    drop(tty);

    Ok(())
}

#[cfg(not(unix))]
fn reattach_stdin_to_tty() -> Result<()> {
    anyhow::bail!("Pipe mode is only supported on Unix systems (Linux, macOS)")
}

fn print_help() {
    println!(
        r#"treemate - TreeMap Mate

 _                            _
| |_ _ __ ___  ___ _ __ ___  (_)__ _| |_ ___
| __| '__/ _ \/ _ \ '_ ` _ \ | / _` | __/ _ \
| |_| | |  __/  __/ | | | | || | (_| | ||  __/
 \__|_|  \___|\___|_| |_| |_|/ |\__,_|\__\___|
                           |__/

Multi-instance treemap control surface in your terminal.

USAGE:
    treemate [OPTIONS]
    cat tree.json | treemate       # seed the first map from a pipe

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    Tab / p          Toggle the control panel
    F1 / F2          Panel tabs: Instances / Display
    j/k              Navigate rows
    Enter            Edit field / cycle value
    a                Add a treemap instance
    d                Remove the selected instance
    b                Navigate back in the hovered map
    q                Quit

MOUSE:
    Hover            Inspect a node (tooltip)
    Click            Zoom into a group; click "back" to zoom out
    Swipe left/right Close/open the panel
    Click overlay    Close the panel (narrow terminals)

DATA:
    Trees are JSON: {{ "name": ..., "value": ..., "children": [...],
    "customData": {{ ... }} }}. Edits re-parse live; invalid text never
    discards the last valid tree.
"#
    );
}

fn run_app(piped_input: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Install panic handler so terminal is restored on panic
    // (without this, a panic leaves the terminal in raw mode + alternate screen)
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
        original_hook(info);
    }));

    // First device classification comes from the real terminal size
    let size = terminal.size().context("Failed to read terminal size")?;
    let mut app = App::new(size.width, piped_input)
        .context("Failed to initialize application")?;

    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Expire flash messages between events
        app.tick();

        // Poll for events with timeout (for flash message expiry etc.);
        // each event is fully dispatched before the next one is read, so
        // state transitions never interleave.
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key)?;
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse)?;
                }
                Event::Resize(width, _height) => {
                    app.handle_resize(width);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }
}
