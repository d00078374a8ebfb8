mod app;
mod chart;
mod clock;
mod error;
mod keyboard;
mod options;
mod pattern;
mod render;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, Command, Mode};
use pattern::Symbols;

/// Fretboard and piano charts for scale/chord interval patterns.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Options file used by save ('s') and load ('l').
    #[arg(short, long, default_value = "scalechart.json")]
    options: PathBuf,

    /// Load the options file before the first draw.
    #[arg(long)]
    load: bool,

    /// Accept the older digit-only pattern form where '0' means a ten-semitone
    /// step instead of 'a'/'b' letters.
    #[arg(long)]
    zero_is_ten: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = run(&mut terminal, args);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if let Err(e) = result {
        eprintln!("Error: {e:?}");
    }
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, args: Args) -> Result<()> {
    let symbols = if args.zero_is_ten { Symbols::ZeroIsTen } else { Symbols::Letters };
    let mut app = App::new(args.options, symbols);
    if args.load {
        app.apply(Command::Load);
    }

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
                match app.mode {
                    Mode::View => handle_view_key(&mut app, key.code),
                    Mode::Colors => handle_colors_key(&mut app, key.code),
                    _ => handle_edit_key(&mut app, key.code),
                }
            }
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

// ── Key routing ───────────────────────────────────────────────────────────────

fn handle_view_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.apply(Command::Quit);
        }
        KeyCode::Char('p') => app.begin_edit(Mode::EditPattern),
        KeyCode::Char('o') => app.begin_edit(Mode::EditOffset),
        KeyCode::Char('t') => app.begin_edit(Mode::EditTuning),
        KeyCode::Char('k') => app.mode = Mode::Colors,
        KeyCode::Char('c') => {
            app.apply(Command::ToggleColorMode);
        }
        KeyCode::Char('f') => {
            app.apply(Command::ToggleFretExtent);
        }
        KeyCode::Char('w') => {
            app.apply(Command::ToggleWalk);
        }
        // Tuning presets: bass and guitar.
        KeyCode::Char('4') => {
            app.apply(Command::SetTuning("555".to_string()));
        }
        KeyCode::Char('6') => {
            app.apply(Command::SetTuning("55545".to_string()));
        }
        KeyCode::Char('s') => {
            app.apply(Command::Save);
        }
        KeyCode::Char('l') => {
            app.apply(Command::Load);
        }
        _ => {}
    }
}

fn handle_colors_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('k') => app.mode = Mode::View,
        KeyCode::Left => app.color_cursor_left(),
        KeyCode::Right => app.color_cursor_right(),
        KeyCode::Up => app.color_cycle(1),
        KeyCode::Down => app.color_cycle(-1),
        _ => {}
    }
}

fn handle_edit_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}
