use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use ratatui::style::Color;

use crate::chart::{Chart, Walk};
use crate::error::{ChartError, Diagnostic};
use crate::keyboard::Keyboard;
use crate::options::{self, Options};
use crate::pattern::{Pattern, Symbols};
use crate::render::Scene;

// ── Focus modes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browse: toggles, presets, save/load.
    View,
    EditPattern,
    EditOffset,
    EditTuning,
    /// Palette editing: pick a semitone class, cycle its color.
    Colors,
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Every mutation the UI can request. Text-carrying commands arrive uncooked;
/// validation happens inside `App::apply`, never in the engines.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTuning(String),
    SetOffset(String),
    SetPattern(String),
    SetColor(usize, Color),
    ToggleColorMode,
    ToggleFretExtent,
    ToggleWalk,
    Save,
    Load,
    Quit,
}

/// Colors offered by the palette editor, cycled with the arrow keys.
pub const COLOR_CHOICES: [Color; 14] = [
    Color::Blue,
    Color::LightBlue,
    Color::Cyan,
    Color::LightCyan,
    Color::Green,
    Color::LightGreen,
    Color::Yellow,
    Color::LightYellow,
    Color::Red,
    Color::LightRed,
    Color::Magenta,
    Color::LightMagenta,
    Color::White,
    Color::Gray,
];

// ── App state ─────────────────────────────────────────────────────────────────

/// The single owned state value. Mutations flow through `apply`, which
/// validates, updates the engines, and rebuilds all three scenes; the UI only
/// ever reads.
pub struct App {
    pub chart: Chart,
    pub keyboard: Keyboard,
    pub symbols: Symbols,
    /// Last committed pattern text, kept for persistence.
    pub pattern_text: String,

    pub mode: Mode,
    pub input: String,
    pub status: String,
    pub color_cursor: usize,
    pub options_path: PathBuf,
    pub should_quit: bool,

    // Layered scenes: static chart grid, chart notes, keyboard.
    pub chart_bg: Scene,
    pub chart_fg: Scene,
    pub keys_fg: Scene,
}

impl App {
    pub fn new(options_path: PathBuf, symbols: Symbols) -> Self {
        let chart = Chart::default();
        let mut keyboard = Keyboard::default();
        keyboard.set_pattern(chart.offset, chart.pattern());
        let mut app = Self {
            chart,
            keyboard,
            symbols,
            pattern_text: "2212221".to_string(),
            mode: Mode::View,
            input: String::new(),
            status: String::new(),
            color_cursor: 0,
            options_path,
            should_quit: false,
            chart_bg: Scene::default(),
            chart_fg: Scene::default(),
            keys_fg: Scene::default(),
        };
        app.redraw();
        app
    }

    // ── Reducer ───────────────────────────────────────────────────────────

    /// Validate and execute one command. On any blocking error the previous
    /// state (and its rendered scenes) stays untouched; advisory diagnostics
    /// accompany a mutation that still happened.
    pub fn apply(&mut self, cmd: Command) -> Vec<Diagnostic> {
        let diags = match cmd {
            Command::SetTuning(text) => self.set_tuning(&text),
            Command::SetOffset(text) => self.set_offset(&text),
            Command::SetPattern(text) => self.set_pattern(text),
            Command::SetColor(class, color) => {
                self.chart.set_color(class, color);
                self.redraw();
                Vec::new()
            }
            Command::ToggleColorMode => {
                self.chart.toggle_colors();
                self.redraw();
                Vec::new()
            }
            Command::ToggleFretExtent => {
                self.chart.toggle_frets();
                self.redraw();
                Vec::new()
            }
            Command::ToggleWalk => {
                self.chart.walk = match self.chart.walk {
                    Walk::Mask => Walk::Intervals,
                    Walk::Intervals => Walk::Mask,
                };
                self.redraw();
                Vec::new()
            }
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Quit => {
                self.should_quit = true;
                Vec::new()
            }
        };
        self.status = diags.iter().map(ToString::to_string).collect::<Vec<_>>().join("  ");
        diags
    }

    fn set_tuning(&mut self, text: &str) -> Vec<Diagnostic> {
        let deltas: Option<Vec<u8>> =
            text.chars().map(|c| c.to_digit(10).map(|d| d as u8)).collect();
        match deltas {
            Some(deltas) if !text.is_empty() => {
                self.chart.set_tuning(deltas);
                self.redraw();
                Vec::new()
            }
            _ => vec![ChartError::InvalidTuning.into()],
        }
    }

    fn set_offset(&mut self, text: &str) -> Vec<Diagnostic> {
        match text.trim().parse::<u8>() {
            Ok(offset) if offset <= 11 => {
                self.chart.set_offset(offset);
                let pattern = self.chart.pattern().clone();
                self.keyboard.set_pattern(offset, &pattern);
                self.redraw();
                Vec::new()
            }
            _ => vec![ChartError::InvalidOffset.into()],
        }
    }

    fn set_pattern(&mut self, text: String) -> Vec<Diagnostic> {
        match Pattern::parse(&text, self.symbols) {
            Ok(parsed) => {
                self.keyboard.set_pattern(self.chart.offset, &parsed.pattern);
                self.chart.set_pattern(parsed.pattern);
                self.pattern_text = text;
                self.redraw();
                parsed.warning.into_iter().collect()
            }
            Err(e) => vec![e.into()],
        }
    }

    fn save(&mut self) -> Vec<Diagnostic> {
        let options = self.to_options();
        match options::write(&self.options_path, &options) {
            Ok(()) => vec![Diagnostic::Info(format!(
                "Saved options to {}.",
                self.options_path.display()
            ))],
            Err(e) => vec![ChartError::Io(format!("Save failed: {e}")).into()],
        }
    }

    fn load(&mut self) -> Vec<Diagnostic> {
        let (options, mut diags) = match options::read(&self.options_path) {
            Ok(read) => read,
            Err(e) => return vec![ChartError::Io(format!("Load failed: {e}")).into()],
        };

        diags.extend(self.set_tuning(&options.tuning));
        diags.extend(self.set_offset(&options.note_offset));
        diags.extend(self.set_pattern(options.pattern));
        if self.chart.color_notes != options.color_notes {
            self.chart.toggle_colors();
        }
        if (self.chart.num_frets == 25) != options.more_frets {
            self.chart.toggle_frets();
        }
        for (class, value) in &options.colors {
            // Keys were range-checked during the read.
            let class_idx: usize = match class.parse() {
                Ok(c) => c,
                Err(_) => continue,
            };
            match Color::from_str(value) {
                Ok(color) => self.chart.set_color(class_idx, color),
                Err(_) => {
                    diags.push(ChartError::BadColorValue(class.clone(), value.clone()).into())
                }
            }
        }
        self.redraw();
        diags.push(Diagnostic::Info(format!(
            "Loaded options from {}.",
            self.options_path.display()
        )));
        diags
    }

    fn to_options(&self) -> Options {
        let tuning = self.chart.tuning().iter().map(|d| (b'0' + d) as char).collect();
        let colors: BTreeMap<String, String> = self
            .chart
            .colors
            .iter()
            .enumerate()
            .map(|(class, color)| (class.to_string(), color.to_string()))
            .collect();
        Options {
            tuning,
            note_offset: self.chart.offset.to_string(),
            pattern: self.pattern_text.clone(),
            colors,
            color_notes: self.chart.color_notes,
            more_frets: self.chart.num_frets == 25,
        }
    }

    /// Full clear-and-repaint of every layer. Cheap enough that no mutation
    /// bothers with partial invalidation.
    fn redraw(&mut self) {
        // The instrument surfaces keep a shared width across resizes.
        self.keyboard.resize(self.chart.width(), crate::keyboard::DEFAULT_HEIGHT);
        self.chart.draw_background(&mut self.chart_bg);
        self.chart.draw_notes(&mut self.chart_fg);
        self.keyboard.draw(&mut self.keys_fg);
    }

    // ── Text-entry plumbing ───────────────────────────────────────────────

    pub fn begin_edit(&mut self, mode: Mode) {
        self.input = match mode {
            Mode::EditPattern => self.pattern_text.clone(),
            Mode::EditOffset => self.chart.offset.to_string(),
            Mode::EditTuning => {
                self.chart.tuning().iter().map(|d| (b'0' + d) as char).collect()
            }
            _ => String::new(),
        };
        self.mode = mode;
    }

    pub fn cancel_edit(&mut self) {
        self.input.clear();
        self.mode = Mode::View;
    }

    pub fn commit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        let cmd = match self.mode {
            Mode::EditPattern => Command::SetPattern(text),
            Mode::EditOffset => Command::SetOffset(text),
            Mode::EditTuning => Command::SetTuning(text),
            _ => return,
        };
        self.mode = Mode::View;
        self.apply(cmd);
    }

    // ── Palette editor ────────────────────────────────────────────────────

    pub fn color_cursor_left(&mut self) {
        self.color_cursor = self.color_cursor.checked_sub(1).unwrap_or(11);
    }

    pub fn color_cursor_right(&mut self) {
        self.color_cursor = (self.color_cursor + 1) % 12;
    }

    pub fn color_cycle(&mut self, step: i64) {
        let current = self.chart.colors[self.color_cursor];
        let at = COLOR_CHOICES.iter().position(|&c| c == current).unwrap_or(0) as i64;
        let len = COLOR_CHOICES.len() as i64;
        let next = COLOR_CHOICES[(at + step).rem_euclid(len) as usize];
        self.apply(Command::SetColor(self.color_cursor, next));
    }
}
