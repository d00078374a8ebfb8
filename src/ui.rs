use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::{App, Mode};
use crate::chart::Walk;
use crate::render::{Instruction, Scene};

// ── Top-level routing ─────────────────────────────────────────────────────────

/// Draw every panel. `app.mode` controls which panel has keyboard focus
/// (highlighted border and key hints), not what is visible.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // title bar
            Constraint::Min(12),    // fretboard chart
            Constraint::Length(9),  // piano keyboard
            Constraint::Length(4),  // state + status / input line
            Constraint::Length(4),  // help
        ])
        .split(area);

    draw_title(f, chunks[0], app);
    draw_chart(f, chunks[1], app);
    draw_keyboard(f, chunks[2], app);
    draw_status(f, chunks[3], app);
    draw_help(f, chunks[4], app);
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

// ── Title bar ─────────────────────────────────────────────────────────────────

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let focus_label = match app.mode {
        Mode::View => "View",
        Mode::EditPattern => "Pattern",
        Mode::EditOffset => "Offset",
        Mode::EditTuning => "Tuning",
        Mode::Colors => "Colors",
    };
    let text = format!(
        "  ScaleChart  ─  Focus: {focus_label}  ─  p/o/t: edit  k: colors  s/l: save/load  Esc: quit"
    );
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// ── Scene replay ──────────────────────────────────────────────────────────────

/// Replay one recorded scene onto a canvas context. Scene coordinates grow
/// downward; the canvas grows upward, so everything is flipped through the
/// scene height.
fn paint_scene(ctx: &mut canvas::Context, scene: &Scene) {
    let h = scene.height;
    for instruction in scene.instructions() {
        match instruction {
            Instruction::Clear(_) => {} // the canvas starts blank every frame
            Instruction::Line { from, to } => ctx.draw(&canvas::Line {
                x1: from.x,
                y1: h - from.y,
                x2: to.x,
                y2: h - to.y,
                color: Color::Gray,
            }),
            Instruction::Circle { center, radius, fill, .. } => ctx.draw(&canvas::Circle {
                x: center.x,
                y: h - center.y,
                radius: *radius,
                color: *fill,
            }),
            Instruction::FillRect { region, fill } => ctx.draw(&canvas::Rectangle {
                x: region.x,
                y: h - region.y - region.height,
                width: region.width,
                height: region.height,
                color: *fill,
            }),
            Instruction::StrokeRect(region) => ctx.draw(&canvas::Rectangle {
                x: region.x,
                y: h - region.y - region.height,
                width: region.width,
                height: region.height,
                color: Color::Gray,
            }),
            Instruction::Text { text, at, color } => ctx.print(
                at.x,
                h - at.y,
                Line::styled(text.clone(), Style::default().fg(*color)),
            ),
        }
    }
}

fn scene_canvas<'a>(block: Block<'a>, scenes: &'a [&'a Scene]) -> Canvas<'a, impl Fn(&mut canvas::Context) + 'a> {
    let width = scenes.first().map(|s| s.width).unwrap_or(1.0);
    let height = scenes.first().map(|s| s.height).unwrap_or(1.0);
    Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            for scene in scenes {
                paint_scene(ctx, scene);
                ctx.layer();
            }
        })
}

// ── Fretboard chart ───────────────────────────────────────────────────────────

fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let walk = match app.chart.walk {
        Walk::Mask => "mask",
        Walk::Intervals => "intervals",
    };
    let title = format!(
        " Chart — {} strings, {} frets, {} walk — f: extent  c: colors  w: walk  4/6: presets ",
        app.chart.num_strings(),
        app.chart.num_frets,
        walk
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_border(app.mode == Mode::View));
    let scenes = [&app.chart_bg, &app.chart_fg];
    f.render_widget(scene_canvas(block, &scenes), area);
}

// ── Piano keyboard ────────────────────────────────────────────────────────────

fn draw_keyboard(f: &mut Frame, area: Rect, app: &App) {
    let pressed = app.keyboard.pressed_keys().len();
    let title = format!(" Keyboard — {pressed} of 88 keys in the pattern ");
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_border(false));
    let scenes = [&app.keys_fg];
    f.render_widget(scene_canvas(block, &scenes), area);
}

// ── State + status line ───────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let d = Style::default().fg(Color::DarkGray);
    let v = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let tuning: String = app.chart.tuning().iter().map(|t| (b'0' + t) as char).collect();
    let color_mode = if app.chart.color_notes { "per-class" } else { "single" };
    let state_line = Line::from(vec![
        Span::styled("Pattern: ", d),
        Span::styled(&app.pattern_text, v),
        Span::styled("  Offset: ", d),
        Span::styled(app.chart.offset.to_string(), v),
        Span::styled("  Tuning: ", d),
        Span::styled(tuning, v),
        Span::styled("  Colors: ", d),
        Span::styled(color_mode, v),
    ]);

    let second = match app.mode {
        Mode::EditPattern => input_line("Pattern", &app.input),
        Mode::EditOffset => input_line("Offset", &app.input),
        Mode::EditTuning => input_line("Tuning", &app.input),
        Mode::Colors => palette_line(app),
        Mode::View => Line::styled(app.status.clone(), Style::default().fg(Color::Yellow)),
    };

    f.render_widget(
        Paragraph::new(vec![state_line, second])
            .block(Block::default().title(" Status ").borders(Borders::ALL)),
        area,
    );
}

fn input_line<'a>(label: &'a str, input: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}> "), Style::default().fg(Color::Green)),
        Span::styled(input, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled("█", Style::default().fg(Color::Green)),
    ])
}

/// One swatch per semitone class, selection marked by brackets.
fn palette_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for (class, &color) in app.chart.colors.iter().enumerate() {
        let selected = class == app.color_cursor;
        let label = format!("{class:>2}");
        let style = Style::default().fg(Color::Black).bg(color);
        spans.push(Span::raw(if selected { "[" } else { " " }));
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(if selected { "]" } else { " " }));
    }
    Line::from(spans)
}

// ── Help panel ────────────────────────────────────────────────────────────────

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let w = Style::default().fg(Color::White);
    let d = Style::default().fg(Color::DarkGray);

    let global = Line::from(vec![
        Span::styled("[p] ", w), Span::raw("Pattern  │  "),
        Span::styled("[o] ", w), Span::raw("Offset  │  "),
        Span::styled("[t] ", w), Span::raw("Tuning  │  "),
        Span::styled("[k] ", w), Span::raw("Palette  │  "),
        Span::styled("[s]/[l] ", w), Span::raw("Save/Load  │  "),
        Span::styled("[Esc] ", w), Span::raw("Quit"),
    ]);

    let focus_line = match app.mode {
        Mode::View => Line::from(vec![
            Span::styled("[f] ", w), Span::raw("12/24 frets  │  "),
            Span::styled("[c] ", w), Span::raw("Color mode  │  "),
            Span::styled("[w] ", w), Span::raw("Walk strategy  │  "),
            Span::styled("[4]/[6] ", w), Span::raw("Bass / guitar tuning"),
        ]),
        Mode::Colors => Line::from(vec![
            Span::styled("[←→] ", w), Span::raw("Select class  │  "),
            Span::styled("[↑↓] ", w), Span::raw("Cycle color  │  "),
            Span::styled("[Esc] ", w), Span::raw("Back"),
        ]),
        _ => Line::from(vec![
            Span::styled("Type ", d),
            Span::raw("to edit  │  "),
            Span::styled("[Enter] ", w), Span::raw("Apply  │  "),
            Span::styled("[Esc] ", w), Span::raw("Cancel"),
        ]),
    };

    f.render_widget(
        Paragraph::new(vec![global, focus_line])
            .block(Block::default().title(" Help ").borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
