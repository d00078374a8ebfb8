use ratatui::style::Color;

use crate::clock::clock12;
use crate::pattern::Pattern;
use crate::render::{pt, rect, Surface};

// ── Layout constants ──────────────────────────────────────────────────────────

pub const LINE_HEIGHT: f64 = 40.0;
pub const LINE_WIDTH: f64 = LINE_HEIGHT;
pub const H_MARGIN: f64 = 10.0;
pub const V_MARGIN: f64 = 5.0;
pub const FONT_SIZE: f64 = 28.0;
pub const NOTE_RADIUS: f64 = 12.0; // LINE_HEIGHT * 0.3, rounded
pub const FRET_TOP: f64 = FONT_SIZE + NOTE_RADIUS + V_MARGIN * 2.0;

pub const DEFAULT_NOTE_COLOR: Color = Color::Blue;
/// Root marker in interval-walk mode, distinct from every palette slot.
pub const ROOT_ACCENT: Color = Color::LightRed;

/// One palette slot per semitone class 0..=11.
pub const DEFAULT_PALETTE: [Color; 12] = [
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
];

// ── Chart state ───────────────────────────────────────────────────────────────

/// Which traversal decides cell membership. Both produce the same set under
/// the canonical root-relative modulo-12 convention; `Mask` is the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walk {
    #[default]
    Mask,
    Intervals,
}

/// A highlighted chart position: fret column, string row (0 = top), the
/// semitone class that put it there, and the color to draw it in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteCell {
    pub fret: usize,
    pub string: usize,
    pub class: u8,
    pub color: Color,
}

/// Fretboard-style chart: tuning, offset, active pattern, palette, and the
/// fret extent. Holds the authoritative musical state for the string view.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub num_frets: usize, // 13 (single octave + open column) or 25
    pub offset: u8,       // 0..=11
    pub color_notes: bool,
    pub colors: [Color; 12],
    pub walk: Walk,
    tuning: Vec<u8>,
    pattern: Pattern,
    mask: [bool; 12],
}

impl Default for Chart {
    fn default() -> Self {
        let pattern = Pattern::major();
        let mask = pattern.mask();
        Self {
            num_frets: 13,
            offset: 0,
            color_notes: true,
            colors: DEFAULT_PALETTE,
            walk: Walk::default(),
            tuning: vec![5, 5, 5], // bass
            pattern,
            mask,
        }
    }
}

impl Chart {
    pub fn num_strings(&self) -> usize {
        self.tuning.len() + 1
    }

    pub fn tuning(&self) -> &[u8] {
        &self.tuning
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn mask(&self) -> &[bool; 12] {
        &self.mask
    }

    // ── Mutations (validation happens at the reducer boundary) ────────────

    pub fn set_tuning(&mut self, tuning: Vec<u8>) {
        self.tuning = tuning;
    }

    pub fn set_offset(&mut self, offset: u8) {
        self.offset = offset;
    }

    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.mask = pattern.mask();
        self.pattern = pattern;
    }

    pub fn set_color(&mut self, class: usize, color: Color) {
        self.colors[class] = color;
    }

    pub fn toggle_colors(&mut self) {
        self.color_notes = !self.color_notes;
    }

    /// Cycle between the single-octave and double view. Column 0 stays the
    /// open position in both, hence 13 and 25 rather than 12 and 24.
    pub fn toggle_frets(&mut self) {
        self.num_frets = if self.num_frets == 13 { 25 } else { 13 };
    }

    // ── Cell membership ───────────────────────────────────────────────────

    /// Every highlighted (fret, string) cell under the active walk strategy.
    pub fn cells(&self) -> Vec<NoteCell> {
        match self.walk {
            Walk::Mask => self.cells_mask(),
            Walk::Intervals => self.cells_intervals(),
        }
    }

    /// Mask walk: strings bottom-up, each string's start class advanced by
    /// its tuning delta; a column is on iff its class is in the mask.
    fn cells_mask(&self) -> Vec<NoteCell> {
        let mut out = Vec::new();
        let mut start = i64::from(self.offset);
        let mut deltas = self.tuning.iter();
        for string in (0..self.num_strings()).rev() {
            let mut class = start;
            for fret in 0..self.num_frets {
                if self.mask[class as usize] {
                    out.push(self.cell(fret, string, class as usize));
                }
                class = clock12(class + 1);
            }
            if let Some(&d) = deltas.next() {
                start = clock12(start + i64::from(d));
            }
        }
        out
    }

    /// Interval walk: land on the root column for the string, then hop by
    /// the pattern's intervals, replicating every octave across the extent.
    fn cells_intervals(&self) -> Vec<NoteCell> {
        let intervals = self.pattern.intervals();
        let mut out = Vec::new();
        let mut start = i64::from(self.offset);
        let mut deltas = self.tuning.iter();
        for string in (0..self.num_strings()).rev() {
            let mut col = clock12(-start);
            let mut class = 0i64;
            for &iv in intervals {
                let mut fret = col as usize;
                while fret < self.num_frets {
                    out.push(self.cell(fret, string, class as usize));
                    fret += 12;
                }
                col = clock12(col + i64::from(iv));
                class = clock12(class + i64::from(iv));
            }
            if let Some(&d) = deltas.next() {
                start = clock12(start + i64::from(d));
            }
        }
        out
    }

    fn cell(&self, fret: usize, string: usize, class: usize) -> NoteCell {
        NoteCell { fret, string, class: class as u8, color: self.note_color(class) }
    }

    fn note_color(&self, class: usize) -> Color {
        if self.walk == Walk::Intervals && class == 0 {
            return ROOT_ACCENT;
        }
        if self.color_notes {
            self.colors[class]
        } else {
            DEFAULT_NOTE_COLOR
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    pub fn width(&self) -> f64 {
        LINE_WIDTH * self.num_frets as f64 + 2.0 * H_MARGIN
    }

    pub fn height(&self) -> f64 {
        LINE_HEIGHT * (self.num_strings() - 1) as f64 + FRET_TOP + NOTE_RADIUS + V_MARGIN
    }

    /// Static layer: fret labels (wrapping back to 1 after 12), string lines
    /// and fret lines. Redrawn only when the grid shape changes.
    pub fn draw_background(&self, surface: &mut impl Surface) {
        let width = self.width();
        let height = self.height();
        surface.resize(width, height);

        let mut label = 0u32;
        let mut label_x = H_MARGIN + LINE_WIDTH / 2.0;
        for _ in 0..self.num_frets {
            surface.draw_text(&label.to_string(), pt(label_x, V_MARGIN + FONT_SIZE / 2.0), Color::White);
            label += 1;
            label_x += LINE_WIDTH;
            if label == 13 {
                label = 1;
            }
        }

        let end_x = width - H_MARGIN;
        let mut y = FRET_TOP;
        for _ in 0..self.num_strings() {
            surface.draw_line(pt(H_MARGIN, y), pt(end_x, y));
            y += LINE_HEIGHT;
        }

        let end_y = height - V_MARGIN - NOTE_RADIUS;
        let mut x = H_MARGIN;
        for _ in 0..=self.num_frets {
            surface.draw_line(pt(x, FRET_TOP), pt(x, end_y));
            x += LINE_WIDTH;
        }
    }

    /// Dynamic layer: clear everything, then one circle per highlighted cell.
    pub fn draw_notes(&self, surface: &mut impl Surface) {
        surface.resize(self.width(), self.height());
        surface.clear_region(rect(0.0, 0.0, self.width(), self.height()));
        for cell in self.cells() {
            let x = (cell.fret as f64 + 0.5) * LINE_WIDTH + H_MARGIN;
            let y = cell.string as f64 * LINE_HEIGHT + FRET_TOP;
            surface.fill_circle(pt(x, y), NOTE_RADIUS, cell.color, Some(Color::Black));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Instruction, Scene};
    use std::collections::BTreeSet;

    fn positions(chart: &Chart) -> BTreeSet<(usize, usize)> {
        chart.cells().iter().map(|c| (c.fret, c.string)).collect()
    }

    #[test]
    fn default_chart_bottom_string_is_major_scale() {
        let chart = Chart::default();
        let bottom: Vec<usize> = chart
            .cells()
            .iter()
            .filter(|c| c.string == 3)
            .map(|c| c.fret)
            .collect();
        assert_eq!(bottom, vec![0, 2, 4, 5, 7, 9, 11, 12]);
    }

    #[test]
    fn tuning_shifts_each_string_start() {
        let chart = Chart::default();
        // One string up from the bottom: start class 5, so the first on
        // column is 0 only if class 5 is in the mask (it is, for major).
        let next: Vec<usize> = chart
            .cells()
            .iter()
            .filter(|c| c.string == 2)
            .map(|c| c.fret)
            .collect();
        // Columns i with clock12(5 + i) in {0,2,4,5,7,9,11}.
        assert_eq!(next, vec![0, 2, 4, 6, 7, 9, 11, 12]);
    }

    #[test]
    fn walk_strategies_agree_on_membership() {
        for offset in [0u8, 3, 5, 11] {
            for tuning in [vec![5, 5, 5], vec![5, 5, 5, 4, 5], vec![0, 7]] {
                let mut chart = Chart::default();
                chart.set_offset(offset);
                chart.set_tuning(tuning.clone());
                chart.walk = Walk::Mask;
                let by_mask = positions(&chart);
                chart.walk = Walk::Intervals;
                let by_intervals = positions(&chart);
                assert_eq!(by_mask, by_intervals, "offset {offset}, tuning {tuning:?}");
            }
        }
    }

    #[test]
    fn walk_strategies_agree_on_classes() {
        let mut chart = Chart::default();
        chart.set_offset(7);
        let classes = |c: &Chart| -> BTreeSet<(usize, usize, u8)> {
            c.cells().iter().map(|n| (n.fret, n.string, n.class)).collect()
        };
        chart.walk = Walk::Mask;
        let by_mask = classes(&chart);
        chart.walk = Walk::Intervals;
        assert_eq!(by_mask, classes(&chart));
    }

    #[test]
    fn toggling_fret_extent_twice_restores_cells() {
        let mut chart = Chart::default();
        let before = positions(&chart);
        chart.toggle_frets();
        assert_eq!(chart.num_frets, 25);
        chart.toggle_frets();
        assert_eq!(chart.num_frets, 13);
        assert_eq!(positions(&chart), before);
    }

    #[test]
    fn double_view_repeats_the_octave() {
        let mut chart = Chart::default();
        chart.toggle_frets();
        let bottom: BTreeSet<usize> = chart
            .cells()
            .iter()
            .filter(|c| c.string == 3)
            .map(|c| c.fret)
            .collect();
        for fret in 0..13 {
            assert_eq!(bottom.contains(&fret), bottom.contains(&(fret + 12)), "fret {fret}");
        }
    }

    #[test]
    fn palette_mode_colors_by_class() {
        let mut chart = Chart::default();
        chart.set_color(4, Color::White);
        let cell = chart.cells().into_iter().find(|c| c.class == 4).unwrap();
        assert_eq!(cell.color, Color::White);

        chart.toggle_colors();
        assert!(chart.cells().iter().all(|c| c.color == DEFAULT_NOTE_COLOR));
    }

    #[test]
    fn interval_walk_accents_the_root() {
        let mut chart = Chart::default();
        chart.walk = Walk::Intervals;
        chart.toggle_colors(); // single-color mode must not hide the accent
        for cell in chart.cells() {
            if cell.class == 0 {
                assert_eq!(cell.color, ROOT_ACCENT);
            } else {
                assert_eq!(cell.color, DEFAULT_NOTE_COLOR);
            }
        }
    }

    #[test]
    fn background_labels_wrap_after_twelve() {
        let mut chart = Chart::default();
        chart.toggle_frets();
        let mut scene = Scene::default();
        chart.draw_background(&mut scene);
        let labels: Vec<String> = scene
            .instructions()
            .iter()
            .filter_map(|i| match i {
                Instruction::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        let expected: Vec<String> =
            (0..=12).chain(1..=12).map(|n: u32| n.to_string()).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn note_scene_matches_cell_grid() {
        let chart = Chart::default();
        let mut scene = Scene::default();
        chart.draw_notes(&mut scene);
        let centers = scene.circle_centers();
        let cells = chart.cells();
        assert_eq!(centers.len(), cells.len());
        for (center, cell) in centers.iter().zip(&cells) {
            assert_eq!(center.x, (cell.fret as f64 + 0.5) * LINE_WIDTH + H_MARGIN);
            assert_eq!(center.y, cell.string as f64 * LINE_HEIGHT + FRET_TOP);
        }
    }
}
