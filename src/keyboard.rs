use ratatui::style::Color;

use crate::clock::clock;
use crate::pattern::Pattern;
use crate::render::{rect, Rect, Surface};

// ── Layout constants ──────────────────────────────────────────────────────────

pub const NUM_KEYS: usize = 88;
pub const NUM_WHITE: usize = 52;
pub const NUM_BLACK: usize = 36;

pub const DEFAULT_WIDTH: f64 = 1040.0; // 52 white keys, 20 units each
pub const DEFAULT_HEIGHT: f64 = 100.0;

pub const WHITE_FILL: Color = Color::Rgb(0x7a, 0x99, 0xd0);
pub const BLACK_FILL: Color = Color::Rgb(0x56, 0x51, 0xec);

/// Gaps between consecutive black keys, in white-key widths, repeating every
/// five black keys (one octave).
const BLACK_KEY_PATTERN: [f64; 5] = [2.0, 1.0, 2.0, 1.0, 1.0];

// ── Key-slot mapping ──────────────────────────────────────────────────────────

/// Physical slot for an absolute key index: either the nth white key or the
/// nth black key, counted from the bottom of the 88-key range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    White(usize),
    Black(usize),
}

/// Map an absolute key index (0..88) to its physical slot. The range starts
/// on A0, so class 0 is the first white key of its octave group.
pub fn key_slot(key: usize) -> Slot {
    let octave = key / 12;
    match key % 12 {
        0 => Slot::White(octave * 7),
        1 => Slot::Black(octave * 5),
        2 => Slot::White(octave * 7 + 1),
        3 => Slot::White(octave * 7 + 2),
        4 => Slot::Black(octave * 5 + 1),
        5 => Slot::White(octave * 7 + 3),
        6 => Slot::Black(octave * 5 + 2),
        7 => Slot::White(octave * 7 + 4),
        8 => Slot::White(octave * 7 + 5),
        9 => Slot::Black(octave * 5 + 3),
        10 => Slot::White(octave * 7 + 6),
        _ => Slot::Black(octave * 5 + 4),
    }
}

// ── Keyboard state ────────────────────────────────────────────────────────────

/// The 88-key piano view: per-slot "playing" flags plus the rectangle layout
/// for whatever surface size it was last given.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyboard {
    w_playing: [bool; NUM_WHITE],
    b_playing: [bool; NUM_BLACK],
    width: f64,
    height: f64,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self {
            w_playing: [false; NUM_WHITE],
            b_playing: [false; NUM_BLACK],
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Keyboard {
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// All pressed absolute key indices, ascending.
    pub fn pressed_keys(&self) -> Vec<usize> {
        (0..NUM_KEYS)
            .filter(|&k| match key_slot(k) {
                Slot::White(i) => self.w_playing[i],
                Slot::Black(i) => self.b_playing[i],
            })
            .collect()
    }

    // ── Pattern application ───────────────────────────────────────────────

    /// Light up every key of the pattern across the whole range: walk
    /// backward from the offset to the bottom cycling the intervals in
    /// reverse, then forward to the top. Replaces any previous highlights.
    pub fn set_pattern(&mut self, offset: u8, pattern: &Pattern) {
        let intervals = pattern.intervals();
        let len = intervals.len() as i64;
        let mut keys = Vec::new();

        let mut note = i64::from(offset);
        let mut i = len - 1;
        while note - i64::from(intervals[i as usize]) >= 0 {
            note -= i64::from(intervals[i as usize]);
            keys.push(note as usize);
            i = clock(i - 1, len).unwrap_or(0); // len >= 1 for any canonical pattern
        }

        let mut note = i64::from(offset);
        let mut i = 0i64;
        while note < NUM_KEYS as i64 {
            keys.push(note as usize);
            note += i64::from(intervals[i as usize]);
            i = clock(i + 1, len).unwrap_or(0);
        }

        self.clear_keys();
        self.set_keys(true, &keys);
    }

    /// Unpress everything.
    pub fn clear_keys(&mut self) {
        self.w_playing = [false; NUM_WHITE];
        self.b_playing = [false; NUM_BLACK];
    }

    fn set_keys(&mut self, press: bool, keys: &[usize]) {
        for &key in keys {
            if key >= NUM_KEYS {
                continue;
            }
            match key_slot(key) {
                Slot::White(i) => self.w_playing[i] = press,
                Slot::Black(i) => self.b_playing[i] = press,
            }
        }
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    fn white_key_width(&self) -> f64 {
        self.width / NUM_WHITE as f64
    }

    fn black_key_width(&self) -> f64 {
        // Rounded down then doubled so the key splits evenly on the boundary.
        (self.white_key_width() * 0.4).floor() * 2.0
    }

    pub fn white_key_rects(&self) -> Vec<Rect> {
        let w = self.white_key_width();
        (0..NUM_WHITE).map(|i| rect(i as f64 * w, 0.0, w, self.height)).collect()
    }

    pub fn black_key_rects(&self) -> Vec<Rect> {
        let w = self.white_key_width();
        let bw = self.black_key_width();
        let bh = (self.height * 0.6).floor();
        let mut out = Vec::with_capacity(NUM_BLACK);
        let mut x = w - bw / 2.0;
        for i in 0..NUM_BLACK {
            out.push(rect(x, 0.0, bw, bh));
            x += BLACK_KEY_PATTERN[i % 5] * w;
        }
        out
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    /// Full repaint: white keys (cleared or highlighted) under stroked
    /// outlines, then black keys on top.
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.resize(self.width, self.height);
        surface.stroke_rect(rect(0.0, 0.0, self.width, self.height));

        for (i, r) in self.white_key_rects().into_iter().enumerate() {
            if self.w_playing[i] {
                surface.fill_rect(r, WHITE_FILL);
            } else {
                surface.clear_region(r);
            }
            surface.stroke_rect(r);
        }

        for (i, r) in self.black_key_rects().into_iter().enumerate() {
            let fill = if self.b_playing[i] { BLACK_FILL } else { Color::Black };
            surface.fill_rect(r, fill);
            surface.stroke_rect(r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Symbols;

    #[test]
    fn slot_mapping_spot_checks() {
        assert_eq!(key_slot(0), Slot::White(0)); // A0
        assert_eq!(key_slot(1), Slot::Black(0));
        assert_eq!(key_slot(3), Slot::White(2));
        assert_eq!(key_slot(12), Slot::White(7));
        assert_eq!(key_slot(85), Slot::Black(35));
        assert_eq!(key_slot(87), Slot::White(51)); // C8
    }

    #[test]
    fn every_key_lands_in_a_valid_slot() {
        let mut whites = 0;
        let mut blacks = 0;
        for key in 0..NUM_KEYS {
            match key_slot(key) {
                Slot::White(i) => {
                    assert!(i < NUM_WHITE);
                    whites += 1;
                }
                Slot::Black(i) => {
                    assert!(i < NUM_BLACK);
                    blacks += 1;
                }
            }
        }
        assert_eq!(whites, NUM_WHITE);
        assert_eq!(blacks, NUM_BLACK);
    }

    #[test]
    fn major_pattern_at_offset_zero_covers_the_scale_classes() {
        let mut keyboard = Keyboard::default();
        keyboard.set_pattern(0, &Pattern::major());
        let expected: Vec<usize> =
            (0..NUM_KEYS).filter(|k| [0, 2, 4, 5, 7, 9, 11].contains(&(k % 12))).collect();
        assert_eq!(keyboard.pressed_keys(), expected);
    }

    #[test]
    fn backward_walk_fills_below_the_offset() {
        // C major: offset 5 on the A0-based range.
        let mut keyboard = Keyboard::default();
        keyboard.set_pattern(5, &Pattern::major());
        let classes = [0, 2, 4, 5, 7, 9, 10];
        let expected: Vec<usize> =
            (0..NUM_KEYS).filter(|k| classes.contains(&(k % 12))).collect();
        assert_eq!(keyboard.pressed_keys(), expected);
    }

    #[test]
    fn set_pattern_replaces_previous_highlights() {
        let mut keyboard = Keyboard::default();
        keyboard.set_pattern(0, &Pattern::major());
        let triad = Pattern::parse("43", Symbols::Letters).unwrap().pattern;
        keyboard.set_pattern(0, &triad);
        let expected: Vec<usize> =
            (0..NUM_KEYS).filter(|k| [0, 4, 7].contains(&(k % 12))).collect();
        assert_eq!(keyboard.pressed_keys(), expected);
    }

    #[test]
    fn white_keys_tile_the_surface() {
        let keyboard = Keyboard::default();
        let rects = keyboard.white_key_rects();
        assert_eq!(rects.len(), NUM_WHITE);
        for (i, r) in rects.iter().enumerate() {
            assert_eq!(r.x, i as f64 * 20.0);
            assert_eq!(r.width, 20.0);
            assert_eq!(r.height, DEFAULT_HEIGHT);
        }
    }

    #[test]
    fn black_key_layout_follows_the_octave_pattern() {
        let keyboard = Keyboard::default();
        let rects = keyboard.black_key_rects();
        assert_eq!(rects.len(), NUM_BLACK);
        // 20-unit white keys: 16 wide, 60 tall, first one straddling x = 20.
        assert_eq!(rects[0].x, 12.0);
        assert_eq!(rects[0].width, 16.0);
        assert_eq!(rects[0].height, 60.0);
        assert_eq!(rects[1].x, 12.0 + 2.0 * 20.0);
        assert_eq!(rects[2].x, 12.0 + 3.0 * 20.0);
        // Five gaps span one octave: seven white keys.
        assert_eq!(rects[5].x - rects[0].x, 7.0 * 20.0);
    }

    #[test]
    fn draw_emits_one_rect_per_key() {
        let mut keyboard = Keyboard::default();
        keyboard.set_pattern(0, &Pattern::major());
        let mut scene = crate::render::Scene::default();
        keyboard.draw(&mut scene);
        let strokes = scene
            .instructions()
            .iter()
            .filter(|i| matches!(i, crate::render::Instruction::StrokeRect(_)))
            .count();
        // Surface outline plus every white and black key.
        assert_eq!(strokes, 1 + NUM_WHITE + NUM_BLACK);
    }
}
