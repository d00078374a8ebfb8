use crate::clock::clock12;
use crate::error::{ChartError, Diagnostic};

// ── Symbol conventions ────────────────────────────────────────────────────────

/// How pattern text encodes the two intervals that don't fit in one digit.
/// `Letters` is the current form; `ZeroIsTen` matches the older digit-only
/// input where '0' meant a ten-semitone step (and eleven was unreachable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbols {
    #[default]
    Letters,
    ZeroIsTen,
}

impl Symbols {
    fn interval(self, c: char) -> Option<u8> {
        match (self, c) {
            (_, '1'..='9') => Some(c as u8 - b'0'),
            (Symbols::Letters, 'a' | 'A') => Some(10),
            (Symbols::Letters, 'b' | 'B') => Some(11),
            (Symbols::ZeroIsTen, '0') => Some(10),
            _ => None,
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Symbols::Letters => "1-9 or 'a'/'b' for 10/11",
            Symbols::ZeroIsTen => "digits 0-9 ('0' counts as 10)",
        }
    }
}

// ── Interval pattern ──────────────────────────────────────────────────────────

/// Ordered semitone gaps between consecutive scale/chord notes. Canonical:
/// every element is in 1..=11 and the elements sum to exactly 12.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    intervals: Vec<u8>,
}

/// A successfully parsed pattern plus any advisory diagnostic (truncation).
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub pattern: Pattern,
    pub warning: Option<Diagnostic>,
}

impl Pattern {
    /// Major scale, the startup default.
    pub fn major() -> Self {
        Self { intervals: vec![2, 2, 1, 2, 2, 2, 1] }
    }

    pub fn intervals(&self) -> &[u8] {
        &self.intervals
    }

    /// Parse user text into a canonical pattern.
    ///
    /// Walks the symbols accumulating semitones. A step that would push the
    /// sum past one octave drops that step and everything after it (reported
    /// as a truncation warning). A final sum short of 12 gains one synthetic
    /// closing interval; a sum of exactly 12 is left alone.
    pub fn parse(input: &str, symbols: Symbols) -> Result<Parsed, ChartError> {
        if input.is_empty() {
            return Err(ChartError::InvalidPattern(symbols.expected()));
        }

        let mut steps = Vec::new();
        for c in input.chars() {
            match symbols.interval(c) {
                Some(v) => steps.push(v),
                None => return Err(ChartError::InvalidPattern(symbols.expected())),
            }
        }

        let mut intervals = Vec::new();
        let mut sum = 0u32;
        let mut truncated = false;
        for v in steps {
            if sum + u32::from(v) > 12 {
                truncated = true;
                break;
            }
            sum += u32::from(v);
            intervals.push(v);
        }

        if sum < 12 {
            intervals.push((12 - sum) as u8);
        }

        let warning = truncated.then(|| Diagnostic::Truncated { notes: intervals.len() });
        Ok(Parsed { pattern: Self { intervals }, warning })
    }

    /// Note-on mask keyed by semitone class: `mask[k]` is true iff `k` is a
    /// prefix sum of the pattern mod 12. The full-octave sum wraps to mark
    /// class 0, so the root is always on.
    pub fn mask(&self) -> [bool; 12] {
        let mut mask = [false; 12];
        let mut idx = 0i64;
        for &iv in &self.intervals {
            idx = clock12(idx + i64::from(iv));
            mask[idx as usize] = true;
        }
        mask
    }
}
