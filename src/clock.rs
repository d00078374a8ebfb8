// ── Modular clock arithmetic ──────────────────────────────────────────────────

/// Wrap `n` onto a clock of `c` hours: the unique value in `[0, c)` congruent
/// to `n` mod `c`. Returns `None` for a degenerate modulus (`c < 1`); callers
/// must check before using the result as an index.
pub fn clock(n: i64, c: i64) -> Option<i64> {
    if c < 1 {
        return None;
    }
    Some(n.rem_euclid(c))
}

/// Semitone-class wrap. The modulus 12 is always valid, so no sentinel.
pub fn clock12(n: i64) -> i64 {
    n.rem_euclid(12)
}
