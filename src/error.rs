use std::fmt;

use thiserror::Error;

// ── Error taxonomy ────────────────────────────────────────────────────────────

/// Blocking input failures. The mutation that produced one is rejected and
/// the previous state stays visible unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Invalid interval pattern. {0} only.")]
    InvalidPattern(&'static str),
    #[error("Offsets should be between 0 and 11.")]
    InvalidOffset,
    #[error("Invalid tuning. Semitone digits 0-9 only.")]
    InvalidTuning,
    #[error("Unknown option key '{0}'; skipped.")]
    UnknownKey(String),
    #[error("Unknown color key '{0}'; skipped.")]
    UnknownColorKey(String),
    #[error("Unreadable color value '{1}' for class {0}; skipped.")]
    BadColorValue(String, String),
    #[error("Option key '{0}' holds the wrong kind of value; skipped.")]
    BadValueType(&'static str),
    #[error("{0}")]
    Io(String),
}

/// Everything a mutation can report back to the status line. Errors block the
/// mutation; the rest are advisory and the mutation still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Error(ChartError),
    /// Pattern summed past one octave and was cut down to `notes` notes.
    Truncated { notes: usize },
    Info(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Error(e) => write!(f, "{e}"),
            Diagnostic::Truncated { notes } => {
                write!(f, "Pattern exceeded an octave; truncated to {notes} notes.")
            }
            Diagnostic::Info(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<ChartError> for Diagnostic {
    fn from(e: ChartError) -> Self {
        Diagnostic::Error(e)
    }
}
