use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, Diagnostic};

// ── Persisted options ─────────────────────────────────────────────────────────

/// Everything needed to reproduce the current views: all fields string-coded
/// the way the inputs type them, so a saved file round-trips through the same
/// validation as live edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Per-string semitone deltas as one digit each, e.g. "555" for bass.
    pub tuning: String,
    /// Root semitone class, "0".."11".
    pub note_offset: String,
    /// Interval pattern text, uncooked.
    pub pattern: String,
    /// Palette overrides: semitone class "0".."11" to a color name or "#RRGGBB".
    pub colors: BTreeMap<String, String>,
    pub color_notes: bool,
    pub more_frets: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tuning: "555".to_string(),
            note_offset: "0".to_string(),
            pattern: "2212221".to_string(),
            colors: BTreeMap::new(),
            color_notes: true,
            more_frets: false,
        }
    }
}

pub fn write(path: &Path, options: &Options) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(options)?;
    fs::write(path, text)?;
    Ok(())
}

/// Read an options file, tolerating junk keys: unknown top-level keys and
/// unknown color-map keys are reported and skipped while every recognized
/// key still lands. Only an unreadable file or non-object payload fails.
pub fn read(path: &Path) -> anyhow::Result<(Options, Vec<Diagnostic>)> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let Value::Object(map) = value else {
        bail!("options file must hold a JSON object");
    };

    let mut options = Options::default();
    let mut diags = Vec::new();
    for (key, v) in map {
        match key.as_str() {
            "tuning" => read_string(v, &mut options.tuning, "tuning", &mut diags),
            "noteOffset" => read_string(v, &mut options.note_offset, "noteOffset", &mut diags),
            "pattern" => read_string(v, &mut options.pattern, "pattern", &mut diags),
            "colorNotes" => read_bool(v, &mut options.color_notes, "colorNotes", &mut diags),
            "moreFrets" => read_bool(v, &mut options.more_frets, "moreFrets", &mut diags),
            "colors" => read_colors(v, &mut options.colors, &mut diags),
            _ => diags.push(ChartError::UnknownKey(key).into()),
        }
    }
    Ok((options, diags))
}

fn read_string(v: Value, slot: &mut String, key: &'static str, diags: &mut Vec<Diagnostic>) {
    match v {
        Value::String(s) => *slot = s,
        _ => diags.push(ChartError::BadValueType(key).into()),
    }
}

fn read_bool(v: Value, slot: &mut bool, key: &'static str, diags: &mut Vec<Diagnostic>) {
    match v {
        Value::Bool(b) => *slot = b,
        _ => diags.push(ChartError::BadValueType(key).into()),
    }
}

fn read_colors(v: Value, slot: &mut BTreeMap<String, String>, diags: &mut Vec<Diagnostic>) {
    let Value::Object(map) = v else {
        diags.push(ChartError::BadValueType("colors").into());
        return;
    };
    for (class, color) in map {
        let known = class.parse::<usize>().map(|c| c < 12).unwrap_or(false);
        if !known {
            diags.push(ChartError::UnknownColorKey(class).into());
            continue;
        }
        match color {
            Value::String(s) => {
                slot.insert(class, s);
            }
            other => diags.push(ChartError::BadColorValue(class, other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scalechart-options-{name}.json"))
    }

    #[test]
    fn write_then_read_is_lossless() {
        let mut options = Options::default();
        options.note_offset = "7".to_string();
        options.pattern = "43".to_string();
        options.colors.insert("0".to_string(), "LightRed".to_string());
        options.more_frets = true;

        let path = temp_path("roundtrip");
        write(&path, &options).unwrap();
        let (loaded, diags) = read(&path).unwrap();
        assert_eq!(loaded, options);
        assert!(diags.is_empty());
    }

    #[test]
    fn unknown_top_level_key_is_reported_and_skipped() {
        let path = temp_path("unknown-key");
        fs::write(&path, r#"{"noteOffset": "3", "volume": 11}"#).unwrap();
        let (options, diags) = read(&path).unwrap();
        assert_eq!(options.note_offset, "3");
        assert_eq!(diags, vec![ChartError::UnknownKey("volume".to_string()).into()]);
    }

    #[test]
    fn unknown_color_key_is_reported_individually() {
        let path = temp_path("color-key");
        fs::write(
            &path,
            r#"{"colors": {"3": "Green", "12": "Red", "root": "Blue"}}"#,
        )
        .unwrap();
        let (options, diags) = read(&path).unwrap();
        assert_eq!(options.colors.get("3").map(String::as_str), Some("Green"));
        assert_eq!(options.colors.len(), 1);
        assert_eq!(diags.len(), 2);
        assert!(diags.contains(&ChartError::UnknownColorKey("12".to_string()).into()));
        assert!(diags.contains(&ChartError::UnknownColorKey("root".to_string()).into()));
    }

    #[test]
    fn wrong_value_type_is_reported_and_skipped() {
        let path = temp_path("bad-type");
        fs::write(&path, r#"{"moreFrets": "yes", "pattern": "57"}"#).unwrap();
        let (options, diags) = read(&path).unwrap();
        assert!(!options.more_frets);
        assert_eq!(options.pattern, "57");
        assert_eq!(diags, vec![ChartError::BadValueType("moreFrets").into()]);
    }

    #[test]
    fn non_object_payload_fails() {
        let path = temp_path("non-object");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(read(&path).is_err());
    }
}
