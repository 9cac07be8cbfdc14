use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

// ── FontDescriptor ────────────────────────────────────────────────────────────

/// Description of the font the clamped text will render with.
///
/// Mirrors the container's computed style: weight, style, size and family
/// are joined into a single description string by [`FontDescriptor::describe`]
/// so measurement backends that key on a font string can use it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// e.g. `"400"` or `"bold"`.
    pub weight: String,
    /// e.g. `"normal"` or `"italic"`.
    pub style: String,
    /// Font size in pixels.
    pub size: f32,
    /// e.g. `"sans-serif"`.
    pub family: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            weight: "normal".into(),
            style: "normal".into(),
            size: 16.0,
            family: "sans-serif".into(),
        }
    }
}

impl FontDescriptor {
    /// Single-string form, `"{weight} {style} {size}px {family}"`.
    pub fn describe(&self) -> String {
        format!("{} {} {}px {}", self.weight, self.style, self.size, self.family)
    }
}

// ── TextMeasurer ──────────────────────────────────────────────────────────────

/// Width measurement seam between the fitting algorithm and whatever
/// actually renders glyphs.
///
/// Implementations must be deterministic for fixed `(text, font)` inputs —
/// the fitter binary-searches over prefixes and relies on consistent answers
/// within one fit call.
pub trait TextMeasurer {
    /// Rendered pixel width of `text` under `font`.
    fn width(&self, text: &str, font: &FontDescriptor) -> f32;
}

// ── AdvanceFont ───────────────────────────────────────────────────────────────

/// A per-character advance table, the same role a glyph map plays for a
/// bitmap font: no shaping, no kerning, just summed advances scaled
/// uniformly by `font.size / base_size`.
///
/// Good enough for card summaries and labels; callers needing shaped
/// measurement plug their own [`TextMeasurer`] instead.
pub struct AdvanceFont {
    /// Advance per character in pixels, valid at `base_size`.
    pub advances: HashMap<char, f32>,
    /// Advance used for characters absent from the table.
    pub default_advance: f32,
    /// Font size the advances were sampled at.
    pub base_size: f32,
}

impl AdvanceFont {
    /// Deserialise an advance table from a JSON string:
    ///
    /// ```json
    /// { "base_size": 16.0, "default_advance": 8.0,
    ///   "advances": { "A": 10.7, "i": 4.4, ... } }
    /// ```
    ///
    /// Keys must be single characters; longer keys are silently skipped.
    pub fn from_json(json: &str) -> Result<Self, MeasureError> {
        let raw: RawAdvanceTable = serde_json::from_str(json)?;

        if raw.base_size <= 0.0 {
            return Err(MeasureError::InvalidBaseSize(raw.base_size));
        }

        let advances = raw
            .advances
            .into_iter()
            .filter_map(|(key, advance)| {
                // Only accept single-character keys.
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() { return None; }
                Some((ch, advance))
            })
            .collect();

        Ok(Self {
            advances,
            default_advance: raw.default_advance,
            base_size: raw.base_size,
        })
    }

    /// A fixed-advance table: every character is `advance` pixels wide at
    /// `base_size`. Handy for tests and terminal-like surfaces where
    /// expected widths must be exact.
    pub fn monospace(advance: f32, base_size: f32) -> Self {
        Self {
            advances: HashMap::new(),
            default_advance: advance,
            base_size,
        }
    }
}

impl TextMeasurer for AdvanceFont {
    fn width(&self, text: &str, font: &FontDescriptor) -> f32 {
        let scale = font.size / self.base_size;
        text.chars()
            .map(|ch| self.advances.get(&ch).copied().unwrap_or(self.default_advance))
            .sum::<f32>()
            * scale
    }
}

// ── MeasureError ──────────────────────────────────────────────────────────────

/// Failures loading an advance table.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("invalid advance table: {0}")]
    InvalidTable(#[from] serde_json::Error),
    #[error("advance table base_size must be positive, got {0}")]
    InvalidBaseSize(f32),
}

// ── Raw (JSON-facing) types ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawAdvanceTable {
    base_size: f32,
    default_advance: f32,
    /// Char-keyed in JSON; converted to `char` keys when building the table.
    advances: HashMap<String, f32>,
}
