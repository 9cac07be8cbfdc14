pub mod clamp;
pub mod content;
pub mod layout;
pub mod measure;

/// Marker appended to the truncated line when no custom ellipsis is set.
pub const DEFAULT_ELLIPSIS: &str = "…";

/// Built-in ASCII advance table embedded at compile time
/// (char-keyed JSON, see `AdvanceFont::from_json`).
pub const DEFAULT_ADVANCES: &str = include_str!("../resources/ascii_advances.json");
