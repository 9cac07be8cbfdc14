// ── Line fitting & rendering ──────────────────────────────────────────────────

pub mod fit;
pub mod render;

pub use fit::{FitConfig, FitResult, Line, fit};
pub use render::{Node, render_lines};
