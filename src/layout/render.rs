use crate::layout::fit::{FitResult, Line};

// ── Node ──────────────────────────────────────────────────────────────────────

/// One presentational node produced by [`render_lines`].
///
/// The surface mounting the clamp maps these 1:1 onto whatever it renders
/// with (spans and `<br/>`s, positioned glyph runs, styled TUI cells).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of text on its own line.
    Span(String),
    /// A line break separating two lines.
    Break,
    /// The terminal line: surviving text immediately followed by the
    /// ellipsis marker, rendered as one unit so the marker can carry its
    /// own styling.
    Terminal { text: String, ellipsis: String },
}

// ── render_lines ──────────────────────────────────────────────────────────────

/// Map fitted lines onto a flat presentational sequence.
///
/// Every line except the last is followed by a [`Node::Break`]; a line with
/// empty content collapses into the bare break (no empty span is emitted).
/// The last line is emitted alone, with no trailing break.
pub fn render_lines(result: &FitResult) -> Vec<Node> {
    let mut nodes = Vec::new();
    let count = result.lines.len();

    for (i, line) in result.lines.iter().enumerate() {
        let last = i + 1 == count;
        match line {
            Line::Plain(text) => {
                if last {
                    nodes.push(Node::Span(text.clone()));
                } else {
                    if !text.is_empty() {
                        nodes.push(Node::Span(text.clone()));
                    }
                    nodes.push(Node::Break);
                }
            }
            // Terminal entries only ever occupy the final slot.
            Line::Truncated { text, ellipsis } => {
                nodes.push(Node::Terminal {
                    text: text.clone(),
                    ellipsis: ellipsis.clone(),
                });
            }
        }
    }

    nodes
}
