use std::collections::VecDeque;

// ── FitConfig ─────────────────────────────────────────────────────────────────

/// Immutable inputs for one [`fit`] call.
///
/// The measurement function travels alongside as a plain closure so the
/// algorithm stays pure: no shared measurement context survives the call.
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Pixel width every produced line must satisfy. Must be positive;
    /// the controller never invokes the fitter before a width is known.
    pub target_width: f32,
    /// Maximum number of display lines. `0` disables fitting entirely —
    /// callers pass content through instead of calling [`fit`].
    pub line_budget: usize,
    /// Marker appended to the truncated last line, `…` by default.
    pub ellipsis: String,
    /// Rendered width of the ellipsis, measured once per fit call by the
    /// caller (font or ellipsis content may change between calls).
    pub ellipsis_width: f32,
    /// Strip trailing whitespace from the truncated line, cascading into
    /// prior lines when stripping empties it.
    pub trim_whitespace: bool,
}

// ── Line / FitResult ──────────────────────────────────────────────────────────

/// One produced display line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A line whose content fits verbatim within the target width.
    Plain(String),
    /// The terminal line: the surviving prefix plus the ellipsis marker.
    /// Only ever the last entry of a [`FitResult`].
    Truncated { text: String, ellipsis: String },
}

impl Line {
    /// The line's text content, without any ellipsis marker.
    pub fn text(&self) -> &str {
        match self {
            Line::Plain(text) => text,
            Line::Truncated { text, .. } => text,
        }
    }
}

/// Output of [`fit`]: at most `line_budget` lines, plus whether any source
/// content was omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub lines: Vec<Line>,
    pub truncated: bool,
}

// ── fit ───────────────────────────────────────────────────────────────────────

/// Fit `text` into at most `config.line_budget` lines of
/// `config.target_width` pixels, truncating the last line with an ellipsis
/// when the text does not fit.
///
/// Newlines delimit paragraphs; paragraphs split into words on single ASCII
/// spaces. Lines break at word boundaries, found by binary search over the
/// word count; the terminal line breaks at a character boundary, found by
/// binary search over the prefix length with the ellipsis width included.
/// A single word wider than the target width is truncated in place rather
/// than deferred to a later line.
///
/// `measure` must be deterministic for the duration of the call.
pub fn fit(text: &str, config: &FitConfig, measure: impl Fn(&str) -> f32) -> FitResult {
    let mut paragraphs: VecDeque<Vec<&str>> = text
        .split('\n')
        .map(|paragraph| paragraph.split(' ').collect())
        .collect();

    let mut lines: Vec<Line> = Vec::new();
    let mut truncated = true;
    let budget = config.line_budget;

    let mut line = 1usize;
    while line <= budget {
        // A paragraph fully consumed by earlier lines costs no line slot;
        // move on to the next one and retry the same index.
        if paragraphs.front().is_some_and(Vec::is_empty) {
            paragraphs.pop_front();
            continue;
        }

        let last_paragraph = paragraphs.len() == 1;
        let Some(words) = paragraphs.front_mut() else { break };
        let candidate = words.join(" ");

        if last_paragraph && measure(&candidate) <= config.target_width {
            // Everything left fits on this line; stop even if budget remains.
            truncated = false;
            lines.push(Line::Plain(candidate));
            break;
        }

        if line == budget {
            let prefix = longest_char_prefix(&candidate, config, &measure);
            let mut last = prefix;

            if config.trim_whitespace {
                last = last.trim_end().to_string();
                // An all-whitespace tail pulls the marker up onto the nearest
                // non-empty previous line.
                while last.is_empty() {
                    match lines.pop() {
                        Some(Line::Plain(prev)) => last = prev.trim_end().to_string(),
                        _ => break,
                    }
                }
            }

            lines.push(Line::Truncated {
                text: last,
                ellipsis: config.ellipsis.clone(),
            });
            break;
        }

        let count = longest_word_count(words, config.target_width, &measure);
        if count == 0 {
            // Even the first word alone overflows; spend the remaining budget
            // truncating it character-by-character instead of deferring it.
            line = budget;
            continue;
        }

        let taken: Vec<&str> = words.drain(..count).collect();
        lines.push(Line::Plain(taken.join(" ")));
        line += 1;
    }

    FitResult { lines, truncated }
}

// ── Binary searches ───────────────────────────────────────────────────────────

/// Longest prefix of `candidate` (in whole characters) whose width plus the
/// ellipsis width stays within the target. May be empty when not even one
/// character fits beside the ellipsis.
fn longest_char_prefix(
    candidate: &str,
    config: &FitConfig,
    measure: &impl Fn(&str) -> f32,
) -> String {
    // Byte offset just past each character, so prefixes slice on boundaries.
    let ends: Vec<usize> = candidate
        .char_indices()
        .map(|(i, ch)| i + ch.len_utf8())
        .collect();

    let mut lower: isize = 0;
    let mut upper: isize = ends.len() as isize - 1;

    while lower <= upper {
        let middle = (lower + upper) / 2;
        let prefix = &candidate[..ends[middle as usize]];

        if measure(prefix) + config.ellipsis_width <= config.target_width {
            lower = middle + 1;
        } else {
            upper = middle - 1;
        }
    }

    let end = if lower == 0 { 0 } else { ends[lower as usize - 1] };
    candidate[..end].to_string()
}

/// Largest word count whose space-joined prefix measures within `target`.
/// Returns `0` when the first word alone is too wide.
fn longest_word_count(words: &[&str], target: f32, measure: &impl Fn(&str) -> f32) -> usize {
    let mut lower: isize = 0;
    let mut upper: isize = words.len() as isize - 1;

    while lower <= upper {
        let middle = (lower + upper) / 2;
        let prefix = words[..=middle as usize].join(" ");

        if measure(&prefix) <= target {
            lower = middle + 1;
        } else {
            upper = middle - 1;
        }
    }

    lower as usize
}
