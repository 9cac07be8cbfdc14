// ── Rich-content normalization ────────────────────────────────────────────────
//
// The fitter only understands `\n` as "intended break". Structured content
// must pass through `normalize` first, which turns explicit break elements
// into newline delimiters and coalesces literal newlines inside text runs to
// spaces — so a bare `\n` never reaches the fitter by accident.

/// Structured content as supplied by a host surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A run of plain text. Literal newlines inside it are NOT breaks.
    Text(String),
    /// An explicit line break (a `<br/>`-style element).
    Break,
    /// An ordered sequence of child content.
    Sequence(Vec<Content>),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

/// Flatten `content` into the plain newline-delimited form the fitter
/// consumes: explicit breaks become `\n`, and any `\r\n`, `\r` or `\n`
/// inside a text run becomes a single space.
pub fn normalize(content: &Content) -> String {
    let mut out = String::new();
    push_normalized(content, &mut out);
    out
}

fn push_normalized(content: &Content, out: &mut String) {
    match content {
        Content::Text(text) => {
            // `\r\n` collapses to one space, not two.
            let flat = text.replace("\r\n", " ");
            for ch in flat.chars() {
                out.push(if ch == '\r' || ch == '\n' { ' ' } else { ch });
            }
        }
        Content::Break => out.push('\n'),
        Content::Sequence(items) => {
            for item in items {
                push_normalized(item, out);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize(&Content::from("hello world")), "hello world");
    }

    #[test]
    fn explicit_break_becomes_newline() {
        let content = Content::Sequence(vec![
            Content::from("foo"),
            Content::Break,
            Content::from("bar"),
        ]);
        assert_eq!(normalize(&content), "foo\nbar");
    }

    #[test]
    fn literal_newlines_coalesce_to_spaces() {
        assert_eq!(normalize(&Content::from("foo\nbar\rbaz")), "foo bar baz");
    }

    #[test]
    fn crlf_collapses_to_single_space() {
        assert_eq!(normalize(&Content::from("foo\r\nbar")), "foo bar");
    }

    #[test]
    fn nested_sequences_flatten_in_order() {
        let content = Content::Sequence(vec![
            Content::Sequence(vec![Content::from("a"), Content::Break]),
            Content::from("b\nc"),
        ]);
        assert_eq!(normalize(&content), "a\nb c");
    }

    #[test]
    fn consecutive_breaks_yield_empty_paragraph() {
        let content = Content::Sequence(vec![
            Content::from("Hi"),
            Content::Break,
            Content::Break,
            Content::from("Bye"),
        ]);
        assert_eq!(normalize(&content), "Hi\n\nBye");
    }
}
