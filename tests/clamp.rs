// ── Tests ─────────────────────────────────────────────────────────────────────
//
// End-to-end coverage: rich content → normalize → clamp → nodes. The clamp's
// internal state machine is covered by the unit tests in `src/clamp.rs`.

use lineclamp::DEFAULT_ADVANCES;
use lineclamp::clamp::{Clamp, ClampOptions, FixedHost, ResizeRegistry};
use lineclamp::content::{Content, normalize};
use lineclamp::layout::fit::Line;
use lineclamp::layout::render::Node;
use lineclamp::measure::{AdvanceFont, FontDescriptor};

// ── helpers ───────────────────────────────────────────────────────────────────

/// Host with a 10 px/char monospace table at the default 16 px font size.
fn mono_host(width: f32) -> FixedHost {
    FixedHost {
        width,
        font: FontDescriptor::default(),
        measurer: Some(AdvanceFont::monospace(10.0, 16.0)),
    }
}

// ── rich content through the clamp ────────────────────────────────────────────

#[test]
fn card_summary_end_to_end() {
    let content = Content::Sequence(vec![
        Content::from("Latest build"),
        Content::Break,
        Content::from("All tests passing on main branch"),
    ]);

    let mut resizes = ResizeRegistry::new();
    let mut clamp = Clamp::new(
        mono_host(150.0),
        ClampOptions { lines: 2, ..ClampOptions::default() },
    );
    clamp.mount(&mut resizes);
    clamp.set_content(normalize(&content));

    assert!(clamp.result().truncated);
    assert_eq!(
        clamp.nodes(),
        vec![
            Node::Span("Latest build".into()),
            Node::Break,
            Node::Terminal { text: "All tests pass".into(), ellipsis: "…".into() },
        ]
    );
}

#[test]
fn literal_newlines_in_content_do_not_break_lines() {
    // A source newline is not an intended break; it must reach the fitter
    // as a space, keeping everything in one paragraph.
    let content = Content::from("alpha\nbeta");
    let mut resizes = ResizeRegistry::new();
    let mut clamp = Clamp::new(mono_host(1000.0), ClampOptions::default());
    clamp.mount(&mut resizes);
    clamp.set_content(normalize(&content));

    assert_eq!(clamp.result().lines, vec![Line::Plain("alpha beta".into())]);
    assert!(!clamp.result().truncated);
}

// ── custom ellipsis ───────────────────────────────────────────────────────────

#[test]
fn custom_ellipsis_width_is_reserved() {
    // "[more]" is 6 chars = 60 px; a 100 px line keeps only 4 chars of text.
    let options = ClampOptions { ellipsis: "[more]".into(), ..ClampOptions::default() };
    let mut resizes = ResizeRegistry::new();
    let mut clamp = Clamp::new(mono_host(100.0), options);
    clamp.mount(&mut resizes);
    clamp.set_content("aaaaaaaaaaaa");

    assert_eq!(
        clamp.result().lines,
        vec![Line::Truncated { text: "aaaa".into(), ellipsis: "[more]".into() }]
    );
}

// ── built-in proportional table ───────────────────────────────────────────────

#[test]
fn default_table_clamps_long_text() {
    let host = FixedHost {
        width: 120.0,
        font: FontDescriptor::default(),
        measurer: Some(AdvanceFont::from_json(DEFAULT_ADVANCES).unwrap()),
    };
    let mut resizes = ResizeRegistry::new();
    let mut clamp = Clamp::new(host, ClampOptions { lines: 2, ..ClampOptions::default() });
    clamp.mount(&mut resizes);
    clamp.set_content("The quick brown fox jumps over the lazy dog");

    let result = clamp.result();
    assert!(result.truncated);
    assert_eq!(result.lines.len(), 2);
    assert!(matches!(result.lines[0], Line::Plain(_)));
    assert!(matches!(result.lines[1], Line::Truncated { .. }));
}

// ── defaults & listener bookkeeping ───────────────────────────────────────────

#[test]
fn options_default_to_one_line_ellipsis_no_trim() {
    let options = ClampOptions::default();
    assert_eq!(options.lines, 1);
    assert_eq!(options.ellipsis, "…");
    assert!(!options.trim_whitespace);
    assert_eq!(options.width, 0.0);
}

#[test]
fn registry_tracks_each_mounted_clamp() {
    let mut resizes = ResizeRegistry::new();
    let mut first = Clamp::new(mono_host(100.0), ClampOptions::default());
    let mut second = Clamp::new(mono_host(100.0), ClampOptions::default());

    first.mount(&mut resizes);
    second.mount(&mut resizes);
    assert_eq!(resizes.active(), 2);

    first.unmount();
    assert_eq!(resizes.active(), 1);
    drop(second);
    assert_eq!(resizes.active(), 0);
}
