use std::cell::Cell;
use std::rc::Rc;

use crate::layout::fit::{FitConfig, FitResult, Line, fit};
use crate::layout::render::{Node, render_lines};
use crate::measure::{AdvanceFont, FontDescriptor, TextMeasurer};

// ── Trigger ───────────────────────────────────────────────────────────────────

/// What caused a recomputation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// The clamp was attached to a host surface.
    Mount,
    /// The source content changed.
    ContentChanged,
    /// The explicit width override changed.
    WidthChanged,
    /// The container was resized.
    Resize,
}

// ── ClampOptions ──────────────────────────────────────────────────────────────

/// Configuration surface of a [`Clamp`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClampOptions {
    /// Maximum number of display lines. `0` disables fitting entirely and
    /// passes the content through unmodified.
    pub lines: usize,
    /// Marker appended to the truncated last line.
    pub ellipsis: String,
    /// Strip trailing whitespace from the truncated line, cascading into
    /// prior lines when stripping empties it.
    pub trim_whitespace: bool,
    /// Fixed pixel width. `0.0` means "measure the host container".
    pub width: f32,
}

impl Default for ClampOptions {
    fn default() -> Self {
        Self {
            lines: 1,
            ellipsis: crate::DEFAULT_ELLIPSIS.into(),
            trim_whitespace: false,
            width: 0.0,
        }
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// The surface a [`Clamp`] is mounted on.
///
/// Supplies the three environmental facts the controller cannot know by
/// itself: how wide the container currently is, what font the content will
/// render with, and how to measure text in that font.
pub trait Host {
    /// Current container width in pixels, or `0.0` while the container has
    /// not been laid out yet.
    fn width(&self) -> f32;

    /// Font derived from the container's computed style. Read immediately
    /// before each fit; not assumed stable across calls.
    fn font(&self) -> FontDescriptor;

    /// Measurement backend, or `None` when running somewhere text cannot be
    /// measured (headless). Without one the clamp degrades to pass-through.
    fn measurer(&self) -> Option<&dyn TextMeasurer>;
}

/// A host with fixed width, font and advance-table measurer. Covers tests,
/// headless rendering and surfaces whose geometry is known up front.
pub struct FixedHost {
    pub width: f32,
    pub font: FontDescriptor,
    pub measurer: Option<AdvanceFont>,
}

impl Host for FixedHost {
    fn width(&self) -> f32 {
        self.width
    }

    fn font(&self) -> FontDescriptor {
        self.font.clone()
    }

    fn measurer(&self) -> Option<&dyn TextMeasurer> {
        self.measurer.as_ref().map(|m| m as &dyn TextMeasurer)
    }
}

// ── ResizeRegistry ────────────────────────────────────────────────────────────

/// Tracks live resize listeners.
///
/// Mounting a clamp registers exactly one listener; dropping the returned
/// [`ResizeBinding`] (on unmount, or when the clamp itself is dropped)
/// releases it exactly once. Hosts broadcast a resize by calling
/// [`Clamp::resized`] on every clamp holding a live binding.
#[derive(Default)]
pub struct ResizeRegistry {
    active: Rc<Cell<usize>>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one listener slot. The slot stays occupied until the
    /// returned binding is dropped.
    pub fn bind(&mut self) -> ResizeBinding {
        self.active.set(self.active.get() + 1);
        ResizeBinding { active: Rc::clone(&self.active) }
    }

    /// Number of currently registered listeners.
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

/// RAII handle for one registered resize listener.
pub struct ResizeBinding {
    active: Rc<Cell<usize>>,
}

impl Drop for ResizeBinding {
    fn drop(&mut self) {
        self.active.set(self.active.get() - 1);
    }
}

// ── Deferred frame tasks ──────────────────────────────────────────────────────

/// Work postponed to the next frame. Tasks read the clamp's state when they
/// RUN, not when they were scheduled; a stale task finds the clamp unmounted
/// and does nothing.
enum Deferred {
    /// Container width was unavailable; try the whole recompute again.
    Retry(Trigger),
    /// Deliver the truncation outcome to the callback, decoupled from the
    /// synchronous fit pass.
    Notify { truncated: bool },
}

// ── Clamp ─────────────────────────────────────────────────────────────────────

/// Owns the mutable state driving the line fitter: current content and
/// options, the resolved target width, the latest [`FitResult`], and the
/// deferred-task queue.
///
/// The host drives it with discrete events (`mount`, `set_content`,
/// `set_width`, `resized`) and one [`Clamp::run_frame`] call per frame to
/// drain deferred work, the same way a render loop ticks per-frame state.
pub struct Clamp<H: Host> {
    host: H,
    content: String,
    options: ClampOptions,
    on_truncate: Option<Box<dyn FnMut(bool)>>,
    /// Resolved width in effect for the latest fit; `0.0` until Ready.
    target_width: f32,
    result: FitResult,
    queue: Vec<Deferred>,
    mounted: bool,
    /// Live while mounted; dropping it releases the resize listener.
    binding: Option<ResizeBinding>,
}

impl<H: Host> Clamp<H> {
    pub fn new(host: H, options: ClampOptions) -> Self {
        Self {
            host,
            content: String::new(),
            options,
            on_truncate: None,
            target_width: 0.0,
            result: FitResult { lines: Vec::new(), truncated: false },
            queue: Vec::new(),
            mounted: false,
            binding: None,
        }
    }

    /// Install the callback receiving the truncation outcome after each
    /// completed fit. Delivered on the frame following the fit.
    pub fn set_on_truncate(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_truncate = Some(Box::new(callback));
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn content(&self) -> &str { &self.content }
    pub fn options(&self) -> &ClampOptions { &self.options }
    pub fn target_width(&self) -> f32 { self.target_width }
    pub fn is_mounted(&self) -> bool { self.mounted }

    /// Latest fitted lines.
    pub fn result(&self) -> &FitResult { &self.result }

    /// Latest lines mapped to presentational nodes.
    pub fn nodes(&self) -> Vec<Node> {
        render_lines(&self.result)
    }

    /// The host surface, for hosts whose geometry changes between events.
    pub fn host_mut(&mut self) -> &mut H { &mut self.host }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Attach to the surface: registers the resize listener and attempts the
    /// first fit (deferring a retry if the container is not measurable yet).
    pub fn mount(&mut self, resizes: &mut ResizeRegistry) {
        self.mounted = true;
        self.binding = Some(resizes.bind());
        self.recompute(Trigger::Mount);
    }

    /// Detach from the surface. Releases the resize listener; any deferred
    /// task still queued will find the clamp unmounted and do nothing.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.binding = None;
    }

    // ── Triggers ───────────────────────────────────────────────────────────

    /// Replace the source text and refit.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.recompute(Trigger::ContentChanged);
    }

    /// Change the explicit width override (`0.0` reverts to measuring the
    /// host) and refit.
    pub fn set_width(&mut self, width: f32) {
        self.options.width = width;
        self.recompute(Trigger::WidthChanged);
    }

    /// The container was resized; refit against its new width.
    pub fn resized(&mut self) {
        self.recompute(Trigger::Resize);
    }

    /// Re-resolve the target width and refit. Unready containers (zero
    /// width) defer a retry to the next frame instead of fitting.
    pub fn recompute(&mut self, trigger: Trigger) {
        // The surface may have been torn down since this was triggered.
        if !self.mounted {
            return;
        }

        let width = if self.options.width > 0.0 {
            self.options.width
        } else {
            self.host.width().floor()
        };

        if width <= 0.0 {
            log::debug!("container width unavailable on {trigger:?}; retrying next frame");
            self.queue.push(Deferred::Retry(trigger));
            return;
        }

        self.target_width = width;
        self.refit();
    }

    /// Drain tasks deferred to this frame. The host calls this once per
    /// frame (e.g. from its redraw handler). Tasks scheduled while draining
    /// run on the next frame.
    pub fn run_frame(&mut self) {
        let tasks = std::mem::take(&mut self.queue);
        for task in tasks {
            match task {
                Deferred::Retry(trigger) => self.recompute(trigger),
                Deferred::Notify { truncated } => {
                    if !self.mounted {
                        continue;
                    }
                    if let Some(callback) = self.on_truncate.as_mut() {
                        callback(truncated);
                    }
                }
            }
        }
    }

    // ── Fitting ────────────────────────────────────────────────────────────

    fn refit(&mut self) {
        if self.options.lines == 0 {
            // Fitting disabled: the content passes through unmodified.
            self.store_passthrough();
            return;
        }

        // Scoped measurement context: bind the measurer to the current font
        // for exactly one fit call.
        let fitted = match self.host.measurer() {
            None => None,
            Some(measurer) => {
                let font = self.host.font();
                let measure = |text: &str| measurer.width(text, &font);
                let config = FitConfig {
                    target_width: self.target_width,
                    line_budget: self.options.lines,
                    ellipsis: self.options.ellipsis.clone(),
                    ellipsis_width: measure(&self.options.ellipsis),
                    trim_whitespace: self.options.trim_whitespace,
                };
                Some(fit(&self.content, &config, measure))
            }
        };

        match fitted {
            Some(result) => {
                log::trace!(
                    "fit: {} line(s) at {}px, truncated={}",
                    result.lines.len(),
                    self.target_width,
                    result.truncated
                );
                self.queue.push(Deferred::Notify { truncated: result.truncated });
                self.result = result;
            }
            // Nothing can measure text here; show everything untruncated.
            None => self.store_passthrough(),
        }
    }

    fn store_passthrough(&mut self) {
        self.result = FitResult {
            lines: vec![Line::Plain(self.content.clone())],
            truncated: false,
        };
        // No fit pass ran, so there is nothing to decouple the callback
        // from; report the outcome right away.
        if let Some(callback) = self.on_truncate.as_mut() {
            callback(false);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
