//! Mountable cell view
//!
//! Pairs a rendered value with its display configuration and marquee. The
//! host measures the mounted content and container and reports the widths;
//! the view re-runs the marquee whenever the content, the container height or
//! the configuration changes, and tears the timer down on unmount.

pub mod display;

pub use display::{CellDisplay, Segment};

use crate::marquee::{MarqueeConfig, MarqueeController, MarqueePhase, MarqueeState, Painter, Scheduler, SCROLL_GAP_PX};
use crate::models::{CellConfig, RenderedOutput};
use std::rc::Rc;

pub struct CellView {
    output: RenderedOutput,
    config: CellConfig,
    marquee: MarqueeController,
    /// Last reported (content, container) widths
    widths: Option<(f64, f64)>,
}

impl CellView {
    pub fn new(scheduler: Rc<dyn Scheduler>, config: CellConfig) -> Self {
        Self {
            output: RenderedOutput::Empty,
            config,
            marquee: MarqueeController::new(scheduler),
            widths: None,
        }
    }

    pub fn with_painter(scheduler: Rc<dyn Scheduler>, config: CellConfig, painter: Painter) -> Self {
        Self {
            output: RenderedOutput::Empty,
            config,
            marquee: MarqueeController::new(scheduler).with_painter(painter),
            widths: None,
        }
    }

    pub fn output(&self) -> &RenderedOutput {
        &self.output
    }

    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    pub fn phase(&self) -> MarqueePhase {
        self.marquee.phase()
    }

    pub fn marquee_state(&self) -> MarqueeState {
        self.marquee.state()
    }

    pub fn is_scrolling(&self) -> bool {
        self.marquee.phase() == MarqueePhase::Scrolling
    }

    pub fn has_timer(&self) -> bool {
        self.marquee.has_timer()
    }

    /// Replace the rendered value. Returns `false` if it did not change.
    ///
    /// New content drops the old marquee state; the host must measure again.
    pub fn set_output(&mut self, output: RenderedOutput) -> bool {
        if output == self.output {
            return false;
        }
        self.output = output;
        self.widths = None;
        self.marquee.reset();
        true
    }

    /// Report mounted widths and decide between static and scrolling
    pub fn measure(&mut self, content_width: f64, container_width: f64) -> MarqueePhase {
        self.widths = Some((content_width, container_width));
        self.marquee
            .measure(content_width, container_width, MarqueeConfig::from(&self.config))
    }

    /// The dashboard root was resized; re-measure if the height changed
    pub fn set_container_height(&mut self, height: f64) -> MarqueePhase {
        if self.config.container_height == Some(height) {
            return self.phase();
        }
        self.config.container_height = Some(height);
        self.remeasure()
    }

    pub fn set_config(&mut self, config: CellConfig) -> MarqueePhase {
        if config == self.config {
            return self.phase();
        }
        self.config = config;
        self.remeasure()
    }

    /// Unmount: stop the timer and forget measurements
    pub fn teardown(&mut self) {
        self.widths = None;
        self.marquee.reset();
    }

    pub fn display(&self) -> CellDisplay {
        let scrolling = self.is_scrolling() && self.config.overflow_ellipsis;
        let mut classes = vec!["cell".to_string(), display::kind_class(&self.output).to_string()];
        if scrolling {
            classes.push("scrolling".to_string());
        }

        CellDisplay {
            classes,
            segments: display::segments_for(&self.output),
            duplicate: scrolling,
            duplicate_gap: SCROLL_GAP_PX,
            transform: display::transform_for(self.marquee.offset()),
            phase: self.phase(),
        }
    }

    fn remeasure(&mut self) -> MarqueePhase {
        match self.widths {
            Some((content, container)) => self.measure(content, container),
            None => self.phase(),
        }
    }
}
