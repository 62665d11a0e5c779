//! Overflow marquee controller
//!
//! Decides whether a cell's content overflows its container and, if it does,
//! scrolls it left one pixel per tick until cancelled. A second copy of the
//! content is drawn `SCROLL_GAP_PX` after the first, and the offset wraps to
//! zero once the first copy plus the gap has scrolled out, so the loop is
//! seamless.
//!
//! State lives in one `MarqueeController` per cell. Every measurement cancels
//! the running timer before deciding again, which keeps at most one live
//! timer per cell.

pub mod timer;

pub use timer::{ManualScheduler, Scheduler, ScopedTimer, TimerHandle};

use crate::models::CellConfig;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Visual gap between the content and its trailing copy, in pixels
pub const SCROLL_GAP_PX: f64 = 10.0;

/// Lifecycle phase of a cell's marquee
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum MarqueePhase {
    /// Nothing measured yet
    Idle = 0,
    /// Comparing content and container widths
    Measuring = 1,
    /// Content fits (or scrolling is off); no timer
    Static = 2,
    /// Timer running
    Scrolling = 3,
}

impl Default for MarqueePhase {
    fn default() -> Self {
        MarqueePhase::Idle
    }
}

/// Scroll settings derived from the cell configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarqueeConfig {
    pub enabled: bool,
    /// Pixels per second
    pub speed: f64,
}

impl MarqueeConfig {
    /// Milliseconds between one-pixel steps; `None` when the speed cannot scroll
    pub fn tick_interval_ms(&self) -> Option<u32> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return None;
        }
        Some((1000.0 / self.speed).round().max(1.0) as u32)
    }
}

impl From<&CellConfig> for MarqueeConfig {
    fn from(config: &CellConfig) -> Self {
        Self {
            enabled: config.overflow_ellipsis,
            speed: config.text_speed,
        }
    }
}

/// Measured widths and current scroll position of one cell
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarqueeState {
    pub container_width: f64,
    pub content_width: f64,
    pub is_scrolling: bool,
    /// Horizontal translation in pixels, zero or negative
    pub offset: f64,
}

impl MarqueeState {
    /// One tick: move left a pixel, wrapping after content plus gap
    pub fn step(&mut self) {
        self.offset -= 1.0;
        if self.offset.abs() >= self.content_width + SCROLL_GAP_PX {
            self.offset = 0.0;
        }
    }
}

/// Callback that applies an offset to the mounted cell
pub type Painter = Rc<dyn Fn(f64)>;

/// Per-cell marquee state machine
pub struct MarqueeController {
    scheduler: Rc<dyn Scheduler>,
    state: Rc<RefCell<MarqueeState>>,
    phase: MarqueePhase,
    timer: Option<ScopedTimer>,
    painter: Option<Painter>,
}

impl MarqueeController {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            state: Rc::new(RefCell::new(MarqueeState::default())),
            phase: MarqueePhase::Idle,
            timer: None,
            painter: None,
        }
    }

    /// Called with the new offset on every tick and on reset
    pub fn with_painter(mut self, painter: Painter) -> Self {
        self.painter = Some(painter);
        self
    }

    pub fn phase(&self) -> MarqueePhase {
        self.phase
    }

    pub fn state(&self) -> MarqueeState {
        self.state.borrow().clone()
    }

    pub fn offset(&self) -> f64 {
        self.state.borrow().offset
    }

    pub fn has_timer(&self) -> bool {
        self.timer.as_ref().map(ScopedTimer::is_active).unwrap_or(false)
    }

    /// Re-evaluate after content, container size or configuration changed.
    ///
    /// Cancels any running timer first, then enters `Static` or `Scrolling`.
    pub fn measure(&mut self, content_width: f64, container_width: f64, config: MarqueeConfig) -> MarqueePhase {
        self.cancel_timer();
        self.phase = MarqueePhase::Measuring;

        {
            let mut state = self.state.borrow_mut();
            state.content_width = content_width;
            state.container_width = container_width;
        }

        let interval_ms = match config.tick_interval_ms() {
            Some(ms) if config.enabled && content_width > container_width => ms,
            _ => {
                self.enter_static();
                return self.phase;
            }
        };

        self.enter_scrolling(interval_ms);
        self.phase
    }

    /// Stop scrolling and forget measurements (content replaced or cell unmounted)
    pub fn reset(&mut self) {
        self.cancel_timer();
        *self.state.borrow_mut() = MarqueeState::default();
        self.paint(0.0);
        self.phase = MarqueePhase::Idle;
    }

    fn enter_static(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.is_scrolling = false;
            state.offset = 0.0;
        }
        self.paint(0.0);
        self.phase = MarqueePhase::Static;
    }

    fn enter_scrolling(&mut self, interval_ms: u32) {
        {
            let mut state = self.state.borrow_mut();
            state.is_scrolling = true;
            state.offset = 0.0;
        }
        self.paint(0.0);

        let state = Rc::clone(&self.state);
        let painter = self.painter.clone();
        let tick = Box::new(move || {
            let offset = {
                let mut state = state.borrow_mut();
                state.step();
                state.offset
            };
            if let Some(paint) = &painter {
                paint(offset);
            }
        });

        log::debug!("marquee: scrolling every {}ms", interval_ms);
        self.timer = Some(ScopedTimer::start(self.scheduler.as_ref(), interval_ms, tick));
        self.phase = MarqueePhase::Scrolling;
    }

    fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        self.state.borrow_mut().is_scrolling = false;
    }

    fn paint(&self, offset: f64) {
        if let Some(paint) = &self.painter {
            paint(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_from_speed() {
        let config = MarqueeConfig { enabled: true, speed: 50.0 };
        assert_eq!(config.tick_interval_ms(), Some(20));
        let stopped = MarqueeConfig { enabled: true, speed: 0.0 };
        assert_eq!(stopped.tick_interval_ms(), None);
    }

    #[test]
    fn test_step_wraps_after_content_and_gap() {
        let mut state = MarqueeState {
            content_width: 5.0,
            ..Default::default()
        };
        for _ in 0..14 {
            state.step();
        }
        assert_eq!(state.offset, -14.0);
        state.step();
        assert_eq!(state.offset, 0.0);
    }
}
