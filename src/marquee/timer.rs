//! Repeating timers with scoped ownership
//!
//! A `ScopedTimer` owns one repeating timer and cancels it when dropped, so a
//! cell can never leave an orphaned interval behind. The browser scheduler
//! lives in the API layer; `ManualScheduler` drives virtual time for hosts
//! without a real clock and for tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to a live repeating timer
pub trait TimerHandle {
    /// Stop the timer. Calling twice is a no-op.
    fn cancel(&mut self);
}

/// Source of repeating timers
pub trait Scheduler {
    fn set_interval(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle>;
}

/// Owned repeating timer, cancelled on drop
pub struct ScopedTimer {
    handle: Option<Box<dyn TimerHandle>>,
}

impl ScopedTimer {
    pub fn start(scheduler: &dyn Scheduler, interval_ms: u32, tick: Box<dyn FnMut()>) -> Self {
        Self {
            handle: Some(scheduler.set_interval(interval_ms.max(1), tick)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct ManualInterval {
    id: u64,
    period_ms: u64,
    next_due_ms: u64,
    tick: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct ManualInner {
    now_ms: u64,
    next_id: u64,
    intervals: Vec<ManualInterval>,
    started: usize,
    cancelled: usize,
    peak_live: usize,
}

/// Deterministic scheduler driven by `advance`
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward, firing every tick that falls due in order
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms + ms;

        loop {
            // Earliest due interval at or before the target time
            let due = {
                let inner = self.inner.borrow();
                inner
                    .intervals
                    .iter()
                    .filter(|iv| iv.next_due_ms <= target)
                    .min_by_key(|iv| (iv.next_due_ms, iv.id))
                    .map(|iv| (iv.id, iv.next_due_ms))
            };
            let Some((id, due_ms)) = due else { break };

            let tick = {
                let mut inner = self.inner.borrow_mut();
                inner.now_ms = due_ms;
                match inner.intervals.iter_mut().find(|iv| iv.id == id) {
                    Some(iv) => {
                        iv.next_due_ms += iv.period_ms;
                        iv.tick.take()
                    }
                    None => None,
                }
            };

            if let Some(mut tick) = tick {
                tick();
                // Put the callback back unless the tick cancelled its own timer
                let mut inner = self.inner.borrow_mut();
                if let Some(iv) = inner.intervals.iter_mut().find(|iv| iv.id == id) {
                    iv.tick = Some(tick);
                }
            }
        }

        self.inner.borrow_mut().now_ms = target;
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Timers started and not yet cancelled
    pub fn live_timers(&self) -> usize {
        self.inner.borrow().intervals.len()
    }

    /// Highest number of simultaneously live timers seen so far
    pub fn peak_live_timers(&self) -> usize {
        self.inner.borrow().peak_live
    }

    pub fn started(&self) -> usize {
        self.inner.borrow().started
    }

    pub fn cancelled(&self) -> usize {
        self.inner.borrow().cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let period_ms = u64::from(interval_ms.max(1));
        let next_due_ms = inner.now_ms + period_ms;
        inner.intervals.push(ManualInterval {
            id,
            period_ms,
            next_due_ms,
            tick: Some(tick),
        });
        inner.started += 1;
        inner.peak_live = inner.peak_live.max(inner.intervals.len());

        Box::new(ManualTimerHandle {
            id,
            inner: Rc::clone(&self.inner),
            cancelled: false,
        })
    }
}

struct ManualTimerHandle {
    id: u64,
    inner: Rc<RefCell<ManualInner>>,
    cancelled: bool,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        let mut inner = self.inner.borrow_mut();
        inner.intervals.retain(|iv| iv.id != self.id);
        inner.cancelled += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_interval_fires_per_period() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _timer = ScopedTimer::start(&scheduler, 10, Box::new(move || c.set(c.get() + 1)));

        scheduler.advance(35);
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.now_ms(), 35);
    }

    #[test]
    fn test_drop_cancels() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let timer = ScopedTimer::start(&scheduler, 10, Box::new(move || c.set(c.get() + 1)));
        assert_eq!(scheduler.live_timers(), 1);

        drop(timer);
        scheduler.advance(100);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.live_timers(), 0);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn test_explicit_cancel_then_drop_counts_once() {
        let scheduler = ManualScheduler::new();
        let mut timer = ScopedTimer::start(&scheduler, 5, Box::new(|| {}));
        timer.cancel();
        assert!(!timer.is_active());
        drop(timer);
        assert_eq!(scheduler.cancelled(), 1);
    }
}
