//! Browser interval timers
//!
//! Binds the global `setInterval`/`clearInterval` directly so the scheduler
//! works in browsers and in Node.js, where `web_sys::window()` is `None`.

use crate::marquee::{Scheduler, TimerHandle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Call `setInterval(callback, delay)` from the global scope.
    #[wasm_bindgen(js_name = "setInterval")]
    fn global_set_interval(closure: &js_sys::Function, delay: i32) -> i32;

    /// Call `clearInterval(id)` from the global scope.
    #[wasm_bindgen(js_name = "clearInterval")]
    fn global_clear_interval(id: i32);
}

/// `Scheduler` backed by the JavaScript event loop
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn set_interval(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        let closure = Closure::wrap(tick);
        let delay = i32::try_from(interval_ms).unwrap_or(i32::MAX);
        let id = global_set_interval(closure.as_ref().unchecked_ref(), delay);
        Box::new(BrowserTimer {
            id: Some(id),
            _closure: closure,
        })
    }
}

/// Live interval; the closure must outlive the JavaScript timer
struct BrowserTimer {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl TimerHandle for BrowserTimer {
    fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            global_clear_interval(id);
        }
    }
}

impl Drop for BrowserTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
