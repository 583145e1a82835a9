//! Timers and Clock
//!
//! Deferred work (auto-dismiss, remove-after-animation, delayed reload) is
//! scheduled through [`Scheduler`] rather than calling the browser directly.

use gloo_timers::callback::Timeout;

pub trait Scheduler {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> f64;

    /// Run `task` once after `delay_ms`. Scheduled tasks cannot be cancelled;
    /// tasks check their own state when they fire.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// `setTimeout` + `Date.now()`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
