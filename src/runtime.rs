//! Timer abstraction for delayed, fire-and-forget callbacks
//!
//! Camera programs never sleep on the caller's thread. Every keyframe is handed
//! to a [`Scheduler`] as an independent one-shot timer, and the returned
//! [`TimerHandle`] is kept so pending work can be cancelled. Production code
//! uses the Tokio-backed scheduler; tests drive a [`ManualScheduler`] whose
//! clock only moves when told to.

use crate::prelude::{Arc, Duration, Mutex};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Work run once when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled timer
pub trait TimerHandle: Send + Sync {
    /// Fired or cancelled
    fn is_finished(&self) -> bool;

    /// Prevent the callback from running if it has not started yet
    fn cancel(&self);
}

/// Anything that can run a callback after a delay
pub trait Scheduler: Send + Sync {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> Box<dyn TimerHandle>;
}

#[cfg(feature = "tokio-runtime")]
pub use tokio_impl::TokioScheduler;

#[cfg(feature = "tokio-runtime")]
mod tokio_impl {
    use super::*;
    use ::tokio::runtime::Handle;
    use ::tokio::task::JoinHandle;

    /// Schedules each timer as its own Tokio task
    #[derive(Debug, Clone)]
    pub struct TokioScheduler {
        handle: Handle,
    }

    impl TokioScheduler {
        pub fn new(handle: Handle) -> Self {
            Self { handle }
        }

        /// Scheduler bound to the runtime of the calling context, if any.
        pub fn try_current() -> Option<Self> {
            Handle::try_current().ok().map(Self::new)
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> Box<dyn TimerHandle> {
            // Deadline is fixed now so fire times stay relative to the caller's start.
            let deadline = ::tokio::time::Instant::now() + delay;
            let handle = self.handle.spawn(async move {
                ::tokio::time::sleep_until(deadline).await;
                callback();
            });
            Box::new(TokioHandle(handle))
        }
    }

    struct TokioHandle(JoinHandle<()>);

    impl TimerHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

struct PendingTimer {
    callback: TimerCallback,
    state: Arc<TimerState>,
}

#[derive(Default)]
struct TimerState {
    cancelled: AtomicBool,
    fired: AtomicBool,
}

struct ManualHandle(Arc<TimerState>);

impl TimerHandle for ManualHandle {
    fn is_finished(&self) -> bool {
        self.0.fired.load(Ordering::SeqCst) || self.0.cancelled.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    sequence: u64,
    /// Keyed by (due time, insertion order)
    pending: BTreeMap<(Duration, u64), PendingTimer>,
}

/// Deterministic scheduler driven by [`advance`](ManualScheduler::advance).
///
/// Timers fire in due-time order, ties broken by scheduling order. Callbacks
/// run on the thread calling `advance`, outside the scheduler's lock, so they
/// may schedule further timers.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.clock.lock().map(|clock| clock.now).unwrap_or_default()
    }

    /// Timers that are neither fired nor cancelled
    pub fn pending(&self) -> usize {
        self.clock
            .lock()
            .map(|clock| {
                clock
                    .pending
                    .values()
                    .filter(|timer| !timer.state.cancelled.load(Ordering::SeqCst))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Move the clock forward, firing every timer that comes due. Returns the
    /// number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            let next = {
                let Ok(mut clock) = self.clock.lock() else {
                    break;
                };
                let due = match clock.pending.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                clock.now = due.0;
                clock.pending.remove(&due)
            };

            if let Some(timer) = next {
                if !timer.state.cancelled.load(Ordering::SeqCst) {
                    (timer.callback)();
                    timer.state.fired.store(true, Ordering::SeqCst);
                    fired += 1;
                }
            }
        }

        if let Ok(mut clock) = self.clock.lock() {
            clock.now = target;
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> Box<dyn TimerHandle> {
        let state = Arc::new(TimerState::default());
        if let Ok(mut clock) = self.clock.lock() {
            let key = (clock.now + delay, clock.sequence);
            clock.sequence += 1;
            clock.pending.insert(
                key,
                PendingTimer {
                    callback,
                    state: state.clone(),
                },
            );
        }
        Box::new(ManualHandle(state))
    }
}
