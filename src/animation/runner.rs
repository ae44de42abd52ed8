use super::program::{build_schedule, CameraKeyframe, CameraProgram};
use crate::core::geo::LatLng;
use crate::prelude::{Arc, Duration, Mutex};
use crate::runtime::{Scheduler, TimerHandle};

/// The camera a program drives.
///
/// Calls arrive from whatever thread the scheduler fires timers on, while the
/// runner holds its state lock. Implementations must not call back into the
/// runner.
pub trait CameraDriver: Send + Sync {
    /// Jump to a position without animating
    fn set_position(&self, center: LatLng, height: f64);

    /// Start an animation towards `height` over `duration`
    fn animate_to(&self, center: LatLng, height: f64, duration: Duration);
}

/// Lifecycle of a [`CameraProgramRunner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Scheduled,
    Running,
    Completed,
}

struct RunnerShared {
    state: RunnerState,
    program: Option<CameraProgram>,
    schedule: Vec<CameraKeyframe>,
    fired: usize,
}

/// Plays a [`CameraProgram`] as a set of independent one-shot timers.
///
/// `Idle -> Scheduled -> Running -> Completed`. [`stop`](Self::stop) from any
/// state but `Idle` goes straight to `Completed` and discards what has not
/// fired. Once `stop` returns no further driver call is made: timer callbacks
/// and `stop` serialize on the same lock.
pub struct CameraProgramRunner {
    shared: Arc<Mutex<RunnerShared>>,
    timers: Mutex<Vec<Box<dyn TimerHandle>>>,
}

impl CameraProgramRunner {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(RunnerShared {
                state: RunnerState::Idle,
                program: None,
                schedule: Vec::new(),
                fired: 0,
            })),
            timers: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> RunnerState {
        self.shared
            .lock()
            .map(|shared| shared.state)
            .unwrap_or(RunnerState::Completed)
    }

    /// Keyframes that have fired so far
    pub fn fired(&self) -> usize {
        self.shared.lock().map(|shared| shared.fired).unwrap_or(0)
    }

    /// Keyframes still waiting to fire
    pub fn remaining(&self) -> Vec<CameraKeyframe> {
        self.shared
            .lock()
            .map(|shared| shared.schedule.iter().skip(shared.fired).copied().collect())
            .unwrap_or_default()
    }

    /// Build the schedule for `program`. Only valid from `Idle`.
    pub fn load(&self, program: CameraProgram) -> bool {
        let Ok(mut shared) = self.shared.lock() else {
            return false;
        };
        if shared.state != RunnerState::Idle {
            log::warn!("camera program already loaded ({:?}), ignoring", shared.state);
            return false;
        }

        shared.schedule = build_schedule(&program);
        log::debug!(
            "scheduled camera program: {} keyframes every {}s",
            shared.schedule.len(),
            program.interval_seconds
        );
        shared.program = Some(program);
        shared.state = RunnerState::Scheduled;
        true
    }

    /// Position the camera at the program start and hand every keyframe to
    /// `scheduler`. Returns immediately; only valid from `Scheduled`.
    pub fn run(&self, scheduler: &dyn Scheduler, driver: Arc<dyn CameraDriver>) -> bool {
        let (program, schedule) = {
            let Ok(mut shared) = self.shared.lock() else {
                return false;
            };
            if shared.state != RunnerState::Scheduled {
                log::warn!("camera program cannot run from {:?}", shared.state);
                return false;
            }
            let Some(program) = shared.program.clone() else {
                return false;
            };

            shared.state = RunnerState::Running;
            driver.set_position(program.center, program.out_height);
            (program, shared.schedule.clone())
        };

        let duration = program.interval();
        let handles: Vec<_> = schedule
            .iter()
            .map(|keyframe| {
                let shared = self.shared.clone();
                let driver = driver.clone();
                let center = program.center;
                let keyframe = *keyframe;
                scheduler.schedule_after(
                    keyframe.delay(),
                    Box::new(move || fire(&shared, driver.as_ref(), center, keyframe, duration)),
                )
            })
            .collect();

        if let Ok(mut timers) = self.timers.lock() {
            timers.extend(handles);
        }
        true
    }

    /// Cancel everything still pending. No-op when `Idle` or already `Completed`.
    pub fn stop(&self) {
        if let Ok(mut shared) = self.shared.lock() {
            if shared.state == RunnerState::Idle || shared.state == RunnerState::Completed {
                return;
            }
            let discarded = shared.schedule.len().saturating_sub(shared.fired);
            log::debug!("camera program stopped, {} keyframes discarded", discarded);
            shared.state = RunnerState::Completed;
            shared.schedule.clear();
        }

        if let Ok(mut timers) = self.timers.lock() {
            for timer in timers.drain(..) {
                timer.cancel();
            }
        }
    }
}

/// Timers may run out of order (parallel workers, jitter). Keyframes are
/// played strictly by index: a timer for keyframe `k` first plays every
/// earlier keyframe still outstanding, and a timer whose keyframe was already
/// played that way does nothing.
fn fire(
    shared: &Mutex<RunnerShared>,
    driver: &dyn CameraDriver,
    center: LatLng,
    keyframe: CameraKeyframe,
    duration: Duration,
) {
    let Ok(mut shared) = shared.lock() else {
        return;
    };
    if shared.state != RunnerState::Running || keyframe.index < shared.fired {
        return;
    }

    while shared.fired <= keyframe.index && shared.fired < shared.schedule.len() {
        let height = shared.schedule[shared.fired].target_height;
        driver.animate_to(center, height, duration);
        shared.fired += 1;
    }

    if shared.fired >= shared.schedule.len() {
        log::debug!("camera program completed after {} keyframes", shared.fired);
        shared.state = RunnerState::Completed;
        shared.schedule.clear();
    }
}

impl Default for CameraProgramRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CameraProgramRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
