mod frame;
mod step;
mod surface;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

pub use frame::Frame;
pub use step::{Step, StepQueue};
pub use surface::{NullSurface, RecordingSurface, Surface};

/// Animation intervals offered to the user, fastest first, in milliseconds.
pub const SPEED_PRESETS_MS: [u64; 4] = [10, 50, 100, 200];

/// Longest single sleep between cancellation checks.
const CANCEL_POLL_SLICE: Duration = Duration::from_millis(5);

/// Shared flag telling an in-flight playback to stop before its next step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sleep for `duration`, waking early if cancelled.
    /// Returns `false` if the token was cancelled.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(CANCEL_POLL_SLICE));
        }
    }
}

/// Interval between animation steps, adjustable while a playback runs.
#[derive(Debug, Clone)]
pub struct Pacer(Arc<AtomicU64>);

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Pacer(Arc::new(AtomicU64::new(interval.as_millis() as u64)))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.0.load(Ordering::Relaxed))
    }

    pub fn set_interval(&self, interval: Duration) {
        self.0.store(interval.as_millis() as u64, Ordering::Relaxed);
    }

    /// Move to the next faster preset. Returns the new interval.
    pub fn speed_up(&self) -> Duration {
        let current = self.0.load(Ordering::Relaxed);
        if let Some(&faster) = SPEED_PRESETS_MS.iter().rev().find(|&&ms| ms < current) {
            self.0.store(faster, Ordering::Relaxed);
        }
        self.interval()
    }

    /// Move to the next slower preset. Returns the new interval.
    pub fn slow_down(&self) -> Duration {
        let current = self.0.load(Ordering::Relaxed);
        if let Some(&slower) = SPEED_PRESETS_MS.iter().find(|&&ms| ms > current) {
            self.0.store(slower, Ordering::Relaxed);
        }
        self.interval()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Every queued step was shown.
    Completed,
    /// The playback was cancelled and the remaining steps were dropped.
    Cancelled,
}

/// Drains a [`StepQueue`] onto a [`Surface`] one step per interval.
pub struct Animator {
    pacer: Pacer,
    cancel: CancelToken,
}

impl Animator {
    pub fn new(pacer: Pacer, cancel: CancelToken) -> Self {
        Animator { pacer, cancel }
    }

    /// Play one step: check for cancellation, apply it to `frame` and draw.
    /// Returns `None` once the queue is exhausted.
    pub fn tick<S: Surface + ?Sized>(
        &self,
        queue: &mut StepQueue,
        frame: &mut Frame,
        surface: &mut S,
    ) -> std::io::Result<Option<PlaybackStatus>> {
        if self.cancel.is_cancelled() {
            tracing::debug!(dropped = queue.len(), "playback cancelled");
            queue.clear();
            return Ok(Some(PlaybackStatus::Cancelled));
        }
        let Some(step) = queue.pop() else {
            return Ok(Some(PlaybackStatus::Completed));
        };
        frame.apply(&step);
        surface.draw(frame, &step)?;
        Ok(None)
    }

    /// Wait out the pacer's current interval, returning early on cancellation.
    pub fn pause(&self) {
        let interval = self.pacer.interval();
        if !interval.is_zero() {
            self.cancel.sleep(interval);
        }
    }

    /// Play the whole queue, pausing after each step.
    pub fn play<S: Surface + ?Sized>(
        &self,
        queue: &mut StepQueue,
        frame: &mut Frame,
        surface: &mut S,
    ) -> std::io::Result<PlaybackStatus> {
        loop {
            if let Some(status) = self.tick(queue, frame, surface)? {
                return Ok(status);
            }
            self.pause();
        }
    }
}
