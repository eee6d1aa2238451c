use std::thread;
use std::time::{Duration, Instant};

/// Wall clock used to pace a surface to real time
#[derive(Debug)]
pub struct Clock {
    started: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Seconds since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Sleep off whatever is left of a `step`-second frame budget since the
    /// last tick. Returns immediately when the frame already ran long, or when
    /// `step` is not a representable duration.
    pub fn pace(&self, step: f32) {
        let Ok(budget) = Duration::try_from_secs_f32(step.max(0.0)) else {
            log::warn!("cannot pace to a {}s frame", step);
            return;
        };
        if let Some(remaining) = budget.checked_sub(self.last_tick.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
