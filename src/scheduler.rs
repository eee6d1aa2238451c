use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MotionFault, SchedulerError};
use crate::frame::FrameInfo;
use crate::scene::{ElementId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Longest step a single tick may apply, in seconds.
    pub max_step: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { max_step: 0.25 }
    }
}

/// `Idle -> Running -> Stopped`. Stopped is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    /// Step applied to every element, after clamping.
    pub dt: f32,
    pub clamped: bool,
    pub advanced: usize,
    pub faults: Vec<MotionFault>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Drives every element of a scene once per surface tick.
#[derive(Debug)]
pub struct AnimationScheduler {
    state: SchedulerState,
    config: SchedulerConfig,
    ticks: u64,
    elapsed: f64,
    faulted: HashSet<ElementId>,
}

impl AnimationScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            state: SchedulerState::Idle,
            config,
            ticks: 0,
            elapsed: 0.0,
            faulted: HashSet::new(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Scheduler time in seconds: the sum of all applied steps.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elements that have faulted at least once.
    pub fn faulted(&self) -> &HashSet<ElementId> {
        &self.faulted
    }

    /// `Idle -> Running`, when the surface mounts.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Idle, SchedulerState::Running)
    }

    /// Moves to `Stopped`. After this no tick is accepted; a new mount needs
    /// a new scheduler.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            log::debug!("scheduler {:?} -> Stopped after {} ticks", self.state, self.ticks);
            self.state = SchedulerState::Stopped;
        }
    }

    /// Advances every element once, in scene order. One element failing does
    /// not keep the others from advancing.
    pub fn tick(&mut self, frame: &FrameInfo, scene: &mut SceneGraph) -> Result<TickReport, SchedulerError> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::NotRunning(self.state));
        }

        let (dt, clamped) = self.step(frame);
        let mut faults = Vec::new();
        let mut advanced = 0;

        for element in scene.elements_mut() {
            match element.advance(dt) {
                Ok(()) => advanced += 1,
                Err(fault) => {
                    if self.faulted.insert(fault.element().clone()) {
                        log::warn!("frame {}: {}", frame.number, fault);
                    } else {
                        log::debug!("frame {}: {}", frame.number, fault);
                    }
                    faults.push(fault);
                }
            }
        }

        self.ticks += 1;
        self.elapsed += dt as f64;

        Ok(TickReport {
            frame: frame.number,
            dt,
            clamped,
            advanced,
            faults,
        })
    }

    fn step(&self, frame: &FrameInfo) -> (f32, bool) {
        let delta = frame.delta;
        if !delta.is_finite() || delta < 0.0 {
            log::warn!("frame {}: ignoring invalid delta {}", frame.number, delta);
            return (0.0, true);
        }
        if delta > self.config.max_step {
            log::debug!("frame {}: clamping delta {} to {}", frame.number, delta, self.config.max_step);
            return (self.config.max_step, true);
        }
        (delta, false)
    }

    fn transition(&mut self, from: SchedulerState, to: SchedulerState) -> Result<(), SchedulerError> {
        if self.state != from {
            return Err(SchedulerError::InvalidTransition { from: self.state, to });
        }
        log::debug!("scheduler {:?} -> {:?}", from, to);
        self.state = to;
        Ok(())
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(number: u64, delta: f32) -> FrameInfo {
        FrameInfo::new(number, number as f32 * delta, delta)
    }

    #[test]
    fn lifecycle_only_moves_forward() {
        let mut scheduler = AnimationScheduler::default();
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        scheduler.start().unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert!(scheduler.start().is_err());

        scheduler.stop();
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert_eq!(
            scheduler.start(),
            Err(SchedulerError::InvalidTransition {
                from: SchedulerState::Stopped,
                to: SchedulerState::Running,
            })
        );
    }

    #[test]
    fn idle_and_stopped_refuse_ticks() {
        let mut scene = SceneGraph::new();
        let mut scheduler = AnimationScheduler::default();
        assert_eq!(
            scheduler.tick(&frame(0, 0.016), &mut scene),
            Err(SchedulerError::NotRunning(SchedulerState::Idle))
        );

        scheduler.start().unwrap();
        scheduler.tick(&frame(0, 0.016), &mut scene).unwrap();
        scheduler.stop();
        assert_eq!(
            scheduler.tick(&frame(1, 0.016), &mut scene),
            Err(SchedulerError::NotRunning(SchedulerState::Stopped))
        );
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn long_gaps_are_clamped() {
        let mut scene = SceneGraph::new();
        let mut scheduler = AnimationScheduler::new(SchedulerConfig { max_step: 0.1 });
        scheduler.start().unwrap();

        let report = scheduler.tick(&frame(0, 3.0), &mut scene).unwrap();
        assert!(report.clamped);
        assert_eq!(report.dt, 0.1);

        let report = scheduler.tick(&frame(1, f32::NAN), &mut scene).unwrap();
        assert_eq!(report.dt, 0.0);
        assert!((scheduler.elapsed() - 0.1).abs() < 1e-6);
    }
}
