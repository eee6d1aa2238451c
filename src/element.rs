use std::f64::consts::TAU;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::MotionFault;
use crate::math::{cosine, sine};
use crate::scene::ElementId;
use crate::shape::ShapeDescriptor;

/// Spatial state of an element. Rotation is XYZ Euler in radians. A spinning
/// element keeps its Z angle in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Visual tuning for [`Behavior::Float`]. None of these are load-bearing; any
/// values keep the motion bounded and periodic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatTuning {
    /// Multiplier on `speed` for the vertical bob.
    pub bob_frequency: f32,
    /// Multiplier on `speed` for the rotational sway.
    pub sway_frequency: f32,
    /// Per-axis share of `rotation_intensity` applied as sway.
    pub sway_scale: Vec3,
}

impl Default for FloatTuning {
    fn default() -> Self {
        Self {
            bob_frequency: 1.0,
            sway_frequency: 0.5,
            sway_scale: Vec3::new(1.0 / 8.0, 1.0 / 8.0, 1.0 / 20.0),
        }
    }
}

/// Parameters of a floating ornament.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub phase_offset: f32,
    pub tuning: FloatTuning,
}

impl FloatMotion {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            ..Self::default()
        }
    }

    pub fn with_phase(mut self, phase_offset: f32) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    pub fn with_tuning(mut self, tuning: FloatTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Pose at `elapsed` seconds relative to the rest transform.
    fn pose(&self, rest: &Transform, elapsed: f64) -> Transform {
        let bob = self.speed * self.tuning.bob_frequency;
        let sway = self.speed * self.tuning.sway_frequency;
        let scale = self.tuning.sway_scale * self.rotation_intensity;

        let mut pose = *rest;
        pose.position.y += sine(elapsed, bob, self.phase_offset, self.float_intensity);
        pose.rotation += Vec3::new(
            cosine(elapsed, sway, self.phase_offset, scale.x),
            sine(elapsed, sway, self.phase_offset, scale.y),
            sine(elapsed, sway, self.phase_offset, scale.z),
        );
        pose
    }
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 1.0,
            phase_offset: 0.0,
            tuning: FloatTuning::default(),
        }
    }
}

/// Per-tick motion rule. Fixed for the lifetime of the element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Behavior {
    Static,
    /// Continuous rotation about Z, in radians per second.
    SpinZ { rate: f32 },
    Float(FloatMotion),
}

/// A shape placed in the scene together with its motion rule.
#[derive(Debug, Clone)]
pub struct AnimatedElement {
    id: ElementId,
    shape: ShapeDescriptor,
    rest: Transform,
    transform: Transform,
    behavior: Behavior,
    elapsed: f64,
    /// Turn applied by `SpinZ` so far, modulo a full turn.
    spin: f64,
    advances: u64,
}

impl AnimatedElement {
    pub fn new(id: impl Into<ElementId>, shape: ShapeDescriptor, rest: Transform, behavior: Behavior) -> Self {
        let id = id.into();
        // Float elements start at their elapsed-zero pose so that advance(0) is a no-op.
        let transform = match behavior {
            Behavior::Float(motion) => {
                let pose = motion.pose(&rest, 0.0);
                if pose.is_finite() {
                    pose
                } else {
                    log::debug!("element `{}` has no finite initial pose, starting at rest", id);
                    rest
                }
            }
            Behavior::Static | Behavior::SpinZ { .. } => rest,
        };

        Self {
            id,
            shape,
            rest,
            transform,
            behavior,
            elapsed: 0.0,
            spin: 0.0,
            advances: 0,
        }
    }

    pub fn fixed(id: impl Into<ElementId>, shape: ShapeDescriptor, rest: Transform) -> Self {
        Self::new(id, shape, rest, Behavior::Static)
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// The transform the element was declared with.
    pub fn rest(&self) -> &Transform {
        &self.rest
    }

    /// The current, animated transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// How many times `advance` has been called, faults included.
    pub fn advance_count(&self) -> u64 {
        self.advances
    }

    /// Moves the element forward by `dt` seconds.
    ///
    /// On a fault the transform and elapsed time stay as they were.
    pub fn advance(&mut self, dt: f32) -> Result<(), MotionFault> {
        self.advances += 1;

        if !dt.is_finite() {
            return Err(MotionFault::InvalidStep {
                id: self.id.clone(),
                dt,
            });
        }
        if dt == 0.0 {
            return Ok(());
        }

        let elapsed = self.elapsed + dt as f64;
        let mut spin = self.spin;
        let next = match self.behavior {
            Behavior::Static => self.transform,
            Behavior::SpinZ { rate } => {
                let step = rate * dt;
                if !step.is_finite() {
                    return Err(MotionFault::NonFinite { id: self.id.clone() });
                }
                // Accumulated in f64 and wrapped, so small steps still land on
                // large angles.
                spin = (spin + step as f64).rem_euclid(TAU);
                let mut next = self.transform;
                next.rotation.z = (self.rest.rotation.z as f64 + spin).rem_euclid(TAU) as f32;
                next
            }
            Behavior::Float(motion) => motion.pose(&self.rest, elapsed),
        };

        if !next.is_finite() {
            return Err(MotionFault::NonFinite { id: self.id.clone() });
        }

        self.elapsed = elapsed;
        self.spin = spin;
        self.transform = next;
        Ok(())
    }
}
