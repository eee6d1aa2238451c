use thiserror::Error;

use crate::scene::ElementId;
use crate::scheduler::SchedulerState;
use crate::shape::ShapeKind;

/// Composition-time failures. Each one is fatal to a single element or
/// insertion, never to the whole scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("invalid {kind} geometry: {reason}")]
    InvalidGeometry { kind: ShapeKind, reason: String },

    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    #[error("duplicate element id `{0}`")]
    DuplicateId(ElementId),
}

impl SceneError {
    pub(crate) fn geometry(kind: ShapeKind, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            kind,
            reason: reason.into(),
        }
    }
}

/// Per-tick failure of a single element. The element's transform is left as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionFault {
    #[error("element `{id}` produced a non-finite transform")]
    NonFinite { id: ElementId },

    #[error("element `{id}` was advanced by a non-finite step ({dt})")]
    InvalidStep { id: ElementId, dt: f32 },
}

impl MotionFault {
    pub fn element(&self) -> &ElementId {
        match self {
            Self::NonFinite { id } | Self::InvalidStep { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("scheduler cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: SchedulerState,
        to: SchedulerState,
    },

    #[error("scheduler is not running (state {0:?})")]
    NotRunning(SchedulerState),
}
