pub mod camera;
pub mod cli;
pub mod config;
pub mod connector;
pub mod core;
pub mod draw;
pub mod element;
pub mod error;
pub mod frame;
pub mod math;
pub mod scene;
pub mod scenes;
pub mod scheduler;
pub mod shape;
pub mod snapshot;
pub mod stage;
pub mod traits;
pub mod types;

pub use element::{AnimatedElement, Behavior, FloatMotion, Transform};
pub use error::{MotionFault, SceneError, SchedulerError};
pub use scene::{ElementId, SceneGraph};
pub use scheduler::{AnimationScheduler, SchedulerState};
pub use shape::{Material, ShapeDescriptor, ShapeKind};
pub use stage::Stage;
