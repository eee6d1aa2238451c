use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Color;
use crate::scene::{ElementId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
}

impl LineMaterial {
    pub fn translucent(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            transparent: true,
        }
    }
}

impl Default for LineMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
        }
    }
}

/// A line between two elements, referenced by id only. The endpoints are
/// looked up again every frame, so the line follows both ends as they move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from: ElementId,
    pub to: ElementId,
    pub material: LineMaterial,
}

/// World-space endpoints ready to hand to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub material: LineMaterial,
}

impl LineSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Line(LineSegment),
    /// An endpoint is missing (or both ends are the same element); nothing is drawn.
    Skipped,
}

impl Resolution {
    pub fn line(&self) -> Option<&LineSegment> {
        match self {
            Self::Line(segment) => Some(segment),
            Self::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

impl Connector {
    pub fn new(from: impl Into<ElementId>, to: impl Into<ElementId>, material: LineMaterial) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            material,
        }
    }

    pub fn resolve(&self, scene: &SceneGraph) -> Resolution {
        if self.from == self.to {
            return Resolution::Skipped;
        }
        match (scene.element(&self.from), scene.element(&self.to)) {
            (Some(from), Some(to)) => Resolution::Line(LineSegment {
                start: from.transform().position,
                end: to.transform().position,
                material: self.material,
            }),
            _ => Resolution::Skipped,
        }
    }
}
