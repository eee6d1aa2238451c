use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::connector::Resolution;
use crate::element::Transform;
use crate::scene::{ElementId, SceneGraph};
use crate::shape::ShapeKind;
use crate::stage::Stage;
use crate::traits::CameraController;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    pub id: ElementId,
    pub kind: ShapeKind,
    pub transform: Transform,
    pub elapsed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorState {
    pub from: ElementId,
    pub to: ElementId,
    /// `None` when an endpoint is missing.
    pub line: Option<[Vec3; 2]>,
}

/// Read-only picture of a scene between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub captured_at: DateTime<Utc>,
    pub ticks: u64,
    pub elapsed: f64,
    pub camera_position: Vec3,
    pub elements: Vec<ElementState>,
    pub connectors: Vec<ConnectorState>,
}

impl SceneSnapshot {
    pub fn of_scene(scene: &SceneGraph, camera_position: Vec3) -> Self {
        let elements = scene
            .all_elements()
            .iter()
            .map(|element| ElementState {
                id: element.id().clone(),
                kind: element.shape().kind(),
                transform: *element.transform(),
                elapsed: element.elapsed(),
            })
            .collect();

        let connectors = scene
            .connectors()
            .iter()
            .map(|connector| ConnectorState {
                from: connector.from.clone(),
                to: connector.to.clone(),
                line: match connector.resolve(scene) {
                    Resolution::Line(segment) => Some([segment.start, segment.end]),
                    Resolution::Skipped => None,
                },
            })
            .collect();

        Self {
            captured_at: Utc::now(),
            ticks: 0,
            elapsed: 0.0,
            camera_position,
            elements,
            connectors,
        }
    }

    pub fn of_stage(stage: &Stage) -> Self {
        Self {
            ticks: stage.scheduler().ticks(),
            elapsed: stage.scheduler().elapsed(),
            ..Self::of_scene(stage.scene(), stage.camera().position())
        }
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.iter().find(|e| e.id.as_str() == id)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
