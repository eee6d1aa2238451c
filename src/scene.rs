use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::connector::{Connector, Resolution};
use crate::element::AnimatedElement;
use crate::error::SceneError;
use crate::math::Color;

/// Identifier of an element, unique within one scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ElementId> for ElementId {
    fn from(id: &ElementId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Static, non-animated light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescriptor {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
}

/// Camera placement and passive orbit settings. No user input is consumed;
/// the zoom and pan flags are handed through to the surface as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescriptor {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    pub auto_rotate: bool,
    /// Revolutions per minute at 1.0.
    pub auto_rotate_speed: f32,
    pub zoom_enabled: bool,
    pub pan_enabled: bool,
}

impl Default for CameraDescriptor {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            field_of_view: 45.0,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            zoom_enabled: false,
            pan_enabled: false,
        }
    }
}

/// Every element, connector, light and the camera of one composition.
///
/// Elements are kept in insertion order, which is both the update order and
/// the paint order (transparent materials depend on it).
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    elements: Vec<AnimatedElement>,
    index: HashMap<ElementId, usize>,
    connectors: Vec<Connector>,
    lights: Vec<LightDescriptor>,
    camera: CameraDescriptor,
    environment: Option<String>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element. An id that is already present is rejected and the
    /// existing element is left untouched.
    pub fn add_element(&mut self, element: AnimatedElement) -> Result<(), SceneError> {
        if self.index.contains_key(element.id()) {
            return Err(SceneError::DuplicateId(element.id().clone()));
        }
        self.index.insert(element.id().clone(), self.elements.len());
        self.elements.push(element);
        Ok(())
    }

    /// Connectors hold ids only, so an endpoint may be added later or never.
    pub fn add_connector(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    pub fn add_light(&mut self, light: LightDescriptor) {
        self.lights.push(light);
    }

    pub fn set_camera(&mut self, camera: CameraDescriptor) {
        self.camera = camera;
    }

    pub fn set_environment(&mut self, preset: Option<String>) {
        self.environment = preset;
    }

    /// Removes an element, keeping the relative order of the rest. Connectors
    /// that pointed at it resolve to [`Resolution::Skipped`] from then on.
    pub fn remove_element(&mut self, id: impl AsRef<str>) -> Option<AnimatedElement> {
        let slot = self.index.remove(id.as_ref())?;
        let removed = self.elements.remove(slot);
        for element in &self.elements[slot..] {
            if let Some(i) = self.index.get_mut(element.id().as_str()) {
                *i -= 1;
            }
        }
        Some(removed)
    }

    pub fn element(&self, id: impl AsRef<str>) -> Option<&AnimatedElement> {
        self.index.get(id.as_ref()).map(|&i| &self.elements[i])
    }

    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.index.contains_key(id.as_ref())
    }

    /// Elements in paint/update order.
    pub fn all_elements(&self) -> &[AnimatedElement] {
        &self.elements
    }

    /// Mutable view for the scheduler. A slice, so the element set itself
    /// cannot change during a tick.
    pub(crate) fn elements_mut(&mut self) -> &mut [AnimatedElement] {
        &mut self.elements
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn lights(&self) -> &[LightDescriptor] {
        &self.lights
    }

    pub fn camera(&self) -> &CameraDescriptor {
        &self.camera
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// One resolution per connector, in declaration order.
    pub fn resolve_connectors(&self) -> Vec<Resolution> {
        self.connectors.iter().map(|c| c.resolve(self)).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
