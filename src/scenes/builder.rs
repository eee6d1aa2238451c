use std::collections::HashSet;

use crate::connector::Connector;
use crate::element::AnimatedElement;
use crate::error::SceneError;
use crate::scene::{CameraDescriptor, ElementId, LightDescriptor, SceneGraph};

/// Output of a procedural generator: the elements it could build, the
/// connectors between them, and the entries it had to reject.
#[derive(Debug, Clone, Default)]
pub struct GeneratedGroup {
    pub elements: Vec<AnimatedElement>,
    pub connectors: Vec<Connector>,
    pub rejected: Vec<SceneError>,
}

impl GeneratedGroup {
    pub fn push(&mut self, element: Result<AnimatedElement, SceneError>) {
        match element {
            Ok(element) => self.elements.push(element),
            Err(err) => self.rejected.push(err),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.iter().map(|e| e.id())
    }
}

/// A composed scene plus everything that was dropped on the way.
#[derive(Debug, Clone)]
pub struct Composition {
    pub scene: SceneGraph,
    pub rejected: Vec<SceneError>,
}

/// Builds a scene graph one ornament at a time.
///
/// A bad entry is logged and dropped; the rest of the scene is still composed.
///
/// ```
/// use hero_scene::scenes::SceneBuilder;
/// use hero_scene::scene::LightDescriptor;
/// use hero_scene::math::Color;
///
/// let composition = SceneBuilder::new()
///     .add_light(LightDescriptor::Ambient { color: Color::WHITE, intensity: 0.4 })
///     .build();
/// assert!(composition.scene.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: SceneGraph,
    rejected: Vec<SceneError>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(mut self, element: Result<AnimatedElement, SceneError>) -> Self {
        self.insert(element);
        self
    }

    /// Adds a generated group. Connectors that touch one of the group's own
    /// rejected elements are dropped with it, so they cannot bind to an
    /// unrelated element that happens to share the id.
    pub fn add_group(mut self, group: GeneratedGroup) -> Self {
        for err in group.rejected {
            log::warn!("dropping generated ornament: {}", err);
            self.rejected.push(err);
        }

        let mut dropped = HashSet::new();
        for element in group.elements {
            let id = element.id().clone();
            if !self.insert(Ok(element)) {
                dropped.insert(id);
            }
        }

        for connector in group.connectors {
            if dropped.contains(&connector.from) || dropped.contains(&connector.to) {
                log::debug!("dropping connector {} -> {}", connector.from, connector.to);
                continue;
            }
            self.scene.add_connector(connector);
        }
        self
    }

    pub fn add_connector(mut self, connector: Connector) -> Self {
        self.scene.add_connector(connector);
        self
    }

    pub fn add_light(mut self, light: LightDescriptor) -> Self {
        self.scene.add_light(light);
        self
    }

    pub fn with_camera(mut self, camera: CameraDescriptor) -> Self {
        self.scene.set_camera(camera);
        self
    }

    pub fn with_environment(mut self, preset: Option<String>) -> Self {
        self.scene.set_environment(preset);
        self
    }

    pub fn build(self) -> Composition {
        log::debug!(
            "composed {} elements, {} connectors ({} rejected)",
            self.scene.len(),
            self.scene.connectors().len(),
            self.rejected.len()
        );
        Composition {
            scene: self.scene,
            rejected: self.rejected,
        }
    }

    fn insert(&mut self, element: Result<AnimatedElement, SceneError>) -> bool {
        match element.and_then(|e| self.scene.add_element(e)) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("dropping ornament: {}", err);
                self.rejected.push(err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::LineMaterial;
    use crate::element::Transform;
    use crate::shape::{Material, ShapeDescriptor, ShapeKind};

    fn ball(id: &str) -> Result<AnimatedElement, SceneError> {
        let shape = ShapeDescriptor::new(ShapeKind::Sphere, &[0.15, 16.0, 16.0], Material::default())?;
        Ok(AnimatedElement::fixed(id, shape, Transform::default()))
    }

    fn bad_ball(id: &str) -> Result<AnimatedElement, SceneError> {
        let shape = ShapeDescriptor::new(ShapeKind::Sphere, &[-1.0, 16.0, 16.0], Material::default())?;
        Ok(AnimatedElement::fixed(id, shape, Transform::default()))
    }

    #[test]
    fn bad_entry_does_not_stop_composition() {
        let composition = SceneBuilder::new()
            .add_element(ball("a"))
            .add_element(bad_ball("b"))
            .add_element(ball("c"))
            .build();

        assert_eq!(composition.scene.len(), 2);
        assert_eq!(composition.rejected.len(), 1);
        assert!(matches!(composition.rejected[0], SceneError::InvalidGeometry { .. }));
    }

    #[test]
    fn duplicate_is_recorded_and_dropped() {
        let composition = SceneBuilder::new().add_element(ball("a")).add_element(ball("a")).build();
        assert_eq!(composition.scene.len(), 1);
        assert_eq!(composition.rejected, vec![SceneError::DuplicateId(ElementId::from("a"))]);
    }

    #[test]
    fn connectors_of_colliding_group_members_are_dropped() {
        let mut group = GeneratedGroup::default();
        group.push(ball("hub"));
        group.push(ball("n0"));
        group.connectors.push(Connector::new("hub", "n0", LineMaterial::default()));

        let composition = SceneBuilder::new().add_element(ball("hub")).add_group(group).build();
        assert_eq!(composition.scene.len(), 2);
        assert!(composition.scene.connectors().is_empty());
    }
}
