use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::connector::{Connector, LineMaterial};
use crate::element::{AnimatedElement, Behavior, FloatMotion, Transform};
use crate::error::SceneError;
use crate::math::Color;
use crate::scene::ElementId;
use crate::shape::{Material, ShapeDescriptor, ShapeKind};

use super::builder::GeneratedGroup;
use super::common::{member_id, member_phase};

/// Glowing data nodes, each wired to a hub element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeNetworkConfig {
    pub id_prefix: String,
    /// Element every node is connected to. Not created by the generator.
    pub hub_id: ElementId,
    pub positions: Vec<Vec3>,
    pub radius: f32,
    pub segments: u32,
    pub color: Color,
    pub emissive_intensity: f32,
    pub motion: FloatMotion,
    pub line: LineMaterial,
}

impl NodeNetworkConfig {
    pub fn new(positions: &[Vec3], hub_id: impl Into<ElementId>) -> Self {
        Self {
            positions: positions.to_vec(),
            hub_id: hub_id.into(),
            ..Self::default()
        }
    }
}

impl Default for NodeNetworkConfig {
    fn default() -> Self {
        let cyan = Color::rgb(6.0 / 255.0, 182.0 / 255.0, 212.0 / 255.0);
        let violet = Color::rgb(139.0 / 255.0, 92.0 / 255.0, 246.0 / 255.0);
        Self {
            id_prefix: "network".to_string(),
            hub_id: ElementId::from("hub"),
            positions: vec![
                Vec3::new(-2.5, 0.5, 1.0),
                Vec3::new(2.5, -0.5, -1.0),
                Vec3::new(0.0, 2.0, 1.5),
                Vec3::new(-1.5, -2.0, -0.5),
                Vec3::new(2.0, 1.0, 0.5),
            ],
            radius: 0.15,
            segments: 16,
            color: cyan,
            emissive_intensity: 0.2,
            motion: FloatMotion::new(2.0, 0.5, 0.5),
            line: LineMaterial::translucent(violet, 0.6),
        }
    }
}

/// One sphere per position plus one connector from each node to the hub.
pub fn node_network(config: &NodeNetworkConfig) -> GeneratedGroup {
    let mut group = GeneratedGroup::default();
    let material = Material::new(config.color).with_emissive(config.color, config.emissive_intensity);
    let segments = config.segments as f32;

    for (index, &position) in config.positions.iter().enumerate() {
        let id = member_id(&config.id_prefix, "node", index);
        let shape = if position.is_finite() {
            ShapeDescriptor::new(ShapeKind::Sphere, &[config.radius, segments, segments], material)
        } else {
            Err(SceneError::InvalidGeometry {
                kind: ShapeKind::Sphere,
                reason: format!("node `{id}` has a non-finite position"),
            })
        };
        let node = shape.map(|shape| {
            let motion = config.motion.with_phase(config.motion.phase_offset + member_phase(index));
            AnimatedElement::new(id.clone(), shape, Transform::at(position), Behavior::Float(motion))
        });

        if node.is_ok() {
            group.connectors.push(Connector::new(id, config.hub_id.clone(), config.line));
        }
        group.push(node);
    }

    group
}
