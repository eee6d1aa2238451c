use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CompositionConfig;
use crate::element::{AnimatedElement, Behavior, FloatMotion, Transform};
use crate::error::SceneError;
use crate::math::Color;
use crate::scene::ElementId;
use crate::shape::{Material, ShapeKind, ShapeSpec, Transmission};

use super::bar_chart::bar_chart;
use super::builder::{Composition, GeneratedGroup, SceneBuilder};
use super::common::member_id;
use super::node_network::node_network;

const VIOLET: Color = Color::rgb(139.0 / 255.0, 92.0 / 255.0, 246.0 / 255.0);

/// The glass ring at the centre of the composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub id: ElementId,
    pub position: Vec3,
    pub shape: ShapeSpec,
    pub color: Color,
    pub roughness: f32,
    pub transmission: Transmission,
    pub motion: FloatMotion,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            id: ElementId::from("hub"),
            position: Vec3::ZERO,
            shape: ShapeSpec::new(ShapeKind::Torus, &[1.0, 0.3, 16.0, 100.0]),
            color: VIOLET,
            roughness: 0.1,
            transmission: Transmission {
                transmission: 0.9,
                thickness: 0.5,
                ior: 1.5,
            },
            motion: FloatMotion::new(1.0, 0.3, 0.3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearPlacement {
    pub position: Vec3,
    pub scale: f32,
    /// Radians per second about Z; negative turns clockwise.
    pub spin_rate: f32,
}

/// Metallic gears sharing one shape and material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearSetConfig {
    pub id_prefix: String,
    pub shape: ShapeSpec,
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub placements: Vec<GearPlacement>,
}

impl Default for GearSetConfig {
    fn default() -> Self {
        // Rates are the per-frame increments of the hero animation at 60 fps.
        let gear = |x, y, z, scale, per_frame: f32| GearPlacement {
            position: Vec3::new(x, y, z),
            scale,
            spin_rate: per_frame * 60.0,
        };
        Self {
            id_prefix: "gears".to_string(),
            shape: ShapeSpec::new(ShapeKind::Cylinder, &[1.0, 1.0, 0.2, 8.0]),
            color: VIOLET,
            metalness: 0.8,
            roughness: 0.2,
            placements: vec![
                gear(-2.0, 1.0, 0.0, 0.6, 0.03),
                gear(1.5, 1.5, -0.5, 0.4, -0.025),
                gear(-1.0, -1.5, 0.5, 0.5, 0.02),
            ],
        }
    }
}

pub fn hub(config: &HubConfig) -> Result<AnimatedElement, SceneError> {
    let material = Material::new(config.color)
        .with_roughness(config.roughness)
        .with_transmission(config.transmission);
    let shape = config.shape.build(material)?;
    Ok(AnimatedElement::new(
        config.id.clone(),
        shape,
        Transform::at(config.position),
        Behavior::Float(config.motion),
    ))
}

pub fn gears(config: &GearSetConfig) -> GeneratedGroup {
    let material = Material::new(config.color).with_surface(config.metalness, config.roughness);
    let mut group = GeneratedGroup::default();
    for (index, placement) in config.placements.iter().enumerate() {
        let gear = config.shape.build(material).map(|shape| {
            AnimatedElement::new(
                member_id(&config.id_prefix, "gear", index),
                shape,
                Transform::at(placement.position).with_scale(placement.scale),
                Behavior::SpinZ {
                    rate: placement.spin_rate,
                },
            )
        });
        group.push(gear);
    }
    group
}

/// Builds the full hero composition. Paint order: hub, gears, nodes (with
/// their connectors), chart.
pub fn compose(config: &CompositionConfig) -> Composition {
    let mut builder = SceneBuilder::new()
        .with_environment(config.environment.clone())
        .with_camera(config.camera);
    for light in &config.lights {
        builder = builder.add_light(*light);
    }

    builder
        .add_element(hub(&config.hub))
        .add_group(gears(&config.gears))
        .add_group(node_network(&config.network))
        .add_group(bar_chart(&config.chart))
        .build()
}
