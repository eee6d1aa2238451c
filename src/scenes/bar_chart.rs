use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::element::{AnimatedElement, Behavior, FloatMotion, Transform};
use crate::math::{wrap_hue, Color};
use crate::shape::{Material, ShapeDescriptor, ShapeKind};

use super::builder::GeneratedGroup;
use super::common::{member_id, member_phase};

/// A row of floating bars standing on the anchor's ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub id_prefix: String,
    pub heights: Vec<f32>,
    pub anchor: Vec3,
    pub bar_width: f32,
    pub bar_depth: f32,
    /// Horizontal distance between neighbouring bars.
    pub spacing: f32,
    /// Local x of the first bar.
    pub offset_x: f32,
    pub base_speed: f32,
    pub speed_step: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Hue of the first bar, in degrees.
    pub hue_base: f32,
    pub hue_step: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub emissive_intensity: f32,
}

impl BarChartConfig {
    pub fn with_heights(heights: &[f32], anchor: Vec3) -> Self {
        Self {
            heights: heights.to_vec(),
            anchor,
            ..Self::default()
        }
    }

    pub fn hue(&self, index: usize) -> f32 {
        wrap_hue(self.hue_base + index as f32 * self.hue_step)
    }

    pub fn speed(&self, index: usize) -> f32 {
        self.base_speed + index as f32 * self.speed_step
    }
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            id_prefix: "chart".to_string(),
            heights: vec![0.5, 1.2, 0.8, 1.5, 1.0, 1.8, 1.3],
            anchor: Vec3::new(2.0, -1.0, 0.0),
            bar_width: 0.2,
            bar_depth: 0.2,
            spacing: 0.3,
            offset_x: -1.0,
            base_speed: 1.0,
            speed_step: 0.1,
            rotation_intensity: 1.0,
            float_intensity: 0.2,
            hue_base: 220.0,
            hue_step: 10.0,
            saturation: 0.7,
            lightness: 0.6,
            emissive_intensity: 0.1,
        }
    }
}

/// One box per height. Same config, same bars.
pub fn bar_chart(config: &BarChartConfig) -> GeneratedGroup {
    let mut group = GeneratedGroup::default();

    for (index, &height) in config.heights.iter().enumerate() {
        let color = Color::hsl(config.hue(index), config.saturation, config.lightness);
        let material = Material::new(color).with_emissive(color, config.emissive_intensity);

        let bar = ShapeDescriptor::new(
            ShapeKind::Box,
            &[config.bar_width, height, config.bar_depth],
            material,
        )
        .map(|shape| {
            let local = Vec3::new(index as f32 * config.spacing + config.offset_x, height / 2.0, 0.0);
            let motion = FloatMotion::new(config.speed(index), config.rotation_intensity, config.float_intensity)
                .with_phase(member_phase(index));
            AnimatedElement::new(
                member_id(&config.id_prefix, "bar", index),
                shape,
                Transform::at(config.anchor + local),
                Behavior::Float(motion),
            )
        });
        group.push(bar);
    }

    group
}
