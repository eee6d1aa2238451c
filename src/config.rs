use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Color;
use crate::scene::{CameraDescriptor, LightDescriptor};
use crate::scenes::{BarChartConfig, GearSetConfig, HubConfig, NodeNetworkConfig};
use crate::scheduler::SchedulerConfig;

/// Everything needed to compose and run the hero scene. Any field left out
/// of a config file falls back to the stock composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    pub environment: Option<String>,
    pub lights: Vec<LightDescriptor>,
    pub hub: HubConfig,
    pub gears: GearSetConfig,
    pub network: NodeNetworkConfig,
    pub chart: BarChartConfig,
    pub camera: CameraDescriptor,
    pub scheduler: SchedulerConfig,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            environment: Some("city".to_string()),
            lights: vec![
                LightDescriptor::Ambient {
                    color: Color::WHITE,
                    intensity: 0.4,
                },
                LightDescriptor::Directional {
                    position: Vec3::new(10.0, 10.0, 5.0),
                    color: Color::rgb(139.0 / 255.0, 92.0 / 255.0, 246.0 / 255.0),
                    intensity: 1.0,
                },
                LightDescriptor::Point {
                    position: Vec3::new(-10.0, -10.0, -10.0),
                    color: Color::rgb(6.0 / 255.0, 182.0 / 255.0, 212.0 / 255.0),
                    intensity: 0.5,
                },
            ],
            hub: HubConfig::default(),
            gears: GearSetConfig::default(),
            network: NodeNetworkConfig::default(),
            chart: BarChartConfig::default(),
            camera: CameraDescriptor::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl CompositionConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse composition config")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize composition config")
    }
}

/// Loads a composition config from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<CompositionConfig> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    CompositionConfig::from_json(&json).with_context(|| format!("Invalid config file: {}", path.display()))
}
