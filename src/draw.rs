use crate::camera::OrbitCamera;
use crate::connector::Resolution;
use crate::scene::SceneGraph;
use crate::types::{CameraUniform, DrawInstance, LineInstance};

/// Everything the surface needs to paint one frame, in paint order.
#[derive(Debug, Clone)]
pub struct DrawList {
    pub frame: u64,
    pub camera: CameraUniform,
    pub instances: Vec<DrawInstance>,
    pub lines: Vec<LineInstance>,
    /// Connectors with a missing endpoint; they draw nothing this frame.
    pub skipped_lines: usize,
}

impl DrawList {
    /// Snapshot of the scene as it stands after this frame's tick. Connector
    /// endpoints are read from the already-advanced transforms.
    pub fn capture(frame: u64, scene: &SceneGraph, camera: &OrbitCamera, aspect: f32) -> Self {
        let instances = scene.all_elements().iter().map(DrawInstance::from_element).collect();

        let mut lines = Vec::with_capacity(scene.connectors().len());
        let mut skipped_lines = 0;
        for resolution in scene.resolve_connectors() {
            match resolution {
                Resolution::Line(segment) => lines.push(LineInstance::from(&segment)),
                Resolution::Skipped => skipped_lines += 1,
            }
        }

        Self {
            frame,
            camera: camera.to_uniform(aspect),
            instances,
            lines,
            skipped_lines,
        }
    }

    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }
}
