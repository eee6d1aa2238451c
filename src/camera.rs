use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec3};

use crate::scene::CameraDescriptor;
use crate::traits::CameraController;
use crate::types::CameraUniform;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Keeps the camera off the poles, where the up vector degenerates.
const MAX_ELEVATION: f32 = FRAC_PI_2 - 0.01;

/// Passive orbit around a target. The only motion is auto-rotation about the
/// vertical axis; no input is read.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    descriptor: CameraDescriptor,
    radius: f32,
    azimuth: f32,
    elevation: f32,
}

impl OrbitCamera {
    pub fn new(descriptor: CameraDescriptor) -> Self {
        let offset = descriptor.position - descriptor.target;
        let radius = offset.length();
        let (radius, azimuth, elevation) = if radius > f32::EPSILON && radius.is_finite() {
            (
                radius,
                offset.x.atan2(offset.z),
                (offset.y / radius).asin().clamp(-MAX_ELEVATION, MAX_ELEVATION),
            )
        } else {
            log::warn!("camera sits on its target, backing off one unit along +Z");
            (1.0, 0.0, 0.0)
        };

        Self {
            descriptor,
            radius,
            azimuth,
            elevation,
        }
    }

    pub fn descriptor(&self) -> &CameraDescriptor {
        &self.descriptor
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Auto-rotation in radians per second; speed 1.0 is one turn a minute.
    pub fn angular_speed(&self) -> f32 {
        if self.descriptor.auto_rotate {
            self.descriptor.auto_rotate_speed * TAU / 60.0
        } else {
            0.0
        }
    }

    pub fn to_uniform(&self, aspect: f32) -> CameraUniform {
        let view_proj = self.projection_matrix(aspect) * self.view_matrix();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            position: self.position().to_array(),
            fov: self.descriptor.field_of_view,
        }
    }
}

impl CameraController for OrbitCamera {
    fn update(&mut self, delta_time: f32) {
        if !delta_time.is_finite() {
            return;
        }
        // Positive speed turns clockwise seen from above.
        self.azimuth = (self.azimuth - self.angular_speed() * delta_time).rem_euclid(TAU);
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.descriptor.target, Vec3::Y)
    }

    fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.descriptor.field_of_view.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    fn position(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        self.descriptor.target + self.radius * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    fn forward(&self) -> Vec3 {
        (self.descriptor.target - self.position()).normalize()
    }
}
