use crate::connector::LineSegment;
use crate::element::AnimatedElement;
use crate::math::Color;
use crate::shape::Material;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub fov: f32, // Vertical, in degrees
}

/// One shape instance for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawInstance {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub emissive: [f32; 4], // rgb * intensity, w = intensity
    pub surface: [f32; 4],  // metalness, roughness, transmission, ior
    pub params: [f32; 4],   // Geometry dimensions, see Geometry::params
    pub kind: u32,
    pub _pad: [u32; 3],
}

impl DrawInstance {
    pub fn from_element(element: &AnimatedElement) -> Self {
        let shape = element.shape();
        let material = shape.material();
        Self {
            model: element.transform().matrix().to_cols_array_2d(),
            base_color: with_alpha(material.base_color, 1.0),
            emissive: emissive(material),
            surface: surface(material),
            params: shape.geometry().params(),
            kind: shape.kind().index(),
            _pad: [0; 3],
        }
    }

    pub fn translation(&self) -> [f32; 3] {
        [self.model[3][0], self.model[3][1], self.model[3][2]]
    }
}

/// Connector line for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineInstance {
    pub start: [f32; 3],
    pub _pad1: f32,
    pub end: [f32; 3],
    pub _pad2: f32,
    pub color: [f32; 4], // w = opacity, 1.0 when opaque
}

impl From<&LineSegment> for LineInstance {
    fn from(line: &LineSegment) -> Self {
        let alpha = if line.material.transparent { line.material.opacity } else { 1.0 };
        Self {
            start: line.start.to_array(),
            _pad1: 0.0,
            end: line.end.to_array(),
            _pad2: 0.0,
            color: with_alpha(line.material.color, alpha),
        }
    }
}

fn with_alpha(color: Color, alpha: f32) -> [f32; 4] {
    let [r, g, b] = color.to_array();
    [r, g, b, alpha]
}

fn emissive(material: &Material) -> [f32; 4] {
    let intensity = material.emissive_intensity.unwrap_or(0.0);
    // three.js defaults the emissive colour to black
    let [r, g, b] = material.emissive_color.map(Color::to_array).unwrap_or([0.0; 3]);
    [r * intensity, g * intensity, b * intensity, intensity]
}

fn surface(material: &Material) -> [f32; 4] {
    let (transmission, ior) = material
        .transmissive
        .map(|t| (t.transmission, t.ior))
        .unwrap_or((0.0, 1.5));
    [
        material.metalness.unwrap_or(0.0),
        material.roughness.unwrap_or(1.0),
        transmission,
        ior,
    ]
}
