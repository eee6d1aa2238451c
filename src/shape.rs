use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::math::Color;

/// Fewest segments that still produce a closed, non-degenerate mesh.
pub const MIN_SEGMENTS: u32 = 3;

/// Most segments a single shape may ask for. Every count up to this is exact
/// as an `f32`, so dimensions round-trip through `Geometry::params`.
pub const MAX_SEGMENTS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sphere,
    Box,
    Torus,
    Cylinder,
    Line,
}

impl ShapeKind {
    /// Number of positional dimensions the kind expects.
    pub const fn arity(self) -> usize {
        match self {
            Self::Sphere => 3,
            Self::Box => 3,
            Self::Torus => 4,
            Self::Cylinder => 4,
            Self::Line => 3,
        }
    }

    /// Stable index handed to the render backend.
    pub const fn index(self) -> u32 {
        match self {
            Self::Sphere => 0,
            Self::Box => 1,
            Self::Torus => 2,
            Self::Cylinder => 3,
            Self::Line => 4,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sphere => "sphere",
            Self::Box => "box",
            Self::Torus => "torus",
            Self::Cylinder => "cylinder",
            Self::Line => "line",
        };
        f.write_str(name)
    }
}

/// Validated, kind-specific dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Segment from the element origin along `direction`.
    Line { direction: Vec3 },
}

impl Geometry {
    /// Parses positional dimensions, e.g. `Torus` takes
    /// `(outer radius, tube radius, radial segments, tubular segments)`.
    pub fn from_dimensions(kind: ShapeKind, dims: &[f32]) -> Result<Self, SceneError> {
        if dims.len() != kind.arity() {
            return Err(SceneError::geometry(
                kind,
                format!("expected {} dimensions, got {}", kind.arity(), dims.len()),
            ));
        }
        if let Some(bad) = dims.iter().find(|d| !d.is_finite()) {
            return Err(SceneError::geometry(kind, format!("non-finite dimension {bad}")));
        }

        let geometry = match kind {
            ShapeKind::Sphere => Geometry::Sphere {
                radius: positive(kind, "radius", dims[0])?,
                width_segments: segments(kind, "width segments", dims[1])?,
                height_segments: segments(kind, "height segments", dims[2])?,
            },
            ShapeKind::Box => Geometry::Box {
                width: positive(kind, "width", dims[0])?,
                height: positive(kind, "height", dims[1])?,
                depth: positive(kind, "depth", dims[2])?,
            },
            ShapeKind::Torus => Geometry::Torus {
                radius: positive(kind, "radius", dims[0])?,
                tube: positive(kind, "tube radius", dims[1])?,
                radial_segments: segments(kind, "radial segments", dims[2])?,
                tubular_segments: segments(kind, "tubular segments", dims[3])?,
            },
            ShapeKind::Cylinder => {
                let radius_top = non_negative(kind, "top radius", dims[0])?;
                let radius_bottom = non_negative(kind, "bottom radius", dims[1])?;
                if radius_top == 0.0 && radius_bottom == 0.0 {
                    return Err(SceneError::geometry(kind, "both radii are zero"));
                }
                Geometry::Cylinder {
                    radius_top,
                    radius_bottom,
                    height: positive(kind, "height", dims[2])?,
                    radial_segments: segments(kind, "radial segments", dims[3])?,
                }
            }
            ShapeKind::Line => {
                let direction = Vec3::new(dims[0], dims[1], dims[2]);
                if direction.length_squared() == 0.0 {
                    return Err(SceneError::geometry(kind, "zero-length line"));
                }
                Geometry::Line { direction }
            }
        };
        Ok(geometry)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Box { .. } => ShapeKind::Box,
            Self::Torus { .. } => ShapeKind::Torus,
            Self::Cylinder { .. } => ShapeKind::Cylinder,
            Self::Line { .. } => ShapeKind::Line,
        }
    }

    /// Dimensions packed in positional order, zero padded.
    pub fn params(&self) -> [f32; 4] {
        match *self {
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => [radius, width_segments as f32, height_segments as f32, 0.0],
            Self::Box {
                width,
                height,
                depth,
            } => [width, height, depth, 0.0],
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => [radius, tube, radial_segments as f32, tubular_segments as f32],
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => [radius_top, radius_bottom, height, radial_segments as f32],
            Self::Line { direction } => [direction.x, direction.y, direction.z, 0.0],
        }
    }
}

fn positive(kind: ShapeKind, name: &str, value: f32) -> Result<f32, SceneError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SceneError::geometry(kind, format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(kind: ShapeKind, name: &str, value: f32) -> Result<f32, SceneError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SceneError::geometry(kind, format!("{name} must not be negative, got {value}")))
    }
}

fn segments(kind: ShapeKind, name: &str, value: f32) -> Result<u32, SceneError> {
    if value.fract() != 0.0 {
        return Err(SceneError::geometry(kind, format!("{name} must be whole, got {value}")));
    }
    if value < MIN_SEGMENTS as f32 {
        return Err(SceneError::geometry(
            kind,
            format!("{name} must be at least {MIN_SEGMENTS}, got {value}"),
        ));
    }
    if value > MAX_SEGMENTS as f32 {
        return Err(SceneError::geometry(
            kind,
            format!("{name} must be at most {MAX_SEGMENTS}, got {value}"),
        ));
    }
    Ok(value as u32)
}

/// Glass-like transmission parameters for the hub ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transmission {
    pub transmission: f32,
    pub thickness: f32,
    pub ior: f32,
}

impl Default for Transmission {
    fn default() -> Self {
        Self {
            transmission: 1.0,
            thickness: 0.0,
            ior: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub base_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmissive: Option<Transmission>,
}

impl Material {
    pub fn new(base_color: Color) -> Self {
        Self {
            base_color,
            ..Self::default()
        }
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive_color = Some(color);
        self.emissive_intensity = Some(intensity);
        self
    }

    pub fn with_surface(mut self, metalness: f32, roughness: f32) -> Self {
        self.metalness = Some(metalness);
        self.roughness = Some(roughness);
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn with_transmission(mut self, transmission: Transmission) -> Self {
        self.transmissive = Some(transmission);
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let unit = |name: &str, value: Option<f32>| match value {
            Some(v) if !(0.0..=1.0).contains(&v) => Err(SceneError::InvalidMaterial(format!(
                "{name} must be within [0, 1], got {v}"
            ))),
            _ => Ok(()),
        };
        unit("metalness", self.metalness)?;
        unit("roughness", self.roughness)?;
        if let Some(intensity) = self.emissive_intensity {
            if !(intensity >= 0.0 && intensity.is_finite()) {
                return Err(SceneError::InvalidMaterial(format!(
                    "emissive intensity must be a non-negative number, got {intensity}"
                )));
            }
        }
        if let Some(t) = self.transmissive {
            unit("transmission", Some(t.transmission))?;
            if !(t.ior >= 1.0 && t.ior.is_finite()) {
                return Err(SceneError::InvalidMaterial(format!(
                    "index of refraction must be at least 1, got {}",
                    t.ior
                )));
            }
            if !(t.thickness >= 0.0 && t.thickness.is_finite()) {
                return Err(SceneError::InvalidMaterial(format!(
                    "thickness must not be negative, got {}",
                    t.thickness
                )));
            }
        }
        Ok(())
    }
}

/// A primitive plus its material. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescriptor {
    geometry: Geometry,
    material: Material,
}

impl ShapeDescriptor {
    pub fn new(kind: ShapeKind, dimensions: &[f32], material: Material) -> Result<Self, SceneError> {
        let geometry = Geometry::from_dimensions(kind, dimensions)?;
        Self::from_geometry(geometry, material)
    }

    pub fn from_geometry(geometry: Geometry, material: Material) -> Result<Self, SceneError> {
        // Typed geometry can be built by hand, so it goes through the same checks.
        let kind = geometry.kind();
        let geometry = Geometry::from_dimensions(kind, &geometry.params()[..kind.arity()])?;
        material.validate()?;
        Ok(Self { geometry, material })
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// Positional form used in configuration files, e.g.
/// `{ "kind": "torus", "args": [1, 0.3, 16, 100] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub args: Vec<f32>,
}

impl ShapeSpec {
    pub fn new(kind: ShapeKind, args: &[f32]) -> Self {
        Self {
            kind,
            args: args.to_vec(),
        }
    }

    pub fn build(&self, material: Material) -> Result<ShapeDescriptor, SceneError> {
        ShapeDescriptor::new(self.kind, &self.args, material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Material {
        Material::new(Color::WHITE)
    }

    #[test]
    fn torus_accepts_hub_dimensions() {
        let shape = ShapeDescriptor::new(ShapeKind::Torus, &[1.0, 0.3, 16.0, 100.0], plain()).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Torus);
        assert_eq!(shape.geometry().params(), [1.0, 0.3, 16.0, 100.0]);
    }

    #[test]
    fn wrong_arity_is_invalid_geometry() {
        let err = ShapeDescriptor::new(ShapeKind::Sphere, &[1.0, 16.0], plain()).unwrap_err();
        assert!(matches!(err, SceneError::InvalidGeometry { kind: ShapeKind::Sphere, .. }));
    }

    #[test]
    fn negative_dimension_is_rejected() {
        let err = ShapeDescriptor::new(ShapeKind::Box, &[0.2, -1.0, 0.2], plain()).unwrap_err();
        assert!(matches!(err, SceneError::InvalidGeometry { kind: ShapeKind::Box, .. }));
    }

    #[test]
    fn too_few_segments_is_rejected() {
        assert!(ShapeDescriptor::new(ShapeKind::Sphere, &[0.15, 2.0, 16.0], plain()).is_err());
        assert!(ShapeDescriptor::new(ShapeKind::Torus, &[1.0, 0.3, 16.0, 2.0], plain()).is_err());
        assert!(ShapeDescriptor::new(ShapeKind::Cylinder, &[1.0, 1.0, 0.2, 2.5], plain()).is_err());
        assert!(ShapeDescriptor::new(ShapeKind::Sphere, &[0.15, 3.0, 3.0], plain()).is_ok());
    }

    #[test]
    fn too_many_segments_is_rejected() {
        let max = MAX_SEGMENTS as f32;
        assert!(ShapeDescriptor::new(ShapeKind::Sphere, &[0.15, max, 16.0], plain()).is_ok());
        assert!(ShapeDescriptor::new(ShapeKind::Sphere, &[0.15, max + 1.0, 16.0], plain()).is_err());
        assert!(ShapeDescriptor::new(ShapeKind::Torus, &[1.0, 0.3, 16.0, 1e12], plain()).is_err());

        let geometry = Geometry::Cylinder {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 0.2,
            radial_segments: u32::MAX,
        };
        assert!(ShapeDescriptor::from_geometry(geometry, plain()).is_err());
    }

    #[test]
    fn cylinder_may_be_a_cone_but_not_a_line() {
        assert!(ShapeDescriptor::new(ShapeKind::Cylinder, &[0.0, 1.0, 0.2, 8.0], plain()).is_ok());
        assert!(ShapeDescriptor::new(ShapeKind::Cylinder, &[0.0, 0.0, 0.2, 8.0], plain()).is_err());
    }

    #[test]
    fn line_needs_length() {
        assert!(ShapeDescriptor::new(ShapeKind::Line, &[0.0, 1.0, 0.0], plain()).is_ok());
        assert!(ShapeDescriptor::new(ShapeKind::Line, &[0.0, 0.0, 0.0], plain()).is_err());
    }

    #[test]
    fn non_finite_dimension_is_rejected() {
        assert!(ShapeDescriptor::new(ShapeKind::Box, &[f32::NAN, 1.0, 1.0], plain()).is_err());
        assert!(ShapeDescriptor::new(ShapeKind::Box, &[f32::INFINITY, 1.0, 1.0], plain()).is_err());
    }

    #[test]
    fn hand_built_geometry_is_validated() {
        let geometry = Geometry::Box {
            width: 1.0,
            height: 0.0,
            depth: 1.0,
        };
        assert!(ShapeDescriptor::from_geometry(geometry, plain()).is_err());
    }

    #[test]
    fn material_ranges_are_checked() {
        let metal = plain().with_surface(1.5, 0.2);
        let err = ShapeDescriptor::new(ShapeKind::Box, &[1.0, 1.0, 1.0], metal).unwrap_err();
        assert!(matches!(err, SceneError::InvalidMaterial(_)));

        let glass = plain().with_transmission(Transmission {
            transmission: 0.9,
            thickness: 0.5,
            ior: 0.5,
        });
        assert!(glass.validate().is_err());
    }

    #[test]
    fn shape_spec_deserializes_positional_args() {
        let spec: ShapeSpec = serde_json::from_str(r#"{ "kind": "cylinder", "args": [1, 1, 0.2, 8] }"#).unwrap();
        let shape = spec.build(plain()).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Cylinder);
    }
}
