use std::fmt;

use glam::Vec3;

/// Geometry of a demo node. Tessellation happens in the renderer; the
/// hierarchy only carries the description around.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    Ellipsoid { radii: Vec3 },
    Cylinder { radius: f32, from: Vec3, to: Vec3 },
    /// Mesh loaded from an OBJ file.
    File { path: String },
}

/// Payload stored in every demo node: geometry plus shading state.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub primitive: Primitive,
    pub color: Vec3,
    pub texture: Option<String>,
}

impl Shape {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            color: Vec3::ONE,
            texture: None,
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(Primitive::Sphere { radius })
    }

    pub fn ellipsoid(radii: Vec3) -> Self {
        Self::new(Primitive::Ellipsoid { radii })
    }

    pub fn cylinder(radius: f32, from: Vec3, to: Vec3) -> Self {
        Self::new(Primitive::Cylinder { radius, from, to })
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(Primitive::File { path: path.into() })
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Sphere { radius } => write!(f, "sphere r={radius}"),
            Primitive::Ellipsoid { radii } => write!(f, "ellipsoid {radii}"),
            Primitive::Cylinder { radius, from, to } => {
                write!(f, "cylinder r={radius} {from} -> {to}")
            }
            Primitive::File { path } => write!(f, "mesh {path}"),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} color={}", self.primitive, self.color)?;
        if let Some(texture) = &self.texture {
            write!(f, " texture={texture}")?;
        }
        Ok(())
    }
}
