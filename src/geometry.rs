use serde::{Deserialize, Serialize};

use crate::params::Color;
use crate::tessellate;

/// Shape-local coordinates, Y up.
pub type Vec3 = [f32; 3];

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f32) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn length(a: Vec3) -> f32 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

/// Unit vector, or the input unchanged when it has no length.
#[inline]
pub fn normalize(a: Vec3) -> Vec3 {
    let len = length(a);
    if len > f32::EPSILON { scale(a, 1.0 / len) } else { a }
}

/// Placement of a mesh part. Rotation is Euler XYZ in radians, applied
/// Z first, then Y, then X, then translated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn rotated(rotation: Vec3) -> Self {
        Self {
            position: [0.0; 3],
            rotation,
        }
    }

    pub fn at(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        let [rx, ry, rz] = self.rotation;
        let (sz, cz) = rz.sin_cos();
        let p = [p[0] * cz - p[1] * sz, p[0] * sz + p[1] * cz, p[2]];
        let (sy, cy) = ry.sin_cos();
        let p = [p[0] * cy + p[2] * sy, p[1], -p[0] * sy + p[2] * cy];
        let (sx, cx) = rx.sin_cos();
        let p = [p[0], p[1] * cx - p[2] * sx, p[1] * sx + p[2] * cx];
        add(p, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub color: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            emissive_intensity: 0.0,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn glowing(color: Color, emissive_intensity: f32) -> Self {
        Self {
            emissive_intensity,
            ..Self::solid(color)
        }
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn translucent(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bevel {
    pub size: f32,
    pub thickness: f32,
    pub segments: u32,
}

/// Closed-form solids the render host knows how to build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "camelCase")]
pub enum Primitive {
    #[serde(rename_all = "camelCase")]
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Lies in the XY plane around the Z axis.
    #[serde(rename_all = "camelCase")]
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    #[serde(rename_all = "camelCase")]
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: f32,
        q: f32,
    },
    /// Axis along Y, centered on the origin.
    #[serde(rename_all = "camelCase")]
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    #[serde(rename = "box")]
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Counter-clockwise outline in the XY plane pushed along +Z.
    Extrusion {
        outline: Vec<[f32; 2]>,
        depth: f32,
        steps: u32,
        bevel: Option<Bevel>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        size: f32,
        outline_width: f32,
        outline_color: Color,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Part {
    Points {
        positions: Vec<Vec3>,
        color: Color,
        size: f32,
        additive: bool,
    },
    /// `closed` asks the host to draw the segment from last back to first.
    Polyline {
        points: Vec<Vec3>,
        color: Color,
        width: f32,
        closed: bool,
    },
    Mesh {
        primitive: Primitive,
        material: Material,
        transform: Transform,
    },
}

impl Part {
    /// Representative vertices in shape-local space, transforms applied.
    pub fn vertices(&self) -> Vec<Vec3> {
        match self {
            Part::Points { positions, .. } => positions.clone(),
            Part::Polyline { points, .. } => points.clone(),
            Part::Mesh {
                primitive,
                transform,
                ..
            } => tessellate::tessellate(primitive)
                .vertices
                .into_iter()
                .map(|v| transform.apply(v))
                .collect(),
        }
    }
}

/// Output of a shape generator: renderer-agnostic parts, drawn together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub parts: Vec<Part>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.vertices().len()).sum()
    }

    /// Axis-aligned bounds over every part, `None` when nothing has vertices.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut out: Option<Bounds> = None;
        for v in self.parts.iter().flat_map(|p| p.vertices()) {
            let b = out.get_or_insert(Bounds { min: v, max: v });
            for axis in 0..3 {
                b.min[axis] = b.min[axis].min(v[axis]);
                b.max[axis] = b.max[axis].max(v[axis]);
            }
        }
        out
    }

    /// Largest distance of any vertex from the origin.
    pub fn radius(&self) -> f32 {
        self.parts
            .iter()
            .flat_map(|p| p.vertices())
            .map(length)
            .fold(0.0, f32::max)
    }
}
