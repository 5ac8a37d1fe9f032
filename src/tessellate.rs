use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::geometry::{Bevel, Primitive, Vec3, add, cross, normalize, scale, sub};

/// Vertex lattice plus wire edges for a primitive, in its local frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lattice {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<[u32; 2]>,
}

impl Lattice {
    fn push(&mut self, v: Vec3) -> u32 {
        self.vertices.push(v);
        (self.vertices.len() - 1) as u32
    }

    /// Edges of a (cols+1) x (rows+1) vertex grid laid out row-major.
    fn grid_edges(&mut self, base: u32, cols: u32, rows: u32) {
        let stride = cols + 1;
        for r in 0..=rows {
            for c in 0..=cols {
                let i = base + r * stride + c;
                if c < cols {
                    self.edges.push([i, i + 1]);
                }
                if r < rows {
                    self.edges.push([i, i + stride]);
                }
            }
        }
    }
}

pub fn tessellate(primitive: &Primitive) -> Lattice {
    match primitive {
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
        } => uv_sphere(*radius, *width_segments, *height_segments),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(*radius, *tube, *radial_segments, *tubular_segments),
        Primitive::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        } => torus_knot(*radius, *tube, *tubular_segments, *radial_segments, *p, *q),
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(*radius_top, *radius_bottom, *height, *radial_segments),
        Primitive::Cuboid {
            width,
            height,
            depth,
        } => cuboid(*width, *height, *depth),
        Primitive::Extrusion {
            outline,
            depth,
            steps,
            bevel,
        } => extrusion(outline, *depth, *steps, *bevel),
        Primitive::Text { content, size, .. } => text_box(content, *size),
    }
}

/// Latitude/longitude sphere. Seam and pole vertices are duplicated, so a
/// `w x h` sphere has `(w + 1) * (h + 1)` vertices.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Lattice {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut lattice = Lattice::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let (sin_v, cos_v) = (v * PI).sin_cos();
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sin_u, cos_u) = (u * TAU).sin_cos();
            lattice.push([-radius * cos_u * sin_v, radius * cos_v, radius * sin_u * sin_v]);
        }
    }
    lattice.grid_edges(0, ws, hs);
    lattice
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Lattice {
    let rs = radial_segments.max(2);
    let ts = tubular_segments.max(3);
    let mut lattice = Lattice::default();
    for j in 0..=rs {
        let (sin_v, cos_v) = (j as f32 / rs as f32 * TAU).sin_cos();
        for i in 0..=ts {
            let (sin_u, cos_u) = (i as f32 / ts as f32 * TAU).sin_cos();
            let ring = radius + tube * cos_v;
            lattice.push([ring * cos_u, ring * sin_u, tube * sin_v]);
        }
    }
    lattice.grid_edges(0, ts, rs);
    lattice
}

fn knot_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let (su, cu) = u.sin_cos();
    let qu = q / p * u;
    let cs = qu.cos();
    [
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu.sin() * 0.5,
    ]
}

/// (p, q) torus knot swept with a circular tube. `p` must be non-zero.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: f32,
    q: f32,
) -> Lattice {
    let ts = tubular_segments.max(3);
    let rs = radial_segments.max(3);
    let mut lattice = Lattice::default();
    for i in 0..=ts {
        let u = i as f32 / ts as f32 * p * TAU;
        let p1 = knot_point(u, p, q, radius);
        let p2 = knot_point(u + 0.01, p, q, radius);
        // Frame from the chord and its midpoint direction.
        let t = sub(p2, p1);
        let n = add(p2, p1);
        let b = normalize(cross(t, n));
        let n = normalize(cross(b, t));
        for j in 0..=rs {
            let (sin_v, cos_v) = (j as f32 / rs as f32 * TAU).sin_cos();
            let cx = -tube * cos_v;
            let cy = tube * sin_v;
            lattice.push(add(p1, add(scale(n, cx), scale(b, cy))));
        }
    }
    lattice.grid_edges(0, rs, ts);
    lattice
}

pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Lattice {
    let rs = radial_segments.max(3);
    let mut lattice = Lattice::default();
    for row in 0..=1u32 {
        let v = row as f32;
        let r = radius_top + (radius_bottom - radius_top) * v;
        let y = height * 0.5 - v * height;
        for x in 0..=rs {
            let (sin_t, cos_t) = (x as f32 / rs as f32 * TAU).sin_cos();
            lattice.push([r * sin_t, y, r * cos_t]);
        }
    }
    lattice.grid_edges(0, rs, 1);
    lattice
}

pub fn cuboid(width: f32, height: f32, depth: f32) -> Lattice {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut lattice = Lattice::default();
    for i in 0..8u32 {
        let x = if i & 1 == 0 { -hx } else { hx };
        let y = if i & 2 == 0 { -hy } else { hy };
        let z = if i & 4 == 0 { -hz } else { hz };
        lattice.push([x, y, z]);
    }
    for i in 0..8u32 {
        for bit in [1u32, 2, 4] {
            if i & bit == 0 {
                lattice.edges.push([i, i | bit]);
            }
        }
    }
    lattice
}

/// Miter offsets for a closed counter-clockwise outline.
fn bevel_vectors(outline: &[[f32; 2]]) -> Vec<[f32; 2]> {
    let n = outline.len();
    let normal = |a: [f32; 2], b: [f32; 2]| {
        let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
        let len = (dx * dx + dy * dy).sqrt();
        if len > f32::EPSILON { [dy / len, -dx / len] } else { [0.0, 0.0] }
    };
    (0..n)
        .map(|i| {
            let prev = outline[(i + n - 1) % n];
            let cur = outline[i];
            let next = outline[(i + 1) % n];
            let n1 = normal(prev, cur);
            let n2 = normal(cur, next);
            let denom = 1.0 + n1[0] * n2[0] + n1[1] * n2[1];
            if denom > 1e-3 {
                [(n1[0] + n2[0]) / denom, (n1[1] + n2[1]) / denom]
            } else {
                n1
            }
        })
        .collect()
}

/// Outline layers from the front bevel, through the body, to the back bevel.
pub fn extrusion(outline: &[[f32; 2]], depth: f32, steps: u32, bevel: Option<Bevel>) -> Lattice {
    let mut lattice = Lattice::default();
    let n = outline.len() as u32;
    if n < 3 {
        return lattice;
    }
    let offsets = bevel_vectors(outline);
    // (z, outward offset) per layer
    let mut layers: Vec<(f32, f32)> = Vec::new();
    let bevel_size = bevel.map_or(0.0, |b| b.size);
    if let Some(b) = bevel {
        let segs = b.segments.max(1);
        for s in 0..segs {
            let t = s as f32 / segs as f32 * FRAC_PI_2;
            layers.push((-b.thickness * t.cos(), b.size * t.sin()));
        }
    }
    let steps = steps.max(1);
    for s in 0..=steps {
        layers.push((depth * s as f32 / steps as f32, bevel_size));
    }
    if let Some(b) = bevel {
        let segs = b.segments.max(1);
        for s in (0..segs).rev() {
            let t = s as f32 / segs as f32 * FRAC_PI_2;
            layers.push((depth + b.thickness * t.cos(), b.size * t.sin()));
        }
    }

    for (layer, &(z, offset)) in layers.iter().enumerate() {
        let base = layer as u32 * n;
        for (pt, dir) in outline.iter().zip(&offsets) {
            lattice.push([pt[0] + dir[0] * offset, pt[1] + dir[1] * offset, z]);
        }
        for i in 0..n {
            lattice.edges.push([base + i, base + (i + 1) % n]);
            if layer + 1 < layers.len() {
                lattice.edges.push([base + i, base + n + i]);
            }
        }
    }
    lattice
}

/// Layout box of centered text; glyph outlines belong to the render host.
pub fn text_box(content: &str, size: f32) -> Lattice {
    let half_w = content.chars().count() as f32 * size * 0.3;
    let half_h = size * 0.5;
    let mut lattice = Lattice::default();
    for v in [
        [-half_w, -half_h, 0.0],
        [half_w, -half_h, 0.0],
        [half_w, half_h, 0.0],
        [-half_w, half_h, 0.0],
    ] {
        lattice.push(v);
    }
    lattice.edges.extend([[0, 1], [1, 2], [2, 3], [3, 0]]);
    lattice
}
