//! Diagnostic preview: a fixed orthographic view of a [`Geometry`] drawn as
//! glowing points and wire lines on a near-black background.

use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;

use crate::config::MAX_PREVIEW_SIZE;
use crate::error::RenderError;
use crate::geometry::{Geometry, Part, Transform, Vec3};
use crate::grid::Grid;
use crate::params::Color;
use crate::shapes::FRAME_RADIUS;
use crate::tessellate;

pub const BACKGROUND: [u8; 4] = [5, 5, 5, 255];

/// Slight tilt and yaw so flat shapes in the XY or XZ plane both read.
const VIEW: Transform = Transform {
    position: [0.0, 0.0, 0.0],
    rotation: [0.35, -0.5, 0.0],
};

/// Half the visible width in world units.
const EXTENT: f32 = FRAME_RADIUS * 1.1;

const POINT_GAIN: f32 = 0.6;
const LINE_GAIN: f32 = 0.35;
const MESH_GAIN: f32 = 0.2;

type Light = [f32; 3];

struct Canvas {
    light: Grid<Light>,
    size: f32,
}

impl Canvas {
    fn new(size: usize) -> Self {
        Self {
            light: Grid::new(size, size),
            size: size as f32,
        }
    }

    fn project(&self, v: Vec3) -> (f32, f32) {
        let v = VIEW.apply(v);
        let half = self.size * 0.5;
        (half + v[0] / EXTENT * half, half - v[1] / EXTENT * half)
    }

    fn splat(&mut self, x: f32, y: f32, light: Light) {
        if let Some((x, y)) = self.light.cell(x.floor() as i64, y.floor() as i64) {
            let mut cell = self.light.get(x, y);
            for c in 0..3 {
                cell[c] += light[c];
            }
            self.light.set(x, y, cell);
        }
    }

    fn point(&mut self, v: Vec3, light: Light, radius: i64) {
        let (x, y) = self.project(v);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.splat(x + dx as f32, y + dy as f32, light);
            }
        }
    }

    fn line(&mut self, a: Vec3, b: Vec3, light: Light) {
        let (x0, y0) = self.project(a);
        let (x1, y1) = self.project(b);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().min(self.size * 4.0);
        if !steps.is_finite() || steps < 1.0 {
            self.splat(x0, y0, light);
            return;
        }
        let n = steps as usize;
        for i in 0..=n {
            let t = i as f32 / steps;
            self.splat(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, light);
        }
    }
}

fn light_of(color: Color, gain: f32) -> Light {
    let [r, g, b] = color.to_f32();
    [r * gain, g * gain, b * gain]
}

/// RGBA8 pixels, `size * size * 4` bytes.
pub fn render_preview(geometry: &Geometry, size: u32) -> Result<Vec<u8>, RenderError> {
    if size == 0 || size > MAX_PREVIEW_SIZE {
        return Err(RenderError::Size {
            got: size,
            max: MAX_PREVIEW_SIZE,
        });
    }
    let w = size as usize;
    let mut canvas = Canvas::new(w);
    // Point footprint grows with resolution so small previews stay legible.
    let point_radius = (w / 512) as i64;

    for part in &geometry.parts {
        match part {
            Part::Points {
                positions, color, ..
            } => {
                let light = light_of(*color, POINT_GAIN);
                for p in positions {
                    canvas.point(*p, light, point_radius);
                }
            }
            Part::Polyline {
                points,
                color,
                closed,
                ..
            } => {
                let light = light_of(*color, LINE_GAIN);
                for pair in points.windows(2) {
                    canvas.line(pair[0], pair[1], light);
                }
                if let (true, Some(first), Some(last)) = (*closed, points.first(), points.last()) {
                    canvas.line(*last, *first, light);
                }
            }
            Part::Mesh {
                primitive,
                material,
                transform,
            } => {
                let gain = MESH_GAIN * (1.0 + material.emissive_intensity) * material.opacity;
                let light = light_of(material.color, gain);
                let lattice = tessellate::tessellate(primitive);
                let verts: Vec<Vec3> = lattice.vertices.iter().map(|v| transform.apply(*v)).collect();
                for [a, b] in &lattice.edges {
                    canvas.line(verts[*a as usize], verts[*b as usize], light);
                }
            }
        }
    }

    let light = &canvas.light;
    let mut rgba = vec![0u8; w * w * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for (x, cell) in light.row(y).iter().enumerate() {
            let out = &mut row[x * 4..x * 4 + 4];
            for c in 0..3 {
                let v = BACKGROUND[c] as f32 / 255.0 + cell[c];
                out[c] = (v.min(1.0) * 255.0).round() as u8;
            }
            out[3] = 255;
        }
    });
    Ok(rgba)
}

pub fn encode_png(rgba: &[u8], w: u32, h: u32) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(rgba, w, h, image::ExtendedColorType::Rgba8)?;
    Ok(buf)
}

pub fn data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!("data:image/png;base64,{}", b64)
}

/// Render and encode in one go, for the HTTP preview.
pub fn preview_data_url(geometry: &Geometry, size: u32) -> Result<String, RenderError> {
    let rgba = render_preview(geometry, size)?;
    Ok(data_url(&encode_png(&rgba, size, size)?))
}
