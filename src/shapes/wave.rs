use crate::geometry::{Geometry, Part};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_WIDTH: f32 = 10.0;
pub const DEFAULT_DEPTH: f32 = 10.0;
pub const DEFAULT_AMPLITUDE: f32 = 2.0;
pub const DEFAULT_FREQUENCY: f32 = 1.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0x00, 0xff, 0xff);

pub const SEGMENTS: usize = 30;

/// Sine sheet sampled on a regular grid.
///
/// Keys: `width`, `depth`, `amplitude`, `frequency`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let width = params.number_f32("width", DEFAULT_WIDTH);
    let depth = params.number_f32("depth", DEFAULT_DEPTH);
    let amplitude = params.number_f32("amplitude", DEFAULT_AMPLITUDE);
    let frequency = params.number_f32("frequency", DEFAULT_FREQUENCY);
    let color = params.color("color", DEFAULT_COLOR);

    let mut positions = Vec::with_capacity(SEGMENTS * SEGMENTS);
    for i in 0..SEGMENTS {
        for j in 0..SEGMENTS {
            let x = (i as f32 / SEGMENTS as f32 - 0.5) * width;
            let z = (j as f32 / SEGMENTS as f32 - 0.5) * depth;
            let y = (x * frequency + z * frequency).sin() * amplitude;
            positions.push([x, y, z]);
        }
    }

    Geometry::new().with(Part::Points {
        positions,
        color,
        size: 0.15,
        additive: false,
    })
}
