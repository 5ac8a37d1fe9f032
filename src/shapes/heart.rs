use std::f32::consts::TAU;

use crate::geometry::{Geometry, Part};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_PARTICLES: usize = 1500;
pub const DEFAULT_SCALE: f32 = 1.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0xff, 0x5f, 0x9f);

/// Heart curve filled with particles, denser toward the outline.
///
/// Keys: `particles`, `scale`, `color`.
pub fn generate(params: &ParameterMap, rng: &mut Rng) -> Geometry {
    let count = params.count("particles", DEFAULT_PARTICLES);
    let scale = params.number_f32("scale", DEFAULT_SCALE);
    let color = params.color("color", DEFAULT_COLOR);

    let mut positions = Vec::with_capacity(count);
    for _ in 0..count {
        let t = rng.next_f32() * TAU;
        // Radial falloff biased toward the surface
        let r = rng.next_f32().powf(0.3);

        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let z = (rng.next_f32() - 0.5) * 4.0;

        let k = scale * r * 0.1;
        positions.push([x * k, y * k, z * k]);
    }

    Geometry::new().with(Part::Points {
        positions,
        color,
        size: 0.15,
        additive: true,
    })
}
