use crate::geometry::{Geometry, Part};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;
use crate::tessellate;

pub const DEFAULT_RADIUS: f32 = 5.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0x5e, 0xdf, 0xff);

const SEGMENTS: u32 = 48;

/// Points on a latitude/longitude sphere of `radius * 0.5`; no fill mesh.
///
/// Keys: `radius`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let radius = params.number_f32("radius", DEFAULT_RADIUS);
    let color = params.color("color", DEFAULT_COLOR);

    let positions = tessellate::uv_sphere(radius * 0.5, SEGMENTS, SEGMENTS).vertices;
    Geometry::new().with(Part::Points {
        positions,
        color,
        size: 0.1,
        additive: false,
    })
}
