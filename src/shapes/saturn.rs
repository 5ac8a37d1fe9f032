use std::f32::consts::PI;

use crate::geometry::{Geometry, Material, Part, Primitive, Transform};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_PLANET_SCALE: f32 = 4.0;
pub const DEFAULT_RING_DIST: f32 = 8.0;
pub const DEFAULT_RING_WIDTH: f32 = 2.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0xf2, 0xc9, 0x4c);
pub const RING_COLOR: Color = Color::rgb(0x8b, 0xc5, 0xff);

/// Ring tilt about X: 72 degrees off the planet's polar axis.
pub const RING_TILT: f32 = PI / 2.5;

/// Glowing planet with a tilted wireframe ring.
///
/// Keys: `planetScale`, `ringDist`, `ringWidth`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let planet_scale = params.number_f32("planetScale", DEFAULT_PLANET_SCALE);
    let ring_dist = params.number_f32("ringDist", DEFAULT_RING_DIST);
    let ring_width = params.number_f32("ringWidth", DEFAULT_RING_WIDTH);
    let color = params.color("color", DEFAULT_COLOR);

    Geometry::new()
        .with(Part::Mesh {
            primitive: Primitive::Sphere {
                radius: planet_scale * 0.5,
                width_segments: 32,
                height_segments: 32,
            },
            material: Material::glowing(color, 0.5),
            transform: Transform::default(),
        })
        .with(Part::Mesh {
            primitive: Primitive::Torus {
                radius: ring_dist * 0.5,
                tube: ring_width * 0.1,
                radial_segments: 2,
                tubular_segments: 64,
            },
            material: Material::glowing(RING_COLOR, 0.8).wireframe(),
            transform: Transform::rotated([RING_TILT, 0.0, 0.0]),
        })
}
