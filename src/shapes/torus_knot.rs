use crate::geometry::{Geometry, Material, Part, Primitive, Transform};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_P: f32 = 2.0;
pub const DEFAULT_Q: f32 = 3.0;
pub const DEFAULT_RADIUS: f32 = 5.0;
pub const DEFAULT_TUBE_RADIUS: f32 = 1.5;
pub const DEFAULT_COLOR: Color = Color::rgb(0x9b, 0x7b, 0xff);

/// Wireframe (p, q) torus knot.
///
/// Keys: `p`, `q`, `radius`, `tubeRadius`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let mut p = params.number_f32("p", DEFAULT_P);
    // p is a divisor in the knot equation; a zero winding has no curve.
    if p.abs() < f32::EPSILON {
        p = DEFAULT_P;
    }
    let q = params.number_f32("q", DEFAULT_Q);
    let radius = params.number_f32("radius", DEFAULT_RADIUS);
    let tube = params.number_f32("tubeRadius", DEFAULT_TUBE_RADIUS);
    let color = params.color("color", DEFAULT_COLOR);

    Geometry::new().with(Part::Mesh {
        primitive: Primitive::TorusKnot {
            radius: radius * 0.5,
            tube: tube * 0.2,
            tubular_segments: 128,
            radial_segments: 16,
            p,
            q,
        },
        material: Material::glowing(color, 0.8).wireframe(),
        transform: Transform::default(),
    })
}
