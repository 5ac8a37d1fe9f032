use crate::geometry::{Geometry, Material, Part, Primitive, Transform};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_TEXT: &str = "HELLO";
pub const DEFAULT_SIZE: f32 = 3.0;
pub const DEFAULT_COLOR: Color = Color::WHITE;

/// Centered text label; glyph shaping happens in the render host.
///
/// Keys: `text`, `size`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let content = params.text("text", DEFAULT_TEXT);
    let size = params.number_f32("size", DEFAULT_SIZE);
    let color = params.color("color", DEFAULT_COLOR);

    Geometry::new().with(Part::Mesh {
        primitive: Primitive::Text {
            content,
            size,
            outline_width: 0.02,
            outline_color: Color::BLACK,
        },
        material: Material::glowing(color, 0.5),
        transform: Transform::default(),
    })
}
