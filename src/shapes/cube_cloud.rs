use std::f32::consts::PI;

use crate::geometry::{Geometry, Material, Part, Primitive, Transform};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_SIZE: f32 = 10.0;
pub const DEFAULT_COUNT: usize = 100;
pub const DEFAULT_COLOR: Color = Color::rgb(0x7d, 0xe1, 0xff);

pub const CUBE_EDGE: f32 = 0.2;

/// `count` small wireframe cubes scattered through a cube of edge `size`.
///
/// Keys: `size`, `count`, `color`.
pub fn generate(params: &ParameterMap, rng: &mut Rng) -> Geometry {
    let size = params.number_f32("size", DEFAULT_SIZE);
    let count = params.count("count", DEFAULT_COUNT);
    let color = params.color("color", DEFAULT_COLOR);

    // Unlit: full emissive stands in for a basic material.
    let material = Material::glowing(color, 1.0).wireframe();
    let mut geometry = Geometry::new();
    for _ in 0..count {
        let position = [
            (rng.next_f32() - 0.5) * size,
            (rng.next_f32() - 0.5) * size,
            (rng.next_f32() - 0.5) * size,
        ];
        let rotation = [rng.next_f32() * PI, rng.next_f32() * PI, 0.0];
        geometry.push(Part::Mesh {
            primitive: Primitive::Cuboid {
                width: CUBE_EDGE,
                height: CUBE_EDGE,
                depth: CUBE_EDGE,
            },
            material,
            transform: Transform::at(position, rotation),
        });
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubes_stay_inside_the_volume() {
        let params = ParameterMap::new().with("size", 6.0).with("count", 250.0);
        let geometry = generate(&params, &mut Rng::new(11));
        assert_eq!(geometry.parts.len(), 250);
        for part in &geometry.parts {
            let Part::Mesh {
                transform,
                material,
                ..
            } = part
            else {
                panic!("expected mesh");
            };
            assert!(material.wireframe);
            assert!(transform.position.iter().all(|c| c.abs() <= 3.0));
            assert!(transform.rotation[0] >= 0.0 && transform.rotation[0] <= PI);
            assert_eq!(transform.rotation[2], 0.0);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let params = ParameterMap::new().with("count", 0.0);
        assert!(generate(&params, &mut Rng::new(0)).parts.is_empty());
    }

    #[test]
    fn seeded_scatter_is_reproducible() {
        let a = generate(&ParameterMap::new(), &mut Rng::new(5));
        let b = generate(&ParameterMap::new(), &mut Rng::new(5));
        assert_eq!(a, b);
    }
}
