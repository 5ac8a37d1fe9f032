use std::f32::consts::PI;

use crate::geometry::{Bevel, Geometry, Material, Part, Primitive, Transform};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_OUTER_RADIUS: f32 = 8.0;
pub const DEFAULT_INNER_RADIUS: f32 = 4.0;
pub const DEFAULT_POINTS: usize = 5;
pub const DEFAULT_DEPTH: f32 = 2.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0xff, 0xd1, 0x66);

/// Fewer tips than this is not a polygon.
pub const MIN_POINTS: usize = 2;
/// Past this the outline is indistinguishable from a disc.
pub const MAX_POINTS: usize = 1000;

pub const BEVEL: Bevel = Bevel {
    size: 0.1,
    thickness: 0.1,
    segments: 2,
};

/// Star outline alternating outer and inner radius, extruded with a bevel.
///
/// Keys: `outerRadius`, `innerRadius`, `points`, `depth`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let outer = params.number_f32("outerRadius", DEFAULT_OUTER_RADIUS);
    let inner = params.number_f32("innerRadius", DEFAULT_INNER_RADIUS);
    let tips = params
        .count("points", DEFAULT_POINTS)
        .clamp(MIN_POINTS, MAX_POINTS);
    let depth = params.number_f32("depth", DEFAULT_DEPTH);
    let color = params.color("color", DEFAULT_COLOR);

    Geometry::new().with(Part::Mesh {
        primitive: Primitive::Extrusion {
            outline: outline(outer * 0.5, inner * 0.5, tips),
            depth: depth * 0.5,
            steps: 2,
            bevel: Some(BEVEL),
        },
        material: Material::glowing(color, 0.5),
        transform: Transform::default(),
    })
}

/// `2 * tips` vertices, counter-clockwise from the +X axis.
pub fn outline(outer: f32, inner: f32, tips: usize) -> Vec<[f32; 2]> {
    let step = PI / tips as f32;
    (0..tips.saturating_mul(2))
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let (sin_a, cos_a) = (i as f32 * step).sin_cos();
            [r * cos_a, r * sin_a]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_outline(geometry: &Geometry) -> &[[f32; 2]] {
        match &geometry.parts[0] {
            Part::Mesh {
                primitive: Primitive::Extrusion { outline, .. },
                ..
            } => outline,
            other => panic!("expected extrusion, got {other:?}"),
        }
    }

    #[test]
    fn default_star_has_ten_vertices() {
        let geometry = generate(&ParameterMap::new(), &mut Rng::new(0));
        let outline = star_outline(&geometry);
        assert_eq!(outline.len(), 10);
        assert!((outline[0][0] - 4.0).abs() < 1e-6);
        let inner = outline[1];
        assert!(((inner[0] * inner[0] + inner[1] * inner[1]).sqrt() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn single_point_clamps_to_a_valid_solid() {
        let params = ParameterMap::new().with("points", 1.0);
        let geometry = generate(&params, &mut Rng::new(0));
        let outline = star_outline(&geometry);
        assert_eq!(outline.len(), 2 * MIN_POINTS);
        assert!(outline.iter().all(|p| p[0].is_finite() && p[1].is_finite()));
        assert!(geometry.vertex_count() > 0);
    }

    #[test]
    fn negative_and_garbage_points_clamp() {
        let negative = ParameterMap::new().with("points", -3.0);
        let outline = star_outline(&generate(&negative, &mut Rng::new(0))).len();
        assert_eq!(outline, 2 * MIN_POINTS);

        let garbage = ParameterMap::new().with("points", "many");
        let outline = star_outline(&generate(&garbage, &mut Rng::new(0))).len();
        assert_eq!(outline, 2 * DEFAULT_POINTS);
    }

    #[test]
    fn huge_point_counts_are_capped() {
        let params = ParameterMap::new().with("points", 1e19);
        let geometry = generate(&params, &mut Rng::new(0));
        assert_eq!(star_outline(&geometry).len(), 2 * MAX_POINTS);
    }

    #[test]
    fn depth_is_halved() {
        let params = ParameterMap::new().with("depth", 6.0);
        let geometry = generate(&params, &mut Rng::new(0));
        match &geometry.parts[0] {
            Part::Mesh {
                primitive: Primitive::Extrusion { depth, bevel, .. },
                ..
            } => {
                assert_eq!(*depth, 3.0);
                assert_eq!(*bevel, Some(BEVEL));
            }
            _ => unreachable!(),
        }
    }
}
