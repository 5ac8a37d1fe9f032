use std::f32::consts::{FRAC_PI_2, TAU};

use crate::geometry::{Geometry, Material, Part, Primitive, Transform};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_K: f32 = 4.0;
pub const DEFAULT_RADIUS: f32 = 8.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0xff, 0x6b, 0xd6);

pub const STEPS: usize = 500;

/// Rose curve `r = radius * cos(k * theta)` in the XY plane with a short stem.
///
/// The polyline carries `STEPS + 1` samples and its last sample repeats the
/// first, so the loop is closed for fractional `k` as well.
///
/// Keys: `k`, `radius`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let k = params.number_f32("k", DEFAULT_K);
    let radius = params.number_f32("radius", DEFAULT_RADIUS);
    let color = params.color("color", DEFAULT_COLOR);

    let mut points = Vec::with_capacity(STEPS + 1);
    for i in 0..STEPS {
        let theta = i as f32 / STEPS as f32 * TAU;
        let r = (k * theta).cos() * radius;
        let (sin_t, cos_t) = theta.sin_cos();
        points.push([r * cos_t * 0.5, r * sin_t * 0.5, 0.0]);
    }
    points.push(points[0]);

    Geometry::new()
        .with(Part::Polyline {
            points,
            color,
            width: 3.0,
            closed: true,
        })
        .with(Part::Mesh {
            primitive: Primitive::Cylinder {
                radius_top: 0.2,
                radius_bottom: 0.2,
                height: 2.0,
                radial_segments: 8,
            },
            material: Material::solid(Color::WHITE),
            transform: Transform::rotated([FRAC_PI_2, 0.0, 0.0]),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use proptest::prelude::*;

    fn curve(geometry: &Geometry) -> &[[f32; 3]] {
        match &geometry.parts[0] {
            Part::Polyline { points, .. } => points,
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn default_rose_starts_on_the_x_axis() {
        let geometry = generate(&ParameterMap::new(), &mut Rng::new(0));
        let pts = curve(&geometry);
        assert_eq!(pts.len(), 501);
        assert!((pts[0][0] - 4.0).abs() < 1e-6);
        assert!(geometry.radius() < 4.5);
    }

    #[test]
    fn zero_k_draws_a_circle() {
        let params = ParameterMap::new().with("k", 0.0).with("radius", 6.0);
        let geometry = generate(&params, &mut Rng::new(0));
        for p in curve(&geometry) {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - 3.0).abs() < 1e-4);
        }
    }

    proptest! {
        #[test]
        fn loop_is_closed_for_any_k(k in -20.0f64..20.0, radius in 0.1f64..20.0) {
            let params = ParameterMap::new().with("k", k).with("radius", radius);
            let geometry = generate(&params, &mut Rng::new(0));
            let pts = curve(&geometry);
            prop_assert_eq!(pts.len(), 501);
            let (first, last) = (pts[0], pts[500]);
            for axis in 0..3 {
                prop_assert!((first[axis] - last[axis]).abs() < 1e-4);
            }
            prop_assert!(pts.iter().all(|p| p[2] == 0.0));
        }
    }
}
