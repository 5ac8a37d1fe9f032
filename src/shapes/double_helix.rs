use std::f32::consts::{FRAC_PI_2, TAU};

use crate::geometry::{Geometry, Material, Part, Primitive, Transform, Vec3};
use crate::params::{Color, ParameterMap};
use crate::rng::Rng;

pub const DEFAULT_RADIUS: f32 = 4.0;
pub const DEFAULT_HEIGHT: f32 = 10.0;
pub const DEFAULT_TURNS: f32 = 3.0;
pub const DEFAULT_COLOR: Color = Color::rgb(0xff, 0x9f, 0x6e);
pub const SECOND_STRAND_COLOR: Color = Color::rgb(0x5e, 0xdf, 0xff);

pub const SEGMENTS: usize = 100;
pub const RUNG_EVERY: usize = 5;

/// Two intertwined strands half a turn apart, joined by rungs.
///
/// Keys: `radius`, `height`, `turns`, `color`.
pub fn generate(params: &ParameterMap, _rng: &mut Rng) -> Geometry {
    let radius = params.number_f32("radius", DEFAULT_RADIUS);
    let height = params.number_f32("height", DEFAULT_HEIGHT);
    let turns = params.number_f32("turns", DEFAULT_TURNS);
    let color = params.color("color", DEFAULT_COLOR);

    let strand: Vec<Vec3> = (0..=SEGMENTS)
        .map(|i| {
            let t = i as f32 / SEGMENTS as f32;
            let (sin_a, cos_a) = (t * TAU * turns).sin_cos();
            [cos_a * radius * 0.5, (t - 0.5) * height, sin_a * radius * 0.5]
        })
        .collect();
    let mirrored: Vec<Vec3> = strand.iter().map(|p| [-p[0], p[1], -p[2]]).collect();

    let rungs: Vec<Part> = (0..=SEGMENTS)
        .step_by(RUNG_EVERY)
        .map(|i| {
            let angle = i as f32 / SEGMENTS as f32 * TAU * turns;
            Part::Mesh {
                primitive: Primitive::Cylinder {
                    radius_top: 0.05,
                    radius_bottom: 0.05,
                    height: radius,
                    radial_segments: 4,
                },
                material: Material::solid(Color::WHITE).translucent(0.3),
                // Lay the Y-axis cylinder flat, then swing it onto the strand pair.
                transform: Transform::at([0.0, strand[i][1], 0.0], [0.0, -angle, FRAC_PI_2]),
            }
        })
        .collect();

    let mut geometry = Geometry::new()
        .with(Part::Polyline {
            points: strand,
            color,
            width: 2.0,
            closed: false,
        })
        .with(Part::Polyline {
            points: mirrored,
            color: SECOND_STRAND_COLOR,
            width: 2.0,
            closed: false,
        });
    geometry.parts.extend(rungs);
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{length, sub};
    use crate::rng::Rng;
    use proptest::prelude::*;

    fn strands(geometry: &Geometry) -> (&[Vec3], &[Vec3]) {
        match (&geometry.parts[0], &geometry.parts[1]) {
            (Part::Polyline { points: a, .. }, Part::Polyline { points: b, .. }) => {
                (a.as_slice(), b.as_slice())
            }
            other => panic!("expected two strands, got {other:?}"),
        }
    }

    #[test]
    fn default_helix_shape() {
        let geometry = generate(&ParameterMap::new(), &mut Rng::new(0));
        let (a, b) = strands(&geometry);
        assert_eq!(a.len(), 101);
        assert_eq!(b.len(), 101);
        assert!((a[0][1] + 5.0).abs() < 1e-6);
        assert!((a[100][1] - 5.0).abs() < 1e-6);
        // 21 rungs: samples 0, 5, ..., 100
        assert_eq!(geometry.parts.len(), 2 + 21);
        assert!(geometry.radius() < 15.0);
    }

    #[test]
    fn rung_ends_meet_both_strands() {
        let params = ParameterMap::new().with("radius", 6.0).with("turns", 2.5);
        let geometry = generate(&params, &mut Rng::new(0));
        let (a, b) = strands(&geometry);
        for (n, part) in geometry.parts[2..].iter().enumerate() {
            let Part::Mesh {
                primitive: Primitive::Cylinder { height, .. },
                transform,
                ..
            } = part
            else {
                panic!("expected rung");
            };
            let i = n * RUNG_EVERY;
            let top = transform.apply([0.0, height * 0.5, 0.0]);
            let bottom = transform.apply([0.0, -height * 0.5, 0.0]);
            assert!(length(sub(top, b[i])) < 1e-4, "rung {i} top {top:?} vs {:?}", b[i]);
            assert!(length(sub(bottom, a[i])) < 1e-4, "rung {i} bottom {bottom:?} vs {:?}", a[i]);
        }
    }

    proptest! {
        #[test]
        fn second_strand_mirrors_the_first(
            radius in -20.0f64..20.0,
            height in -20.0f64..20.0,
            turns in -10.0f64..10.0,
        ) {
            let params = ParameterMap::new()
                .with("radius", radius)
                .with("height", height)
                .with("turns", turns);
            let geometry = generate(&params, &mut Rng::new(0));
            let (a, b) = strands(&geometry);
            prop_assert_eq!(a.len(), b.len());
            for (p, q) in a.iter().zip(b) {
                prop_assert_eq!(*q, [-p[0], p[1], -p[2]]);
            }
        }
    }
}
