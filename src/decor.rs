//! Renderer hints that sit next to a shape but are not part of it.

use serde::{Deserialize, Serialize};

use crate::dispatch::ShapeKind;
use crate::params::{Color, ParameterMap};
use crate::shapes::{cube_cloud, flower, saturn};

/// Y rotation in radians per second applied to the whole shape group.
pub const SPIN_RATE: f32 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Decoration {
    /// Animated glitter scattered through a cube of side `scale`.
    Sparkles {
        count: usize,
        scale: f32,
        size: f32,
        speed: f32,
        opacity: f32,
        color: Color,
    },
    /// Gentle bobbing applied to the shape itself.
    #[serde(rename_all = "camelCase")]
    Float {
        speed: f32,
        rotation_intensity: f32,
        float_intensity: f32,
    },
}

pub fn decorations(kind: &ShapeKind, params: &ParameterMap) -> Vec<Decoration> {
    match kind {
        ShapeKind::Saturn => vec![Decoration::Sparkles {
            count: 50,
            scale: params.number_f32("planetScale", saturn::DEFAULT_PLANET_SCALE) * 3.0,
            size: 2.0,
            speed: 0.2,
            opacity: 0.5,
            color: params.color("color", saturn::DEFAULT_COLOR),
        }],
        ShapeKind::Flower => vec![Decoration::Sparkles {
            count: 200,
            scale: params.number_f32("radius", flower::DEFAULT_RADIUS),
            size: 3.0,
            speed: 0.4,
            opacity: 1.0,
            color: params.color("color", flower::DEFAULT_COLOR),
        }],
        ShapeKind::CubeCloud => vec![Decoration::Sparkles {
            count: params.count("count", cube_cloud::DEFAULT_COUNT),
            scale: params.number_f32("size", cube_cloud::DEFAULT_SIZE),
            size: 2.0,
            speed: 1.0,
            opacity: 1.0,
            color: params.color("color", cube_cloud::DEFAULT_COLOR),
        }],
        ShapeKind::Text => vec![Decoration::Float {
            speed: 2.0,
            rotation_intensity: 0.5,
            float_intensity: 0.5,
        }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturn_sparkles_follow_planet_scale() {
        let params = ParameterMap::new().with("planetScale", 2.0);
        let decor = decorations(&ShapeKind::Saturn, &params);
        let [Decoration::Sparkles { count, scale, .. }] = decor.as_slice() else {
            panic!("expected one sparkle scatter");
        };
        assert_eq!(*count, 50);
        assert_eq!(*scale, 6.0);
    }

    #[test]
    fn cube_cloud_sparkles_match_cube_count() {
        let params = ParameterMap::new().with("count", 0.0);
        let decor = decorations(&ShapeKind::CubeCloud, &params);
        assert!(matches!(decor[0], Decoration::Sparkles { count: 0, .. }));
    }

    #[test]
    fn plain_shapes_are_undecorated() {
        for kind in [ShapeKind::Heart, ShapeKind::Wave, ShapeKind::Unknown("x".into())] {
            assert!(decorations(&kind, &ParameterMap::new()).is_empty());
        }
        let json = serde_json::to_value(decorations(&ShapeKind::Text, &ParameterMap::new())).unwrap();
        assert_eq!(json[0]["kind"], "float");
        assert_eq!(json[0]["rotationIntensity"], 0.5);
    }
}
