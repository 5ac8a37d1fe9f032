use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Geometry;
use crate::params::ParameterMap;
use crate::rng::Rng;
use crate::shapes::{
    self, Generator, cube_cloud, double_helix, flower, heart, saturn, sphere, star, text,
    torus_knot, wave,
};

/// Radius the sphere fallback always renders with, whatever the input held.
pub const FALLBACK_RADIUS: f64 = 4.0;

/// Shape families with a dedicated generator, plus whatever else a model
/// update may invent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    Heart,
    Saturn,
    TorusKnot,
    Flower,
    Sphere,
    Star,
    CubeCloud,
    DoubleHelix,
    Wave,
    Text,
    Unknown(String),
}

impl ShapeKind {
    pub const KNOWN: [ShapeKind; 10] = [
        ShapeKind::Heart,
        ShapeKind::Saturn,
        ShapeKind::TorusKnot,
        ShapeKind::Flower,
        ShapeKind::Sphere,
        ShapeKind::Star,
        ShapeKind::CubeCloud,
        ShapeKind::DoubleHelix,
        ShapeKind::Wave,
        ShapeKind::Text,
    ];

    /// Exact, case-sensitive match on the type tag. Never fails.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "heart" => ShapeKind::Heart,
            "saturn" => ShapeKind::Saturn,
            "torusKnot" => ShapeKind::TorusKnot,
            "flower" => ShapeKind::Flower,
            "sphere" => ShapeKind::Sphere,
            "star" => ShapeKind::Star,
            "cubeCloud" => ShapeKind::CubeCloud,
            "doubleHelix" => ShapeKind::DoubleHelix,
            "wave" => ShapeKind::Wave,
            "text" => ShapeKind::Text,
            other => ShapeKind::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ShapeKind::Heart => "heart",
            ShapeKind::Saturn => "saturn",
            ShapeKind::TorusKnot => "torusKnot",
            ShapeKind::Flower => "flower",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Star => "star",
            ShapeKind::CubeCloud => "cubeCloud",
            ShapeKind::DoubleHelix => "doubleHelix",
            ShapeKind::Wave => "wave",
            ShapeKind::Text => "text",
            ShapeKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ShapeKind::Unknown(_))
    }

    /// Parameter keys the generator reads, in prompt order.
    pub fn param_keys(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Heart => &["scale", "particles", "color"],
            ShapeKind::Saturn => &["ringDist", "ringWidth", "planetScale", "color"],
            ShapeKind::TorusKnot => &["p", "q", "radius", "tubeRadius", "color"],
            ShapeKind::Flower => &["k", "radius", "color"],
            ShapeKind::Sphere | ShapeKind::Unknown(_) => &["radius", "color"],
            ShapeKind::Star => &["outerRadius", "innerRadius", "points", "depth", "color"],
            ShapeKind::CubeCloud => &["size", "count", "color"],
            ShapeKind::DoubleHelix => &["radius", "height", "turns", "color"],
            ShapeKind::Wave => &["amplitude", "frequency", "width", "depth", "color"],
            ShapeKind::Text => &["text", "size", "color"],
        }
    }

    fn generator(&self) -> Generator {
        match self {
            ShapeKind::Heart => heart::generate,
            ShapeKind::Saturn => saturn::generate,
            ShapeKind::TorusKnot => torus_knot::generate,
            ShapeKind::Flower => flower::generate,
            ShapeKind::Sphere | ShapeKind::Unknown(_) => sphere::generate,
            ShapeKind::Star => star::generate,
            ShapeKind::CubeCloud => cube_cloud::generate,
            ShapeKind::DoubleHelix => double_helix::generate,
            ShapeKind::Wave => wave::generate,
            ShapeKind::Text => text::generate,
        }
    }

    pub fn generate(&self, params: &ParameterMap, rng: &mut Rng) -> Geometry {
        match self {
            ShapeKind::Unknown(tag) => {
                debug!(tag = %tag, "unknown shape type, falling back to sphere");
                let forced = params.with("radius", FALLBACK_RADIUS);
                shapes::sphere::generate(&forced, rng)
            }
            known => (known.generator())(params, rng),
        }
    }
}

impl From<&str> for ShapeKind {
    fn from(tag: &str) -> Self {
        ShapeKind::parse(tag)
    }
}

impl From<String> for ShapeKind {
    fn from(tag: String) -> Self {
        ShapeKind::parse(&tag)
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Geometry for `tag`, with fresh randomness on every call.
pub fn dispatch(tag: &str, params: &ParameterMap) -> Geometry {
    dispatch_with(tag, params, &mut Rng::from_entropy())
}

/// Reproducible variant for tests, the CLI and cached previews.
pub fn dispatch_seeded(tag: &str, params: &ParameterMap, seed: u64) -> Geometry {
    dispatch_with(tag, params, &mut Rng::new(seed))
}

pub fn dispatch_with(tag: &str, params: &ParameterMap, rng: &mut Rng) -> Geometry {
    ShapeKind::parse(tag).generate(params, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::FRAME_RADIUS;

    #[test]
    fn tags_round_trip() {
        for kind in ShapeKind::KNOWN {
            assert_eq!(ShapeKind::parse(kind.tag()), kind);
            assert!(kind.is_known());
        }
        assert_eq!(
            ShapeKind::parse("Heart"),
            ShapeKind::Unknown("Heart".to_string())
        );
    }

    #[test]
    fn every_known_tag_works_with_empty_params() {
        for kind in ShapeKind::KNOWN {
            let geometry = dispatch(kind.tag(), &ParameterMap::new());
            assert!(!geometry.parts.is_empty(), "{kind} produced nothing");
            assert!(geometry.vertex_count() > 0, "{kind} has no vertices");
            let radius = geometry.radius();
            assert!(radius.is_finite(), "{kind} produced non-finite geometry");
            assert!(radius <= FRAME_RADIUS, "{kind} radius {radius} leaves the frame");
        }
    }

    #[test]
    fn unknown_tag_renders_a_radius_four_sphere() {
        let odd = ParameterMap::new().with("radius", 99.0).with("color", "#000");
        let plain = ParameterMap::new().with("radius", 4.0).with("color", "#000");
        let fallback = dispatch("unknown-tag", &odd);
        let sphere = dispatch("sphere", &plain);
        assert_eq!(fallback, sphere);
    }

    #[test]
    fn fallback_ignores_missing_radius_too() {
        let fallback = dispatch_seeded("pyramid", &ParameterMap::new(), 1);
        assert!((fallback.radius() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn seeded_dispatch_is_reproducible() {
        let params = ParameterMap::new().with("particles", 300.0);
        assert_eq!(
            dispatch_seeded("heart", &params, 17),
            dispatch_seeded("heart", &params, 17)
        );
    }

    #[test]
    fn kinds_serialize_as_tags() {
        let json = serde_json::to_string(&ShapeKind::DoubleHelix).unwrap();
        assert_eq!(json, "\"doubleHelix\"");
        let back: ShapeKind = serde_json::from_str("\"blob\"").unwrap();
        assert_eq!(back, ShapeKind::Unknown("blob".into()));
    }
}
