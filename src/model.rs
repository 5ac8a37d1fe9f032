use serde::{Deserialize, Serialize};

use crate::dispatch::ShapeKind;
use crate::geometry::Geometry;
use crate::params::{Color, ParamValue, ParameterMap};
use crate::rng::Rng;

pub const SLIDER_MIN: f64 = 0.1;
pub const SLIDER_MAX: f64 = 20.0;
pub const SLIDER_STEP: f64 = 0.1;

/// A named, typed, parameterized shape. Never mutated once built; edits go
/// through [`ShapeModel::with_param`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeModel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: ParameterMap,
    /// SVG markup, passed through untouched.
    #[serde(default)]
    pub thumbnail: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Controls a front-end shows for the current model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub sliders: Vec<Slider>,
    /// Present only when the model carries a `color` entry.
    pub color: Option<Color>,
}

impl ShapeModel {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        params: ParameterMap,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            params,
            thumbnail: thumbnail.into(),
        }
    }

    /// Copy with one parameter replaced; `self` is left as it was.
    pub fn with_param(&self, key: &str, value: impl Into<ParamValue>) -> Self {
        Self {
            params: self.params.with(key, value),
            ..self.clone()
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        ShapeKind::parse(&self.kind)
    }

    pub fn geometry(&self, rng: &mut Rng) -> Geometry {
        self.shape_kind().generate(&self.params, rng)
    }

    /// Blank name or type means the model cannot be shown or stored.
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && !self.kind.trim().is_empty()
    }

    pub fn controls(&self) -> Controls {
        let sliders = self
            .params
            .iter()
            .filter_map(|(key, value)| match value {
                ParamValue::Number(n) => Some(Slider {
                    key: key.clone(),
                    label: label_for(key),
                    value: *n,
                    min: SLIDER_MIN,
                    max: SLIDER_MAX,
                    step: SLIDER_STEP,
                }),
                ParamValue::Text(_) => None,
            })
            .collect();
        let color = self
            .params
            .get("color")
            .map(|_| self.params.color("color", Color::WHITE));
        Controls { sliders, color }
    }
}

/// `tubeRadius` -> `Tube Radius`.
fn label_for(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut word_start = true;
    for c in key.chars() {
        if c.is_ascii_uppercase() && !out.is_empty() {
            out.push(' ');
            word_start = true;
        }
        if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn knot() -> ShapeModel {
        ShapeModel::new(
            "Mystic Knot",
            "torusKnot",
            ParameterMap::from_iter([
                ("p", ParamValue::from(2.0)),
                ("tubeRadius", ParamValue::from(1.5)),
                ("color", ParamValue::from("#9b7bff")),
            ]),
            "<path/>",
        )
    }

    #[test]
    fn with_param_leaves_source_alone() {
        let source = knot();
        let edited = source.with_param("p", 5.0);
        assert_eq!(source.params.number("p", 0.0), 2.0);
        assert_eq!(edited.params.number("p", 0.0), 5.0);
        assert_eq!(edited.name, source.name);
        assert_eq!(edited.kind, source.kind);
        assert_eq!(edited.thumbnail, source.thumbnail);
        assert_eq!(edited.params.get("tubeRadius"), source.params.get("tubeRadius"));
    }

    #[test]
    fn type_field_serializes_as_type() {
        let json = serde_json::to_value(knot()).unwrap();
        assert_eq!(json["type"], "torusKnot");
        assert_eq!(json["params"]["color"], "#9b7bff");

        let parsed: ShapeModel =
            serde_json::from_str(r#"{"name":"n","type":"heart","params":{"scale":"2","x":true}}"#)
                .unwrap();
        assert_eq!(parsed.params.number("scale", 1.0), 2.0);
        assert!(parsed.params.get("x").is_none());
        assert_eq!(parsed.thumbnail, "");
    }

    #[test]
    fn controls_cover_numbers_and_color() {
        let controls = knot().controls();
        let labels: Vec<_> = controls.sliders.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["P", "Tube Radius"]);
        assert_eq!(controls.color, Color::parse_hex("#9b7bff"));
        assert!(controls.sliders.iter().all(|s| s.min == 0.1 && s.max == 20.0));
    }

    #[test]
    fn blank_names_are_not_well_formed() {
        let mut model = knot();
        assert!(model.is_well_formed());
        model.name = "  ".into();
        assert!(!model.is_well_formed());
    }

    proptest! {
        #[test]
        fn with_param_replaces_exactly_one_key(key in "[a-z]{1,8}", value in -100.0f64..100.0) {
            let source = knot();
            let edited = source.with_param(&key, value);
            prop_assert_eq!(edited.params.number(&key, f64::NAN), value);
            for (k, v) in source.params.iter() {
                if *k != key {
                    prop_assert_eq!(edited.params.get(k), Some(v));
                }
            }
        }
    }
}
