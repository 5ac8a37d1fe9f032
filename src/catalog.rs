//! Models the studio starts with, one per shape family.

use crate::model::ShapeModel;
use crate::params::{ParamValue, ParameterMap};

fn model(name: &str, kind: &str, params: &[(&str, ParamValue)], thumbnail: &str) -> ShapeModel {
    let params: ParameterMap = params.iter().cloned().collect();
    ShapeModel::new(name, kind, params, thumbnail)
}

fn n(v: f64) -> ParamValue {
    ParamValue::Number(v)
}

fn s(v: &str) -> ParamValue {
    ParamValue::from(v)
}

pub fn seed_catalog() -> Vec<ShapeModel> {
    vec![
        model(
            "Love Heart",
            "heart",
            &[("scale", n(1.0)), ("color", s("#ff5f9f")), ("particles", n(2000.0))],
            r##"<path fill="#ff5f9f" d="M12 21s-7.5-4.35-9.5-9.14C1.1 9.1 2.2 5.5 5.4 4.4c2.1-.7 4.1.4 5.1 2.2 1-1.8 3-2.9 5.1-2.2 3.2 1.1 4.3 4.7 2.9 7.46C19.5 16.65 12 21 12 21z"/>"##,
        ),
        model(
            "Saturn Ring",
            "saturn",
            &[
                ("ringDist", n(12.0)),
                ("ringWidth", n(4.0)),
                ("planetScale", n(4.0)),
                ("color", s("#f2c94c")),
            ],
            r##"<circle cx="12" cy="12" r="4.5" fill="#f2c94c"/><ellipse cx="12" cy="12.5" rx="8" ry="2.8" fill="none" stroke="#8bc5ff" stroke-width="1.4"/>"##,
        ),
        model(
            "Mystic Knot",
            "torusKnot",
            &[
                ("p", n(2.0)),
                ("q", n(3.0)),
                ("radius", n(5.0)),
                ("tubeRadius", n(1.5)),
                ("color", s("#9b7bff")),
            ],
            r##"<path fill="none" stroke="#9b7bff" stroke-width="1.6" d="M6 12c0-4 3-7 6-7s6 3 6 7-3 7-6 7-6-3-6-7z"/><path fill="none" stroke="#9b7bff" stroke-width="1.6" d="M4 9c2 2 14 2 16 0"/>"##,
        ),
        model(
            "Neon Flower",
            "flower",
            &[
                ("k", n(4.0)),
                ("radius", n(8.0)),
                ("zRange", n(2.0)),
                ("color", s("#ff6bd6")),
            ],
            r##"<circle cx="12" cy="12" r="3" fill="#ff9a3c"/><path fill="#ff6bd6" d="M12 4l1.5 3.5L17 9l-3.5 1.5L12 14l-1.5-3.5L7 9l3.5-1.5z"/>"##,
        ),
        model(
            "Fireworks Ball",
            "sphere",
            &[("radius", n(8.0)), ("color", s("#5edfff")), ("particles", n(1500.0))],
            r##"<circle cx="12" cy="12" r="3" fill="#5edfff"/><path stroke="#5edfff" stroke-width="1.4" stroke-linecap="round" d="M12 3v4M12 17v4M3 12h4M17 12h4M5 5l3 3M16 16l3 3M19 5l-3 3M8 16l-3 3"/>"##,
        ),
        model(
            "Star Shine",
            "star",
            &[
                ("outerRadius", n(8.0)),
                ("innerRadius", n(4.0)),
                ("points", n(5.0)),
                ("depth", n(2.0)),
                ("color", s("#ffd166")),
            ],
            r##"<path fill="#ffd166" d="M12 2.5l2.2 6.1 6.3.2-5 3.9 1.8 6.1L12 15.5l-5.3 3.3 1.8-6.1-5-3.9 6.3-.2z"/>"##,
        ),
        model(
            "Cyber Cloud",
            "cubeCloud",
            &[("size", n(10.0)), ("count", n(500.0)), ("color", s("#7de1ff"))],
            r##"<rect x="6" y="6" width="12" height="12" fill="none" stroke="#7de1ff" stroke-width="1.4"/><rect x="9" y="4" width="11" height="11" fill="none" stroke="#7de1ff" stroke-width="1.2" opacity="0.7"/>"##,
        ),
        model(
            "DNA Helix",
            "doubleHelix",
            &[
                ("radius", n(4.0)),
                ("height", n(15.0)),
                ("turns", n(3.0)),
                ("color", s("#ff9f6e")),
            ],
            r##"<path fill="none" stroke="#ff9f6e" stroke-width="1.6" d="M8 4c0 4 8 4 8 8s-8 4-8 8"/><path fill="none" stroke="#5edfff" stroke-width="1.6" d="M16 4c0 4-8 4-8 8s8 4 8 8"/>"##,
        ),
        model(
            "Audio Wave",
            "wave",
            &[
                ("amplitude", n(3.0)),
                ("frequency", n(0.5)),
                ("width", n(15.0)),
                ("depth", n(15.0)),
                ("color", s("#00ffff")),
            ],
            r##"<path fill="none" stroke="#00ffff" stroke-width="1.6" d="M3 12c4-2 8-2 12 0s8 2 12 0"/>"##,
        ),
        model(
            "3D Text",
            "text",
            &[
                ("text", s("GEMINI")),
                ("size", n(4.0)),
                ("thickness", n(1.0)),
                ("color", s("#ffffff")),
            ],
            r##"<text x="12" y="16" font-size="14" fill="#00ffff" text-anchor="middle" font-weight="bold">T</text>"##,
        ),
    ]
}
