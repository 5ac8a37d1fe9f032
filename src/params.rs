use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on count-like parameters a model may carry.
pub const MAX_SAMPLES: usize = 200_000;

/// Keys whose value sets how many samples a generator allocates.
pub const SAMPLE_KEYS: [&str; 3] = ["particles", "count", "points"];

/// A single parameter value: numeric for sliders, text for colors and labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Open string-keyed parameter set. Every accessor takes a default and never
/// fails: values come from sliders and from model output we do not trust.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct ParameterMap(BTreeMap<String, ParamValue>);

impl From<BTreeMap<String, serde_json::Value>> for ParameterMap {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in raw {
            match value {
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(v) => {
                        map.insert(key, ParamValue::Number(v));
                    }
                    None => debug!(key = %key, "dropping unrepresentable number"),
                },
                serde_json::Value::String(s) => {
                    map.insert(key, ParamValue::Text(s));
                }
                other => debug!(key = %key, value = %other, "dropping non-scalar parameter"),
            }
        }
        Self(map)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of this map with `key` replaced. The receiver is left untouched.
    pub fn with(&self, key: &str, value: impl Into<ParamValue>) -> Self {
        let mut next = self.0.clone();
        next.insert(key.to_string(), value.into());
        Self(next)
    }

    /// Finite number under `key`, or a string that parses to one.
    /// Zero is a real value here; only missing or garbage input falls back.
    pub fn number(&self, key: &str, default: f64) -> f64 {
        let parsed = match self.0.get(key) {
            Some(ParamValue::Number(v)) => Some(*v),
            Some(ParamValue::Text(s)) => s.trim().parse::<f64>().ok(),
            None => return default,
        };
        match parsed {
            Some(v) if v.is_finite() => v,
            _ => {
                debug!(key, default, "non-numeric parameter, using default");
                default
            }
        }
    }

    pub fn number_f32(&self, key: &str, default: f32) -> f32 {
        self.number(key, default as f64) as f32
    }

    /// Sample count: rounded, negatives clamp to zero.
    pub fn count(&self, key: &str, default: usize) -> usize {
        let v = self.number(key, default as f64).round();
        if v <= 0.0 { 0 } else { v as usize }
    }

    /// First count-like key above [`MAX_SAMPLES`], with its rounded value.
    pub fn oversized_sample(&self) -> Option<(&'static str, usize)> {
        SAMPLE_KEYS
            .into_iter()
            .map(|key| (key, self.count(key, 0)))
            .find(|&(_, n)| n > MAX_SAMPLES)
    }

    pub fn color(&self, key: &str, default: Color) -> Color {
        match self.0.get(key) {
            Some(ParamValue::Text(s)) => Color::parse(s).unwrap_or_else(|| {
                debug!(key, value = %s, "unparseable color, using default");
                default
            }),
            _ => default,
        }
    }

    pub fn text(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(ParamValue::Text(s)) if !s.is_empty() => s.clone(),
            Some(ParamValue::Number(v)) if v.is_finite() => format_number(*v),
            _ => default.to_string(),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// 8-bit sRGB color, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex first, then a CSS color name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::parse_hex(s).or_else(|| Self::named(s))
    }

    /// Common CSS color keywords, case-insensitive.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim();
        CSS_NAMES
            .iter()
            .find(|(css, _)| css.eq_ignore_ascii_case(name))
            .map(|&(_, hex)| Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8))
    }

    /// Accepts `#rgb` and `#rrggbb`, any case. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |src: &str| u8::from_str_radix(src, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

const CSS_NAMES: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("lime", 0x00ff00),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("aqua", 0x00ffff),
    ("magenta", 0xff00ff),
    ("fuchsia", 0xff00ff),
    ("silver", 0xc0c0c0),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("maroon", 0x800000),
    ("olive", 0x808000),
    ("purple", 0x800080),
    ("teal", 0x008080),
    ("navy", 0x000080),
    ("orange", 0xffa500),
    ("gold", 0xffd700),
    ("pink", 0xffc0cb),
    ("hotpink", 0xff69b4),
    ("deeppink", 0xff1493),
    ("violet", 0xee82ee),
    ("indigo", 0x4b0082),
    ("turquoise", 0x40e0d0),
    ("coral", 0xff7f50),
    ("crimson", 0xdc143c),
    ("salmon", 0xfa8072),
    ("skyblue", 0x87ceeb),
    ("deepskyblue", 0x00bfff),
    ("royalblue", 0x4169e1),
    ("limegreen", 0x32cd32),
    ("springgreen", 0x00ff7f),
    ("chartreuse", 0x7fff00),
    ("orangered", 0xff4500),
    ("tomato", 0xff6347),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("brown", 0xa52a2a),
    ("chocolate", 0xd2691e),
    ("beige", 0xf5f5dc),
];

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid color '{s}'"))
    }
}
