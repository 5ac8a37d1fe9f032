pub mod assistant;
pub mod catalog;
pub mod config;
pub mod decor;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod model;
pub mod params;
pub mod render;
pub mod rng;
pub mod server;
pub mod shapes;
pub mod studio;
pub mod tessellate;

use std::time::Instant;

use decor::Decoration;
use error::RenderError;
use geometry::Geometry;
use model::ShapeModel;
use rng::Rng;

pub use dispatch::{ShapeKind, dispatch, dispatch_seeded};
pub use model::Slider;
pub use params::{Color, ParamValue, ParameterMap};

/// Everything the offline tools produce for one model.
pub struct Sculpture {
    pub geometry: Geometry,
    pub decorations: Vec<Decoration>,
    pub rgba: Vec<u8>,
    pub size: u32,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Generate, decorate and rasterize `model` with a fixed seed.
pub fn sculpt(
    model: &ShapeModel,
    seed: u64,
    size: u32,
) -> Result<(Sculpture, Vec<Timing>), RenderError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let geometry = model.geometry(&mut Rng::new(seed));
    timings.push(Timing {
        name: "generate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let decorations = decor::decorations(&model.shape_kind(), &model.params);
    timings.push(Timing {
        name: "decorate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let rgba = render::render_preview(&geometry, size)?;
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((
        Sculpture {
            geometry,
            decorations,
            rgba,
            size,
        },
        timings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_catalog;

    #[test]
    fn sculpt_is_reproducible_per_seed() {
        let model = &seed_catalog()[0];
        let (a, timings) = sculpt(model, 7, 32).unwrap();
        let (b, _) = sculpt(model, 7, 32).unwrap();
        assert_eq!(a.geometry, b.geometry);
        assert_eq!(a.rgba, b.rgba);
        assert_eq!(a.rgba.len(), 32 * 32 * 4);
        assert_eq!(timings.last().map(|t| t.name), Some("TOTAL"));
    }
}
