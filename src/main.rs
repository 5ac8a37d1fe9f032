use std::error::Error;
use std::path::PathBuf;

use tracing::info;

use sculptor::catalog::seed_catalog;
use sculptor::render;

/// `sculptor [all|<name>|<type>] [seed] [size] [out_dir]`
///
/// Writes `<slug>.json` (geometry and decorations) and `<slug>.png` for each
/// matching catalog model.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let args: Vec<String> = std::env::args().collect();

    let which = args.get(1).map(String::as_str).unwrap_or("all");
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);
    let size: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(512);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir)?;

    let models: Vec<_> = seed_catalog()
        .into_iter()
        .filter(|m| which == "all" || m.name == which || m.kind == which)
        .collect();
    if models.is_empty() {
        return Err(format!("no catalog model matches {which:?}").into());
    }

    for model in &models {
        info!(name = %model.name, kind = %model.kind, seed, size, "sculpting");
        let (sculpture, timings) = sculptor::sculpt(model, seed, size)?;
        for t in &timings {
            info!("  {:12} {:8.2} ms", t.name, t.ms);
        }

        let slug: String = model
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();

        let json_path = out_dir.join(format!("{slug}.json"));
        let json = serde_json::json!({
            "model": model,
            "geometry": sculpture.geometry,
            "decorations": sculpture.decorations,
            "vertices": sculpture.geometry.vertex_count(),
            "bounds": sculpture.geometry.bounds(),
        });
        std::fs::write(&json_path, serde_json::to_vec_pretty(&json)?)?;

        let png_path = out_dir.join(format!("{slug}.png"));
        let png = render::encode_png(&sculpture.rgba, sculpture.size, sculpture.size)?;
        std::fs::write(&png_path, png)?;
        info!("saved {} and {}", json_path.display(), png_path.display());
    }

    info!(count = models.len(), "done");
    Ok(())
}
