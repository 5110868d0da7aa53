mod script;
mod studio;

use anyhow::{Context, Result};
use viewpoint_engine::logging::{LoggingConfig, init_logging};

use crate::studio::Studio;

const DEMO: &str = include_str!("../scripts/demo.vps");

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let script = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading script `{path}`"))?,
        None => DEMO.to_string(),
    };

    println!();
    println!("  Viewpoint Studio");
    println!("  camera HPR / position controls, headless");
    println!();

    Studio::new()
        .title("Viewpoint Studio")
        .size(720.0, 420.0)
        .font(load_font())
        .script(script)
        .run()
}

/// First system font found, or an empty buffer when none is installed.
fn load_font() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}
