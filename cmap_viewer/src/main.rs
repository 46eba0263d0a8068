//! Terminal colormap inspector.
//!
//! With no arguments, lists every colormap name the registry knows.
//! With names as arguments, renders each as a truecolor swatch row.
//! Set `CMAP_DIR` to include user-supplied `.rgb` files.

use anyhow::{Context, Result};

use cmap_registry::{CmapRegistry, Colormap};

const SWATCH_WIDTH: usize = 64;

fn print_swatch(cmap: &Colormap) {
    print!("{:<28}", cmap.name());
    for i in 0..SWATCH_WIDTH {
        let t = i as f32 / (SWATCH_WIDTH - 1) as f32;
        let [r, g, b] = cmap.sample(t);
        print!(
            "\x1b[48;2;{};{};{}m ",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8
        );
    }
    println!("\x1b[0m  {} colors", cmap.len());
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let registry = CmapRegistry::from_env().context("Failed to load colormap registry")?;

    if args.is_empty() {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    for name in &args {
        let cmap = registry
            .get(name)
            .with_context(|| format!("Failed to load colormap {}", name))?;
        print_swatch(&cmap);
    }

    Ok(())
}
