use anyhow::{Context, Result, bail};
use clap::Parser;
use posterize_wasm::{
    Palette, ScaleFactor, find_preset, posterize_bytes, presets, suggest_palette_bytes,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Longest side used when clustering for `--auto`.
const AUTO_MAX_SIDE: u32 = 256;

/// Posterize images into four tones and upscale them by an integer factor.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required_unless_present = "list_presets")]
    inputs: Vec<PathBuf>,

    /// Comma-separated list of 4 hex colors, brightest first
    #[arg(short = 'c', long, conflicts_with_all = ["preset", "auto"])]
    palette: Option<String>,

    /// Name of a built-in preset (red, green, blue, yellow)
    #[arg(short = 'P', long, conflicts_with = "auto")]
    preset: Option<String>,

    /// Derive the palette from each image with k-means
    #[arg(short, long)]
    auto: bool,

    /// Block size every source pixel is blown up to
    #[arg(short, long, default_value_t = 1)]
    scale: u32,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "posterized_")]
    prefix: String,

    /// Print the built-in presets as JSON and exit
    #[arg(long)]
    list_presets: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "posterize_wasm=debug,posterize_cli=debug"
    } else {
        "posterize_wasm=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if args.list_presets {
        let list: Vec<serde_json::Value> = presets()
            .iter()
            .map(|p| serde_json::json!({ "name": p.name, "colors": p.colors }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    let fixed_palette = match (&args.palette, &args.preset) {
        (Some(list), _) => {
            let hexes: Vec<&str> = list.split(',').map(str::trim).collect();
            Some(Palette::from_hex(&hexes).context("--palette needs exactly 4 colors")?)
        }
        (None, Some(name)) => match find_preset(name) {
            Some(preset) => Some(preset.palette()),
            None => bail!("unknown preset {name:?}"),
        },
        (None, None) if args.auto => None,
        (None, None) => Some(Palette::default()),
    };
    let scale = ScaleFactor::new(args.scale);

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

        let palette = match fixed_palette {
            Some(p) => p,
            None => {
                let p = suggest_palette_bytes(&bytes, Some(AUTO_MAX_SIDE))
                    .with_context(|| format!("suggesting palette for {}", input.display()))?;
                println!("{}: {}", input.display(), p.to_hex().join(","));
                p
            }
        };

        let png = posterize_bytes(&bytes, &palette, scale).context("posterize processing failed")?;

        let out_path = if let Some(dir) = &args.out_dir {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            dir.join(format!("{stem}.png"))
        } else {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            PathBuf::from(format!("{}{}.png", args.prefix, stem))
        };

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, png)?;
        println!("Saved → {}", out_path.display());
    }

    Ok(())
}
