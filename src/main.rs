//! # Kvittering CLI
//!
//! Command-line interface for rendering receipts to bitmaps.
//!
//! ## Usage
//!
//! ```bash
//! # Render plain text to a PNG
//! kvittering render "Hello world" --png hello.png
//!
//! # Render a markdown file with a QR code below it
//! kvittering render --file order.md --markdown --qr https://example.com --png order.png
//!
//! # Read from stdin and write the packed 1-bit raster for a printer
//! cat order.md | kvittering render --markdown --raster order.bin
//!
//! # Print a task card
//! kvittering task "Water the plants" --kind todo --png task.png
//!
//! # Fit a photo to a 384-dot printer
//! kvittering image photo.jpg --width 384 --png photo.png
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (for example `RUST_LOG=kvittering=debug`).

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use kvittering::{
    Canvas, KvitteringError, ReceiptRenderer, RenderConfig, TaskKind, render::fit_image_bytes,
};

/// Kvittering - Receipt bitmap renderer
#[derive(Parser, Debug)]
#[command(name = "kvittering")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render text (and an optional QR code) to a receipt bitmap
    Render {
        /// Text to render; `-` or omitted reads stdin
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, value_name = "FILE", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Interpret the text as receipt markdown
        #[arg(long)]
        markdown: bool,

        /// QR payload drawn below the text
        #[arg(long, value_name = "DATA")]
        qr: Option<String>,

        /// JSON render configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Receipt width in dots (overrides the config)
        #[arg(long)]
        width: Option<u32>,

        /// Write the bitmap as a PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Write the packed 1-bit raster
        #[arg(long, value_name = "FILE")]
        raster: Option<PathBuf>,
    },

    /// Render a task card: kind header, centered task text
    Task {
        /// Task text
        text: String,

        /// idea, urgent, todo or archive
        #[arg(long, default_value = "todo")]
        kind: TaskKind,

        /// JSON render configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the bitmap as a PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Write the packed 1-bit raster
        #[arg(long, value_name = "FILE")]
        raster: Option<PathBuf>,
    },

    /// Fit a photo to the receipt width
    Image {
        /// Image file to fit
        path: PathBuf,

        /// Receipt width in dots
        #[arg(long, default_value = "512")]
        width: u32,

        /// Write the fitted image as a PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Write the packed 1-bit raster
        #[arg(long, value_name = "FILE")]
        raster: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "kvittering=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), KvitteringError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            text,
            file,
            markdown,
            qr,
            config,
            width,
            png,
            raster,
        } => {
            let mut render_config = load_config(config.as_deref())?;
            if let Some(width) = width {
                render_config.max_width = width;
                render_config.validate()?;
            }

            let text = read_text(text, file.as_deref())?;
            let renderer = ReceiptRenderer::new(render_config);
            let canvas = renderer.build(&text, markdown, qr.as_deref())?;

            println!("Rendered {}x{} receipt", canvas.width(), canvas.height());
            write_outputs(&canvas, png.as_deref(), raster.as_deref())?;
        }
        Commands::Task {
            text,
            kind,
            config,
            png,
            raster,
        } => {
            let renderer = ReceiptRenderer::new(load_config(config.as_deref())?);
            let canvas = renderer.build_task(&text, kind);

            println!("Rendered {}x{} {} card", canvas.width(), canvas.height(), kind);
            write_outputs(&canvas, png.as_deref(), raster.as_deref())?;
        }
        Commands::Image {
            path,
            width,
            png,
            raster,
        } => {
            if width == 0 {
                return Err(KvitteringError::Config("width must be positive".into()));
            }
            let bytes = std::fs::read(&path)?;
            let canvas = fit_image_bytes(&bytes, width)?;

            println!(
                "Fitted {} to {}x{}",
                path.display(),
                canvas.width(),
                canvas.height()
            );
            write_outputs(&canvas, png.as_deref(), raster.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig, KvitteringError> {
    match path {
        Some(path) => RenderConfig::from_json_file(path),
        None => Ok(RenderConfig::default()),
    }
}

/// Text from the positional argument, a file, or stdin.
fn read_text(text: Option<String>, file: Option<&Path>) -> Result<String, KvitteringError> {
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_outputs(
    canvas: &Canvas,
    png: Option<&Path>,
    raster: Option<&Path>,
) -> Result<(), KvitteringError> {
    if let Some(path) = png {
        canvas.save_png(path)?;
        println!("Saved PNG to {}", path.display());
    }
    if let Some(path) = raster {
        let bits = canvas.to_raster();
        std::fs::write(path, &bits.data)?;
        println!(
            "Saved raster to {} ({} bytes per row, {} rows)",
            path.display(),
            bits.width_bytes(),
            bits.height
        );
    }
    Ok(())
}
