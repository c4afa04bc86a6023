//! glyphcast command line

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use glyphcast::{
    parse_color, surface_size, Config, FontDatabase, FontFace, FontQuery, MetricsProvider,
    RasterSink, Typesetter, VectorSink,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glyphcast", version, about = "Lay out text with a font and render it to PNG and SVG")]
struct Cli {
    /// Font file (TTF/OTF)
    #[arg(long, conflicts_with = "family", required_unless_present = "family")]
    font: Option<PathBuf>,

    /// System font family, e.g. "serif" or "DejaVu Sans"
    #[arg(long)]
    family: Option<String>,

    /// Text to render; read from stdin when neither --text nor --input is given
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// File containing the text to render
    #[arg(long)]
    input: Option<PathBuf>,

    /// Font size in CSS pixels
    #[arg(long)]
    size: Option<f32>,

    /// Container width in CSS pixels
    #[arg(long, conflicts_with = "unbounded")]
    width: Option<f32>,

    /// Only break lines at newlines
    #[arg(long)]
    unbounded: bool,

    /// Device pixels per CSS pixel
    #[arg(long)]
    pixel_ratio: Option<f32>,

    /// Write the raster output to this PNG file
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the vector output to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Trace outlines directly instead of composing from the glyph cache
    #[arg(long)]
    immediate: bool,

    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(size) = self.size {
            config.font_size = size;
        }
        if let Some(width) = self.width {
            config.container_width = width;
            config.wrap = true;
        }
        if self.unbounded {
            config.wrap = false;
        }
        if let Some(ratio) = self.pixel_ratio {
            config.pixel_ratio = ratio;
        }
        Ok(config)
    }

    fn text(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    }

    fn load_font(&self) -> anyhow::Result<FontFace> {
        if let Some(path) = &self.font {
            return FontFace::from_file(path).with_context(|| format!("loading {}", path.display()));
        }
        let Some(family) = &self.family else {
            bail!("either --font or --family is required");
        };
        let db = FontDatabase::with_system_fonts();
        Ok(db.load(&FontQuery::new(&[family.as_str()]))?)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let text = cli.text()?;
    let font = cli.load_font()?;
    tracing::info!(
        "glyphcast v{}: {} glyphs, {} units per em",
        glyphcast::VERSION,
        font.number_of_glyphs(),
        font.units_per_em()
    );

    if cli.png.is_none() && cli.svg.is_none() {
        tracing::warn!("No output requested; pass --png or --svg");
    }

    let typesetter = Typesetter::new(font, config)?;
    if cli.immediate {
        render_immediate(&typesetter, &text, cli.png.as_deref(), cli.svg.as_deref())
    } else {
        render_cached(&typesetter, &text, cli.png.as_deref(), cli.svg.as_deref())
    }
}

fn render_cached(
    typesetter: &Typesetter<FontFace>,
    text: &str,
    png: Option<&Path>,
    svg: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = typesetter.render(text)?;
    print_summary(&rendered.layout);

    if let Some(path) = png {
        rendered.raster.save_png(path)?;
        tracing::info!("Wrote {}", path.display());
    }
    if let Some(path) = svg {
        std::fs::write(path, rendered.vector.to_svg_string())?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn render_immediate(
    typesetter: &Typesetter<FontFace>,
    text: &str,
    png: Option<&Path>,
    svg: Option<&Path>,
) -> anyhow::Result<()> {
    // Lay out once up front to size the surface
    let layout = typesetter.layout(text)?;
    let (width, height) = surface_size(&layout, &typesetter.request());
    let color = parse_color(&typesetter.config().color)?;
    print_summary(&layout);

    if let Some(path) = png {
        let mut sink = RasterSink::new(width, height)?.with_color(color);
        typesetter.render_to(&mut sink, text)?;
        sink.pixmap().save_png(path)?;
        tracing::info!("Wrote {}", path.display());
    }
    if let Some(path) = svg {
        let mut sink = VectorSink::new();
        typesetter.render_to(&mut sink, text)?;
        let doc = sink.to_svg(width as f32, height as f32, color);
        std::fs::write(path, doc.to_string())?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(layout: &glyphcast::TextLayout) {
    println!(
        "{} glyphs on {} lines, {:.1}x{:.1}px",
        layout.glyphs.len(),
        layout.line_count(),
        layout.width,
        layout.height
    );
}
