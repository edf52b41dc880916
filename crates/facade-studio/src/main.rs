use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use facade_engine::logging::{LoggingConfig, init_logging};
use facade_ui::node::{Behavior, NodeId, NodeTree, Visual};
use facade_ui::prelude::*;
use walkdir::WalkDir;

const SPRITE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "psd", "tga"];
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "fontsettings"];

#[derive(Parser, Debug)]
#[command(
    name = "facade",
    version,
    about = "Compile a design-tool layout export into a resolved UI node tree"
)]
struct Cli {
    /// Layout JSON: a bare root element or an `{info, root}` envelope.
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// Directory of sprites and fonts. Defaults to the layout's directory.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,
    /// Design canvas size; the document's own canvas wins when present.
    #[arg(long, value_name = "WxH", default_value = "1136x640", value_parser = parse_canvas)]
    canvas: Vec2,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// `env_logger` filter, e.g. `facade_ui=trace`.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The compiled tree as pretty-printed JSON.
    Json,
    /// One indented line per node.
    Outline,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default().default_level(log::LevelFilter::Warn);
    if let Some(filter) = &cli.log {
        logging = logging.filter(filter.as_str());
    }
    init_logging(logging);

    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read layout {}", cli.input.display()))?;
    let doc = Document::parse_str(&src)
        .with_context(|| format!("failed to parse layout {}", cli.input.display()))?;
    log::info!("loaded {} ({} bytes)", cli.input.display(), src.len());

    let asset_dir = match &cli.assets {
        Some(dir) => dir.clone(),
        None => layout_dir(&cli.input),
    };
    let assets = scan_assets(&asset_dir)?;
    log::info!(
        "{}: {} sprites, {} fonts",
        asset_dir.display(),
        assets.sprite_count(),
        assets.font_count()
    );

    let canvas = canvas_size(doc.canvas_size, cli.canvas);
    let renderer = CanvasRenderer::new(canvas, assets);
    let out = compile(doc.root, &renderer)
        .with_context(|| format!("failed to compile {}", cli.input.display()))?;

    match cli.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&out.tree.snapshot(out.root))?;
            println!("{json}");
        }
        Format::Outline => print!("{}", outline(&out.tree, out.root)),
    }
    Ok(())
}

fn layout_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The document's own canvas wins over the `--canvas` flag.
fn canvas_size(document: Option<Vec2>, flag: Vec2) -> Vec2 {
    match document {
        Some(size) => {
            if size != flag {
                log::debug!("document canvas {}x{} overrides --canvas", size.x, size.y);
            }
            size
        }
        None => flag,
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1136x640`.
fn parse_canvas(s: &str) -> anyhow::Result<Vec2> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT, got {s:?}");
    };
    let w: f32 = w.trim().parse().with_context(|| format!("bad canvas width {w:?}"))?;
    let h: f32 = h.trim().parse().with_context(|| format!("bad canvas height {h:?}"))?;
    if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
        bail!("canvas size must be positive, got {s:?}");
    }
    Ok(Vec2::new(w, h))
}

// ── asset scan ────────────────────────────────────────────────────────────

/// Registers every sprite and font under `dir`, keyed by its `/`-separated
/// path relative to `dir`.
fn scan_assets(dir: &Path) -> anyhow::Result<AssetCatalog> {
    let mut assets = AssetCatalog::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("failed to scan assets in {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        let rel = path.strip_prefix(dir).unwrap_or(path);
        let key = asset_key(rel);

        if SPRITE_EXTENSIONS.contains(&ext.as_str()) {
            log::debug!("sprite {key}");
            assets.add_sprite(key);
        } else if FONT_EXTENSIONS.contains(&ext.as_str()) {
            log::debug!("font {key}");
            assets.add_font(key);
        }
    }
    Ok(assets)
}

fn asset_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ── outline ───────────────────────────────────────────────────────────────

fn outline(tree: &NodeTree, root: NodeId) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, root, 0);
    out
}

fn write_node(out: &mut String, tree: &NodeTree, id: NodeId, depth: usize) {
    let node = &tree[id];
    let r = &node.rect;
    let _ = write!(
        out,
        "{:indent$}{} pos=({}, {}) size=({}, {})",
        "",
        node.name,
        r.position.x,
        r.position.y,
        r.size.x,
        r.size.y,
        indent = depth * 2
    );
    if r.anchor_min != Vec2::splat(0.5) || r.anchor_max != Vec2::splat(0.5) {
        let _ = write!(
            out,
            " anchor=({}, {})-({}, {})",
            r.anchor_min.x, r.anchor_min.y, r.anchor_max.x, r.anchor_max.y
        );
    }
    match &node.visual {
        Some(Visual::Image(image)) => {
            let _ = write!(out, " image={} color={}", image.sprite.name(), image.color.to_hex());
        }
        Some(Visual::Text(text)) => {
            let _ = write!(out, " text={:?} color={}", text.message, text.color.to_hex());
        }
        None => {}
    }
    if node.mask.is_some() {
        out.push_str(" mask");
    }
    match &node.behavior {
        Some(Behavior::Button { .. }) => out.push_str(" [button]"),
        Some(Behavior::Slider { .. }) => out.push_str(" [slider]"),
        Some(Behavior::List { .. }) => out.push_str(" [list]"),
        None => {}
    }
    if !node.active {
        out.push_str(" (inactive)");
    }
    out.push('\n');

    for &child in node.children() {
        write_node(out, tree, child, depth + 1);
    }
}
