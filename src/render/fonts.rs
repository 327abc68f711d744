//! Font resolution for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so bitmap output needs a font file
//! registered under the `sans-serif` family before any text is drawn. SVG
//! output only writes `<text>` elements and never needs glyph data.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Result, anyhow};
use plotters::style::FontStyle;

/// Regular/bold pairs tried in order when no explicit font is given.
const CANDIDATES: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    ),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

/// Where to find the font used for bitmap output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FontConfig {
    /// First existing file among well-known system locations.
    #[default]
    Auto,
    /// A specific TrueType/OpenType file. A `-Bold` sibling is used for bold
    /// text when present.
    Path(PathBuf),
}

impl FontConfig {
    /// `(regular, bold)` file pair, if the configured source exists.
    fn locate(&self) -> Option<(PathBuf, Option<PathBuf>)> {
        match self {
            FontConfig::Path(p) => p.is_file().then(|| (p.clone(), bold_sibling(p))),
            FontConfig::Auto => CANDIDATES.iter().find_map(|(regular, bold)| {
                let regular = Path::new(regular);
                let bold = Path::new(bold);
                regular
                    .is_file()
                    .then(|| (regular.to_path_buf(), bold.is_file().then(|| bold.to_path_buf())))
            }),
        }
    }
}

fn bold_sibling(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let ext = path.extension()?.to_str()?;
    let base = stem.strip_suffix("-Regular").unwrap_or(stem);
    let candidate = path.with_file_name(format!("{base}-Bold.{ext}"));
    candidate.is_file().then_some(candidate)
}

/// Regular font file of the first successful registration.
static REGISTERED: OnceLock<PathBuf> = OnceLock::new();

fn leak_file(path: &Path) -> Result<&'static [u8]> {
    let bytes = std::fs::read(path).map_err(|e| anyhow!("reading {}: {e}", path.display()))?;
    Ok(Box::leak(bytes.into_boxed_slice()))
}

fn register(config: &FontConfig) -> std::result::Result<PathBuf, String> {
    let (regular, bold) = config.locate().ok_or_else(|| match config {
        FontConfig::Path(p) => format!("font file {} does not exist", p.display()),
        FontConfig::Auto => {
            "no usable system font found; pass --font or set SLIDECHART_FONT".to_string()
        }
    })?;
    let regular_bytes = leak_file(&regular).map_err(|e| e.to_string())?;
    plotters::style::register_font("sans-serif", FontStyle::Normal, regular_bytes)
        .map_err(|_| format!("{} is not a usable font", regular.display()))?;

    let bold_bytes = match &bold {
        Some(path) => leak_file(path).map_err(|e| e.to_string())?,
        None => {
            log::warn!(
                "no bold face next to {}; bold text uses the regular face",
                regular.display()
            );
            regular_bytes
        }
    };
    plotters::style::register_font("sans-serif", FontStyle::Bold, bold_bytes)
        .map_err(|_| format!("bold face for {} is not a usable font", regular.display()))?;

    log::info!("registered font {}", regular.display());
    Ok(regular)
}

/// Register the configured font once per process and return its path.
///
/// The first successful registration wins and later configs reuse it. A
/// failed attempt is not remembered, so a later call may try another config.
pub fn ensure_fonts_registered(config: &FontConfig) -> Result<&'static Path> {
    if let Some(path) = REGISTERED.get() {
        match config {
            FontConfig::Path(wanted) if wanted != path => log::warn!(
                "font already registered from {}; ignoring {}",
                path.display(),
                wanted.display()
            ),
            _ => {}
        }
        return Ok(path.as_path());
    }
    let path = register(config).map_err(|msg| anyhow!("{msg}"))?;
    // A concurrent caller may have registered first; either font is usable.
    let _ = REGISTERED.set(path);
    REGISTERED
        .get()
        .map(PathBuf::as_path)
        .ok_or_else(|| anyhow!("font registration was not recorded"))
}
