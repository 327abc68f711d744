//! Layout engine: turns a dataset into fully resolved chart geometry.
//!
//! [`compute_layout`] is a pure function. It reads the (immutable) scheme and
//! the options, allocates a fresh [`Layout`] and performs no I/O, so it can be
//! called from any number of threads at once. The same input always yields an
//! identical layout.
//!
//! Per-kind algorithms live in submodules:
//! - [`axis`]: bar, line, comparison and waterfall charts on a category axis
//! - [`arcs`]: pie and donut charts
//! - [`radar`]: radar charts on a fixed 0..100 radial scale
//! - [`cards`]: big-number grids and timelines

pub mod arcs;
pub mod axis;
pub mod cards;
pub mod radar;
pub mod text;
pub mod ticks;
pub mod types;

pub use types::*;

use crate::error::{LayoutError, Result};
use crate::models::{ChartKind, Dataset};
use crate::scheme::{Color, ColorScheme};

/// Light gray for spines, rings and the timeline rail.
pub const RULE_COLOR: Color = Color::hex("#E0E0E0");
/// Fainter gray for horizontal grid lines.
pub const GRID_COLOR: Color = Color::hex("#F0F0F0");
/// Fill for negative waterfall deltas, independent of the scheme.
pub const NEGATIVE_COLOR: Color = Color::hex("#FF6B6B");

/// Card-count thresholds for big-number grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridThresholds {
    /// Up to this many cards sit in a single row.
    pub single_row_max: usize,
    /// Up to this many cards fill a square grid (2x2 for 4).
    pub square_max: usize,
    /// Column count beyond `square_max`.
    pub wide_columns: usize,
}

impl Default for GridThresholds {
    fn default() -> Self {
        Self {
            single_row_max: 2,
            square_max: 4,
            wide_columns: 3,
        }
    }
}

/// Chart-kind-specific tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Figure title; `None` uses [`ChartKind::default_title`].
    pub title: Option<String>,
    /// Second value series for [`ChartKind::Comparison`].
    pub comparison: Option<Dataset>,
    /// Legend names of the two comparison series.
    pub series_labels: [String; 2],
    pub grid: GridThresholds,
    /// Locale tag for value-axis tick labels (`en`, `de`, ...).
    pub locale: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            title: None,
            comparison: None,
            series_labels: ["Series 1".to_string(), "Series 2".to_string()],
            grid: GridThresholds::default(),
            locale: "en".to_string(),
        }
    }
}

impl LayoutOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_comparison(mut self, series: Dataset) -> Self {
        self.comparison = Some(series);
        self
    }
}

/// Shared per-call state handed to the per-kind builders.
pub(crate) struct Ctx<'a> {
    pub scheme: &'a ColorScheme,
    pub options: &'a LayoutOptions,
    pub title: String,
}

impl Ctx<'_> {
    /// Bold figure title anchored at its top edge.
    pub fn title_at(&self, y_frac: f64) -> TextPlacement {
        TextPlacement::new(
            self.title.clone(),
            Point::new(0.5, y_frac),
            SizeTier::Title,
            self.scheme.text,
        )
        .align(HAlign::Center, VAlign::Top)
        .bold()
    }
}

/// Compute the layout for `dataset` drawn as `kind` in `scheme`.
///
/// Fails with [`LayoutError::InsufficientData`] for an empty dataset and never
/// returns a partial layout.
///
/// ```
/// use slidechart::layout::{Figure, LayoutOptions, compute_layout};
/// use slidechart::models::{ChartKind, RecordShape};
/// use slidechart::{parser, scheme};
///
/// let data = parser::parse("Base:100,Growth:+35,Total:200", RecordShape::Pair)?;
/// let layout = compute_layout(
///     &data,
///     ChartKind::Waterfall,
///     scheme::resolve("blue")?,
///     &LayoutOptions::default(),
/// )?;
/// let Figure::Waterfall(w) = &layout.figure else { unreachable!() };
/// assert_eq!(w.steps[2].span.height(), 200.0);
/// # Ok::<(), slidechart::error::ChartError>(())
/// ```
pub fn compute_layout(
    dataset: &Dataset,
    kind: ChartKind,
    scheme: &ColorScheme,
    options: &LayoutOptions,
) -> Result<Layout> {
    if dataset.is_empty() {
        return Err(LayoutError::InsufficientData.into());
    }
    let ctx = Ctx {
        scheme,
        options,
        title: options
            .title
            .clone()
            .unwrap_or_else(|| kind.default_title(scheme.name)),
    };
    match kind {
        ChartKind::Bar => axis::bar(dataset, &ctx),
        ChartKind::Line => axis::line(dataset, &ctx),
        ChartKind::Comparison => axis::comparison(dataset, &ctx),
        ChartKind::Waterfall => axis::waterfall(dataset, &ctx),
        ChartKind::Pie => arcs::pie(dataset, &ctx, false),
        ChartKind::Donut => arcs::pie(dataset, &ctx, true),
        ChartKind::Radar => radar::radar(dataset, &ctx),
        ChartKind::BigNumberGrid => cards::big_number_grid(dataset, &ctx),
        ChartKind::Timeline => cards::timeline(dataset, &ctx),
    }
}
