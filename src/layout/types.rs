//! Layout value types.
//!
//! Coordinates are canvas units, never pixels. Panel bounds and the figure
//! title live in figure-fraction space (0..1, origin bottom-left). Everything
//! inside a panel is expressed in that panel's [`Frame`].

use serde::Serialize;

use crate::models::ChartKind;
use crate::scheme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `deg` (counter-clockwise from +x).
    pub fn polar(self, radius: f64, deg: f64) -> Self {
        let rad = deg.to_radians();
        Self {
            x: self.x + radius * rad.cos(),
            y: self.y + radius * rad.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Axis-aligned region in figure-fraction space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

/// Data window of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x: Range,
    pub y: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Typography scale shared by every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeTier {
    /// Headline numbers on metric cards.
    Hero,
    /// Donut totals.
    Display,
    Title,
    Heading,
    Emphasis,
    Body,
    Caption,
    Fine,
}

impl SizeTier {
    /// Nominal size in typographic points.
    pub fn points(self) -> f64 {
        match self {
            SizeTier::Hero => 48.0,
            SizeTier::Display => 36.0,
            SizeTier::Title => 26.0,
            SizeTier::Heading => 20.0,
            SizeTier::Emphasis => 17.0,
            SizeTier::Body => 14.0,
            SizeTier::Caption => 12.0,
            SizeTier::Fine => 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPlacement {
    /// May contain `\n`; lines are stacked around the anchor.
    pub content: String,
    pub at: Point,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub size: SizeTier,
    pub color: Color,
    pub alpha: f64,
    pub bold: bool,
}

impl TextPlacement {
    pub fn new(content: impl Into<String>, at: Point, size: SizeTier, color: Color) -> Self {
        Self {
            content: content.into(),
            at,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            size,
            color,
            alpha: 1.0,
            bold: false,
        }
    }

    pub fn align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    /// `(x, y)` is the lower-left corner; width and height are non-negative.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Rounded card; `pad` is the corner radius in frame units.
    Card {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        pad: f64,
    },
    /// Annular sector swept clockwise from `start_deg`.
    Wedge {
        center: Point,
        radius: f64,
        inner_radius: f64,
        start_deg: f64,
        sweep_deg: f64,
    },
    /// Circle with radius in frame x-units.
    Circle { center: Point, radius: f64 },
    /// Point marker with radius in typographic points.
    Marker { center: Point, radius_pt: f64 },
    Polyline { points: Vec<Point>, closed: bool },
    /// Anchor for text-only elements.
    Anchor { at: Point },
}

impl Shape {
    /// Rectangle spanning `a..b` vertically, whichever order they come in.
    pub fn vertical_bar(center_x: f64, width: f64, a: f64, b: f64) -> Self {
        Shape::Rect {
            x: center_x - width / 2.0,
            y: a.min(b),
            width,
            height: (b - a).abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    pub color: Color,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dash {
    pub on_pt: f64,
    pub off_pt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width_pt: f64,
    pub alpha: f64,
    pub dash: Option<Dash>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub shape: Shape,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub texts: Vec<TextPlacement>,
}

impl Element {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            fill: None,
            stroke: None,
            texts: Vec::new(),
        }
    }

    pub fn text(text: TextPlacement) -> Self {
        Self::new(Shape::Anchor { at: text.at }).with_text(text)
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.fill = Some(Fill { color, alpha: 1.0 });
        self
    }

    pub fn filled_alpha(mut self, color: Color, alpha: f64) -> Self {
        self.fill = Some(Fill { color, alpha });
        self
    }

    pub fn stroked(mut self, color: Color, width_pt: f64) -> Self {
        self.stroke = Some(Stroke {
            color,
            width_pt,
            alpha: 1.0,
            dash: None,
        });
        self
    }

    pub fn dashed(mut self, on_pt: f64, off_pt: f64) -> Self {
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.dash = Some(Dash { on_pt, off_pt });
        }
        self
    }

    pub fn stroke_alpha(mut self, alpha: f64) -> Self {
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.alpha = alpha;
        }
        self
    }

    pub fn with_text(mut self, text: TextPlacement) -> Self {
        self.texts.push(text);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub at: f64,
    pub label: String,
}

/// Cartesian axis decoration: left and bottom spines, tick labels, optional
/// horizontal grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub spine_color: Color,
    pub grid_color: Option<Color>,
    pub label_color: Color,
    pub label_size: SizeTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub bounds: Bounds,
    pub frame: Frame,
    pub axes: Option<Axes>,
    /// Drawn in order.
    pub elements: Vec<Element>,
    /// Allocated but not drawn (unused grid cells).
    pub hidden: bool,
}

/// Physical figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width_in: f64,
    pub height_in: f64,
    pub background: Color,
}

/// A vertical bar between `base` and `top` (either may be the larger).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpan {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub width: f64,
    pub base: f64,
    pub top: f64,
    pub color: Color,
}

impl BarSpan {
    /// Signed extent, `top - base`.
    pub fn height(&self) -> f64 {
        self.top - self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub axis: ValueAxis,
    pub bars: Vec<BarSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGeometry {
    pub axis: ValueAxis,
    pub labels: Vec<String>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub name: String,
    pub color: Color,
    pub bars: Vec<BarSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonGeometry {
    pub axis: ValueAxis,
    pub categories: Vec<String>,
    pub series: Vec<ComparisonSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    /// First record, drawn from zero.
    Baseline,
    /// Signed change stacked on the running total.
    Delta,
    /// Last record, drawn from zero as an absolute value.
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallStep {
    pub kind: StepKind,
    pub span: BarSpan,
}

/// Dashed line at `level` between bar `after` and bar `after + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub after: usize,
    pub level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallGeometry {
    pub axis: ValueAxis,
    pub steps: Vec<WaterfallStep>,
    pub connectors: Vec<Connector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WedgeGeometry {
    pub label: String,
    pub value: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub exploded: bool,
    /// Center of this wedge after the explode offset.
    pub center: Point,
    pub color: Color,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcGeometry {
    pub total: f64,
    pub radius: f64,
    pub hole_radius: f64,
    pub wedges: Vec<WedgeGeometry>,
    pub center_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarGeometry {
    pub r_max: f64,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// `n + 1` angles in degrees; the last one closes the polygon.
    pub angles_deg: Vec<f64>,
    /// `n + 1` vertices; the last equals the first.
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub bounds: Bounds,
    pub hidden: bool,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridGeometry {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineNode {
    pub x: f64,
    pub color: Color,
    pub time: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGeometry {
    pub left_margin: f64,
    pub right_margin: f64,
    pub axis_y: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub nodes: Vec<TimelineNode>,
}

/// Chart-kind-tagged semantic geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "geometry", rename_all = "kebab-case")]
pub enum Figure {
    Bar(BarGeometry),
    Line(LineGeometry),
    Pie(ArcGeometry),
    Donut(ArcGeometry),
    Radar(RadarGeometry),
    Waterfall(WaterfallGeometry),
    Comparison(ComparisonGeometry),
    BigNumberGrid(GridGeometry),
    Timeline(TimelineGeometry),
}

impl Figure {
    pub fn kind(&self) -> ChartKind {
        match self {
            Figure::Bar(_) => ChartKind::Bar,
            Figure::Line(_) => ChartKind::Line,
            Figure::Pie(_) => ChartKind::Pie,
            Figure::Donut(_) => ChartKind::Donut,
            Figure::Radar(_) => ChartKind::Radar,
            Figure::Waterfall(_) => ChartKind::Waterfall,
            Figure::Comparison(_) => ChartKind::Comparison,
            Figure::BigNumberGrid(_) => ChartKind::BigNumberGrid,
            Figure::Timeline(_) => ChartKind::Timeline,
        }
    }
}

/// Fully resolved chart: everything a renderer needs, nothing it must decide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub canvas: Canvas,
    /// Anchored in figure-fraction space.
    pub title: Option<TextPlacement>,
    pub panels: Vec<Panel>,
    pub figure: Figure,
}

impl Layout {
    pub fn kind(&self) -> ChartKind {
        self.figure.kind()
    }

    pub fn visible_panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter().filter(|p| !p.hidden)
    }
}
