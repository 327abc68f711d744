//! Rasterize or vectorize a computed [`Layout`].
//!
//! The renderer is mechanical: every color, position and string comes from
//! the layout. It only converts canvas units to pixels and issues plotters
//! draw calls. Output format follows the file extension (`.svg` gives SVG,
//! anything else PNG via the bitmap backend).

mod fonts;

pub use fonts::{FontConfig, ensure_fonts_registered};

use std::f64::consts::TAU;
use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use crate::layout::{
    Axes, Bounds, Element, Frame, HAlign, Layout, Point, Range, Shape, Stroke, TextPlacement,
    VAlign,
};
use crate::scheme::Color as SchemeColor;

/// Output resolution and font source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Pixels per canvas inch.
    pub dpi: u32,
    pub font: FontConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            font: FontConfig::default(),
        }
    }
}

/// Pixel dimensions of `layout` at `dpi`.
pub fn pixel_size(layout: &Layout, dpi: u32) -> (u32, u32) {
    let px = |inches: f64| ((inches * dpi as f64).round() as u32).max(1);
    (px(layout.canvas.width_in), px(layout.canvas.height_in))
}

/// Draw `layout` into `out_path`.
pub fn render_to_file<P: AsRef<Path>>(
    layout: &Layout,
    out_path: P,
    config: &RenderConfig,
) -> Result<()> {
    if config.dpi == 0 {
        return Err(anyhow!("dpi must be positive"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (width, height) = pixel_size(layout, config.dpi);
    let painter = Painter {
        width: width as f64,
        height: height as f64,
        px_per_pt: config.dpi as f64 / 72.0,
    };
    log::debug!(
        "rendering {} chart at {width}x{height} px to {}",
        layout.kind(),
        out_path.display()
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_layout(root, layout, &painter)
    } else {
        ensure_fonts_registered(&config.font)?;
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_layout(root, layout, &painter)
    }
}

fn drawing_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn rgba(c: SchemeColor, alpha: f64) -> RGBAColor {
    RGBColor(c.r, c.g, c.b).mix(alpha.clamp(0.0, 1.0))
}

type Px = (f64, f64);

fn round_px((x, y): Px) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Image-wide scale factors.
struct Painter {
    width: f64,
    height: f64,
    px_per_pt: f64,
}

impl Painter {
    fn line_px(&self, width_pt: f64) -> u32 {
        ((width_pt * self.px_per_pt).round() as u32).max(1)
    }
}

/// Maps one frame onto a pixel rectangle, y pointing up in the frame and
/// down in the image.
#[derive(Clone, Copy)]
struct Viewport {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    frame: Frame,
}

const UNIT: Frame = Frame {
    x: Range::new(0.0, 1.0),
    y: Range::new(0.0, 1.0),
};

fn frac(v: f64, r: Range) -> f64 {
    let span = r.span();
    if span == 0.0 { 0.5 } else { (v - r.min) / span }
}

impl Viewport {
    fn figure(p: &Painter) -> Self {
        Self::panel(
            p,
            &Bounds {
                left: 0.0,
                bottom: 0.0,
                width: 1.0,
                height: 1.0,
            },
            UNIT,
        )
    }

    fn panel(p: &Painter, b: &Bounds, frame: Frame) -> Self {
        Self {
            left: b.left * p.width,
            top: (1.0 - (b.bottom + b.height)) * p.height,
            width: b.width * p.width,
            height: b.height * p.height,
            frame,
        }
    }

    fn map(&self, pt: Point) -> Px {
        (
            self.left + frac(pt.x, self.frame.x) * self.width,
            self.top + (1.0 - frac(pt.y, self.frame.y)) * self.height,
        )
    }

    fn x_px_per_unit(&self) -> f64 {
        let span = self.frame.x.span();
        if span == 0.0 { 0.0 } else { self.width / span }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn draw_layout<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    layout: &Layout,
    painter: &Painter,
) -> Result<()> {
    root.fill(&rgba(layout.canvas.background, 1.0))
        .map_err(drawing_err)?;

    for panel in layout.visible_panels() {
        let vp = Viewport::panel(painter, &panel.bounds, panel.frame);
        if let Some(axes) = &panel.axes {
            draw_grid(&root, &vp, axes, painter)?;
        }
        for element in &panel.elements {
            draw_element(&root, &vp, element, painter)?;
        }
        if let Some(axes) = &panel.axes {
            draw_spines_and_ticks(&root, &vp, axes, painter)?;
        }
    }
    if let Some(title) = &layout.title {
        draw_text(&root, &Viewport::figure(painter), title, painter)?;
    }

    root.present().map_err(drawing_err)?;
    Ok(())
}

fn draw_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    vp: &Viewport,
    axes: &Axes,
    painter: &Painter,
) -> Result<()> {
    let Some(grid) = axes.grid_color else {
        return Ok(());
    };
    let style = rgba(grid, 1.0).stroke_width(painter.line_px(0.8));
    for tick in &axes.y_ticks {
        let (_, y) = vp.map(Point::new(vp.frame.x.min, tick.at));
        let y = y.round() as i32;
        root.draw(&PathElement::new(
            vec![
                (vp.left.round() as i32, y),
                ((vp.left + vp.width).round() as i32, y),
            ],
            style,
        ))
        .map_err(drawing_err)?;
    }
    Ok(())
}

fn draw_spines_and_ticks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    vp: &Viewport,
    axes: &Axes,
    painter: &Painter,
) -> Result<()> {
    let spine = rgba(axes.spine_color, 1.0).stroke_width(painter.line_px(1.0));
    let corner = round_px((vp.left, vp.bottom()));
    root.draw(&PathElement::new(
        vec![round_px((vp.left, vp.top)), corner],
        spine,
    ))
    .map_err(drawing_err)?;
    root.draw(&PathElement::new(
        vec![corner, round_px((vp.left + vp.width, vp.bottom()))],
        spine,
    ))
    .map_err(drawing_err)?;

    let gap = 4.0 * painter.px_per_pt;
    let size_px = axes.label_size.points() * painter.px_per_pt;
    let color = rgba(axes.label_color, 1.0);
    for tick in &axes.x_ticks {
        let (x, _) = vp.map(Point::new(tick.at, vp.frame.y.min));
        let style = text_style(size_px, false, &color, HPos::Center, VPos::Top);
        draw_lines(root, &tick.label, (x, vp.bottom() + gap), style, size_px, VAlign::Top)?;
    }
    for tick in &axes.y_ticks {
        let (_, y) = vp.map(Point::new(vp.frame.x.min, tick.at));
        let style = text_style(size_px, false, &color, HPos::Right, VPos::Center);
        draw_lines(root, &tick.label, (vp.left - gap, y), style, size_px, VAlign::Center)?;
    }
    Ok(())
}

fn draw_element<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    vp: &Viewport,
    element: &Element,
    painter: &Painter,
) -> Result<()> {
    let outline: Option<(Vec<Px>, bool)> = match &element.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => {
            if let Some(fill) = element.fill {
                let a = round_px(vp.map(Point::new(*x, *y)));
                let b = round_px(vp.map(Point::new(x + width, y + height)));
                root.draw(&Rectangle::new(
                    [(a.0.min(b.0), a.1.min(b.1)), (a.0.max(b.0), a.1.max(b.1))],
                    rgba(fill.color, fill.alpha).filled(),
                ))
                .map_err(drawing_err)?;
            }
            let corners = [
                Point::new(*x, *y),
                Point::new(x + width, *y),
                Point::new(x + width, y + height),
                Point::new(*x, y + height),
            ];
            Some((corners.iter().map(|p| vp.map(*p)).collect(), true))
        }
        Shape::Card {
            x,
            y,
            width,
            height,
            pad,
        } => {
            let pts: Vec<Px> = rounded_rect(*x, *y, *width, *height, *pad)
                .into_iter()
                .map(|p| vp.map(p))
                .collect();
            fill_polygon(root, &pts, element)?;
            Some((pts, true))
        }
        Shape::Wedge {
            center,
            radius,
            inner_radius,
            start_deg,
            sweep_deg,
        } => {
            let pts: Vec<Px> = wedge_points(*center, *radius, *inner_radius, *start_deg, *sweep_deg)
                .into_iter()
                .map(|p| vp.map(p))
                .collect();
            fill_polygon(root, &pts, element)?;
            Some((pts, true))
        }
        Shape::Circle { center, radius } => {
            let r = radius * vp.x_px_per_unit();
            Some(circle(root, vp.map(*center), r, element)?)
        }
        Shape::Marker { center, radius_pt } => {
            let r = radius_pt * painter.px_per_pt;
            Some(circle(root, vp.map(*center), r, element)?)
        }
        Shape::Polyline { points, closed } => {
            let pts: Vec<Px> = points.iter().map(|p| vp.map(*p)).collect();
            if *closed {
                fill_polygon(root, &pts, element)?;
            }
            Some((pts, *closed))
        }
        Shape::Anchor { .. } => None,
    };

    if let (Some(stroke), Some((pts, closed))) = (element.stroke, outline) {
        stroke_path(root, &pts, closed, &stroke, painter)?;
    }
    for text in &element.texts {
        draw_text(root, vp, text, painter)?;
    }
    Ok(())
}

fn fill_polygon<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    pts: &[Px],
    element: &Element,
) -> Result<()> {
    let Some(fill) = element.fill else {
        return Ok(());
    };
    if pts.len() < 3 {
        return Ok(());
    }
    root.draw(&Polygon::new(
        pts.iter().map(|p| round_px(*p)).collect::<Vec<_>>(),
        rgba(fill.color, fill.alpha).filled(),
    ))
    .map_err(drawing_err)?;
    Ok(())
}

/// Fill a circle and return its sampled outline for stroking.
fn circle<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    center: Px,
    radius_px: f64,
    element: &Element,
) -> Result<(Vec<Px>, bool)> {
    if let Some(fill) = element.fill {
        root.draw(&Circle::new(
            round_px(center),
            radius_px.round().max(1.0) as i32,
            rgba(fill.color, fill.alpha).filled(),
        ))
        .map_err(drawing_err)?;
    }
    let outline = (0..72)
        .map(|i| {
            let t = TAU * i as f64 / 72.0;
            (center.0 + radius_px * t.cos(), center.1 + radius_px * t.sin())
        })
        .collect();
    Ok((outline, true))
}

fn stroke_path<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    pts: &[Px],
    closed: bool,
    stroke: &Stroke,
    painter: &Painter,
) -> Result<()> {
    if pts.len() < 2 {
        return Ok(());
    }
    let style = rgba(stroke.color, stroke.alpha).stroke_width(painter.line_px(stroke.width_pt));
    let mut path = pts.to_vec();
    if closed {
        path.push(pts[0]);
    }
    match stroke.dash {
        None => {
            root.draw(&PathElement::new(
                path.iter().map(|p| round_px(*p)).collect::<Vec<_>>(),
                style,
            ))
            .map_err(drawing_err)?;
        }
        Some(dash) => {
            let on = (dash.on_pt * painter.px_per_pt).max(1.0);
            let off = (dash.off_pt * painter.px_per_pt).max(1.0);
            for (a, b) in dash_segments(&path, on, off) {
                root.draw(&PathElement::new(vec![round_px(a), round_px(b)], style))
                    .map_err(drawing_err)?;
            }
        }
    }
    Ok(())
}

/// Split a polyline into visible dash segments. The pattern continues across
/// vertices.
fn dash_segments(path: &[Px], on: f64, off: f64) -> Vec<(Px, Px)> {
    let mut out = Vec::new();
    let mut drawing = true;
    let mut left = on;
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        let at = |d: f64| (a.0 + (b.0 - a.0) * d / len, a.1 + (b.1 - a.1) * d / len);
        let mut pos = 0.0;
        while pos < len {
            let step = left.min(len - pos);
            if drawing {
                out.push((at(pos), at(pos + step)));
            }
            pos += step;
            left -= step;
            if left <= 0.0 {
                drawing = !drawing;
                left = if drawing { on } else { off };
            }
        }
    }
    out
}

/// Outline of a rectangle with circular corners of radius `pad`.
fn rounded_rect(x: f64, y: f64, w: f64, h: f64, pad: f64) -> Vec<Point> {
    let r = pad.min(w / 2.0).min(h / 2.0).max(0.0);
    let corners = [
        (Point::new(x + w - r, y + r), 270.0),
        (Point::new(x + w - r, y + h - r), 0.0),
        (Point::new(x + r, y + h - r), 90.0),
        (Point::new(x + r, y + r), 180.0),
    ];
    const STEPS: usize = 8;
    corners
        .iter()
        .flat_map(|(c, from)| {
            (0..=STEPS).map(move |i| c.polar(r, from + 90.0 * i as f64 / STEPS as f64))
        })
        .collect()
}

/// Outline of an annular sector swept clockwise from `start_deg`.
fn wedge_points(
    center: Point,
    radius: f64,
    inner: f64,
    start_deg: f64,
    sweep_deg: f64,
) -> Vec<Point> {
    let steps = ((sweep_deg.abs() / 2.0).ceil() as usize).max(2);
    let angle = |i: usize| start_deg - sweep_deg * i as f64 / steps as f64;
    let mut pts: Vec<Point> = (0..=steps).map(|i| center.polar(radius, angle(i))).collect();
    if inner > 0.0 {
        pts.extend((0..=steps).rev().map(|i| center.polar(inner, angle(i))));
    } else {
        pts.push(center);
    }
    pts
}

fn text_style<'a>(
    size_px: f64,
    bold: bool,
    color: &RGBAColor,
    h: HPos,
    v: VPos,
) -> TextStyle<'a> {
    let weight = if bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    FontDesc::new(FontFamily::SansSerif, size_px, weight)
        .color(color)
        .pos(Pos::new(h, v))
}

fn draw_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    vp: &Viewport,
    text: &TextPlacement,
    painter: &Painter,
) -> Result<()> {
    if text.content.is_empty() {
        return Ok(());
    }
    let size_px = text.size.points() * painter.px_per_pt;
    let h = match text.h_align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match text.v_align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    let color = rgba(text.color, text.alpha);
    let style = text_style(size_px, text.bold, &color, h, v);
    draw_lines(root, &text.content, vp.map(text.at), style, size_px, text.v_align)
}

/// Stack the `\n`-separated lines of `content` around `anchor`.
fn draw_lines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    content: &str,
    anchor: Px,
    style: TextStyle<'_>,
    size_px: f64,
    v_align: VAlign,
) -> Result<()> {
    let lines: Vec<&str> = content.lines().collect();
    let line_h = 1.2 * size_px;
    let last = lines.len().saturating_sub(1) as f64;
    for (i, line) in lines.iter().enumerate() {
        let i = i as f64;
        let dy = match v_align {
            VAlign::Top => i * line_h,
            VAlign::Center => (i - last / 2.0) * line_h,
            VAlign::Bottom => (i - last) * line_h,
        };
        root.draw(&Text::new(
            line.to_string(),
            round_px((anchor.0, anchor.1 + dy)),
            style.clone(),
        ))
        .map_err(drawing_err)?;
    }
    Ok(())
}
