//! Pie and donut charts.
//!
//! Wedges are laid out clockwise from 12 o'clock in dataset order, each
//! sweeping `360 * value / sum` degrees. Equal values keep insertion order.

use crate::error::{LayoutError, Result};
use crate::models::Dataset;
use crate::parser::format_rounded;
use crate::scheme::Color;

use super::{
    ArcGeometry, Bounds, Canvas, Ctx, Element, Figure, Frame, HAlign, Layout, Panel, Point, Range,
    Shape, SizeTier, TextPlacement, VAlign, WedgeGeometry,
};

pub const START_DEG: f64 = 90.0;
pub const RADIUS: f64 = 1.0;
/// Explode offset as a fraction of the radius.
pub const EXPLODE: f64 = 0.05;
const PIE_HOLE: f64 = 0.70;
const DONUT_HOLE: f64 = 0.65;
const PERCENT_RADIUS: f64 = 0.85;
const LABEL_RADIUS: f64 = 1.1;
const FRAME_HALF: f64 = 1.3;
const TITLE_Y: f64 = 0.96;

/// Largest square (in inches) that fits the canvas between `bottom` and `top`
/// (figure fractions), centered horizontally.
pub(crate) fn square_bounds(canvas: &Canvas, bottom: f64, top: f64) -> Bounds {
    let side_in = ((top - bottom) * canvas.height_in).min(canvas.width_in);
    let width = side_in / canvas.width_in;
    let height = side_in / canvas.height_in;
    Bounds {
        left: (1.0 - width) / 2.0,
        bottom: bottom + ((top - bottom) - height) / 2.0,
        width,
        height,
    }
}

/// Index of the first occurrence of the maximum.
pub fn first_max_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

pub(crate) fn pie(dataset: &Dataset, ctx: &Ctx<'_>, donut: bool) -> Result<Layout> {
    let values = dataset.value_texts()?;
    let labels = dataset.labels();
    if let Some(i) = values.iter().position(|v| v.value < 0.0) {
        return Err(LayoutError::NegativeSlice {
            label: labels[i].clone(),
        }
        .into());
    }
    let raw: Vec<f64> = values.iter().map(|v| v.value).collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return Err(LayoutError::ZeroTotal.into());
    }
    let exploded = first_max_index(&raw);
    let hole_radius = if donut { DONUT_HOLE } else { PIE_HOLE };
    let origin = Point::new(0.0, 0.0);

    let mut wedges = Vec::with_capacity(raw.len());
    let mut start = START_DEG;
    for (i, &v) in raw.iter().enumerate() {
        let sweep = 360.0 * v / total;
        let bisector = start - sweep / 2.0;
        let is_exploded = exploded == Some(i);
        let offset = if is_exploded { EXPLODE * RADIUS } else { 0.0 };
        wedges.push(WedgeGeometry {
            label: labels[i].clone(),
            value: v,
            start_deg: start,
            sweep_deg: sweep,
            exploded: is_exploded,
            center: origin.polar(offset, bisector),
            color: ctx.scheme.gradient_color(i),
            percent: format!("{:.1}%", 100.0 * v / total),
        });
        start -= sweep;
    }

    let canvas = Canvas {
        width_in: 10.0,
        height_in: if donut { 8.0 } else { 6.0 },
        background: Color::WHITE,
    };
    let mut panel = Panel {
        bounds: square_bounds(&canvas, 0.03, 0.88),
        frame: Frame {
            x: Range::new(-FRAME_HALF, FRAME_HALF),
            y: Range::new(-FRAME_HALF, FRAME_HALF),
        },
        axes: None,
        elements: Vec::new(),
        hidden: false,
    };

    let label_size = if donut {
        SizeTier::Body
    } else {
        SizeTier::Emphasis
    };
    for w in &wedges {
        let bisector = w.start_deg - w.sweep_deg / 2.0;
        let outside = w.center.polar(LABEL_RADIUS * RADIUS, bisector);
        let h_align = if outside.x > 1e-9 {
            HAlign::Left
        } else if outside.x < -1e-9 {
            HAlign::Right
        } else {
            HAlign::Center
        };
        panel.elements.push(
            Element::new(Shape::Wedge {
                center: w.center,
                radius: RADIUS,
                inner_radius: hole_radius,
                start_deg: w.start_deg,
                sweep_deg: w.sweep_deg,
            })
            .filled(w.color)
            .with_text(
                TextPlacement::new(
                    w.percent.clone(),
                    w.center.polar(PERCENT_RADIUS * RADIUS, bisector),
                    SizeTier::Emphasis,
                    Color::WHITE,
                )
                .bold(),
            )
            .with_text(
                TextPlacement::new(w.label.clone(), outside, label_size, ctx.scheme.text)
                    .align(h_align, VAlign::Center),
            ),
        );
    }

    let center_label = donut.then(|| format_rounded(total));
    if let Some(label) = &center_label {
        panel.elements.push(
            Element::text(
                TextPlacement::new(
                    label.clone(),
                    Point::new(0.0, 0.06),
                    SizeTier::Display,
                    ctx.scheme.text,
                )
                .bold(),
            )
            .with_text(TextPlacement::new(
                "Total",
                Point::new(0.0, -0.17),
                SizeTier::Emphasis,
                ctx.scheme.text_light,
            )),
        );
    }

    let geometry = ArcGeometry {
        total,
        radius: RADIUS,
        hole_radius,
        wedges,
        center_label,
    };
    Ok(Layout {
        canvas,
        title: Some(ctx.title_at(TITLE_Y)),
        panels: vec![panel],
        figure: if donut {
            Figure::Donut(geometry)
        } else {
            Figure::Pie(geometry)
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_max_wins_ties() {
        assert_eq!(first_max_index(&[3.0, 5.0, 5.0, 1.0]), Some(1));
        assert_eq!(first_max_index(&[2.0]), Some(0));
        assert_eq!(first_max_index(&[]), None);
    }

    #[test]
    fn square_fits_short_side() {
        let canvas = Canvas {
            width_in: 10.0,
            height_in: 6.0,
            background: Color::WHITE,
        };
        let b = square_bounds(&canvas, 0.0, 1.0);
        assert!((b.width * 10.0 - b.height * 6.0).abs() < 1e-9);
        assert!((b.left - 0.2).abs() < 1e-9);
    }
}
