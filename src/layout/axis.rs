//! Category-axis charts: bar, line, comparison and waterfall.
//!
//! Categories sit at x = 0, 1, ..., n-1 inside a fixed span of `-0.5..n-0.5`.
//! The value axis starts at zero and tops out at `max * HEADROOM`, leaving room
//! for the value labels above the tallest bar.

use crate::error::{LayoutError, Result};
use crate::models::Dataset;
use crate::parser::ValueText;

use super::ticks::value_ticks;
use super::{
    Axes, BarGeometry, BarSpan, Bounds, Canvas, ComparisonGeometry, ComparisonSeries, Connector,
    Ctx, Element, Figure, Frame, GRID_COLOR, HAlign, Layout, LineGeometry, NEGATIVE_COLOR, Panel,
    Point, RULE_COLOR, Range, Shape, SizeTier, StepKind, TextPlacement, Tick, VAlign, ValueAxis,
    WaterfallGeometry, WaterfallStep,
};
use crate::scheme::Color;

/// Fixed headroom above the largest value. Not a tunable.
pub const HEADROOM: f64 = 1.15;

const BAR_WIDTH: f64 = 0.6;
const PAIR_BAR_WIDTH: f64 = 0.35;
const Y_TICK_TARGET: usize = 5;
const AXIS_BOUNDS: Bounds = Bounds {
    left: 0.08,
    bottom: 0.12,
    width: 0.89,
    height: 0.74,
};
const TITLE_Y: f64 = 0.96;

/// Value axis from zero to `max * HEADROOM`; negative data extends it downward.
pub fn value_axis(min: f64, max: f64) -> ValueAxis {
    let top = if max > 0.0 { max * HEADROOM } else { 0.0 };
    let bottom = if min < 0.0 { min * HEADROOM } else { 0.0 };
    if top - bottom > 0.0 {
        ValueAxis {
            min: bottom,
            max: top,
        }
    } else {
        ValueAxis { min: 0.0, max: 1.0 }
    }
}

fn extent(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn axis_panel(ctx: &Ctx<'_>, labels: &[String], axis: ValueAxis, label_size: SizeTier) -> Panel {
    let n = labels.len() as f64;
    Panel {
        bounds: AXIS_BOUNDS,
        frame: Frame {
            x: Range::new(-0.5, n - 0.5),
            y: Range::new(axis.min, axis.max),
        },
        axes: Some(Axes {
            x_ticks: labels
                .iter()
                .enumerate()
                .map(|(i, l)| Tick {
                    at: i as f64,
                    label: l.clone(),
                })
                .collect(),
            y_ticks: value_ticks(axis.min, axis.max, Y_TICK_TARGET, &ctx.options.locale),
            spine_color: RULE_COLOR,
            grid_color: Some(GRID_COLOR),
            label_color: ctx.scheme.text_light,
            label_size,
        }),
        elements: Vec::new(),
        hidden: false,
    }
}

fn canvas(width_in: f64, height_in: f64) -> Canvas {
    Canvas {
        width_in,
        height_in,
        background: Color::WHITE,
    }
}

/// Label just above a bar top, or just below it for negative bars.
fn value_label(content: String, x: f64, v: f64, size: SizeTier, color: Color) -> TextPlacement {
    let v_align = if v < 0.0 { VAlign::Top } else { VAlign::Bottom };
    TextPlacement::new(content, Point::new(x, v), size, color)
        .align(HAlign::Center, v_align)
        .bold()
}

fn bar_element(span: &BarSpan) -> Element {
    Element::new(Shape::vertical_bar(span.x, span.width, span.base, span.top)).filled(span.color)
}

pub(crate) fn bar(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let values = dataset.value_texts()?;
    let labels = dataset.labels();
    let (lo, hi) = extent(values.iter().map(|v| v.value));
    let axis = value_axis(lo, hi);

    let bars: Vec<BarSpan> = values
        .iter()
        .enumerate()
        .map(|(i, v)| BarSpan {
            label: labels[i].clone(),
            value: v.value,
            x: i as f64,
            width: BAR_WIDTH,
            base: 0.0,
            top: v.value,
            color: ctx.scheme.gradient_color(i),
        })
        .collect();

    let mut panel = axis_panel(ctx, &labels, axis, SizeTier::Body);
    for (span, v) in bars.iter().zip(&values) {
        panel.elements.push(bar_element(span).with_text(value_label(
            v.label(),
            span.x,
            span.top,
            SizeTier::Heading,
            ctx.scheme.text,
        )));
    }

    Ok(Layout {
        canvas: canvas(10.0, 6.0),
        title: Some(ctx.title_at(TITLE_Y)),
        panels: vec![panel],
        figure: Figure::Bar(BarGeometry { axis, bars }),
    })
}

pub(crate) fn line(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let values = dataset.value_texts()?;
    let labels = dataset.labels();
    let (lo, hi) = extent(values.iter().map(|v| v.value));
    let axis = value_axis(lo, hi);
    let label_lift = (if hi > 0.0 { hi } else { axis.max - axis.min }) * 0.03;
    let primary = ctx.scheme.primary;

    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(i, v)| Point::new(i as f64, v.value))
        .collect();

    let mut panel = axis_panel(ctx, &labels, axis, SizeTier::Body);

    // Area between the line and zero.
    let mut area = Vec::with_capacity(points.len() + 2);
    area.push(Point::new(0.0, 0.0));
    area.extend(points.iter().copied());
    area.push(Point::new((points.len() - 1) as f64, 0.0));
    panel.elements.push(
        Element::new(Shape::Polyline {
            points: area,
            closed: true,
        })
        .filled_alpha(primary, 0.3),
    );
    panel.elements.push(
        Element::new(Shape::Polyline {
            points: points.clone(),
            closed: false,
        })
        .stroked(primary, 3.0),
    );
    for (p, v) in points.iter().zip(&values) {
        panel.elements.push(
            Element::new(Shape::Marker {
                center: *p,
                radius_pt: 5.0,
            })
            .filled(primary)
            .stroked(Color::WHITE, 2.0)
            .with_text(
                TextPlacement::new(
                    v.label(),
                    Point::new(p.x, p.y + label_lift),
                    SizeTier::Emphasis,
                    ctx.scheme.text,
                )
                .align(HAlign::Center, VAlign::Bottom)
                .bold(),
            ),
        );
    }

    Ok(Layout {
        canvas: canvas(10.0, 6.0),
        title: Some(ctx.title_at(TITLE_Y)),
        panels: vec![panel],
        figure: Figure::Line(LineGeometry {
            axis,
            labels,
            points,
        }),
    })
}

pub(crate) fn comparison(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let second = ctx
        .options
        .comparison
        .as_ref()
        .ok_or(LayoutError::MissingComparisonSeries)?;
    if second.len() != dataset.len() {
        return Err(LayoutError::DimensionMismatch {
            left: dataset.len(),
            right: second.len(),
        }
        .into());
    }
    let first_values = dataset.value_texts()?;
    let second_values = second.value_texts()?;
    let categories = dataset.labels();
    let (lo, hi) = extent(
        first_values
            .iter()
            .chain(&second_values)
            .map(|v| v.value),
    );
    let axis = value_axis(lo, hi);

    let mut panel = axis_panel(ctx, &categories, axis, SizeTier::Body);
    let mut series = Vec::with_capacity(2);
    let columns: [(&[ValueText], Color, f64); 2] = [
        (&first_values, ctx.scheme.primary, -PAIR_BAR_WIDTH / 2.0),
        (&second_values, ctx.scheme.accent, PAIR_BAR_WIDTH / 2.0),
    ];
    for (s, (values, color, offset)) in columns.into_iter().enumerate() {
        let bars: Vec<BarSpan> = values
            .iter()
            .enumerate()
            .map(|(i, v)| BarSpan {
                label: categories[i].clone(),
                value: v.value,
                x: i as f64 + offset,
                width: PAIR_BAR_WIDTH,
                base: 0.0,
                top: v.value,
                color,
            })
            .collect();
        for (span, v) in bars.iter().zip(values) {
            panel.elements.push(bar_element(span).with_text(value_label(
                v.label(),
                span.x,
                span.top,
                SizeTier::Emphasis,
                ctx.scheme.text,
            )));
        }
        series.push(ComparisonSeries {
            name: ctx.options.series_labels[s].clone(),
            color,
            bars,
        });
    }

    // Legend, upper left inside the plot.
    let span = axis.max - axis.min;
    let legend_x = -0.35;
    for (k, s) in series.iter().enumerate() {
        let y = axis.max - span * 0.07 * (k as f64 + 1.0);
        panel.elements.push(
            Element::new(Shape::Rect {
                x: legend_x,
                y: y - span * 0.0175,
                width: 0.25,
                height: span * 0.035,
            })
            .filled(s.color)
            .with_text(
                TextPlacement::new(
                    s.name.clone(),
                    Point::new(legend_x + 0.35, y),
                    SizeTier::Body,
                    ctx.scheme.text,
                )
                .align(HAlign::Left, VAlign::Center),
            ),
        );
    }

    Ok(Layout {
        canvas: canvas(12.0, 6.0),
        title: Some(ctx.title_at(TITLE_Y)),
        panels: vec![panel],
        figure: Figure::Comparison(ComparisonGeometry {
            axis,
            categories,
            series,
        }),
    })
}

/// Running totals before each record: `cum[i] = v[0] + ... + v[i-1]`.
pub fn cumulative_offsets(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for v in values {
        out.push(running);
        running += v;
    }
    out
}

pub(crate) fn waterfall(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let values = dataset.value_texts()?;
    let labels = dataset.labels();
    let n = values.len();
    let raw: Vec<f64> = values.iter().map(|v| v.value).collect();
    let cum = cumulative_offsets(&raw);

    let steps: Vec<WaterfallStep> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let kind = if i == 0 {
                StepKind::Baseline
            } else if i == n - 1 {
                StepKind::Total
            } else {
                StepKind::Delta
            };
            let (base, color) = match kind {
                StepKind::Baseline | StepKind::Total => (0.0, ctx.scheme.primary),
                StepKind::Delta if v.value >= 0.0 => (cum[i], ctx.scheme.accent),
                StepKind::Delta => (cum[i], NEGATIVE_COLOR),
            };
            WaterfallStep {
                kind,
                span: BarSpan {
                    label: labels[i].clone(),
                    value: v.value,
                    x: i as f64,
                    width: BAR_WIDTH,
                    base,
                    top: base + v.value,
                    color,
                },
            }
        })
        .collect();

    // No connector runs into the final absolute bar.
    let connectors: Vec<Connector> = (0..n.saturating_sub(2))
        .map(|i| Connector {
            after: i,
            level: cum[i + 1],
        })
        .collect();

    let (lo, hi) = extent(steps.iter().flat_map(|s| [s.span.base, s.span.top]));
    let axis = value_axis(lo, hi);

    let mut panel = axis_panel(ctx, &labels, axis, SizeTier::Caption);
    for (step, v) in steps.iter().zip(&values) {
        let text = match step.kind {
            StepKind::Delta => v.signed_label(),
            StepKind::Baseline | StepKind::Total => v.label(),
        };
        let mid = Point::new(step.span.x, (step.span.base + step.span.top) / 2.0);
        let label = TextPlacement::new(text, mid, SizeTier::Emphasis, Color::WHITE).bold();
        panel.elements.push(bar_element(&step.span).with_text(label));
    }
    for c in &connectors {
        let x = c.after as f64;
        panel.elements.push(
            Element::new(Shape::Polyline {
                points: vec![Point::new(x + 0.3, c.level), Point::new(x + 0.7, c.level)],
                closed: false,
            })
            .stroked(Color::BLACK, 1.0)
            .stroke_alpha(0.5)
            .dashed(4.0, 3.0),
        );
    }

    Ok(Layout {
        canvas: canvas(12.0, 6.0),
        title: Some(ctx.title_at(TITLE_Y)),
        panels: vec![panel],
        figure: Figure::Waterfall(WaterfallGeometry {
            axis,
            steps,
            connectors,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headroom_is_fixed() {
        let a = value_axis(10.0, 100.0);
        assert_eq!(a.min, 0.0);
        assert!((a.max - 115.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_data_still_gets_an_axis() {
        assert_eq!(value_axis(0.0, 0.0), ValueAxis { min: 0.0, max: 1.0 });
        let a = value_axis(-20.0, -5.0);
        assert_eq!(a.max, 0.0);
        assert!((a.min + 23.0).abs() < 1e-9);
    }

    #[test]
    fn offsets_exclude_current_record() {
        assert_eq!(cumulative_offsets(&[100.0, 35.0, -8.0]), vec![0.0, 100.0, 135.0]);
    }
}
