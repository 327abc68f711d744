//! Radar charts.
//!
//! Categories are spread evenly around the circle starting at 0 degrees
//! (positive x-axis), counter-clockwise. The radial scale is fixed at 0..100
//! whatever the data range; values above 100 are drawn where they fall,
//! outside the outer ring, and are not clamped.

use crate::error::Result;
use crate::models::Dataset;
use crate::scheme::Color;

use super::arcs::square_bounds;
use super::{
    Canvas, Ctx, Element, Figure, Frame, HAlign, Layout, Panel, Point, RULE_COLOR, RadarGeometry,
    Range, Shape, SizeTier, TextPlacement, VAlign,
};

pub const R_MAX: f64 = 100.0;
const RINGS: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 100.0];
const RING_LABEL_DEG: f64 = 22.5;
const VALUE_LABEL_GAP: f64 = 5.0;
const CATEGORY_RADIUS: f64 = 114.0;
const FRAME_HALF: f64 = 135.0;
const TITLE_Y: f64 = 0.97;

/// `n + 1` angles in degrees: `360 * i / n` for `i in 0..n`, then the first
/// angle plus a full turn to close the polygon.
pub fn spoke_angles(n: usize) -> Vec<f64> {
    let mut angles: Vec<f64> = (0..n).map(|i| 360.0 * i as f64 / n as f64).collect();
    if let Some(&first) = angles.first() {
        angles.push(first + 360.0);
    }
    angles
}

fn h_align_for(deg: f64) -> HAlign {
    let c = deg.to_radians().cos();
    if c > 0.1 {
        HAlign::Left
    } else if c < -0.1 {
        HAlign::Right
    } else {
        HAlign::Center
    }
}

pub(crate) fn radar(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let values = dataset.value_texts()?;
    let labels = dataset.labels();
    let n = values.len();
    let origin = Point::new(0.0, 0.0);
    let angles_deg = spoke_angles(n);

    let mut vertices: Vec<Point> = values
        .iter()
        .zip(&angles_deg)
        .map(|(v, &deg)| origin.polar(v.value, deg))
        .collect();
    // Exact copy, not a recomputation at 360 degrees.
    vertices.push(vertices[0]);

    let canvas = Canvas {
        width_in: 10.0,
        height_in: 10.0,
        background: Color::WHITE,
    };
    let mut panel = Panel {
        bounds: square_bounds(&canvas, 0.02, 0.9),
        frame: Frame {
            x: Range::new(-FRAME_HALF, FRAME_HALF),
            y: Range::new(-FRAME_HALF, FRAME_HALF),
        },
        axes: None,
        elements: Vec::new(),
        hidden: false,
    };

    for r in RINGS {
        panel.elements.push(
            Element::new(Shape::Circle {
                center: origin,
                radius: r,
            })
            .stroked(RULE_COLOR, 0.5)
            .with_text(
                TextPlacement::new(
                    format!("{r:.0}"),
                    origin.polar(r, RING_LABEL_DEG),
                    SizeTier::Fine,
                    ctx.scheme.text_light,
                )
                .align(HAlign::Left, VAlign::Bottom),
            ),
        );
    }
    for (label, &deg) in labels.iter().zip(&angles_deg) {
        panel.elements.push(
            Element::new(Shape::Polyline {
                points: vec![origin, origin.polar(R_MAX, deg)],
                closed: false,
            })
            .stroked(RULE_COLOR, 0.5)
            .with_text(
                TextPlacement::new(
                    label.clone(),
                    origin.polar(CATEGORY_RADIUS, deg),
                    SizeTier::Body,
                    ctx.scheme.text,
                )
                .align(h_align_for(deg), VAlign::Center),
            ),
        );
    }

    panel.elements.push(
        Element::new(Shape::Polyline {
            points: vertices.clone(),
            closed: true,
        })
        .filled_alpha(ctx.scheme.primary, 0.25)
        .stroked(ctx.scheme.primary, 2.0),
    );
    for ((v, p), &deg) in values.iter().zip(&vertices).zip(&angles_deg) {
        panel.elements.push(
            Element::new(Shape::Marker {
                center: *p,
                radius_pt: 4.0,
            })
            .filled(ctx.scheme.primary)
            .with_text(
                TextPlacement::new(
                    v.label(),
                    origin.polar(v.value + VALUE_LABEL_GAP, deg),
                    SizeTier::Caption,
                    ctx.scheme.accent,
                )
                .bold(),
            ),
        );
    }

    Ok(Layout {
        canvas,
        title: Some(ctx.title_at(TITLE_Y)),
        panels: vec![panel],
        figure: Figure::Radar(RadarGeometry {
            r_max: R_MAX,
            labels,
            values: values.iter().map(|v| v.value).collect(),
            angles_deg,
            vertices,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_spokes_are_square() {
        assert_eq!(spoke_angles(4), vec![0.0, 90.0, 180.0, 270.0, 360.0]);
    }

    #[test]
    fn no_spokes_for_no_categories() {
        assert!(spoke_angles(0).is_empty());
    }
}
