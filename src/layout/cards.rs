//! Card layouts: big-number grids and horizontal timelines.
//!
//! Both work on a 0..10 plane. Grid cells each get their own plane; the
//! timeline uses one plane for the whole figure.

use crate::error::Result;
use crate::models::Dataset;
use crate::scheme::Color;

use super::text::wrap_block;
use super::{
    Bounds, Canvas, Ctx, Element, Figure, Frame, GridCell, GridGeometry, GridThresholds, HAlign,
    Layout, Panel, Point, RULE_COLOR, Range, Shape, SizeTier, TextPlacement, TimelineGeometry,
    TimelineNode, VAlign,
};

const PLANE: Frame = Frame {
    x: Range::new(0.0, 10.0),
    y: Range::new(0.0, 10.0),
};

/// Inches reserved above the grid for the page title.
const GRID_TITLE_BAND_IN: f64 = 0.9;

pub const TIMELINE_LEFT: f64 = 1.5;
pub const TIMELINE_RIGHT: f64 = 8.5;
pub const TIMELINE_GUTTER: f64 = 0.2;
pub const TIMELINE_AXIS_Y: f64 = 6.5;
const CARD_TOP: f64 = 4.0;
const CARD_HEIGHT: f64 = 2.5;
const NODE_RADIUS: f64 = 0.2;
const NODE_INNER_RADIUS: f64 = 0.12;

/// `(rows, cols)` for `n` cards. Depends on nothing but `n` and the thresholds.
pub fn grid_shape(n: usize, t: &GridThresholds) -> (usize, usize) {
    if n <= t.single_row_max {
        (1, n.max(1))
    } else if n <= t.square_max {
        let side = (t.square_max as f64).sqrt().ceil() as usize;
        (side, side)
    } else {
        let cols = t.wide_columns.max(1);
        (n.div_ceil(cols), cols)
    }
}

/// Figure size in inches for `n` cards. Wide grids get narrower columns.
fn grid_canvas(n: usize, t: &GridThresholds) -> Canvas {
    let (rows, cols) = grid_shape(n, t);
    let col_in = if n <= t.square_max { 7.0 } else { 6.0 };
    let (w, h) = (col_in * cols as f64, 6.0 * rows as f64);
    Canvas {
        width_in: w,
        height_in: h,
        background: Color::WHITE,
    }
}

pub(crate) fn big_number_grid(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let n = dataset.len();
    let (rows, cols) = grid_shape(n, &ctx.options.grid);
    let canvas = grid_canvas(n, &ctx.options.grid);
    let top = 1.0 - GRID_TITLE_BAND_IN / canvas.height_in;
    let cell_w = 1.0 / cols as f64;
    let cell_h = top / rows as f64;
    // Description wraps to 90% of the card, which spans 9 of 10 plane units.
    let wrap_in = cell_w * canvas.width_in * 0.9 * 0.9;

    let mut cells = Vec::with_capacity(rows * cols);
    let mut panels = Vec::with_capacity(rows * cols);
    for index in 0..rows * cols {
        let (row, col) = (index / cols, index % cols);
        let bounds = Bounds {
            left: col as f64 * cell_w,
            bottom: top - (row as f64 + 1.0) * cell_h,
            width: cell_w,
            height: cell_h,
        };
        let record = dataset.records.get(index);
        let color = record.map(|_| ctx.scheme.alternating(index));
        let mut elements = Vec::new();
        if let (Some(r), Some(color)) = (record, color) {
            elements.push(
                Element::new(Shape::Card {
                    x: 0.5,
                    y: 0.5,
                    width: 9.0,
                    height: 9.0,
                    pad: 0.3,
                })
                .filled_alpha(color, 0.95)
                .with_text(
                    TextPlacement::new(
                        r.primary.clone(),
                        Point::new(5.0, 6.5),
                        SizeTier::Hero,
                        Color::WHITE,
                    )
                    .bold(),
                )
                .with_text(
                    TextPlacement::new(
                        r.secondary.clone(),
                        Point::new(5.0, 4.5),
                        SizeTier::Heading,
                        Color::WHITE,
                    )
                    .bold(),
                )
                .with_text(
                    TextPlacement::new(
                        wrap_block(
                            r.tertiary_or_empty(),
                            SizeTier::Emphasis.points(),
                            wrap_in,
                            2,
                        ),
                        Point::new(5.0, 3.0),
                        SizeTier::Emphasis,
                        Color::WHITE,
                    )
                    .alpha(0.9),
                ),
            );
            elements.push(Element::text(
                TextPlacement::new("●", Point::new(8.5, 8.5), SizeTier::Display, Color::WHITE)
                    .alpha(0.3),
            ));
        }
        cells.push(GridCell {
            index,
            row,
            col,
            bounds,
            hidden: record.is_none(),
            color,
        });
        panels.push(Panel {
            bounds,
            frame: PLANE,
            axes: None,
            elements,
            hidden: record.is_none(),
        });
    }

    Ok(Layout {
        canvas,
        title: Some(ctx.title_at(0.98)),
        panels,
        figure: Figure::BigNumberGrid(GridGeometry { rows, cols, cells }),
    })
}

/// `n` evenly spaced positions from `start` to `end` inclusive; one position sits at `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

pub(crate) fn timeline(dataset: &Dataset, ctx: &Ctx<'_>) -> Result<Layout> {
    let n = dataset.len();
    let canvas = Canvas {
        width_in: 14.0,
        height_in: 8.0,
        background: Color::WHITE,
    };
    let card_width = (TIMELINE_RIGHT - TIMELINE_LEFT) / n as f64 - TIMELINE_GUTTER;
    let drawn_width = card_width.max(0.0);
    let inches_per_unit = canvas.width_in / PLANE.x.span();
    let wrap_in = drawn_width * inches_per_unit * 0.9;

    let nodes: Vec<TimelineNode> = linspace(TIMELINE_LEFT, TIMELINE_RIGHT, n)
        .into_iter()
        .zip(&dataset.records)
        .enumerate()
        .map(|(i, (x, r))| TimelineNode {
            x,
            color: ctx.scheme.gradient_color(i),
            time: r.primary.clone(),
            title: r.secondary.clone(),
            description: r.tertiary_or_empty().to_string(),
        })
        .collect();

    let mut elements = vec![
        Element::new(Shape::Polyline {
            points: vec![
                Point::new(1.0, TIMELINE_AXIS_Y),
                Point::new(9.0, TIMELINE_AXIS_Y),
            ],
            closed: false,
        })
        .stroked(RULE_COLOR, 3.0),
    ];
    for node in &nodes {
        elements.push(
            Element::new(Shape::Card {
                x: node.x - drawn_width / 2.0,
                y: CARD_TOP - CARD_HEIGHT,
                width: drawn_width,
                height: CARD_HEIGHT,
                pad: 0.1,
            })
            .filled_alpha(node.color, 0.9)
            .with_text(
                TextPlacement::new(
                    wrap_block(&node.description, SizeTier::Caption.points(), wrap_in, 5),
                    Point::new(node.x, CARD_TOP - CARD_HEIGHT / 2.0),
                    SizeTier::Caption,
                    Color::WHITE,
                )
                .bold(),
            ),
        );
    }
    for node in &nodes {
        let at = Point::new(node.x, TIMELINE_AXIS_Y);
        elements.push(
            Element::new(Shape::Circle {
                center: at,
                radius: NODE_RADIUS,
            })
            .filled(node.color),
        );
        elements.push(
            Element::new(Shape::Circle {
                center: at,
                radius: NODE_INNER_RADIUS,
            })
            .filled(Color::WHITE)
            .with_text(
                TextPlacement::new(
                    node.time.clone(),
                    Point::new(node.x, TIMELINE_AXIS_Y + 0.5),
                    SizeTier::Emphasis,
                    node.color,
                )
                .align(HAlign::Center, VAlign::Bottom)
                .bold(),
            )
            .with_text(
                TextPlacement::new(
                    node.title.clone(),
                    Point::new(node.x, TIMELINE_AXIS_Y - 0.5),
                    SizeTier::Body,
                    ctx.scheme.text,
                )
                .align(HAlign::Center, VAlign::Top)
                .bold(),
            ),
        );
    }

    Ok(Layout {
        canvas,
        // Same spot as y = 9.2 on the plane.
        title: Some(ctx.title_at(0.92)),
        panels: vec![Panel {
            bounds: Bounds {
                left: 0.0,
                bottom: 0.0,
                width: 1.0,
                height: 1.0,
            },
            frame: PLANE,
            axes: None,
            elements,
            hidden: false,
        }],
        figure: Figure::Timeline(TimelineGeometry {
            left_margin: TIMELINE_LEFT,
            right_margin: TIMELINE_RIGHT,
            axis_y: TIMELINE_AXIS_Y,
            card_width,
            card_height: CARD_HEIGHT,
            nodes,
        }),
    })
}
