use slidechart::layout::{Figure, GridGeometry, LayoutOptions, TimelineGeometry, compute_layout};
use slidechart::models::{ChartKind, RecordShape};
use slidechart::{parser, scheme};

const METRICS: [&str; 5] = [
    "98%:Uptime:Rolling twelve months",
    "2.4M:Users:Monthly active",
    "150+:Partners:Across 30 countries",
    "4.8:Rating:App store average",
    "24/7:Support:Follow the sun",
];

fn grid(n: usize) -> (GridGeometry, usize, usize) {
    let raw = METRICS[..n].join(",");
    let data = parser::parse(&raw, RecordShape::Triple).unwrap();
    let layout = compute_layout(
        &data,
        ChartKind::BigNumberGrid,
        scheme::resolve("gold_blue").unwrap(),
        &LayoutOptions::default(),
    )
    .unwrap();
    let visible = layout.visible_panels().count();
    let total = layout.panels.len();
    let Figure::BigNumberGrid(g) = layout.figure else {
        panic!("expected grid geometry");
    };
    (g, visible, total)
}

fn timeline(raw: &str) -> TimelineGeometry {
    let data = parser::parse(raw, RecordShape::Triple).unwrap();
    let layout = compute_layout(
        &data,
        ChartKind::Timeline,
        scheme::resolve("gold_blue").unwrap(),
        &LayoutOptions::default(),
    )
    .unwrap();
    let Figure::Timeline(t) = layout.figure else {
        panic!("expected timeline geometry");
    };
    t
}

#[test]
fn five_cards_fill_three_columns() {
    let (g, visible, total) = grid(5);
    assert_eq!((g.rows, g.cols), (2, 3));
    assert_eq!(g.cells.len(), 6);
    assert!(g.cells[5].hidden);
    assert!(g.cells[..5].iter().all(|c| !c.hidden));
    assert_eq!((visible, total), (5, 6));
    assert_eq!((g.cells[4].row, g.cells[4].col), (1, 1));
}

#[test]
fn three_cards_use_a_square() {
    let (g, visible, _) = grid(3);
    assert_eq!((g.rows, g.cols), (2, 2));
    assert!(g.cells[3].hidden);
    assert_eq!(g.cells[3].color, None);
    assert_eq!(visible, 3);
}

#[test]
fn two_cards_share_one_row() {
    let (g, _, _) = grid(2);
    assert_eq!((g.rows, g.cols), (1, 2));
    assert!(g.cells.iter().all(|c| !c.hidden));
}

#[test]
fn card_colors_alternate_by_flat_index() {
    let s = scheme::resolve("gold_blue").unwrap();
    let (g, _, _) = grid(5);
    let colors: Vec<_> = g.cells.iter().map(|c| c.color).collect();
    assert_eq!(
        colors,
        vec![
            Some(s.primary),
            Some(s.accent),
            Some(s.primary),
            Some(s.accent),
            Some(s.primary),
            None
        ]
    );
}

#[test]
fn cells_tile_below_the_title() {
    let (g, _, _) = grid(4);
    let top = g.cells[0].bounds.bottom + g.cells[0].bounds.height;
    assert!(top < 1.0);
    assert!((g.cells[2].bounds.bottom).abs() < 1e-9);
    assert!((g.cells[1].bounds.left - 0.5).abs() < 1e-9);
}

#[test]
fn timeline_nodes_are_evenly_spaced() {
    let t = timeline("Q1:Plan:Scope,Q2:Build:Ship beta,Q3:Launch:GA release");
    let xs: Vec<f64> = t.nodes.iter().map(|n| n.x).collect();
    assert_eq!(xs, vec![1.5, 5.0, 8.5]);
    assert!((t.card_width - (7.0 / 3.0 - 0.2)).abs() < 1e-9);
    assert_eq!(t.nodes[1].title, "Build");
    assert_eq!(t.nodes[2].description, "GA release");
}

#[test]
fn timeline_colors_cycle_through_gradient() {
    let s = scheme::resolve("gold_blue").unwrap();
    let t = timeline("a:A:x,b:B:y,c:C:z,d:D:w");
    assert_eq!(t.nodes[3].color, s.gradient[0]);
    assert_eq!(t.nodes[2].color, s.gradient[2]);
}

#[test]
fn single_milestone_sits_at_left_margin() {
    let t = timeline("2024:Kickoff:Team formed");
    assert_eq!(t.nodes.len(), 1);
    assert_eq!(t.nodes[0].x, t.left_margin);
    assert!((t.card_width - 6.8).abs() < 1e-9);
}
