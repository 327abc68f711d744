use slidechart::error::{ChartError, LayoutError};
use slidechart::layout::{Figure, LayoutOptions, compute_layout};
use slidechart::models::{ChartKind, Dataset, RecordShape};
use slidechart::{parser, scheme};

fn pairs(raw: &str) -> Dataset {
    parser::parse(raw, RecordShape::Pair).unwrap()
}

fn arcs(raw: &str, kind: ChartKind) -> slidechart::layout::ArcGeometry {
    let layout = compute_layout(
        &pairs(raw),
        kind,
        scheme::resolve("blue").unwrap(),
        &LayoutOptions::default(),
    )
    .unwrap();
    match layout.figure {
        Figure::Pie(g) | Figure::Donut(g) => g,
        other => panic!("expected arc geometry, got {:?}", other.kind()),
    }
}

#[test]
fn sweeps_cover_the_full_circle() {
    for raw in ["A:1,B:1,C:1", "Cloud:45,Mobile:30,Desktop:15,Other:10", "X:0.3,Y:7,Z:1e3"] {
        let g = arcs(raw, ChartKind::Pie);
        let total: f64 = g.wedges.iter().map(|w| w.sweep_deg).sum();
        assert!((total - 360.0).abs() < 1e-6, "{raw}: {total}");
    }
}

#[test]
fn wedges_run_clockwise_from_twelve_oclock() {
    let g = arcs("A:50,B:30,C:20", ChartKind::Pie);
    let starts: Vec<f64> = g.wedges.iter().map(|w| w.start_deg).collect();
    assert!((starts[0] - 90.0).abs() < 1e-9);
    assert!((starts[1] - -90.0).abs() < 1e-9);
    assert!((starts[2] - -198.0).abs() < 1e-9);
    let percents: Vec<&str> = g.wedges.iter().map(|w| w.percent.as_str()).collect();
    assert_eq!(percents, vec!["50.0%", "30.0%", "20.0%"]);
}

#[test]
fn only_the_first_largest_wedge_is_exploded() {
    let g = arcs("A:10,B:40,C:40,D:10", ChartKind::Pie);
    let exploded: Vec<bool> = g.wedges.iter().map(|w| w.exploded).collect();
    assert_eq!(exploded, vec![false, true, false, false]);
    let c = g.wedges[1].center;
    assert!(((c.x * c.x + c.y * c.y).sqrt() - 0.05).abs() < 1e-9);
    assert_eq!(g.wedges[0].center.x, 0.0);
}

#[test]
fn donut_shows_rounded_total() {
    let g = arcs("A:33.4,B:33.3,C:33.3", ChartKind::Donut);
    assert_eq!(g.center_label.as_deref(), Some("100"));
    assert_eq!(g.hole_radius, 0.65);
    assert!(arcs("A:1", ChartKind::Pie).center_label.is_none());
}

#[test]
fn wedge_colors_cycle_through_gradient() {
    let s = scheme::resolve("blue").unwrap();
    let g = arcs("A:1,B:1,C:1,D:1,E:1", ChartKind::Pie);
    assert_eq!(g.wedges[4].color, s.gradient[0]);
    assert_eq!(g.wedges[1].color, s.gradient[1]);
}

#[test]
fn negative_slice_is_rejected() {
    let err = compute_layout(
        &pairs("A:10,B:-5"),
        ChartKind::Pie,
        scheme::resolve("blue").unwrap(),
        &LayoutOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ChartError::Layout(LayoutError::NegativeSlice {
            label: "B".to_string()
        })
    );
}

#[test]
fn all_zero_slices_are_rejected() {
    let err = compute_layout(
        &pairs("A:0,B:0"),
        ChartKind::Donut,
        scheme::resolve("blue").unwrap(),
        &LayoutOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, ChartError::Layout(LayoutError::ZeroTotal));
}
