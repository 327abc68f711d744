use std::fs;
use std::path::PathBuf;

use slidechart::layout::{Layout, LayoutOptions, compute_layout};
use slidechart::models::{ChartKind, RecordShape};
use slidechart::render::{self, FontConfig, RenderConfig};
use slidechart::{parser, scheme};

fn layout_for(kind: ChartKind) -> Layout {
    let raw = match kind.record_shape() {
        RecordShape::Pair => "Q1:120,Q2:+35,Q3:-20,Q4:180",
        RecordShape::Triple => concat!(
            "98%:Uptime:Rolling twelve months of service,",
            "2.4M:Users:Monthly active,",
            "150+:Partners:Worldwide"
        ),
    };
    let data = parser::parse(raw, kind.record_shape()).unwrap();
    let mut options = LayoutOptions::default();
    if kind == ChartKind::Comparison {
        let second = parser::parse("Q1:100,Q2:40,Q3:10,Q4:150", RecordShape::Pair).unwrap();
        options = options.with_comparison(second);
    }
    // Pie and donut need non-negative slices.
    let data = if matches!(kind, ChartKind::Pie | ChartKind::Donut) {
        parser::parse("Cloud:45,Mobile:30,Desktop:15,Other:10", RecordShape::Pair).unwrap()
    } else {
        data
    };
    let s = scheme::resolve(kind.default_scheme()).unwrap();
    compute_layout(&data, kind, s, &options).unwrap()
}

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str) -> String {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("slidechart_{}.svg", name));
    maker(&path);
    let body = fs::read_to_string(&path).expect("file created");
    assert!(!body.is_empty(), "svg has content");
    fs::remove_file(&path).ok();
    body
}

#[test]
fn every_kind_renders_to_svg() {
    let config = RenderConfig {
        dpi: 72,
        ..RenderConfig::default()
    };
    for kind in ChartKind::ALL {
        let layout = layout_for(kind);
        let body = write_and_check(
            |p| render::render_to_file(&layout, p, &config).unwrap(),
            kind.as_str(),
        );
        assert!(body.contains("<svg"), "{kind}");
        let title = layout.title.as_ref().unwrap();
        assert!(body.contains(&title.content), "{kind} title missing");
    }
}

#[test]
fn svg_size_follows_canvas_and_dpi() {
    let layout = layout_for(ChartKind::Bar);
    assert_eq!(render::pixel_size(&layout, 300), (3000, 1800));
    let config = RenderConfig {
        dpi: 100,
        ..RenderConfig::default()
    };
    let body = write_and_check(
        |p| render::render_to_file(&layout, p, &config).unwrap(),
        "bar_100dpi",
    );
    assert!(body.contains("width=\"1000\""));
    assert!(body.contains("height=\"600\""));
}

#[test]
fn hidden_grid_cells_are_not_drawn() {
    let layout = layout_for(ChartKind::BigNumberGrid);
    assert_eq!(layout.panels.len(), 4);
    let config = RenderConfig {
        dpi: 72,
        ..RenderConfig::default()
    };
    let body = write_and_check(
        |p| render::render_to_file(&layout, p, &config).unwrap(),
        "grid_hidden",
    );
    assert_eq!(body.matches("Uptime").count(), 1);
    assert!(body.contains("Partners"));
}

#[test]
fn zero_dpi_is_rejected() {
    let layout = layout_for(ChartKind::Line);
    let path = std::env::temp_dir().join("slidechart_zero_dpi.svg");
    let config = RenderConfig {
        dpi: 0,
        ..RenderConfig::default()
    };
    assert!(render::render_to_file(&layout, &path, &config).is_err());
}

#[test]
fn png_with_missing_font_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let config = RenderConfig {
        dpi: 36,
        font: FontConfig::Path(dir.path().join("missing.ttf")),
    };
    let layout = layout_for(ChartKind::Bar);
    // A font registered earlier in this process is reused; otherwise this fails with a message.
    match render::render_to_file(&layout, &out, &config) {
        Ok(()) => assert!(fs::metadata(&out).unwrap().len() > 0),
        Err(e) => assert!(!e.to_string().is_empty()),
    }
}

#[test]
fn png_renders_when_a_system_font_exists() {
    // An earlier failed registration must not stop a system font from being used.
    if render::ensure_fonts_registered(&FontConfig::Auto).is_err() {
        eprintln!("no system font available; skipping PNG render");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("donut.png");
    let config = RenderConfig {
        dpi: 36,
        ..RenderConfig::default()
    };
    render::render_to_file(&layout_for(ChartKind::Donut), &out, &config).unwrap();
    assert!(fs::metadata(&out).unwrap().len() > 0);
}
