use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use slidechart::models::RecordShape;
use slidechart::{ChartKind, FontConfig, LayoutOptions, RenderConfig};
use slidechart::{parser, render, scheme};

#[derive(Parser, Debug)]
#[command(
    name = "slidechart",
    version,
    about = "Generate presentation-ready charts from label:value strings"
)]
struct Cli {
    /// Chart kind: bar, line, pie, donut, radar, waterfall, comparison, big-numbers, timeline
    #[arg(short = 't', long = "type", default_value = "bar")]
    kind: ChartKind,
    /// Records separated by commas, e.g. "Q1:120,Q2:150" or "2023:Launch:First release"
    #[arg(short, long, required_unless_present = "list_schemes")]
    data: Option<String>,
    /// Second value series for comparison charts (same labels, same count)
    #[arg(short = 's', long)]
    compare: Option<String>,
    /// Legend names for the two comparison series, e.g. "2023,2024"
    #[arg(short, long)]
    labels: Option<String>,
    /// Color scheme key (blue, orange, green, gold_blue, multilayer)
    #[arg(short, long)]
    color: Option<String>,
    /// Chart title (defaults per chart kind)
    #[arg(short = 'T', long)]
    title: Option<String>,
    /// Output path; `.svg` writes SVG, anything else PNG
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output resolution in pixels per inch
    #[arg(long, default_value_t = 300)]
    dpi: u32,
    /// Font file for PNG output (searched in system locations when omitted)
    #[arg(long, env = "SLIDECHART_FONT")]
    font: Option<PathBuf>,
    /// Locale for axis numbers (en, de, fr, es, it, pt, nl)
    #[arg(long, default_value = "en")]
    locale: String,
    /// Also write the computed layout as JSON to this path
    #[arg(long)]
    layout_json: Option<PathBuf>,
    /// Print the available color schemes and exit
    #[arg(long, default_value_t = false)]
    list_schemes: bool,
    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_labels(s: &str) -> Result<[String; 2]> {
    let parts: Vec<String> = s.split(',').map(|x| x.trim().to_string()).collect();
    match <[String; 2]>::try_from(parts) {
        Ok(labels) => Ok(labels),
        Err(parts) => bail!(
            "--labels expects two comma-separated names, got {}",
            parts.len()
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.list_schemes {
        for s in scheme::all() {
            println!("{:<12} {:<26} {}", s.key, s.name, s.primary);
        }
        return Ok(());
    }

    let raw = cli.data.as_deref().unwrap_or_default();
    let data = parser::parse(raw, cli.kind.record_shape())?;
    log::info!("parsed {} record(s) for a {} chart", data.len(), cli.kind);

    let color_key = cli
        .color
        .clone()
        .unwrap_or_else(|| cli.kind.default_scheme().to_string());
    let scheme = scheme::resolve(&color_key)?;
    log::info!("using color scheme {} ({})", scheme.key, scheme.name);

    let mut options = LayoutOptions {
        title: cli.title.clone(),
        locale: cli.locale.clone(),
        ..LayoutOptions::default()
    };
    if let Some(compare) = cli.compare.as_deref() {
        let series = parser::parse(compare, RecordShape::Pair)?;
        log::info!("parsed {} comparison record(s)", series.len());
        options.comparison = Some(series);
    }
    if let Some(labels) = cli.labels.as_deref() {
        options.series_labels = parse_labels(labels)?;
    }

    let layout = slidechart::compute_layout(&data, cli.kind, scheme, &options)?;

    if let Some(path) = cli.layout_json.as_ref() {
        let json = serde_json::to_string_pretty(&layout)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("layout written to {}", path.display());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(cli.kind.default_file_name(scheme.key)));
    let config = RenderConfig {
        dpi: cli.dpi,
        font: cli.font.clone().map(FontConfig::Path).unwrap_or_default(),
    };
    render::render_to_file(&layout, &output, &config)
        .with_context(|| format!("rendering {}", output.display()))?;

    println!("Chart saved: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn labels_need_exactly_two_names() {
        assert_eq!(
            parse_labels("2023, 2024").unwrap(),
            ["2023".to_string(), "2024".to_string()]
        );
        assert!(parse_labels("only").is_err());
    }
}
