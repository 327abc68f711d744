//! slidechart
//!
//! Presentation-ready charts from compact `label:value` strings, under a
//! fixed visual identity. Pairs with the `slidechart` CLI.
//!
//! ### Features
//! - Parse `label:value` and `label:title:description` record lists
//! - Five built-in color schemes with stable hex values
//! - Pure layout engine for bar, line, pie, donut, radar, waterfall,
//!   comparison, big-number grid and timeline charts
//! - Render layouts to SVG or PNG
//!
//! ### Example
//! ```no_run
//! use slidechart::{ChartKind, LayoutOptions, RenderConfig};
//!
//! let kind = ChartKind::Donut;
//! let data = slidechart::parser::parse("Cloud:45,Mobile:30,Other:25", kind.record_shape())?;
//! let scheme = slidechart::scheme::resolve("green")?;
//! let layout = slidechart::compute_layout(&data, kind, scheme, &LayoutOptions::default())?;
//! slidechart::render::render_to_file(&layout, "share.svg", &RenderConfig::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod layout;
pub mod models;
pub mod parser;
pub mod render;
pub mod scheme;

pub use error::{ChartError, ConfigError, DataError, LayoutError};
pub use layout::{Layout, LayoutOptions, compute_layout};
pub use models::{ChartKind, DataRecord, Dataset, RecordShape};
pub use render::{FontConfig, RenderConfig};
pub use scheme::{Color, ColorScheme};
