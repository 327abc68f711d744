use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;
use crate::parser::{ValueText, parse_number};

/// How many fields a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordShape {
    /// `label:value`
    Pair,
    /// `label:title:description`
    Triple,
}

impl RecordShape {
    pub fn field_count(self) -> usize {
        match self {
            RecordShape::Pair => 2,
            RecordShape::Triple => 3,
        }
    }
}

/// One parsed data item.
///
/// Numeric charts read `primary` as the category and `secondary` as the value.
/// Timelines read (time, title, description) and big-number cards read
/// (number, title, description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    pub primary: String,
    pub secondary: String,
    pub tertiary: Option<String>,
}

impl DataRecord {
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            primary: label.into(),
            secondary: value.into(),
            tertiary: None,
        }
    }

    pub fn triple(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        tertiary: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            tertiary: Some(tertiary.into()),
        }
    }

    /// Parse `secondary` as a finite number. `index` is only used for the error.
    pub fn value_at(&self, index: usize) -> Result<f64, DataError> {
        parse_number(&self.secondary).ok_or_else(|| DataError::NotNumeric {
            index,
            field: self.secondary.clone(),
        })
    }

    pub fn tertiary_or_empty(&self) -> &str {
        self.tertiary.as_deref().unwrap_or("")
    }
}

/// Ordered records; insertion order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<DataRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DataRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataRecord> {
        self.records.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.records.iter().map(|r| r.primary.clone()).collect()
    }

    /// Numeric values in order; the first non-numeric record fails the whole call.
    pub fn values(&self) -> Result<Vec<f64>, DataError> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| r.value_at(i))
            .collect()
    }

    /// Values together with their display text.
    pub fn value_texts(&self) -> Result<Vec<ValueText>, DataError> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| ValueText::from_field(&r.secondary, i))
            .collect()
    }
}

impl FromIterator<DataRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataRecord;
    type IntoIter = std::slice::Iter<'a, DataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Chart kinds supported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Donut,
    Radar,
    Waterfall,
    /// Two value series side by side per category.
    Comparison,
    /// Headline metric cards.
    BigNumberGrid,
    /// Horizontal milestones with description cards.
    Timeline,
}

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Radar,
        ChartKind::Waterfall,
        ChartKind::Comparison,
        ChartKind::BigNumberGrid,
        ChartKind::Timeline,
    ];

    /// CLI name.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Donut => "donut",
            ChartKind::Radar => "radar",
            ChartKind::Waterfall => "waterfall",
            ChartKind::Comparison => "comparison",
            ChartKind::BigNumberGrid => "big-numbers",
            ChartKind::Timeline => "timeline",
        }
    }

    pub fn record_shape(self) -> RecordShape {
        match self {
            ChartKind::BigNumberGrid | ChartKind::Timeline => RecordShape::Triple,
            _ => RecordShape::Pair,
        }
    }

    pub fn default_scheme(self) -> &'static str {
        match self {
            ChartKind::BigNumberGrid | ChartKind::Timeline => "gold_blue",
            _ => "blue",
        }
    }

    pub fn default_title(self, scheme_name: &str) -> String {
        match self {
            ChartKind::BigNumberGrid => "Key Metrics".to_string(),
            ChartKind::Timeline => "Project Timeline".to_string(),
            other => format!(
                "{scheme_name} - {} Chart",
                other.as_str().to_ascii_uppercase()
            ),
        }
    }

    /// Default output file name for a scheme key, e.g. `chart_bar_blue.png`.
    pub fn default_file_name(self, scheme_key: &str) -> String {
        match self {
            ChartKind::BigNumberGrid => format!("big_numbers_{scheme_key}.png"),
            ChartKind::Timeline => format!("timeline_{scheme_key}.png"),
            other => format!("chart_{}_{scheme_key}.png", other.as_str()),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "big_numbers" | "bignumbergrid" | "cards" => return Ok(ChartKind::BigNumberGrid),
            _ => {}
        }
        ChartKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("unknown chart kind: {s}"))
    }
}
