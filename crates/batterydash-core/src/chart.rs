//! Chart Models
//!
//! In-memory datasets for the three dashboard charts. The front end draws
//! whatever is in these models; the dashboard mutates them and calls
//! [`Chart::update`] to request a redraw.

use serde::{Deserialize, Serialize};

/// Surface id of the rolling power chart
pub const POWER_CHART: &str = "power-chart";
/// Surface id of the component breakdown chart
pub const COMPONENT_CHART: &str = "component-chart";
/// Surface id of the hourly energy chart
pub const HOURLY_CHART: &str = "hourly-chart";

/// Number of samples kept by the power chart
pub const POWER_WINDOW_LEN: usize = 6;

/// Hours covered by each bar of the hourly chart
pub const HOURLY_BUCKET_HOURS: u32 = 3;

/// Component categories and their share of total consumption
pub const COMPONENT_WEIGHTS: [(&str, f64); 5] = [
    ("Drive Motor", 0.40),
    ("Climate Control", 0.30),
    ("Electronics", 0.15),
    ("Lighting", 0.10),
    ("Auxiliaries", 0.05),
];

const PRIMARY_BLUE: &str = "#4285F4";
const COMPONENT_COLORS: [&str; 5] = [PRIMARY_BLUE, "#EA4335", "#FBBC05", "#34A853", "#9AA0A6"];

/// Chart types supported by the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChartKind {
    /// Line chart
    #[serde(rename = "line")]
    Line,
    /// Doughnut chart
    #[serde(rename = "doughnut")]
    Doughnut,
    /// Vertical bar chart
    #[serde(rename = "bar")]
    Bar,
}

/// Legend placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Legend {
    /// No legend
    #[serde(rename = "hidden")]
    Hidden,
    /// Legend to the right of the chart
    #[serde(rename = "right")]
    Right,
}

/// A single series of values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    /// Series name shown in tooltips and legends
    pub label: Option<String>,
    /// One value per label
    pub values: Vec<f64>,
    /// One colour for the whole series, or one per point
    pub colors: Vec<String>,
}

impl Dataset {
    /// Colour for the point at `index`
    pub fn color_at(&self, index: usize) -> Option<&str> {
        match self.colors.len() {
            0 => None,
            1 => self.colors.first().map(String::as_str),
            _ => self.colors.get(index).map(String::as_str),
        }
    }
}

/// A chart bound to a rendering surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    /// Id of the surface the chart is drawn on
    pub surface: String,
    /// Chart type
    pub kind: ChartKind,
    /// Category or time labels, one per value
    pub labels: Vec<String>,
    /// The plotted series
    pub dataset: Dataset,
    /// Legend placement
    pub legend: Legend,
    /// Start the value axis at zero
    pub begin_at_zero: bool,
    /// Title of the value axis
    pub y_axis_title: Option<String>,
    /// Bumped on every [`Chart::update`]
    #[serde(skip)]
    revision: u64,
}

impl Chart {
    /// Rolling line chart of instantaneous power
    pub fn power() -> Self {
        Self {
            surface: POWER_CHART.to_string(),
            kind: ChartKind::Line,
            labels: ["14:10", "14:20", "14:30", "14:40", "14:50", "15:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            dataset: Dataset {
                label: Some("Power (kW)".to_string()),
                values: vec![25.0, 32.0, 28.0, 40.0, 35.0, 30.0],
                colors: vec![PRIMARY_BLUE.to_string()],
            },
            legend: Legend::Hidden,
            begin_at_zero: true,
            y_axis_title: Some("kW".to_string()),
            revision: 0,
        }
    }

    /// Doughnut chart of consumption by component
    pub fn component() -> Self {
        Self {
            surface: COMPONENT_CHART.to_string(),
            kind: ChartKind::Doughnut,
            labels: COMPONENT_WEIGHTS
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            dataset: Dataset {
                label: None,
                values: vec![24.5, 61.3, 8.2, 3.8, 2.0],
                colors: COMPONENT_COLORS.iter().map(|c| c.to_string()).collect(),
            },
            legend: Legend::Right,
            begin_at_zero: false,
            y_axis_title: None,
            revision: 0,
        }
    }

    /// Bar chart of energy per 3-hour bucket
    pub fn hourly() -> Self {
        let buckets = 24 / HOURLY_BUCKET_HOURS;
        Self {
            surface: HOURLY_CHART.to_string(),
            kind: ChartKind::Bar,
            labels: (0..buckets)
                .map(|b| format!("{:02}:00", b * HOURLY_BUCKET_HOURS))
                .collect(),
            dataset: Dataset {
                label: Some("Energy (kWh)".to_string()),
                values: vec![23.0, 1.8, 4.2, 6.8, 5.4, 7.2, 8.9, 3.6],
                colors: vec![PRIMARY_BLUE.to_string()],
            },
            legend: Legend::Hidden,
            begin_at_zero: true,
            y_axis_title: Some("kWh".to_string()),
            revision: 0,
        }
    }

    /// Number of points currently held
    pub fn len(&self) -> usize {
        self.dataset.values.len()
    }

    /// Whether the chart holds no points
    pub fn is_empty(&self) -> bool {
        self.dataset.values.is_empty()
    }

    /// Append a labeled point and evict the oldest, keeping the length fixed
    pub fn push_rolling(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.dataset.values.push(value);
        self.labels.remove(0);
        self.dataset.values.remove(0);
    }

    /// Replace every value in the dataset
    pub fn replace_values(&mut self, values: Vec<f64>) {
        self.dataset.values = values;
    }

    /// Overwrite a single value. Returns false if `index` is out of range.
    pub fn set_value(&mut self, index: usize, value: f64) -> bool {
        match self.dataset.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Request a redraw
    pub fn update(&mut self) {
        self.revision += 1;
    }

    /// Redraw counter; changes whenever the chart asks to be redrawn
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Labeled points in display order
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.dataset.values.iter().copied())
    }
}

/// Bucket of the hourly chart that `hour` falls into
pub fn hourly_bucket(hour: u32) -> usize {
    (hour / HOURLY_BUCKET_HOURS) as usize
}

/// Whether `hour` starts a bucket of the hourly chart
pub fn is_bucket_hour(hour: u32) -> bool {
    hour % HOURLY_BUCKET_HOURS == 0
}
