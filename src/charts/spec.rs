//! Chart descriptions
//!
//! A `ChartSpec` is everything needed to draw one chart: kind, x labels,
//! the single dataset and axis options. Specs are plain values; drawing
//! them is the job of a front end (see `charts::text`).

/// Chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// One series of values
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    /// Fill colors, one per point for bar charts or a single entry
    pub background: Vec<&'static str>,
    pub border: Option<&'static str>,
    pub border_width: f64,
    /// Fill the area under a line
    pub fill: bool,
    /// Bezier smoothing, 0.0 for straight segments
    pub tension: f64,
}

impl Dataset {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            background: Vec::new(),
            border: None,
            border_width: 0.0,
            fill: false,
            tension: 0.0,
        }
    }

    /// Color used to fill point `index`
    pub fn background_at(&self, index: usize) -> Option<&'static str> {
        match self.background.len() {
            0 => None,
            1 => Some(self.background[0]),
            n => Some(self.background[index % n]),
        }
    }
}

/// A complete chart description
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub dataset: Dataset,
    /// Pin the y axis origin at zero
    pub y_begin_at_zero: bool,
    pub show_legend: bool,
}

impl ChartSpec {
    /// Labels paired with their values
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.dataset.values.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.values.is_empty()
    }
}
