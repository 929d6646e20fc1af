//! Terminal chart drawing
//!
//! Draws a `ChartSpec` as plain text for the command-line front end.

use super::spec::{ChartKind, ChartSpec};

/// Text canvas dimensions
#[derive(Debug, Clone, Copy)]
pub struct TextCanvas {
    /// Columns available for the longest bar
    pub bar_width: usize,
    /// Rows of the line plot
    pub line_height: usize,
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self {
            bar_width: 40,
            line_height: 8,
        }
    }
}

impl TextCanvas {
    pub fn draw(&self, spec: &ChartSpec) -> String {
        match spec.kind {
            ChartKind::Bar => self.draw_bars(spec),
            ChartKind::Line => self.draw_line(spec),
        }
    }

    fn draw_bars(&self, spec: &ChartSpec) -> String {
        let mut out = format!("{}\n", spec.dataset.label);
        if spec.is_empty() {
            out.push_str("  No data\n");
            return out;
        }

        let label_width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let floor = if spec.y_begin_at_zero { 0.0 } else { min_value(spec) };
        let ceiling = max_value(spec).max(floor);
        let span = ceiling - floor;

        for (label, value) in spec.points() {
            let filled = if span > 0.0 {
                (((value - floor) / span) * self.bar_width as f64).round().max(0.0) as usize
            } else {
                0
            };
            out.push_str(&format!(
                "  {:<lw$} {:<bw$} {:.1}\n",
                label,
                "█".repeat(filled.min(self.bar_width)),
                value,
                lw = label_width,
                bw = self.bar_width,
            ));
        }
        out
    }

    fn draw_line(&self, spec: &ChartSpec) -> String {
        let mut out = format!("{}\n", spec.dataset.label);
        if spec.is_empty() {
            out.push_str("  No data\n");
            return out;
        }

        let rows = self.line_height.max(2);

        // Pad the y range by 10% so points don't sit on the frame
        let mut low = min_value(spec);
        let mut high = max_value(spec);
        if spec.y_begin_at_zero {
            low = low.min(0.0);
        }
        let range = high - low;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        high += padding;
        if !spec.y_begin_at_zero {
            low -= padding;
        }

        let point_rows: Vec<usize> = spec
            .dataset
            .values
            .iter()
            .map(|v| (((high - v) / (high - low)) * (rows - 1) as f64).round() as usize)
            .collect();

        for row in 0..rows {
            let level = high - (row as f64 / (rows - 1) as f64) * (high - low);
            out.push_str(&format!("{:>8.1} │", level));
            for &point_row in &point_rows {
                let cell = if row == point_row {
                    '●'
                } else if spec.dataset.fill && row > point_row {
                    '░'
                } else {
                    ' '
                };
                out.push(cell);
                out.push(' ');
            }
            out.push('\n');
        }

        out.push_str(&format!("{:>8} └{}\n", "", "──".repeat(point_rows.len())));

        let first = spec.labels.first().map(String::as_str).unwrap_or("");
        let last = spec.labels.last().map(String::as_str).unwrap_or("");
        if spec.labels.len() > 1 {
            out.push_str(&format!("{:>8}  {} … {}\n", "", first, last));
        } else {
            out.push_str(&format!("{:>8}  {}\n", "", first));
        }
        out
    }
}

fn min_value(spec: &ChartSpec) -> f64 {
    spec.dataset.values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_value(spec: &ChartSpec) -> f64 {
    spec.dataset.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
