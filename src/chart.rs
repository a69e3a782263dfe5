//! # Module: Chart Adapter
//!
//! ## Responsibility
//! Creates or incrementally updates the three dashboard charts from
//! pre-aggregated series. A [`ChartHandle`] is the renderer-independent chart
//! object; the terminal layer draws it.
//!
//! ## Guarantees
//! - Exactly one data series per chart
//! - Presenting an unchanged series is a no-op (the revision does not move)
//! - Tooltips always format values with `format::format_number`
//!
//! ## NOT Responsible For
//! - Computing aggregates from records (the API serves them as-is)

use crate::format::format_number;
use crate::model::AggregateSeries;

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Palette for proportional charts, cycled to the label count.
pub const PROPORTIONAL_PALETTE: [Rgb; 6] = [
    Rgb(220, 53, 69),
    Rgb(255, 193, 7),
    Rgb(200, 200, 200),
    Rgb(108, 117, 125),
    Rgb(13, 110, 253),
    Rgb(25, 135, 84),
];

/// Single-series colour for bar and line charts.
pub const SERIES_COLOR: Rgb = Rgb(13, 110, 253);

/// Visual form of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Proportional (donut).
    Donut,
    /// Categorical bars.
    Bar,
    /// Time-series line.
    Line,
}

/// Dashboard area a chart is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSurface {
    /// Risk distribution.
    RiskDistribution,
    /// Spend by category.
    SpendByCategory,
    /// Usage trend.
    UsageTrend,
}

impl ChartSurface {
    /// Panel title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::RiskDistribution => "RISK DISTRIBUTION",
            Self::SpendByCategory => "SPEND BY CATEGORY",
            Self::UsageTrend => "USAGE TREND",
        }
    }
}

/// Legend placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Legend {
    /// Above the plot.
    #[default]
    Top,
    /// Beside the plot.
    Right,
    /// Not shown.
    Hidden,
}

/// Per-chart display options.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Legend placement.
    pub legend: Legend,
    /// Draw bars horizontally.
    pub horizontal: bool,
    /// Start the value axis at zero.
    pub begin_at_zero: bool,
    /// Series label used in tooltips.
    pub dataset_label: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            legend: Legend::Top,
            horizontal: false,
            begin_at_zero: false,
            dataset_label: "# of Items".to_string(),
        }
    }
}

impl DisplayOptions {
    /// Options for the risk distribution donut (legend on the right).
    pub fn risk_distribution() -> Self {
        Self {
            legend: Legend::Right,
            ..Self::default()
        }
    }

    /// Options for the horizontal spend bars.
    pub fn spend_by_category() -> Self {
        Self {
            legend: Legend::Hidden,
            horizontal: true,
            begin_at_zero: true,
            ..Self::default()
        }
    }

    /// Options for the usage trend line.
    pub fn usage_trend() -> Self {
        Self {
            legend: Legend::Hidden,
            begin_at_zero: true,
            ..Self::default()
        }
    }
}

/// A constructed chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    surface: ChartSurface,
    kind: ChartKind,
    labels: Vec<String>,
    values: Vec<f64>,
    colors: Vec<Rgb>,
    options: DisplayOptions,
    revision: u64,
}

impl ChartHandle {
    /// Surface the chart is bound to.
    pub fn surface(&self) -> ChartSurface {
        self.surface
    }

    /// Chart kind.
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Current labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Current values, index-aligned with `labels`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Colours assigned at construction.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Display options.
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Number of visible changes applied so far (0 after construction).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Colour for point `index`.
    pub fn color_at(&self, index: usize) -> Rgb {
        if self.colors.is_empty() {
            return SERIES_COLOR;
        }
        self.colors[index % self.colors.len()]
    }

    /// Tooltip text for point `index`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let value = *self.values.get(index)?;
        let label = &self.options.dataset_label;
        if label.is_empty() {
            Some(format_number(value))
        } else {
            Some(format!("{}: {}", label, format_number(value)))
        }
    }

    /// Sum of all values (used for proportions).
    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| v.is_finite()).sum()
    }

    /// Largest value, or 0 for an empty series.
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

fn palette_for(kind: ChartKind, count: usize) -> Vec<Rgb> {
    match kind {
        ChartKind::Donut => PROPORTIONAL_PALETTE.iter().copied().cycle().take(count).collect(),
        ChartKind::Bar | ChartKind::Line => vec![SERIES_COLOR],
    }
}

/// Creates a chart, or updates an existing one in place.
///
/// With `handle == None` a new chart bound to `surface` is constructed. With
/// an existing handle only labels and values are replaced, and the revision
/// advances only when they actually differ.
pub fn present(
    handle: Option<ChartHandle>,
    surface: ChartSurface,
    kind: ChartKind,
    series: &AggregateSeries,
    options: DisplayOptions,
) -> ChartHandle {
    let series = series.clone().aligned();
    match handle {
        Some(mut chart) => {
            if chart.labels != series.labels || chart.values != series.values {
                chart.colors = palette_for(chart.kind, series.labels.len());
                chart.labels = series.labels;
                chart.values = series.values;
                chart.revision += 1;
                tracing::debug!(
                    surface = ?chart.surface,
                    revision = chart.revision,
                    "chart updated"
                );
            }
            chart
        }
        None => {
            tracing::debug!(?surface, ?kind, points = series.len(), "chart created");
            ChartHandle {
                surface,
                kind,
                colors: palette_for(kind, series.labels.len()),
                labels: series.labels,
                values: series.values,
                options,
                revision: 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(labels: &[&str], values: &[f64]) -> AggregateSeries {
        AggregateSeries::new(
            labels.iter().map(|s| s.to_string()).collect(),
            values.to_vec(),
        )
    }

    #[test]
    fn test_present_creates_with_palette_sized_to_labels() {
        let s = series(&["High", "Medium", "Low"], &[3.0, 5.0, 9.0]);
        let chart = present(
            None,
            ChartSurface::RiskDistribution,
            ChartKind::Donut,
            &s,
            DisplayOptions::risk_distribution(),
        );
        assert_eq!(chart.revision(), 0);
        assert_eq!(chart.colors().len(), 3);
        assert_eq!(chart.colors()[0], PROPORTIONAL_PALETTE[0]);
        assert_eq!(chart.options().legend, Legend::Right);
    }

    #[test]
    fn test_donut_palette_cycles_past_six_labels() {
        let labels = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let s = series(&labels, &[1.0; 8]);
        let chart = present(
            None,
            ChartSurface::RiskDistribution,
            ChartKind::Donut,
            &s,
            DisplayOptions::default(),
        );
        assert_eq!(chart.colors().len(), 8);
        assert_eq!(chart.colors()[6], PROPORTIONAL_PALETTE[0]);
    }

    #[test]
    fn test_bar_uses_single_series_color() {
        let s = series(&["SaaS", "Storage"], &[10.0, 20.0]);
        let chart = present(
            None,
            ChartSurface::SpendByCategory,
            ChartKind::Bar,
            &s,
            DisplayOptions::spend_by_category(),
        );
        assert_eq!(chart.colors(), &[SERIES_COLOR]);
        assert_eq!(chart.color_at(1), SERIES_COLOR);
        assert!(chart.options().horizontal);
    }

    #[test]
    fn test_update_in_place_bumps_revision() {
        let first = series(&["Mon", "Tue"], &[1.0, 2.0]);
        let chart = present(
            None,
            ChartSurface::UsageTrend,
            ChartKind::Line,
            &first,
            DisplayOptions::usage_trend(),
        );
        let second = series(&["Mon", "Tue", "Wed"], &[1.0, 2.0, 4.0]);
        let chart = present(
            Some(chart),
            ChartSurface::UsageTrend,
            ChartKind::Line,
            &second,
            DisplayOptions::usage_trend(),
        );
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.labels().len(), 3);
        assert_eq!(chart.values()[2], 4.0);
    }

    #[test]
    fn test_donut_update_resizes_palette() {
        let chart = present(
            None,
            ChartSurface::RiskDistribution,
            ChartKind::Donut,
            &series(&[], &[]),
            DisplayOptions::risk_distribution(),
        );
        assert!(chart.colors().is_empty());

        let filled = series(&["High", "Medium", "Low"], &[3.0, 5.0, 9.0]);
        let chart = present(
            Some(chart),
            ChartSurface::RiskDistribution,
            ChartKind::Donut,
            &filled,
            DisplayOptions::risk_distribution(),
        );
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.colors(), &PROPORTIONAL_PALETTE[..3]);
        assert_eq!(chart.color_at(2), PROPORTIONAL_PALETTE[2]);
        assert_ne!(chart.color_at(0), SERIES_COLOR);
    }

    #[test]
    fn test_identical_series_is_idempotent() {
        let s = series(&["Mon", "Tue"], &[1.0, 2.0]);
        let once = present(
            None,
            ChartSurface::UsageTrend,
            ChartKind::Line,
            &s,
            DisplayOptions::usage_trend(),
        );
        let twice = present(
            Some(once.clone()),
            ChartSurface::UsageTrend,
            ChartKind::Line,
            &s,
            DisplayOptions::usage_trend(),
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tooltip_uses_number_formatting() {
        let s = series(&["Storage"], &[12345.0]);
        let chart = present(
            None,
            ChartSurface::SpendByCategory,
            ChartKind::Bar,
            &s,
            DisplayOptions::default(),
        );
        assert_eq!(chart.tooltip(0).as_deref(), Some("# of Items: 12,345"));
        assert_eq!(chart.tooltip(5), None);
    }

    #[test]
    fn test_totals() {
        let s = series(&["a", "b"], &[2.0, 6.0]);
        let chart = present(
            None,
            ChartSurface::RiskDistribution,
            ChartKind::Donut,
            &s,
            DisplayOptions::default(),
        );
        assert_eq!(chart.total(), 8.0);
        assert_eq!(chart.max_value(), 6.0);
    }
}
