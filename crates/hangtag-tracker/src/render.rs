//! # View Payloads
//!
//! The data shapes handed to the external view collaborators: chart
//! payloads for the analysis page and QR options for hang tag printing.
//!
//! ## Division of Labor
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Engine vs. View Collaborators                           │
//! │                                                                         │
//! │  THIS MODULE (engine)                EXTERNAL (view)                    │
//! │  ────────────────────                ───────────────                    │
//! │  • Precomputed {labels, datasets}    • Canvas drawing                   │
//! │  • Chart kind per report             • Colors, tension, legends         │
//! │  • QR text + options                 • QR pixel rendering, download     │
//! │                                                                         │
//! │  The ChartRenderer / QrRenderer traits are the seams; the engine       │
//! │  never draws a pixel.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use std::collections::BTreeMap;

use hangtag_core::analytics::{
    self, DailyCount, ForecastPoint, SalesCount, TurnoverPoint,
};
use hangtag_core::{SalesEvent, Sku};

// =============================================================================
// Render Error
// =============================================================================

/// A view collaborator failed to draw.
#[derive(Debug, Error)]
#[error("Rendering failed: {0}")]
pub struct RenderError(pub String);

// =============================================================================
// Chart Payloads
// =============================================================================

/// Which mark the chart collaborator should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChartKind {
    Bar,
    Line,
}

/// One labeled series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u32>,
}

/// A precomputed chart: category labels plus one or more series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// The chart drawing collaborator contract.
pub trait ChartRenderer {
    /// Draws one chart from precomputed series.
    fn render(&mut self, kind: ChartKind, data: &ChartData) -> Result<(), RenderError>;
}

// =============================================================================
// Chart Builders
// =============================================================================

/// Fast-selling ranking as a bar chart; `None` when nothing was sold yet
/// (the analysis page skips the empty chart).
pub fn fast_sellers_chart(counts: &SalesCount) -> Option<ChartData> {
    let ranked = analytics::top_sellers_default(counts);
    if ranked.is_empty() {
        return None;
    }

    Some(ChartData {
        labels: ranked.iter().map(|(sku, _)| sku.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Units Sold".to_string(),
            data: ranked.iter().map(|&(_, sold)| sold).collect(),
        }],
    })
}

/// Stock against sold, per SKU, as a two-series line chart.
pub fn turnover_chart(stock: &BTreeMap<Sku, u32>, counts: &SalesCount) -> ChartData {
    let series: Vec<TurnoverPoint> = analytics::turnover_series(stock, counts);

    ChartData {
        labels: series.iter().map(|p| p.sku.to_string()).collect(),
        datasets: vec![
            Dataset {
                label: "Stock".to_string(),
                data: series.iter().map(|p| p.stock).collect(),
            },
            Dataset {
                label: "Sold".to_string(),
                data: series.iter().map(|p| p.sold).collect(),
            },
        ],
    }
}

/// Sales per day as a line chart; `None` when the log is empty.
pub fn sales_trend_chart(sales: &[SalesEvent]) -> Option<ChartData> {
    let trend: Vec<DailyCount> = analytics::daily_trend(sales);
    if trend.is_empty() {
        return None;
    }

    Some(ChartData {
        labels: trend.iter().map(|d| d.day.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Sales per Day".to_string(),
            data: trend.iter().map(|d| d.count).collect(),
        }],
    })
}

/// Projected demand per SKU as a bar chart.
pub fn forecast_chart(stock: &BTreeMap<Sku, u32>, counts: &SalesCount) -> ChartData {
    let points: Vec<ForecastPoint> = analytics::forecast(stock, counts);

    ChartData {
        labels: points.iter().map(|p| p.sku.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Forecasted Demand".to_string(),
            data: points.iter().map(|p| p.projected).collect(),
        }],
    }
}

// =============================================================================
// QR Rendering
// =============================================================================

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CorrectionLevel {
    Low,
    Medium,
    Quartile,
    High,
}

/// Options for rendering a hang tag QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QrOptions {
    pub width: u32,
    pub height: u32,
    pub color_dark: String,
    pub color_light: String,
    pub correction: CorrectionLevel,
}

impl Default for QrOptions {
    /// The printed hang tag defaults: 150×150, deep purple on off-white,
    /// high correction so a creased tag still scans.
    fn default() -> Self {
        QrOptions {
            width: 150,
            height: 150,
            color_dark: "#4A148C".to_string(),
            color_light: "#f5f5f5".to_string(),
            correction: CorrectionLevel::High,
        }
    }
}

/// The QR image collaborator contract.
///
/// Fed the SKU returned by a successful `add_stock`, so the new pieces get
/// tags that scan back into `record_sale`.
pub trait QrRenderer {
    /// Draws one QR image encoding `text`.
    fn render(&mut self, text: &str, options: &QrOptions) -> Result<(), RenderError>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sku(raw: &str) -> Sku {
        Sku::from_scan(raw)
    }

    fn events(skus: &[&str]) -> Vec<SalesEvent> {
        skus.iter()
            .enumerate()
            .map(|(i, s)| {
                SalesEvent::new(
                    sku(s),
                    Utc.with_ymd_and_hms(2024, 3, 1 + i as u32 / 10, 9, 0, 0).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_fast_sellers_chart_shape() {
        let sales = events(&["A-A-A-A", "A-A-A-A", "B-B-B-B"]);
        let counts = SalesCount::from_events(&sales);

        let chart = fast_sellers_chart(&counts).unwrap();
        assert_eq!(chart.labels, ["A-A-A-A", "B-B-B-B"]);
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].label, "Units Sold");
        assert_eq!(chart.datasets[0].data, [2, 1]);
    }

    #[test]
    fn test_fast_sellers_chart_skipped_when_no_sales() {
        let counts = SalesCount::from_events(&[]);
        assert!(fast_sellers_chart(&counts).is_none());
    }

    #[test]
    fn test_turnover_chart_has_stock_and_sold_series() {
        let stock: BTreeMap<Sku, u32> = [(sku("A-A-A-A"), 4)].into_iter().collect();
        let counts = SalesCount::from_events(&events(&["A-A-A-A"]));

        let chart = turnover_chart(&stock, &counts);
        assert_eq!(chart.labels, ["A-A-A-A"]);
        assert_eq!(chart.datasets[0].label, "Stock");
        assert_eq!(chart.datasets[0].data, [4]);
        assert_eq!(chart.datasets[1].label, "Sold");
        assert_eq!(chart.datasets[1].data, [1]);
    }

    #[test]
    fn test_sales_trend_chart_labels_are_days() {
        let chart = sales_trend_chart(&events(&["A-A-A-A"])).unwrap();
        assert_eq!(chart.labels, ["2024-03-01"]);
        assert_eq!(chart.datasets[0].data, [1]);

        assert!(sales_trend_chart(&[]).is_none());
    }

    #[test]
    fn test_forecast_chart_projects_growth() {
        let stock: BTreeMap<Sku, u32> = [(sku("A-A-A-A"), 4)].into_iter().collect();
        let counts = SalesCount::from_events(&events(&["A-A-A-A"]));

        let chart = forecast_chart(&stock, &counts);
        assert_eq!(chart.datasets[0].label, "Forecasted Demand");
        assert_eq!(chart.datasets[0].data, [2]); // ceil(1 * 1.2)
    }

    #[test]
    fn test_qr_options_defaults_match_the_printed_tag() {
        let options = QrOptions::default();
        assert_eq!(options.width, 150);
        assert_eq!(options.height, 150);
        assert_eq!(options.color_dark, "#4A148C");
        assert_eq!(options.color_light, "#f5f5f5");
        assert_eq!(options.correction, CorrectionLevel::High);
    }

    /// A recording fake standing in for the drawing collaborators.
    #[derive(Default)]
    struct Recorder {
        charts: Vec<(ChartKind, ChartData)>,
        qr_texts: Vec<String>,
    }

    impl ChartRenderer for Recorder {
        fn render(&mut self, kind: ChartKind, data: &ChartData) -> Result<(), RenderError> {
            self.charts.push((kind, data.clone()));
            Ok(())
        }
    }

    impl QrRenderer for Recorder {
        fn render(&mut self, text: &str, _options: &QrOptions) -> Result<(), RenderError> {
            self.qr_texts.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_analysis_page_render_pass() {
        let stock: BTreeMap<Sku, u32> = [(sku("A-A-A-A"), 4)].into_iter().collect();
        let sales = events(&["A-A-A-A"]);
        let counts = SalesCount::from_events(&sales);

        let mut view = Recorder::default();
        if let Some(chart) = fast_sellers_chart(&counts) {
            ChartRenderer::render(&mut view, ChartKind::Bar, &chart).unwrap();
        }
        ChartRenderer::render(&mut view, ChartKind::Line, &turnover_chart(&stock, &counts))
            .unwrap();
        if let Some(chart) = sales_trend_chart(&sales) {
            ChartRenderer::render(&mut view, ChartKind::Line, &chart).unwrap();
        }
        ChartRenderer::render(&mut view, ChartKind::Bar, &forecast_chart(&stock, &counts))
            .unwrap();

        assert_eq!(view.charts.len(), 4);

        QrRenderer::render(&mut view, "A-A-A-A", &QrOptions::default()).unwrap();
        assert_eq!(view.qr_texts, ["A-A-A-A"]);
    }
}
