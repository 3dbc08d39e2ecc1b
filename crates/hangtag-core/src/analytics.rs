//! # Analytics Engine
//!
//! Pure, read-only analytics over a ledger snapshot.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Analytics Pipeline                                 │
//! │                                                                         │
//! │  Ledger snapshot                                                        │
//! │  ├── stock: BTreeMap<Sku, u32>     (current levels)                    │
//! │  └── sales: &[SalesEvent]          (append-only log)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  SalesCount::from_events  ← counts grouped by SKU, first-seen order    │
//! │           │                                                             │
//! │           ├──► top_sellers        (ranked, truncated)                  │
//! │           ├──► turnover_series    (stock vs sold, per SKU in stock)    │
//! │           ├──► daily_trend        (events per UTC calendar day)        │
//! │           ├──► forecast           (+20% heuristic)                     │
//! │           ├──► low_stock_flags    (stock < threshold)                  │
//! │           └──► sku_analysis       (combined per-SKU table)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totality
//! Every function here is total over its inputs: empty stock or an empty
//! sales log yields empty output, never an error. All arithmetic is
//! integer arithmetic (no floating point!).

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::sku::Sku;
use crate::types::{SalesEvent, SkuAnalysisRow};
use crate::DEFAULT_TOP_SELLERS;

/// Numerator of the fixed demand-growth heuristic (6/5 = +20%).
const FORECAST_GROWTH_NUM: u64 = 6;
/// Denominator of the fixed demand-growth heuristic.
const FORECAST_GROWTH_DEN: u64 = 5;

// =============================================================================
// Sales Count
// =============================================================================

/// Units sold per SKU, derived by counting the sales log grouped by SKU.
///
/// ## Ordering
/// Entries keep the order in which each SKU *first* appears in the sales
/// log. That order is the documented tie-break for [`top_sellers`]: when
/// two SKUs sold the same number of units, the one sold earlier ranks
/// first.
#[derive(Debug, Clone, Default)]
pub struct SalesCount {
    entries: Vec<(Sku, u32)>,
    index: HashMap<Sku, usize>,
}

impl SalesCount {
    /// Counts the sales log grouped by SKU.
    pub fn from_events(sales: &[SalesEvent]) -> Self {
        let mut counts = SalesCount::default();
        for event in sales {
            match counts.index.get(&event.sku).copied() {
                Some(i) => counts.entries[i].1 += 1,
                None => {
                    counts.index.insert(event.sku.clone(), counts.entries.len());
                    counts.entries.push((event.sku.clone(), 1));
                }
            }
        }
        counts
    }

    /// Units sold for `sku`, defaulting to 0 for SKUs with no sales.
    pub fn get(&self, sku: &Sku) -> u32 {
        self.index.get(sku).map_or(0, |&i| self.entries[i].1)
    }

    /// Iterates `(sku, sold)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Sku, u32)> {
        self.entries.iter().map(|(sku, n)| (sku, *n))
    }

    /// Number of distinct SKUs with at least one sale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no sales have been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Series Points
// =============================================================================

/// One point of the turnover series: current stock against units sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TurnoverPoint {
    pub sku: Sku,
    pub stock: u32,
    pub sold: u32,
}

/// Sales volume for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyCount {
    /// The UTC calendar day (no time component).
    #[ts(as = "String")]
    pub day: NaiveDate,
    pub count: u32,
}

/// Projected demand for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ForecastPoint {
    pub sku: Sku,
    pub projected: u32,
}

// =============================================================================
// Rankings & Series
// =============================================================================

/// Ranks SKUs by units sold, descending, truncated to `n` entries.
///
/// ## Tie-Break
/// The sort is stable over the first-seen order of [`SalesCount`], so SKUs
/// with equal counts keep the order in which they first appear in the
/// sales log.
pub fn top_sellers(counts: &SalesCount, n: usize) -> Vec<(Sku, u32)> {
    let mut ranked: Vec<(Sku, u32)> = counts.iter().map(|(sku, c)| (sku.clone(), c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Ranks SKUs by units sold with the default chart size of
/// [`DEFAULT_TOP_SELLERS`] entries.
pub fn top_sellers_default(counts: &SalesCount) -> Vec<(Sku, u32)> {
    top_sellers(counts, DEFAULT_TOP_SELLERS)
}

/// Pairs current stock with units sold for every SKU currently in stock.
///
/// SKUs with zero sales appear with `sold: 0`; SKUs that were sold but no
/// longer exist in the stock map (only reachable through external edits)
/// do not appear.
pub fn turnover_series(stock: &BTreeMap<Sku, u32>, counts: &SalesCount) -> Vec<TurnoverPoint> {
    stock
        .iter()
        .map(|(sku, &level)| TurnoverPoint {
            sku: sku.clone(),
            stock: level,
            sold: counts.get(sku),
        })
        .collect()
}

/// Groups the sales log by UTC calendar day, ascending.
///
/// Only days with at least one event appear: gaps are real gaps, not
/// zero-filled.
pub fn daily_trend(sales: &[SalesEvent]) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for event in sales {
        *per_day.entry(event.date.date_naive()).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .map(|(day, count)| DailyCount { day, count })
        .collect()
}

/// Projects demand per SKU as `ceil(sold * 1.2)`.
///
/// A fixed +20% growth heuristic computed in integer arithmetic - a
/// placeholder policy, not a forecasting model.
pub fn forecast(stock: &BTreeMap<Sku, u32>, counts: &SalesCount) -> Vec<ForecastPoint> {
    stock
        .keys()
        .map(|sku| {
            let sold = counts.get(sku) as u64;
            let projected = (sold * FORECAST_GROWTH_NUM).div_ceil(FORECAST_GROWTH_DEN);
            ForecastPoint {
                sku: sku.clone(),
                projected: projected as u32,
            }
        })
        .collect()
}

/// Flags every SKU whose stock is strictly below `threshold`.
pub fn low_stock_flags(stock: &BTreeMap<Sku, u32>, threshold: u32) -> Vec<(Sku, bool)> {
    stock
        .iter()
        .map(|(sku, &level)| (sku.clone(), level < threshold))
        .collect()
}

/// Builds the combined per-SKU analysis table: units sold, current stock,
/// and the low-stock flag, for every SKU currently in stock.
pub fn sku_analysis(
    stock: &BTreeMap<Sku, u32>,
    counts: &SalesCount,
    threshold: u32,
) -> Vec<SkuAnalysisRow> {
    stock
        .iter()
        .map(|(sku, &level)| SkuAnalysisRow {
            sku: sku.clone(),
            sold: counts.get(sku),
            stock: level,
            low_stock: level < threshold,
        })
        .collect()
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

    fn event(raw: &str, y: i32, m: u32, d: u32) -> SalesEvent {
        SalesEvent::new(sku(raw), Utc.with_ymd_and_hms(y, m, d, 11, 0, 0).unwrap())
    }

    fn stock_of(pairs: &[(&str, u32)]) -> BTreeMap<Sku, u32> {
        pairs.iter().map(|(s, n)| (sku(s), *n)).collect()
    }

    #[test]
    fn test_sales_count_groups_by_sku() {
        let sales = vec![
            event("A-A-A-A", 2024, 1, 1),
            event("B-B-B-B", 2024, 1, 1),
            event("A-A-A-A", 2024, 1, 2),
        ];
        let counts = SalesCount::from_events(&sales);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(&sku("A-A-A-A")), 2);
        assert_eq!(counts.get(&sku("B-B-B-B")), 1);
        assert_eq!(counts.get(&sku("C-C-C-C")), 0);
    }

    #[test]
    fn test_top_sellers_sorted_and_truncated() {
        let mut sales = Vec::new();
        for _ in 0..3 {
            sales.push(event("B-B-B-B", 2024, 1, 1));
        }
        for _ in 0..5 {
            sales.push(event("A-A-A-A", 2024, 1, 2));
        }
        sales.push(event("C-C-C-C", 2024, 1, 3));

        let counts = SalesCount::from_events(&sales);
        let ranked = top_sellers(&counts, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], (sku("A-A-A-A"), 5));
        assert_eq!(ranked[1], (sku("B-B-B-B"), 3));
    }

    #[test]
    fn test_top_sellers_tie_break_is_first_seen_order() {
        let sales = vec![
            event("LATE-X-X-X", 2024, 1, 1),
            event("EARLY-X-X-X", 2024, 1, 1),
        ];
        // Both sold once; LATE-X-X-X was sold first, so it ranks first.
        let counts = SalesCount::from_events(&sales);
        let ranked = top_sellers_default(&counts);

        assert_eq!(ranked[0].0, sku("LATE-X-X-X"));
        assert_eq!(ranked[1].0, sku("EARLY-X-X-X"));
    }

    #[test]
    fn test_turnover_includes_zero_sale_skus() {
        let stock = stock_of(&[("A-A-A-A", 4), ("B-B-B-B", 0)]);
        let sales = vec![event("A-A-A-A", 2024, 1, 1)];
        let counts = SalesCount::from_events(&sales);

        let series = turnover_series(&stock, &counts);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].sold, 1);
        assert_eq!(series[1].sold, 0); // never sold, still present
    }

    #[test]
    fn test_daily_trend_has_no_synthesized_days() {
        // Two distinct days with a one-day gap between them
        let sales = vec![
            event("A-A-A-A", 2024, 3, 1),
            event("A-A-A-A", 2024, 3, 1),
            event("B-B-B-B", 2024, 3, 3),
        ];
        let trend = daily_trend(&sales);

        assert_eq!(trend.len(), 2); // exactly 2 entries, not 3
        assert_eq!(trend[0].day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(trend[0].count, 2);
        assert_eq!(trend[1].day, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(trend[1].count, 1);
    }

    #[test]
    fn test_daily_trend_sorted_ascending() {
        let sales = vec![
            event("A-A-A-A", 2024, 5, 9),
            event("A-A-A-A", 2024, 5, 2),
            event("A-A-A-A", 2024, 5, 7),
        ];
        let trend = daily_trend(&sales);
        let days: Vec<_> = trend.iter().map(|d| d.day).collect();

        let mut sorted = days.clone();
        sorted.sort();
        assert_eq!(days, sorted);
    }

    #[test]
    fn test_forecast_is_integer_ceil_of_twenty_percent_growth() {
        let stock = stock_of(&[("A-A-A-A", 1), ("B-B-B-B", 1), ("C-C-C-C", 1)]);
        let mut sales = Vec::new();
        sales.push(event("A-A-A-A", 2024, 1, 1)); // sold 1 → ceil(1.2) = 2
        for _ in 0..5 {
            sales.push(event("B-B-B-B", 2024, 1, 1)); // sold 5 → ceil(6.0) = 6
        }
        let counts = SalesCount::from_events(&sales);

        let points = forecast(&stock, &counts);
        assert_eq!(points[0].projected, 2);
        assert_eq!(points[1].projected, 6);
        assert_eq!(points[2].projected, 0); // never sold
    }

    #[test]
    fn test_low_stock_flags() {
        let stock = stock_of(&[("A-A-A-A", 4), ("B-B-B-B", 5)]);
        let flags = low_stock_flags(&stock, crate::LOW_STOCK_THRESHOLD);

        assert_eq!(flags[0].1, true); // 4 < 5
        assert_eq!(flags[1].1, false); // 5 is not strictly below 5
    }

    #[test]
    fn test_sku_analysis_rows() {
        let stock = stock_of(&[("A-A-A-A", 2)]);
        let sales = vec![event("A-A-A-A", 2024, 1, 1)];
        let counts = SalesCount::from_events(&sales);

        let rows = sku_analysis(&stock, &counts, crate::LOW_STOCK_THRESHOLD);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sold, 1);
        assert_eq!(rows[0].stock, 2);
        assert!(rows[0].low_stock);
    }

    #[test]
    fn test_everything_is_total_on_empty_inputs() {
        let stock: BTreeMap<Sku, u32> = BTreeMap::new();
        let sales: Vec<SalesEvent> = Vec::new();
        let counts = SalesCount::from_events(&sales);

        assert!(counts.is_empty());
        assert!(top_sellers_default(&counts).is_empty());
        assert!(turnover_series(&stock, &counts).is_empty());
        assert!(daily_trend(&sales).is_empty());
        assert!(forecast(&stock, &counts).is_empty());
        assert!(low_stock_flags(&stock, crate::LOW_STOCK_THRESHOLD).is_empty());
        assert!(sku_analysis(&stock, &counts, crate::LOW_STOCK_THRESHOLD).is_empty());
    }
}
