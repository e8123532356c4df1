//! Price statistics over the monthly snapshots.
//!
//! Snapshots are read in the order the store returns them (oldest first). A
//! crop missing from a snapshot is skipped for that month rather than treated
//! as zero.

use crate::models::PriceSnapshot;

/// Crop names offered for analysis: the keys of the first snapshot.
#[must_use]
pub fn crop_names(history: &[PriceSnapshot]) -> Vec<&str> {
    history
        .first()
        .map(|s| s.prices.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// `(month, price)` pairs for `crop`, in snapshot order.
#[must_use]
pub fn price_series<'a>(history: &'a [PriceSnapshot], crop: &str) -> Vec<(&'a str, f64)> {
    history
        .iter()
        .filter_map(|s| s.price_of(crop).map(|p| (s.month.as_str(), p)))
        .collect()
}

/// Summary statistics for one crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    /// Latest price
    pub current: f64,
    /// Price before the latest, if there are at least two
    pub previous: Option<f64>,
    /// Mean over every snapshot
    pub average: f64,
    /// Highest price
    pub max: f64,
    /// Lowest price
    pub min: f64,
}

impl PriceStats {
    /// `current - previous`, when a previous price exists.
    #[must_use]
    pub fn price_change(&self) -> Option<f64> {
        self.previous.map(|previous| self.current - previous)
    }

    /// Change relative to the previous price, in percent. `None` when there is
    /// no previous price or it was zero.
    #[must_use]
    pub fn percent_change(&self) -> Option<f64> {
        let previous = self.previous.filter(|p| *p != 0.0)?;
        Some((self.current - previous) / previous * 100.0)
    }
}

/// Statistics for `crop`, or `None` if it never appears.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn price_stats(history: &[PriceSnapshot], crop: &str) -> Option<PriceStats> {
    let prices: Vec<f64> = price_series(history, crop).into_iter().map(|(_, p)| p).collect();
    let (&current, earlier) = prices.split_last()?;
    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    Some(PriceStats {
        current,
        previous: earlier.last().copied(),
        average,
        max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min: prices.iter().copied().fold(f64::INFINITY, f64::min),
    })
}

/// The month with the highest price for `crop`. Ties go to the earliest month.
#[must_use]
pub fn best_month_to_sell<'a>(history: &'a [PriceSnapshot], crop: &str) -> Option<(&'a str, f64)> {
    price_series(history, crop)
        .into_iter()
        .reduce(|best, current| if current.1 > best.1 { current } else { best })
}

/// Where the current price sits relative to the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceLevel {
    /// `current < average * 0.85`
    Low,
    /// Neither low nor high
    Medium,
    /// `current > average * 1.15`, a strict floating-point comparison
    High,
}

/// Classifies `current` against `average`.
#[must_use]
pub fn price_level(current: f64, average: f64) -> PriceLevel {
    if current < average * 0.85 {
        PriceLevel::Low
    } else if current > average * 1.15 {
        PriceLevel::High
    } else {
        PriceLevel::Medium
    }
}

/// Advice derived from a crop's recent prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SellingSignal {
    /// More than 10% above average: a good time to sell
    AboveAverage,
    /// The current price is the highest on record: sell now
    AtPeak,
    /// The price dropped since last month: wait
    Falling,
    /// More than 10% below average: hold stock
    BelowAverage,
}

impl SellingSignal {
    /// Short description for display.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AboveAverage => "Price is above average, a good time to sell",
            Self::AtPeak => "Price is at its peak, sell now",
            Self::Falling => "Price is falling, wait for a better moment",
            Self::BelowAverage => "Price is below average, a good time to hold stock",
        }
    }
}

/// Every signal that applies to `stats`, in a fixed order.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn selling_signals(stats: &PriceStats) -> Vec<SellingSignal> {
    let mut signals = Vec::new();
    if stats.current > stats.average * 1.1 {
        signals.push(SellingSignal::AboveAverage);
    }
    if stats.current == stats.max {
        signals.push(SellingSignal::AtPeak);
    }
    if stats.price_change().is_some_and(|change| change < 0.0) {
        signals.push(SellingSignal::Falling);
    }
    if stats.current < stats.average * 0.9 {
        signals.push(SellingSignal::BelowAverage);
    }
    signals
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use indexmap::IndexMap;

    fn snapshot(month: &str, prices: &[(&str, f64)]) -> PriceSnapshot {
        PriceSnapshot {
            month: month.to_string(),
            prices: prices
                .iter()
                .map(|(crop, price)| ((*crop).to_string(), *price))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn history() -> Vec<PriceSnapshot> {
        vec![
            snapshot("2026-01", &[("ข้าวหอมมะลิ", 20.0), ("กล้วยหอม", 30.0)]),
            snapshot("2026-02", &[("ข้าวหอมมะลิ", 26.0), ("กล้วยหอม", 35.0)]),
            snapshot("2026-03", &[("ข้าวหอมมะลิ", 24.0), ("กล้วยหอม", 35.0)]),
        ]
    }

    #[test]
    fn test_price_stats_for_three_months() {
        let stats = price_stats(&history(), "ข้าวหอมมะลิ").unwrap();
        assert_eq!(stats.current, 24.0);
        assert_eq!(stats.previous, Some(26.0));
        assert!((stats.average - 23.333_333).abs() < 1e-5);
        assert_eq!(stats.max, 26.0);
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.price_change(), Some(-2.0));
        assert!((stats.percent_change().unwrap() - -7.692_307).abs() < 1e-5);
    }

    #[test]
    fn test_single_snapshot_has_no_change() {
        let history = vec![snapshot("2026-01", &[("ข้าวหอมมะลิ", 20.0)])];
        let stats = price_stats(&history, "ข้าวหอมมะลิ").unwrap();
        assert_eq!(stats.previous, None);
        assert_eq!(stats.price_change(), None);
        assert_eq!(stats.percent_change(), None);
    }

    #[test]
    fn test_zero_previous_price_has_no_percent() {
        let history = vec![
            snapshot("2026-01", &[("พริก", 0.0)]),
            snapshot("2026-02", &[("พริก", 10.0)]),
        ];
        let stats = price_stats(&history, "พริก").unwrap();
        assert_eq!(stats.price_change(), Some(10.0));
        assert_eq!(stats.percent_change(), None);
    }

    #[test]
    fn test_unknown_crop() {
        assert!(price_stats(&history(), "ทุเรียน").is_none());
        assert!(best_month_to_sell(&history(), "ทุเรียน").is_none());
        assert!(price_stats(&[], "ข้าวหอมมะลิ").is_none());
    }

    #[test]
    fn test_best_month_prefers_first_on_tie() {
        assert_eq!(
            best_month_to_sell(&history(), "กล้วยหอม"),
            Some(("2026-02", 35.0))
        );
        assert_eq!(
            best_month_to_sell(&history(), "ข้าวหอมมะลิ"),
            Some(("2026-02", 26.0))
        );
    }

    #[test]
    fn test_crop_names_come_from_first_snapshot() {
        let mut history = history();
        history[2].prices.insert("ทุเรียน".to_string(), 120.0);
        assert_eq!(crop_names(&history), vec!["ข้าวหอมมะลิ", "กล้วยหอม"]);
        assert!(crop_names(&[]).is_empty());
    }

    #[test]
    fn test_missing_months_are_skipped() {
        let mut history = history();
        history[1].prices.shift_remove("กล้วยหอม");
        let series = price_series(&history, "กล้วยหอม");
        assert_eq!(series, vec![("2026-01", 30.0), ("2026-03", 35.0)]);
    }

    #[test]
    fn test_price_level_thresholds() {
        assert_eq!(price_level(80.0, 100.0), PriceLevel::Low);
        assert_eq!(price_level(85.0, 100.0), PriceLevel::Medium);
        assert_eq!(price_level(114.0, 100.0), PriceLevel::Medium);
        assert_eq!(price_level(120.0, 100.0), PriceLevel::High);
    }

    #[test]
    fn test_selling_signals() {
        let falling = price_stats(&history(), "ข้าวหอมมะลิ").unwrap();
        assert_eq!(selling_signals(&falling), vec![SellingSignal::Falling]);

        let peak = PriceStats {
            current: 40.0,
            previous: Some(30.0),
            average: 30.0,
            max: 40.0,
            min: 20.0,
        };
        assert_eq!(
            selling_signals(&peak),
            vec![SellingSignal::AboveAverage, SellingSignal::AtPeak]
        );

        let low = PriceStats {
            current: 10.0,
            previous: None,
            average: 20.0,
            max: 30.0,
            min: 10.0,
        };
        assert_eq!(selling_signals(&low), vec![SellingSignal::BelowAverage]);
        assert!(!SellingSignal::AtPeak.message().is_empty());
    }
}
