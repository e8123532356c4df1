//! Seasonal crop recommendations.
//!
//! Combines the static [`SeasonTable`] with the price history: each
//! recommended crop is annotated with where its current price sits.

use crate::{
    config::seasons::{RecommendedCrop, Season, SeasonTable},
    models::PriceSnapshot,
    views::prices::{PriceLevel, crop_names, price_level, price_stats},
};

const BEST_RECOMMENDATION_COUNT: usize = 3;

/// Current price of a crop and how it compares to its average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPriceInfo {
    /// Latest price
    pub current: f64,
    /// Mean over every snapshot
    pub average: f64,
    /// Classification of `current` against `average`
    pub level: PriceLevel,
}

/// Price info for `crop`, or `None` when it has no recorded prices.
#[must_use]
pub fn crop_price_info(history: &[PriceSnapshot], crop: &str) -> Option<CropPriceInfo> {
    price_stats(history, crop).map(|stats| CropPriceInfo {
        current: stats.current,
        average: stats.average,
        level: price_level(stats.current, stats.average),
    })
}

/// A recommended crop for the current season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalRecommendation<'a> {
    /// Season the crop is recommended for
    pub season: Season,
    /// Display name of that season
    pub season_name: &'a str,
    /// The crop and why it suits the season
    pub crop: &'a RecommendedCrop,
    /// Price info, when the crop appears in the price history
    pub price: Option<CropPriceInfo>,
}

/// The recommended crops for calendar `month` (1-12), in table order.
#[must_use]
pub fn seasonal_recommendations<'a>(
    table: &'a SeasonTable,
    history: &[PriceSnapshot],
    month: u32,
) -> Vec<SeasonalRecommendation<'a>> {
    let season = Season::for_month(month);
    let Some(entry) = table.entry(season) else {
        return Vec::new();
    };
    entry
        .crops
        .iter()
        .map(|crop| SeasonalRecommendation {
            season,
            season_name: &entry.name,
            crop,
            price: crop_price_info(history, &crop.name),
        })
        .collect()
}

/// Up to three seasonal crops whose price is medium or high, in table order.
#[must_use]
pub fn best_recommendations<'r, 'a>(
    recommendations: &'r [SeasonalRecommendation<'a>],
) -> Vec<&'r SeasonalRecommendation<'a>> {
    recommendations
        .iter()
        .filter(|r| {
            r.price
                .is_some_and(|p| matches!(p.level, PriceLevel::High | PriceLevel::Medium))
        })
        .take(BEST_RECOMMENDATION_COUNT)
        .collect()
}

/// Crops currently priced high, most expensive first.
#[must_use]
pub fn high_price_crops(history: &[PriceSnapshot]) -> Vec<(&str, CropPriceInfo)> {
    let mut crops: Vec<(&str, CropPriceInfo)> = crop_names(history)
        .into_iter()
        .filter_map(|name| crop_price_info(history, name).map(|info| (name, info)))
        .filter(|(_, info)| info.level == PriceLevel::High)
        .collect();
    crops.sort_by(|a, b| b.1.current.total_cmp(&a.1.current));
    crops
}
