//! Season reference table.
//!
//! The month-to-season mapping is fixed. The crops recommended for each season
//! can be replaced from config.toml with `[[seasons]]` entries.

use serde::Deserialize;

/// One of the three growing seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// June to October
    Rainy,
    /// November to February
    Winter,
    /// March to May
    Summer,
}

impl Season {
    /// Maps a calendar month (1-12) to its season. Out-of-range months fall into summer.
    #[must_use]
    pub const fn for_month(month: u32) -> Self {
        match month {
            6..=10 => Self::Rainy,
            11 | 12 | 1 | 2 => Self::Winter,
            _ => Self::Summer,
        }
    }

    /// Calendar months belonging to this season.
    #[must_use]
    pub const fn months(self) -> &'static [u32] {
        match self {
            Self::Rainy => &[6, 7, 8, 9, 10],
            Self::Winter => &[11, 12, 1, 2],
            Self::Summer => &[3, 4, 5],
        }
    }
}

/// A crop recommended for a season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendedCrop {
    /// Crop name, matched exactly against price-history keys
    pub name: String,
    /// Why it suits the season
    pub reason: String,
    /// Days from planting to harvest
    pub growth_days: u32,
}

/// Recommendations for one season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeasonEntry {
    /// Which season
    pub season: Season,
    /// Display name
    pub name: String,
    /// Recommended crops, in display order
    pub crops: Vec<RecommendedCrop>,
}

/// All season entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SeasonTable {
    entries: Vec<SeasonEntry>,
}

impl SeasonTable {
    /// Builds a table from explicit entries.
    #[must_use]
    pub const fn new(entries: Vec<SeasonEntry>) -> Self {
        Self { entries }
    }

    /// Every configured entry.
    #[must_use]
    pub fn entries(&self) -> &[SeasonEntry] {
        &self.entries
    }

    /// The entry for `season`, if configured.
    #[must_use]
    pub fn entry(&self, season: Season) -> Option<&SeasonEntry> {
        self.entries.iter().find(|e| e.season == season)
    }
}

fn crop(name: &str, reason: &str, growth_days: u32) -> RecommendedCrop {
    RecommendedCrop {
        name: name.to_string(),
        reason: reason.to_string(),
        growth_days,
    }
}

impl Default for SeasonTable {
    fn default() -> Self {
        Self::new(vec![
            SeasonEntry {
                season: Season::Rainy,
                name: "ฤดูฝน".to_string(),
                crops: vec![
                    crop("ข้าวหอมมะลิ", "ได้ผลผลิตดีที่สุด", 137),
                    crop("ข้าวเหนียว", "เหมาะกับความชื้น", 130),
                    crop("ข้าวโพด", "เจริญเติบโตรวดเร็ว", 90),
                    crop("ถั่วเหลือง", "ให้ผลผลิตดี", 100),
                ],
            },
            SeasonEntry {
                season: Season::Winter,
                name: "ฤดูหนาว".to_string(),
                crops: vec![
                    crop("ผักกาดหอม", "คุณภาพดีเยี่ยม", 45),
                    crop("มะเขือเทศ", "ผลผลิตสูง", 75),
                    crop("แตงกวา", "เติบโตดี", 55),
                    crop("บรอกโคลี", "ชอบอากาศเย็น", 65),
                    crop("กะหล่ำปลี", "คุณภาพดี", 70),
                ],
            },
            SeasonEntry {
                season: Season::Summer,
                name: "ฤดูร้อน".to_string(),
                crops: vec![
                    crop("มะม่วง", "ราคาสูงในฤดู", 150),
                    crop("ทุเรียน", "ออกผลในช่วงนี้", 180),
                    crop("ส้มโอ", "หวานและฉ่ำน้ำ", 120),
                    crop("ลำไย", "คุณภาพดี", 140),
                    crop("มะละกอ", "เติบโตรวดเร็ว", 90),
                ],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_has_exactly_one_season() {
        for month in 1..=12 {
            let season = Season::for_month(month);
            assert!(season.months().contains(&month), "month {month}");
            let owners = [Season::Rainy, Season::Winter, Season::Summer]
                .iter()
                .filter(|s| s.months().contains(&month))
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn test_season_boundaries() {
        assert_eq!(Season::for_month(2), Season::Winter);
        assert_eq!(Season::for_month(3), Season::Summer);
        assert_eq!(Season::for_month(5), Season::Summer);
        assert_eq!(Season::for_month(6), Season::Rainy);
        assert_eq!(Season::for_month(10), Season::Rainy);
        assert_eq!(Season::for_month(11), Season::Winter);
    }

    #[test]
    fn test_default_table_covers_all_seasons() {
        let table = SeasonTable::default();
        for season in [Season::Rainy, Season::Winter, Season::Summer] {
            assert!(!table.entry(season).map(|e| e.crops.is_empty()).unwrap_or(true));
        }
    }
}
