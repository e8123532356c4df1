//! Planting schedule views.

use crate::models::{PlantingSchedule, ScheduleStatus};

/// Schedules with the given status, in snapshot order.
#[must_use]
pub fn schedules_with_status(
    schedules: &[PlantingSchedule],
    status: ScheduleStatus,
) -> Vec<&PlantingSchedule> {
    schedules.iter().filter(|s| s.status == status).collect()
}

/// How many schedules are in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleCounts {
    /// Not yet planted
    pub planned: usize,
    /// In the ground
    pub planted: usize,
    /// Harvested
    pub harvested: usize,
}

/// Tallies schedules by status.
#[must_use]
pub fn schedule_counts(schedules: &[PlantingSchedule]) -> ScheduleCounts {
    schedules
        .iter()
        .fold(ScheduleCounts::default(), |mut counts, s| {
            match s.status {
                ScheduleStatus::Planned => counts.planned += 1,
                ScheduleStatus::Planted => counts.planted += 1,
                ScheduleStatus::Harvested => counts.harvested += 1,
            }
            counts
        })
}

/// Total planted area in rai across `schedules`.
#[must_use]
pub fn total_area(schedules: &[PlantingSchedule]) -> f64 {
    schedules.iter().map(|s| s.area).sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::Utc;

    fn schedule(crop: &str, status: ScheduleStatus, area: f64) -> PlantingSchedule {
        PlantingSchedule {
            id: crop.to_string(),
            crop_name: crop.to_string(),
            category: "ผัก".to_string(),
            planting_date: Utc::now(),
            harvest_date: Utc::now(),
            area,
            estimated_yield: None,
            status,
            notes: String::new(),
        }
    }

    #[test]
    fn test_status_filter_and_counts() {
        let schedules = vec![
            schedule("ข้าวโพด", ScheduleStatus::Planted, 2.0),
            schedule("พริก", ScheduleStatus::Planned, 1.5),
            schedule("มะเขือเทศ", ScheduleStatus::Planted, 0.5),
        ];

        let planted = schedules_with_status(&schedules, ScheduleStatus::Planted);
        assert_eq!(planted.len(), 2);
        assert_eq!(planted[1].crop_name, "มะเขือเทศ");

        assert_eq!(
            schedule_counts(&schedules),
            ScheduleCounts {
                planned: 1,
                planted: 2,
                harvested: 0
            }
        );
        assert_eq!(total_area(&schedules), 4.0);
    }
}
