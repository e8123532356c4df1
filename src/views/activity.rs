//! Activity-log views.

use crate::models::{ActivityAction, ActivityLogEntry, EntityKind};

/// How many entries record each action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    /// Records created
    pub add: usize,
    /// Records replaced
    pub update: usize,
    /// Records removed
    pub delete: usize,
}

/// Tallies entries by action.
#[must_use]
pub fn activity_counts(entries: &[ActivityLogEntry]) -> ActivityCounts {
    let mut counts = ActivityCounts::default();
    for entry in entries {
        match entry.action {
            ActivityAction::Add => counts.add += 1,
            ActivityAction::Update => counts.update += 1,
            ActivityAction::Delete => counts.delete += 1,
        }
    }
    counts
}

/// Entries about one kind of record, in log order.
#[must_use]
pub fn entries_for(entries: &[ActivityLogEntry], kind: EntityKind) -> Vec<&ActivityLogEntry> {
    entries.iter().filter(|e| e.entity_type == kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(action: ActivityAction, kind: EntityKind) -> ActivityLogEntry {
        ActivityLogEntry {
            id: String::new(),
            action,
            entity_type: kind,
            item_name: "ข้าวหอมมะลิ".to_string(),
            user: "admin".to_string(),
            timestamp: Utc::now(),
            details: String::new(),
        }
    }

    #[test]
    fn test_activity_counts() {
        let entries = vec![
            entry(ActivityAction::Add, EntityKind::Product),
            entry(ActivityAction::Update, EntityKind::Product),
            entry(ActivityAction::Add, EntityKind::Schedule),
        ];
        assert_eq!(
            activity_counts(&entries),
            ActivityCounts {
                add: 2,
                update: 1,
                delete: 0
            }
        );
        assert_eq!(entries_for(&entries, EntityKind::Schedule).len(), 1);
    }
}
