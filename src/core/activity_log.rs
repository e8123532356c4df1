//! Activity log store logic.
//!
//! Entries are append-only. Reads return the newest entries first and are
//! always bounded; nothing here updates or deletes an entry.

use crate::{
    core::{new_id, require_text},
    entities::{ActivityLog, activity_log},
    errors::Result,
    models::{ActivityAction, EntityKind},
    wire::{ActivityLogBody, require_date},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// Retrieves at most `limit` entries, newest first.
pub async fn list_recent(db: &DatabaseConnection, limit: u64) -> Result<Vec<activity_log::Model>> {
    ActivityLog::find()
        .order_by_desc(activity_log::Column::Timestamp)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends one entry with a fresh identity.
///
/// # Errors
/// Returns an error if the action or entity type label is unknown, the item
/// name is empty, the timestamp does not parse, or the insert fails.
pub async fn append(db: &DatabaseConnection, body: &ActivityLogBody) -> Result<activity_log::Model> {
    let action: ActivityAction = body.action.parse()?;
    let entity_type: EntityKind = body.entity_type.parse()?;

    let entry = activity_log::ActiveModel {
        id: Set(new_id()),
        action: Set(action.as_str().to_string()),
        entity_type: Set(entity_type.as_str().to_string()),
        item_name: Set(require_text("itemName", &body.item_name)?),
        user: Set(body.user.clone()),
        timestamp: Set(require_date("timestamp", &body.timestamp)?),
        details: Set(body.details.clone()),
    };
    entry.insert(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_bounded() -> Result<()> {
        let db = setup_test_db().await?;
        let start = Utc::now();
        for offset in 0..5 {
            let stamp = start + Duration::seconds(offset);
            let body = activity_body("add", "product", &format!("item {offset}"), stamp);
            append(&db, &body).await?;
        }

        let recent = list_recent(&db, 3).await?;
        let names: Vec<&str> = recent.iter().map(|e| e.item_name.as_str()).collect();
        assert_eq!(names, vec!["item 4", "item 3", "item 2"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_append_rejects_unknown_labels() -> Result<()> {
        let db = setup_test_db().await?;

        let body = activity_body("archive", "product", "x", Utc::now());
        assert!(matches!(
            append(&db, &body).await.unwrap_err(),
            Error::Validation { .. }
        ));

        let body = activity_body("add", "invoice", "x", Utc::now());
        assert!(matches!(
            append(&db, &body).await.unwrap_err(),
            Error::Validation { .. }
        ));

        assert!(list_recent(&db, 50).await?.is_empty());
        Ok(())
    }
}
