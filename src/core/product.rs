//! Product store logic - Handles all product-related operations.
//!
//! Products are created and replaced from a [`ProductBody`]. The store assigns
//! the identity and `last_updated`; callers never supply either. Updates are
//! full replacements, and deletes are idempotent.

use crate::{
    core::{new_id, next_write_stamp, require_text},
    entities::{Product, product},
    errors::{Error, Result},
    wire::{ProductBody, require_date},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

struct ValidProduct {
    name: String,
    category: String,
    quantity: i64,
    unit: String,
    min_stock: i64,
    harvest_date: Option<DateTime<Utc>>,
}

fn validate(body: &ProductBody) -> Result<ValidProduct> {
    if body.quantity < 0 {
        return Err(Error::validation(format!(
            "quantity must be non-negative, got {}",
            body.quantity
        )));
    }
    if body.min_stock < 0 {
        return Err(Error::validation(format!(
            "minStock must be non-negative, got {}",
            body.min_stock
        )));
    }
    let harvest_date = match body.harvest_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(require_date("harvestDate", raw)?),
    };
    Ok(ValidProduct {
        name: require_text("name", &body.name)?,
        category: require_text("category", &body.category)?,
        quantity: body.quantity,
        unit: require_text("unit", &body.unit)?,
        min_stock: body.min_stock,
        harvest_date,
    })
}

/// Retrieves every product, ordered alphabetically by name.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its identity.
pub async fn get_product(db: &DatabaseConnection, id: &str) -> Result<Option<product::Model>> {
    Product::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a product with a fresh identity and `last_updated` set to now.
///
/// # Errors
/// Returns an error if:
/// - A text field is empty or whitespace-only
/// - The quantity or minimum stock is negative
/// - The harvest date is present but unparseable
/// - The database insert operation fails
pub async fn create_product(db: &DatabaseConnection, body: &ProductBody) -> Result<product::Model> {
    let valid = validate(body)?;

    let product = product::ActiveModel {
        id: Set(new_id()),
        name: Set(valid.name),
        category: Set(valid.category),
        quantity: Set(valid.quantity),
        unit: Set(valid.unit),
        min_stock: Set(valid.min_stock),
        harvest_date: Set(valid.harvest_date),
        last_updated: Set(Utc::now()),
    };
    product.insert(db).await.map_err(Into::into)
}

/// Replaces every caller-owned field of an existing product.
///
/// `last_updated` always moves forward, even when two writes land within the
/// clock's resolution.
///
/// # Errors
/// Returns an error if:
/// - The body fails validation (see [`create_product`])
/// - No product has this identity
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    id: &str,
    body: &ProductBody,
) -> Result<product::Model> {
    let valid = validate(body)?;

    let existing = Product::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product", id))?;
    let stamp = next_write_stamp(existing.last_updated);

    let mut product: product::ActiveModel = existing.into();
    product.name = Set(valid.name);
    product.category = Set(valid.category);
    product.quantity = Set(valid.quantity);
    product.unit = Set(valid.unit);
    product.min_stock = Set(valid.min_stock);
    product.harvest_date = Set(valid.harvest_date);
    product.last_updated = Set(stamp);

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product, returning the number of rows removed (0 when already gone).
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<u64> {
    let result = Product::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected)
}
