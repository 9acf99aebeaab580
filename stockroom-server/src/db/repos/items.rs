//! Item repository
//!
//! - list/search/low-stock: ordered by id (insertion order)
//! - update: row lock + explicit merge inside one transaction
//! - delete: single statement, NotFound when nothing was removed

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{ItemUpdate, NewItem, Pagination};

/// Item record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub memo: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl Item {
    /// Overwrite only the slots that are set in `update`.
    pub fn apply(&mut self, update: ItemUpdate) {
        if let Some(name) = update.name {
            self.name = name.into_string();
        }
        if let Some(memo) = update.memo {
            self.memo = memo;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity.get();
        }
        if let Some(price) = update.price {
            self.price = price.get();
        }
    }
}

/// Build an ILIKE pattern that matches `needle` literally anywhere in the value.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated item and return the stored record.
    pub async fn create(&self, new: NewItem) -> Result<Item, DbError> {
        let item: Item = sqlx::query_as(
            r#"
            INSERT INTO items (name, memo, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, memo, quantity, price
            "#,
        )
        .bind(new.name.as_str())
        .bind(new.memo.as_deref())
        .bind(new.quantity.get())
        .bind(new.price.get())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(item_id = item.id, "item created");
        Ok(item)
    }

    /// Get a single item by id.
    pub async fn get(&self, id: i32) -> Result<Item, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, memo, quantity, price
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("item", id))
    }

    /// List items in insertion order.
    pub async fn list(&self, page: Pagination) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as(
            r#"
            SELECT id, name, memo, quantity, price
            FROM items
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Case-insensitive substring search on name.
    pub async fn search_by_name(
        &self,
        needle: &str,
        page: Pagination,
    ) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as(
            r#"
            SELECT id, name, memo, quantity, price
            FROM items
            WHERE name ILIKE $1 ESCAPE '\'
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(contains_pattern(needle))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// All items at or below `threshold`, unpaginated.
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as(
            r#"
            SELECT id, name, memo, quantity, price
            FROM items
            WHERE quantity <= $1
            ORDER BY id
            "#,
        )
        .bind(threshold)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Apply a partial update.
    ///
    /// The row is locked for the length of the transaction, so the merge
    /// always starts from the committed state.
    pub async fn update(&self, id: i32, update: ItemUpdate) -> Result<Item, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut item: Item = sqlx::query_as(
            r#"
            SELECT id, name, memo, quantity, price
            FROM items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("item", id))?;

        if update.is_empty() {
            tx.commit().await?;
            return Ok(item);
        }

        item.apply(update);

        let item: Item = sqlx::query_as(
            r#"
            UPDATE items
            SET name = $2, memo = $3, quantity = $4, price = $5
            WHERE id = $1
            RETURNING id, name, memo, quantity, price
            "#,
        )
        .bind(item.id)
        .bind(item.name.as_str())
        .bind(item.memo.as_deref())
        .bind(item.quantity)
        .bind(item.price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(item_id = item.id, "item updated");
        Ok(item)
    }

    /// Delete an item by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("item", id));
        }

        tracing::debug!(item_id = id, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemName, Price, Quantity};

    fn sample() -> Item {
        Item {
            id: 1,
            name: "Test Item".into(),
            memo: Some("Original memo".into()),
            quantity: 10,
            price: Decimal::new(1999, 2),
        }
    }

    #[test]
    fn apply_quantity_only_keeps_other_fields() {
        let mut item = sample();
        item.apply(ItemUpdate {
            quantity: Some(Quantity::new(15).unwrap()),
            ..ItemUpdate::default()
        });

        assert_eq!(item.quantity, 15);
        assert_eq!(item.name, "Test Item");
        assert_eq!(item.memo.as_deref(), Some("Original memo"));
        assert_eq!(item.price, Decimal::new(1999, 2));
    }

    #[test]
    fn apply_every_slot() {
        let mut item = sample();
        item.apply(ItemUpdate {
            name: Some(ItemName::new("Updated Item").unwrap()),
            memo: Some(None),
            quantity: Some(Quantity::new(20).unwrap()),
            price: Some(Price::new(Decimal::new(2999, 2)).unwrap()),
        });

        assert_eq!(item.id, 1);
        assert_eq!(item.name, "Updated Item");
        assert_eq!(item.memo, None);
        assert_eq!(item.quantity, 20);
        assert_eq!(item.price, Decimal::new(2999, 2));
    }

    #[test]
    fn apply_empty_update_is_noop() {
        let mut item = sample();
        item.apply(ItemUpdate::default());
        assert_eq!(item, sample());
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("apple"), "%apple%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }
}
