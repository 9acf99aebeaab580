//! Item field validation
//!
//! `NewItem` and `ItemUpdate` can only be built from values that satisfy
//! the item invariants, so the repository never sees a negative quantity
//! or price.

use rust_decimal::{Decimal, RoundingStrategy};

use super::validation::bounded_text;
use super::ValidationError;

/// Maximum length for item names (matches `VARCHAR(100)`)
pub const MAX_ITEM_NAME_LEN: usize = 100;

/// Fractional digits stored for prices
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound for prices (`NUMERIC(10, 2)` keeps 8 integer digits)
const PRICE_LIMIT: i64 = 100_000_000;

/// Validated item name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Non-empty (whitespace counts), at most 100 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("name", s, MAX_ITEM_NAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated stock quantity (never negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::Negative { field: "quantity" });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Validated unit price (never negative, two fractional digits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Rounds half away from zero to two places, the way the column does.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use stockroom_server::models::Price;
    ///
    /// let price = Price::new(Decimal::new(19_995, 3)).unwrap();
    /// assert_eq!(price.get().to_string(), "20.00");
    /// assert!(Price::new(Decimal::new(-500, 2)).is_err());
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::Negative { field: "price" });
        }

        let mut rounded =
            value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(PRICE_SCALE);
        // -0.00 would otherwise echo with a sign
        rounded.set_sign_positive(true);

        if rounded >= Decimal::from(PRICE_LIMIT) {
            return Err(ValidationError::OutOfRange {
                field: "price",
                reason: "must be below 100000000",
            });
        }

        Ok(Self(rounded))
    }

    pub fn get(self) -> Decimal {
        self.0
    }
}

/// Validated input for creating an item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: ItemName,
    pub memo: Option<String>,
    pub quantity: Quantity,
    pub price: Price,
}

impl NewItem {
    pub fn new(
        name: &str,
        memo: Option<String>,
        quantity: i32,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: ItemName::new(name)?,
            memo,
            quantity: Quantity::new(quantity)?,
            price: Price::new(price)?,
        })
    }
}

/// Partial update for an item: one slot per mutable attribute.
///
/// `None` leaves the stored value alone. `memo` is nullable, so it has a
/// third state: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<ItemName>,
    pub memo: Option<Option<String>>,
    pub quantity: Option<Quantity>,
    pub price: Option<Price>,
}

impl ItemUpdate {
    /// True when no slot is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.memo.is_none() && self.quantity.is_none() && self.price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn name_rules() {
        assert!(ItemName::new("Apple Phone").is_ok());
        // whitespace is content
        assert!(ItemName::new("   ").is_ok());
        assert!(matches!(
            ItemName::new("").unwrap_err(),
            ValidationError::Empty { field: "name" }
        ));
        assert!(ItemName::new(&"x".repeat(100)).is_ok());
        assert!(matches!(
            ItemName::new(&"x".repeat(101)).unwrap_err(),
            ValidationError::TooLong { max: 100, .. }
        ));
    }

    #[test]
    fn negative_quantity_rejected() {
        assert_eq!(
            Quantity::new(-1),
            Err(ValidationError::Negative { field: "quantity" })
        );
        assert_eq!(Quantity::new(0).unwrap().get(), 0);
    }

    #[test]
    fn negative_price_rejected() {
        assert_eq!(
            Price::new(dec("-5.00")),
            Err(ValidationError::Negative { field: "price" })
        );
        assert_eq!(
            Price::new(dec("-0.001")),
            Err(ValidationError::Negative { field: "price" })
        );
    }

    #[test]
    fn price_is_normalized_to_two_places() {
        assert_eq!(Price::new(dec("19.99")).unwrap().get().to_string(), "19.99");
        assert_eq!(Price::new(dec("10")).unwrap().get().to_string(), "10.00");
        assert_eq!(Price::new(dec("0.005")).unwrap().get().to_string(), "0.01");
        assert_eq!(Price::new(dec("-0.00")).unwrap().get().to_string(), "0.00");
    }

    #[test]
    fn price_upper_bound() {
        assert!(Price::new(dec("99999999.99")).is_ok());
        assert!(matches!(
            Price::new(dec("100000000")).unwrap_err(),
            ValidationError::OutOfRange { field: "price", .. }
        ));
    }

    #[test]
    fn new_item_memo_defaults_to_absent() {
        let item = NewItem::new("Minimal Item", None, 5, dec("9.99")).unwrap();
        assert_eq!(item.memo, None);
        assert_eq!(item.quantity.get(), 5);
    }

    #[test]
    fn update_emptiness() {
        assert!(ItemUpdate::default().is_empty());
        let update = ItemUpdate {
            memo: Some(None),
            ..ItemUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
