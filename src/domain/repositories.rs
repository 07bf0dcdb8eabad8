//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DomainError, coerce};

/// Line item as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub purchase_id: i32,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub qty: i32,
    pub unit_price: f64,
    pub total_value: Option<f64>,
    pub extra_cost_share_total: Option<f64>,
    pub final_unit_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Purchase header with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i32,
    pub supplier: String,
    pub date: NaiveDate,
    pub shipping_cost: f64,
    pub other_cost: f64,
    pub total_merchandise: f64,
    pub total_extras: f64,
    pub grand_total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<Item>,
}

/// Input for one line item of a new purchase
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub model: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "coerce::i32_lenient")]
    pub qty: i32,
    #[serde(deserialize_with = "coerce::f64_lenient")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub total_value: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub extra_cost_share_total: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub final_unit_cost: Option<f64>,
}

/// Input for creating a purchase together with its items.
///
/// The totals are whatever the client computed; nothing here is checked
/// against the item lines.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub supplier: String,
    pub date: NaiveDate,
    pub shipping_cost: f64,
    pub other_cost: f64,
    pub total_merchandise: f64,
    pub total_extras: f64,
    pub grand_total: f64,
    pub items: Vec<NewItem>,
}

impl NewPurchase {
    /// Reject input the store would otherwise accept but the model forbids
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.supplier.trim().is_empty() {
            return Err(DomainError::Validation(
                "supplier must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository trait for Purchase entity
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Find all purchases with their items, newest first
    async fn find_all(&self) -> Result<Vec<Purchase>, DomainError>;

    /// Create a purchase and all of its items in one transaction
    async fn create(&self, input: NewPurchase) -> Result<Purchase, DomainError>;

    /// Delete a purchase by ID; its items go with it
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_purchase(supplier: &str) -> NewPurchase {
        NewPurchase {
            supplier: supplier.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            shipping_cost: 0.0,
            other_cost: 0.0,
            total_merchandise: 0.0,
            total_extras: 0.0,
            grand_total: 0.0,
            items: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_supplier() {
        assert!(new_purchase("Acme").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_supplier() {
        assert!(matches!(
            new_purchase("   ").validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_new_item_requires_qty_and_unit_price() {
        let missing_qty = serde_json::json!({ "model": "X1", "unitPrice": 50 });
        assert!(serde_json::from_value::<NewItem>(missing_qty).is_err());

        let missing_price = serde_json::json!({ "model": "X1", "qty": 2 });
        assert!(serde_json::from_value::<NewItem>(missing_price).is_err());

        let minimal = serde_json::json!({ "qty": 2, "unitPrice": 50 });
        let item: NewItem = serde_json::from_value(minimal).unwrap();
        assert_eq!(item.qty, 2);
        assert_eq!(item.unit_price, 50.0);
        assert!(item.total_value.is_none());
    }

    #[test]
    fn test_new_item_accepts_numeric_strings() {
        let raw = serde_json::json!({ "qty": "2", "unitPrice": "50.5", "totalValue": "101" });
        let item: NewItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.qty, 2);
        assert_eq!(item.unit_price, 50.5);
        assert_eq!(item.total_value, Some(101.0));
        assert!(item.final_unit_cost.is_none());
    }
}
