//! SeaORM implementation of PurchaseRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{DomainError, Item, NewPurchase, Purchase, PurchaseRepository};
use crate::models::item::{self, Entity as ItemEntity};
use crate::models::purchase::{self, Entity as PurchaseEntity};

/// SeaORM-based implementation of PurchaseRepository
pub struct SeaOrmPurchaseRepository {
    db: DatabaseConnection,
}

impl SeaOrmPurchaseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<item::Model> for Item {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            purchase_id: model.purchase_id,
            model: model.model_name,
            brand: model.brand,
            description: model.description,
            qty: model.qty,
            unit_price: model.unit_price,
            total_value: model.total_value,
            extra_cost_share_total: model.extra_cost_share_total,
            final_unit_cost: model.final_unit_cost,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn to_purchase(header: purchase::Model, mut items: Vec<item::Model>) -> Purchase {
    items.sort_by_key(|i| i.id);

    Purchase {
        id: header.id,
        supplier: header.supplier,
        date: header.date,
        shipping_cost: header.shipping_cost,
        other_cost: header.other_cost,
        total_merchandise: header.total_merchandise,
        total_extras: header.total_extras,
        grand_total: header.grand_total,
        created_at: header.created_at,
        updated_at: header.updated_at,
        items: items.into_iter().map(Item::from).collect(),
    }
}

#[async_trait]
impl PurchaseRepository for SeaOrmPurchaseRepository {
    async fn find_all(&self) -> Result<Vec<Purchase>, DomainError> {
        let rows = PurchaseEntity::find()
            .order_by_desc(purchase::Column::CreatedAt)
            .order_by_desc(purchase::Column::Id)
            .find_with_related(ItemEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(header, items)| to_purchase(header, items))
            .collect())
    }

    async fn create(&self, input: NewPurchase) -> Result<Purchase, DomainError> {
        input.validate()?;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let header = purchase::ActiveModel {
            supplier: Set(input.supplier),
            date: Set(input.date),
            shipping_cost: Set(input.shipping_cost),
            other_cost: Set(input.other_cost),
            total_merchandise: Set(input.total_merchandise),
            total_extras: Set(input.total_extras),
            grand_total: Set(input.grand_total),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in input.items {
            let inserted = item::ActiveModel {
                purchase_id: Set(header.id),
                model_name: Set(line.model),
                brand: Set(line.brand),
                description: Set(line.description),
                qty: Set(line.qty),
                unit_price: Set(line.unit_price),
                total_value: Set(line.total_value),
                extra_cost_share_total: Set(line.extra_cost_share_total),
                final_unit_cost: Set(line.final_unit_cost),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            items.push(inserted);
        }

        // Dropping txn on any error above rolls back the header too
        txn.commit().await?;

        Ok(to_purchase(header, items))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = PurchaseEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
