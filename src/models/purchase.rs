use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase invoice header. Totals are supplied by the caller and stored as-is.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub supplier: String,
    pub date: Date,
    #[sea_orm(default_value = 0.0)]
    pub shipping_cost: f64,
    #[sea_orm(default_value = 0.0)]
    pub other_cost: f64,
    #[sea_orm(default_value = 0.0)]
    pub total_merchandise: f64,
    #[sea_orm(default_value = 0.0)]
    pub total_extras: f64,
    #[sea_orm(default_value = 0.0)]
    pub grand_total: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
