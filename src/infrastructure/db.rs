use sea_orm::sea_query::{ColumnDef, Expr, Table};
use sea_orm::{
    ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityName, EntityTrait,
    IdenStatic, Iterable, PrimaryKeyToColumn, QueryFilter, Schema, Value,
};

use crate::models::{item, purchase};

/// Connect and make sure the schema exists.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url).await?;
    sync_schema(&db).await?;
    Ok(db)
}

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    tracing::debug!("Connected to {:?} database", db.get_database_backend());
    Ok(db)
}

/// Create missing tables, then add any declared column an older table lacks.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Parent first so the items foreign key has a target
    let mut purchases = schema.create_table_from_entity(purchase::Entity);
    purchases.if_not_exists();
    db.execute(backend.build(&purchases)).await?;

    let mut items = schema.create_table_from_entity(item::Entity);
    items.if_not_exists();
    db.execute(backend.build(&items)).await?;

    let money = [
        purchase::Column::ShippingCost,
        purchase::Column::OtherCost,
        purchase::Column::TotalMerchandise,
        purchase::Column::TotalExtras,
        purchase::Column::GrandTotal,
    ];
    let purchase_stamps = [purchase::Column::CreatedAt, purchase::Column::UpdatedAt];
    let item_stamps = [item::Column::CreatedAt, item::Column::UpdatedAt];

    add_missing_columns(db, purchase::Entity, &money).await;
    add_missing_columns(db, item::Entity, &[]).await;

    // Rows older than an added column hold NULL where the model expects a value
    let now = chrono::Utc::now();
    backfill_nulls::<purchase::Entity>(db, &money, Value::from(0.0_f64)).await?;
    backfill_nulls::<purchase::Entity>(db, &purchase_stamps, Value::from(now)).await?;
    backfill_nulls::<item::Entity>(db, &item_stamps, Value::from(now)).await?;

    Ok(())
}

// We attempt to add every column. Existing ones make the ALTER fail, so
// errors are ignored (simple migration strategy). Columns in `zero_default`
// are added with DEFAULT 0, which also fills rows that already exist.
async fn add_missing_columns<E>(db: &DatabaseConnection, entity: E, zero_default: &[E::Column])
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();

    for column in E::Column::iter() {
        let is_key = E::PrimaryKey::iter().any(|pk| pk.into_column().as_str() == column.as_str());
        if is_key {
            continue;
        }

        let mut def = ColumnDef::new_with_type(column, column.def().get_column_type().clone());
        if zero_default.iter().any(|c| c.as_str() == column.as_str()) {
            def.default(0.0_f64);
        }
        let stmt = Table::alter().table(entity).add_column(&mut def).to_owned();

        match db.execute(backend.build(&stmt)).await {
            Ok(_) => tracing::info!(
                "Added column {}.{}",
                entity.table_name(),
                column.as_str()
            ),
            Err(e) => tracing::debug!(
                "Column {}.{} left as is: {}",
                entity.table_name(),
                column.as_str(),
                e
            ),
        }
    }
}

async fn backfill_nulls<E>(db: &DatabaseConnection, columns: &[E::Column], value: Value) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    for column in columns {
        let result = E::update_many()
            .col_expr(*column, Expr::value(value.clone()))
            .filter(column.is_null())
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(
                "Backfilled {} rows of {}.{}",
                result.rows_affected,
                E::default().table_name(),
                column.as_str()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelTrait, PaginatorTrait, Set, Statement};

    #[tokio::test]
    async fn test_sync_schema_is_idempotent() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");

        sync_schema(&db).await.expect("Second sync failed");

        assert_eq!(purchase::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(item::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sync_schema_adds_missing_column() {
        let db = connect("sqlite::memory:").await.expect("Failed to connect");

        // An older purchases table without the computed totals
        db.execute(Statement::from_string(
            db.get_database_backend(),
            r#"
            CREATE TABLE purchases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                supplier TEXT NOT NULL,
                date TEXT NOT NULL,
                shipping_cost REAL NOT NULL DEFAULT 0,
                other_cost REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#
            .to_owned(),
        ))
        .await
        .expect("Failed to create legacy table");

        sync_schema(&db).await.expect("Sync failed");

        let now = chrono::Utc::now();
        let inserted = purchase::ActiveModel {
            supplier: Set("Acme".to_string()),
            date: Set(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            shipping_cost: Set(0.0),
            other_cost: Set(0.0),
            total_merchandise: Set(100.0),
            total_extras: Set(10.0),
            grand_total: Set(110.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Insert into altered table failed");

        assert_eq!(inserted.grand_total, 110.0);
    }

    #[tokio::test]
    async fn test_sync_schema_fills_rows_that_predate_new_columns() {
        use crate::domain::PurchaseRepository;
        use crate::infrastructure::SeaOrmPurchaseRepository;

        let db = connect("sqlite::memory:").await.expect("Failed to connect");
        let backend = db.get_database_backend();

        // Oldest layout: no totals, no timestamps
        db.execute(Statement::from_string(
            backend,
            r#"
            CREATE TABLE purchases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                supplier TEXT NOT NULL,
                date TEXT NOT NULL,
                shipping_cost REAL NOT NULL DEFAULT 0
            )
            "#
            .to_owned(),
        ))
        .await
        .expect("Failed to create legacy table");
        db.execute(Statement::from_string(
            backend,
            "INSERT INTO purchases (supplier, date, shipping_cost) VALUES ('Acme', '2024-01-01', 5)"
                .to_owned(),
        ))
        .await
        .expect("Failed to insert legacy row");

        sync_schema(&db).await.expect("Sync failed");

        let repo = SeaOrmPurchaseRepository::new(db.clone());
        let purchases = repo.find_all().await.expect("Listing after sync failed");

        assert_eq!(purchases.len(), 1);
        let legacy = &purchases[0];
        assert_eq!(legacy.supplier, "Acme");
        assert_eq!(legacy.shipping_cost, 5.0);
        assert_eq!(legacy.other_cost, 0.0);
        assert_eq!(legacy.total_merchandise, 0.0);
        assert_eq!(legacy.total_extras, 0.0);
        assert_eq!(legacy.grand_total, 0.0);
        assert!(legacy.items.is_empty());

        // A second sync leaves the filled values alone
        sync_schema(&db).await.expect("Second sync failed");
        let again = repo.find_all().await.expect("Listing failed");
        assert_eq!(again[0].created_at, legacy.created_at);
    }

    #[tokio::test]
    async fn test_deleting_purchase_cascades_to_items() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        let now = chrono::Utc::now();

        let parent = purchase::ActiveModel {
            supplier: Set("Acme".to_string()),
            date: Set(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            shipping_cost: Set(0.0),
            other_cost: Set(0.0),
            total_merchandise: Set(0.0),
            total_extras: Set(0.0),
            grand_total: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to insert purchase");

        item::ActiveModel {
            purchase_id: Set(parent.id),
            qty: Set(1),
            unit_price: Set(10.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to insert item");

        purchase::Entity::delete_by_id(parent.id)
            .exec(&db)
            .await
            .expect("Delete failed");

        assert_eq!(item::Entity::find().count(&db).await.unwrap(), 0);
    }
}
