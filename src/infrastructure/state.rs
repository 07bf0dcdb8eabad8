//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::PurchaseRepository;
use crate::infrastructure::SeaOrmPurchaseRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Purchase repository
    pub purchase_repo: Arc<dyn PurchaseRepository>,
}

impl AppState {
    /// Create a new AppState backed by SeaORM repositories
    pub fn new(db: DatabaseConnection) -> Self {
        let purchase_repo = Arc::new(SeaOrmPurchaseRepository::new(db.clone()));
        Self { db, purchase_repo }
    }

    /// Create an AppState with a caller-supplied repository
    pub fn with_repository(db: DatabaseConnection, purchase_repo: Arc<dyn PurchaseRepository>) -> Self {
        Self { db, purchase_repo }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

