//! Repository implementations using SeaORM

pub mod purchase_repository;

pub use purchase_repository::SeaOrmPurchaseRepository;
