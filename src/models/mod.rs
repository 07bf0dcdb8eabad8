pub mod item;
pub mod purchase;
