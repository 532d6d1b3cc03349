pub mod catalog;
pub mod orders;
pub mod preferences;
pub mod products;
