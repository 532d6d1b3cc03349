pub mod app_preferences;
pub mod categories;
pub mod customers;
pub mod cuts;
pub mod order_items;
pub mod order_logs;
pub mod orders;
pub mod products;

pub use app_preferences::Entity as AppPreferences;
pub use categories::Entity as Categories;
pub use customers::Entity as Customers;
pub use cuts::Entity as Cuts;
pub use order_items::Entity as OrderItems;
pub use order_logs::Entity as OrderLogs;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
