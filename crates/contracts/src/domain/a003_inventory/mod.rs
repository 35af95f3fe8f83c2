pub mod aggregate;

pub use aggregate::{Inventory, InventoryUpdate, InventoryWithDetails};
