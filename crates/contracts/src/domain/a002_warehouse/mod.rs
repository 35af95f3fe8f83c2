pub mod aggregate;

pub use aggregate::{
    NewWarehouse, Warehouse, WarehouseRef, WarehouseUpdate, DEFAULT_WAREHOUSE_LOCATION,
    DEFAULT_WAREHOUSE_NAME,
};
