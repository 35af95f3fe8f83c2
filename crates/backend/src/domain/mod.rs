pub mod a001_product;
pub mod a002_warehouse;
pub mod a003_inventory;
pub mod a004_sale;
pub mod a005_return;
pub mod a006_sku_mapping;
