pub mod a001_product;
pub mod a002_warehouse;
pub mod a003_inventory;
pub mod a004_sale;
pub mod a005_return;
pub mod a006_sku_mapping;
pub mod common;
pub mod d400_msku_analytics;
pub mod d401_inventory_overview;
pub mod u501_upload_inventory_csv;
pub mod u502_ai_query;
