pub mod common;
pub mod u501_upload_inventory_csv;
pub mod u502_ai_query;
