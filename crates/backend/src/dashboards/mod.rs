pub mod d400_msku_analytics;
pub mod d401_inventory_overview;
