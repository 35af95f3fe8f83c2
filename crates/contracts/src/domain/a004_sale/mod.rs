pub mod aggregate;

pub use aggregate::{
    CreateSaleRequest, NewSale, NewSaleItem, Sale, SaleItem, SaleItemWithProduct, SaleRef,
    SaleWithItems, UpdateSaleStatus,
};
