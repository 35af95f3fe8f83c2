pub mod aggregate;

pub use aggregate::{
    CreateReturnRequest, NewReturn, NewReturnItem, ReturnItem, ReturnItemWithProduct,
    ReturnWithItems, SaleReturn,
};
