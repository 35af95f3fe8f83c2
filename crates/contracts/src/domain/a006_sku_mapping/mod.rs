pub mod aggregate;

pub use aggregate::{
    validate_entry, ApplyMappingRequest, ApplyMappingResponse, ResetMappingRequest, SkuMapEntry,
    SkuMapping, UNMAPPED,
};
