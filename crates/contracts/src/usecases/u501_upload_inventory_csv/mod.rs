pub mod request;
pub mod response;

pub use request::UploadRequest;
pub use response::{LastUploadResponse, UploadResult};

use crate::usecases::common::UseCaseMetadata;

pub struct UploadInventoryCsv;

impl UseCaseMetadata for UploadInventoryCsv {
    const INDEX: &'static str = "u501";
    const NAME: &'static str = "upload_inventory_csv";
    const TITLE: &'static str = "Data Upload";
}
