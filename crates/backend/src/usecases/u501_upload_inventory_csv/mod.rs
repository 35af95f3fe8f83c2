pub mod executor;

pub use executor::{last_upload, UploadError, UploadExecutor};
