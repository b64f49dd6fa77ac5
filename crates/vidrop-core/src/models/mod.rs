pub mod upload;

pub use upload::{ResponseStatus, StoredFile, StoredLocation, UploadResponse};
