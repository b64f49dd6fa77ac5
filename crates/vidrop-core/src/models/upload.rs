use serde::{Deserialize, Serialize};

/// Envelope status shared by success and error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Where a stored video ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredLocation {
    /// Written to local disk
    Local {
        #[serde(rename = "storedName")]
        stored_name: String,
        path: String,
    },
    /// Hosted by the remote video service
    Remote { url: String },
}

/// Metadata about a stored upload, as returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub original_name: String,
    #[serde(flatten)]
    pub location: StoredLocation,
    /// Size in bytes
    pub size: u64,
    pub mime_type: String,
}

/// Success body for `POST /api/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub file: StoredFile,
}

impl UploadResponse {
    pub fn success(file: StoredFile) -> Self {
        let message = match file.location {
            StoredLocation::Local { .. } => "Video chunk uploaded successfully",
            StoredLocation::Remote { .. } => "Video uploaded successfully",
        };
        Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
            file,
        }
    }
}
