use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Selected once at startup; every upload handled by a process goes to the
/// same backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files streamed to a directory on local disk
    Local,
    /// Files buffered in memory and pushed to the Cloudinary upload API
    Cloudinary,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "cloudinary" => Ok(StorageBackend::Cloudinary),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Cloudinary => write!(f, "cloudinary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!("local".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
        assert_eq!(
            " Cloudinary ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Cloudinary
        );
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for backend in [StorageBackend::Local, StorageBackend::Cloudinary] {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
    }
}
