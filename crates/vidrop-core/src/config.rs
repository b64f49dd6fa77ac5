//! Configuration module
//!
//! Configuration is read once at startup from the environment (and a `.env`
//! file when present) into an immutable [`Config`] that is handed to the
//! storage factory and the HTTP handlers.

use std::env;

use crate::storage_types::StorageBackend;
use crate::validation::DEFAULT_VIDEO_TOKENS;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_VIDEO_SIZE_MB: usize = 100;
const UPLOAD_DIR: &str = "uploads";
const CLOUDINARY_API_BASE_URL: &str = "https://api.cloudinary.com";
const CLOUDINARY_UPLOAD_FOLDER: &str = "uploads";

/// Base configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct UploadServiceConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub upload_dir: String,
    // Upload policy
    pub max_video_size_bytes: usize,
    pub video_allowed_extensions: Vec<String>,
    // Cloudinary configuration (remote backend only)
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,
    pub cloudinary_api_base_url: String,
    pub cloudinary_upload_folder: String,
    /// Request timeout for the remote upload; `None` waits indefinitely.
    pub cloudinary_timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServiceConfig>);

impl Config {
    fn as_upload(&self) -> &UploadServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_upload().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = UploadServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_upload().validate()?;

        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_upload().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_upload().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_upload().base.environment
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_upload().storage_backend
    }

    pub fn upload_dir(&self) -> &str {
        &self.as_upload().upload_dir
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.as_upload().max_video_size_bytes
    }

    pub fn video_allowed_extensions(&self) -> &[String] {
        &self.as_upload().video_allowed_extensions
    }

    pub fn cloudinary_cloud_name(&self) -> Option<&str> {
        self.as_upload().cloudinary_cloud_name.as_deref()
    }

    pub fn cloudinary_api_key(&self) -> Option<&str> {
        self.as_upload().cloudinary_api_key.as_deref()
    }

    pub fn cloudinary_api_secret(&self) -> Option<&str> {
        self.as_upload().cloudinary_api_secret.as_deref()
    }

    pub fn cloudinary_api_base_url(&self) -> &str {
        &self.as_upload().cloudinary_api_base_url
    }

    pub fn cloudinary_upload_folder(&self) -> &str {
        &self.as_upload().cloudinary_upload_folder
    }

    pub fn cloudinary_timeout_secs(&self) -> Option<u64> {
        self.as_upload().cloudinary_timeout_secs
    }
}

impl UploadServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::Local,
        };

        let max_video_size_mb = lookup("MAX_VIDEO_SIZE_MB")
            .map(|s| s.parse::<usize>())
            .transpose()
            .map_err(|_| anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be a valid number"))?
            .unwrap_or(MAX_VIDEO_SIZE_MB);

        let video_allowed_extensions = lookup("VIDEO_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|| DEFAULT_VIDEO_TOKENS.join(","))
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let cloudinary_timeout_secs = lookup("CLOUDINARY_TIMEOUT_SECS")
            .map(|s| s.parse::<u64>())
            .transpose()
            .map_err(|_| anyhow::anyhow!("CLOUDINARY_TIMEOUT_SECS must be a valid number"))?;

        Ok(UploadServiceConfig {
            base,
            storage_backend,
            upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(|| UPLOAD_DIR.to_string()),
            max_video_size_bytes: max_video_size_mb * 1024 * 1024,
            video_allowed_extensions,
            cloudinary_cloud_name: lookup("CLOUDINARY_CLOUD_NAME").filter(|s| !s.is_empty()),
            cloudinary_api_key: lookup("CLOUDINARY_API_KEY").filter(|s| !s.is_empty()),
            cloudinary_api_secret: lookup("CLOUDINARY_API_SECRET").filter(|s| !s.is_empty()),
            cloudinary_api_base_url: lookup("CLOUDINARY_API_BASE_URL")
                .unwrap_or_else(|| CLOUDINARY_API_BASE_URL.to_string()),
            cloudinary_upload_folder: lookup("CLOUDINARY_UPLOAD_FOLDER")
                .unwrap_or_else(|| CLOUDINARY_UPLOAD_FOLDER.to_string()),
            cloudinary_timeout_secs,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }

        if self.video_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "VIDEO_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        match self.storage_backend {
            StorageBackend::Local => {
                if self.upload_dir.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "UPLOAD_DIR must not be empty when using local storage backend"
                    ));
                }
            }
            StorageBackend::Cloudinary => {
                if self.cloudinary_cloud_name.is_none()
                    || self.cloudinary_api_key.is_none()
                    || self.cloudinary_api_secret.is_none()
                {
                    return Err(anyhow::anyhow!(
                        "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET \
                         must be set when using cloudinary storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UploadServiceConfig::from_lookup(|key| map.get(key).cloned())
            .map(|c| Config(Box::new(c)))
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 3000);
        assert_eq!(config.storage_backend(), StorageBackend::Local);
        assert_eq!(config.upload_dir(), "uploads");
        assert_eq!(config.max_video_size_bytes(), 100 * 1024 * 1024);
        assert_eq!(config.video_allowed_extensions(), ["mp4", "avi", "mkv"]);
        assert_eq!(config.cloudinary_api_base_url(), "https://api.cloudinary.com");
        assert_eq!(config.cloudinary_upload_folder(), "uploads");
        assert_eq!(config.cloudinary_timeout_secs(), None);
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config_from(&[("PORT", "http")]).is_err());
    }

    #[test]
    fn test_invalid_backend_is_an_error() {
        assert!(config_from(&[("STORAGE_BACKEND", "nfs")]).is_err());
    }

    #[test]
    fn test_cloudinary_requires_credentials() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "cloudinary"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
        ])
        .unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("STORAGE_BACKEND", "cloudinary"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
            ("CLOUDINARY_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.cloudinary_cloud_name(), Some("demo"));
        assert_eq!(config.cloudinary_timeout_secs(), Some(30));
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let config = config_from(&[("ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_origins(),
            ["https://a.example", "https://b.example"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_size_and_extension_overrides() {
        let config = config_from(&[
            ("MAX_VIDEO_SIZE_MB", "5"),
            ("VIDEO_ALLOWED_EXTENSIONS", ".MP4, webm"),
        ])
        .unwrap();
        assert_eq!(config.max_video_size_bytes(), 5 * 1024 * 1024);
        assert_eq!(config.video_allowed_extensions(), ["mp4", "webm"]);

        let config = config_from(&[("MAX_VIDEO_SIZE_MB", "0")]).unwrap();
        assert!(config.validate().is_err());
    }
}
