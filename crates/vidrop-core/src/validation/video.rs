use crate::filename;

/// Video tokens accepted when no override is configured.
pub const DEFAULT_VIDEO_TOKENS: &[&str] = &["mp4", "avi", "mkv"];

/// Upload validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Only video files are allowed!")]
    NotAVideo {
        filename: String,
        mime_type: String,
    },
}

/// Video upload validator
///
/// Decides from client-declared metadata only: the filename extension must be
/// one of the allowed tokens (case-insensitive) and the declared MIME type must
/// contain one of them. File content is never inspected.
#[derive(Debug, Clone)]
pub struct VideoValidator {
    allowed_tokens: Vec<String>,
}

impl VideoValidator {
    pub fn new(allowed_tokens: Vec<String>) -> Self {
        Self {
            allowed_tokens: allowed_tokens
                .into_iter()
                .map(|t| t.trim().trim_start_matches('.').to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn allowed_tokens(&self) -> &[String] {
        &self.allowed_tokens
    }

    /// Extension check: lowercased extension is in the allowed set.
    pub fn has_allowed_extension(&self, original_name: &str) -> bool {
        filename::extension(original_name)
            .map(|ext| self.allowed_tokens.iter().any(|t| *t == ext))
            .unwrap_or(false)
    }

    /// MIME check: declared type contains an allowed token as a substring.
    pub fn has_allowed_mime_type(&self, mime_type: &str) -> bool {
        self.allowed_tokens
            .iter()
            .any(|t| mime_type.contains(t.as_str()))
    }

    /// Accept only when both the extension and the MIME type checks pass.
    pub fn validate(&self, original_name: &str, mime_type: &str) -> Result<(), ValidationError> {
        let extension_ok = self.has_allowed_extension(original_name);
        let mime_ok = self.has_allowed_mime_type(mime_type);

        if extension_ok && mime_ok {
            return Ok(());
        }

        tracing::debug!(
            filename = %original_name,
            mime_type = %mime_type,
            extension_ok,
            mime_ok,
            "Rejected upload that is not a video"
        );

        Err(ValidationError::NotAVideo {
            filename: original_name.to_string(),
            mime_type: mime_type.to_string(),
        })
    }
}

impl Default for VideoValidator {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_TOKENS.iter().map(|t| t.to_string()).collect())
    }
}
