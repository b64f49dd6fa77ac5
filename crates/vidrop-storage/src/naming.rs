//! Shared identifier derivation for storage backends.
//!
//! Local: `{basename}-{millis}{extension}`. Cloudinary: `{folder}/{basename}-{millis}`.

use vidrop_core::filename::split_extension;

/// Current time in unix milliseconds
pub fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stored filename for the local backend.
///
/// The extension keeps the client's case (`Clip.MP4` becomes `Clip-<millis>.MP4`).
pub fn stored_file_name(original_name: &str, millis: i64) -> String {
    let (basename, extension) = split_extension(original_name);
    format!("{}-{}{}", basename, millis, extension)
}

/// Public id for the Cloudinary backend; the extension is dropped.
pub fn public_id(folder: &str, original_name: &str, millis: i64) -> String {
    let (basename, _) = split_extension(original_name);
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        format!("{}-{}", basename, millis)
    } else {
        format!("{}/{}-{}", folder, basename, millis)
    }
}
