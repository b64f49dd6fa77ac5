//! Filename helpers shared by upload validation and stored-name derivation.
//!
//! Clients put the original filename in the multipart `Content-Disposition`
//! header. Some send a full path, so only the final component is ever used.

/// Final path component of a client supplied filename (`/` and `\` both separate).
pub fn final_component(filename: &str) -> &str {
    filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename)
}

/// Split the final component into `(basename, extension)`.
///
/// The extension keeps its leading dot and original case (`"Clip.MP4"` gives
/// `("Clip", ".MP4")`). A name whose only dot is the first character, such as
/// `".mp4"`, has no extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let name = final_component(filename);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Lowercased extension without the dot, if there is a non-empty one.
pub fn extension(filename: &str) -> Option<String> {
    let (_, ext) = split_extension(filename);
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}
