use std::fmt;

use uuid::Uuid;

/// Fallback stem used when nothing usable survives sanitization.
const FALLBACK_NAME: &str = "upload";

/// Longest sanitized original name kept in a generated blob name.
const MAX_ORIGINAL_LEN: usize = 128;

/// Reasons a blob name is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameError {
    /// Name is empty or whitespace-only.
    Empty,
    /// Name contains `/` or `\`.
    ContainsPathSeparator,
    /// Name is `..`.
    PathTraversal,
    /// Name contains a NUL byte.
    NullByte,
    /// Name starts with a dot.
    Hidden,
    /// Name contains ASCII control characters.
    ControlCharacter,
}

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

impl fmt::Display for FilenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validates a name that must resolve to a single entry directly under the
/// store root.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // CR/LF would otherwise leak into response headers.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// Reduces a client-supplied upload name to something safe to embed in a
/// stored filename.
///
/// Only the last path component is kept, every character outside
/// `[A-Za-z0-9._-]` becomes `_`, and leading dots are stripped.
pub fn sanitize_original_name(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let mut end = cleaned.len().min(MAX_ORIGINAL_LEN);
    while !cleaned.is_char_boundary(end) {
        end -= 1;
    }
    cleaned[..end].to_string()
}

/// Builds a fresh blob name: a time-ordered UUID followed by the sanitized
/// original name.
pub fn generate_blob_name(original: &str) -> String {
    format!("{}-{}", Uuid::now_v7(), sanitize_original_name(original))
}
