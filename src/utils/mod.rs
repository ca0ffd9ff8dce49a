//! Utility functions shared across the application.
//!
//! MIME classification and object-key resolution, used by both the blob
//! fetcher and the response normalizer.

/// Content types whose bodies travel base64-encoded.
pub const BINARY_MIME_TYPES: [&str; 9] = [
    "application/octet-stream",
    "image/bmp",
    "image/jpeg",
    "image/gif",
    "image/vnd.microsoft.icon",
    "image/png",
    "image/svg+xml",
    "image/tiff",
    "image/webp",
];

/// Extracts the primary token of a content type.
///
/// # Arguments
///
/// * `content_type` - A `Content-Type` header value
///
/// # Returns
///
/// The type without parameters, e.g. `text/html; charset=utf-8` → `text/html`
#[must_use]
pub fn primary_mime_type(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(primary, _)| primary)
        .trim()
}

/// Checks whether a content type belongs to the binary registry.
///
/// Parameters such as `charset` and letter case are ignored.
///
/// # Arguments
///
/// * `content_type` - A `Content-Type` header value, with or without parameters
///
/// # Returns
///
/// `true` if the primary type is listed in `BINARY_MIME_TYPES`.
#[must_use]
pub fn is_binary_mime_type(content_type: &str) -> bool {
    let primary = primary_mime_type(content_type);
    BINARY_MIME_TYPES
        .iter()
        .any(|binary| binary.eq_ignore_ascii_case(primary))
}

/// Builds a storage key from an origin base path and a request URI.
///
/// Separators are collapsed and `.` and `..` segments resolved. A trailing
/// separator on the URI is kept; the leading separator is dropped.
///
/// # Arguments
///
/// * `base_path` - The origin's path prefix, possibly empty
/// * `uri` - The request URI as forwarded to the origin
///
/// # Returns
///
/// The object key, e.g. (`/app/1.0`, `/_next/data/x.json`) → `app/1.0/_next/data/x.json`
#[must_use]
pub fn object_key(base_path: &str, uri: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base_path.split('/').chain(uri.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut key = segments.join("/");
    if uri.ends_with('/') && !key.is_empty() {
        key.push('/');
    }
    key
}
