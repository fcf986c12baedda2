//! Name rules for worlds, files, and content-type derived extensions.

use crate::{AartError, Result};

/// Extension used when an upload carries no `Content-Type` header.
pub const DEFAULT_EXTENSION: &str = "bin";

/// Check that `name` is usable as a single path component.
///
/// Rejects empty names, `.` and `..`, separators, and control characters
/// so that client-supplied names can never address anything outside the
/// directory they are joined onto.
pub fn validate_component(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AartError::Validation(format!("{kind} must not be empty")));
    }
    if name == "." || name == ".." {
        return Err(AartError::Validation(format!(
            "{kind} '{name}' is not allowed"
        )));
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(AartError::Validation(format!(
            "{kind} '{}' contains a path separator or control character",
            name.escape_default()
        )));
    }
    Ok(())
}

/// Derive a file extension from a `Content-Type` header value.
///
/// The extension is the media subtype, verbatim (`image/png` -> `png`,
/// `image/svg+xml` -> `svg+xml`). Parameters are ignored. A missing header
/// yields [`DEFAULT_EXTENSION`].
pub fn extension_from_content_type(content_type: Option<&str>) -> Result<String> {
    let Some(value) = content_type else {
        return Ok(DEFAULT_EXTENSION.to_string());
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    let (_, subtype) = essence.split_once('/').ok_or_else(|| {
        AartError::Validation(format!("content type '{value}' has no subtype"))
    })?;
    let subtype = subtype.trim();

    validate_component("content subtype", subtype)?;
    Ok(subtype.to_string())
}

/// The `n`-th candidate name for an auto-named file.
pub fn numbered_name(n: u64, extension: &str) -> String {
    format!("{n}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_component_accepts_plain_names() {
        assert!(validate_component("file name", "0.png").is_ok());
        assert!(validate_component("file name", "map data.json").is_ok());
        assert!(validate_component("world name", "6f1c5a9e-world").is_ok());
        assert!(validate_component("file name", ".hidden").is_ok());
        assert!(validate_component("file name", "日本語.txt").is_ok());
    }

    #[test]
    fn test_validate_component_rejects_traversal() {
        for bad in ["", ".", "..", "../etc", "a/b", "a\\b", "nul\0byte", "line\nbreak"] {
            let result = validate_component("file name", bad);
            assert!(
                matches!(result, Err(AartError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_extension_from_content_type() {
        assert_eq!(
            extension_from_content_type(Some("image/png")).unwrap(),
            "png"
        );
        assert_eq!(
            extension_from_content_type(Some("text/plain; charset=utf-8")).unwrap(),
            "plain"
        );
        assert_eq!(
            extension_from_content_type(Some("image/svg+xml")).unwrap(),
            "svg+xml"
        );
        assert_eq!(
            extension_from_content_type(Some("application/x-custom")).unwrap(),
            "x-custom"
        );
    }

    #[test]
    fn test_extension_defaults_without_header() {
        assert_eq!(extension_from_content_type(None).unwrap(), "bin");
    }

    #[test]
    fn test_extension_rejects_unsafe_subtypes() {
        for bad in ["text", "text/", "image/../../x", "image/..", "a/b\\c"] {
            let result = extension_from_content_type(Some(bad));
            assert!(
                matches!(result, Err(AartError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name(0, "png"), "0.png");
        assert_eq!(numbered_name(12, "plain"), "12.plain");
    }
}
