//! Repository slug derivation
//!
//! A slug names both the source repository and the hosting project, so it
//! must be URL-safe and unique. Derivation is deterministic: the same
//! client name always yields the same slug.

use crate::error::{CoreError, Result};

/// Namespace prefix applied to every derived slug
pub const SLUG_PREFIX: &str = "sf-client";

/// Derive the repository slug from a client display name.
///
/// Lowercases, strips everything outside `[a-z0-9 ]`, collapses whitespace
/// runs into single hyphens, and prepends [`SLUG_PREFIX`]. Names that leave
/// nothing after stripping are rejected.
pub fn derive_slug(name: &str) -> Result<String> {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    let body = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
    if body.is_empty() {
        return Err(CoreError::Validation(format!(
            "client name {name:?} contains no usable characters for a repository slug"
        )));
    }

    Ok(format!("{SLUG_PREFIX}-{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_derivation() {
        assert_eq!(derive_slug("Acme Corp").unwrap(), "sf-client-acme-corp");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(derive_slug("Acme Corp!!").unwrap(), "sf-client-acme-corp");
        assert_eq!(derive_slug("O'Brien & Sons").unwrap(), "sf-client-obrien-sons");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(derive_slug("  Acme   Corp  ").unwrap(), "sf-client-acme-corp");
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(derive_slug("Studio 54").unwrap(), "sf-client-studio-54");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(derive_slug("Acme Corp").unwrap(), derive_slug("Acme Corp").unwrap());
    }

    #[test]
    fn test_no_stray_hyphens() {
        let slug = derive_slug("-- Acme -- Corp --").unwrap();
        assert!(!slug.contains("--"));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_empty_after_stripping_rejected() {
        assert!(derive_slug("!!!").is_err());
        assert!(derive_slug("   ").is_err());
        assert!(derive_slug("株式会社").is_err());
    }
}
