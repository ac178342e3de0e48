//! Cassette data model and durable storage

mod entry;
mod store;

pub use entry::{Cassette, Entry, RequestDescriptor, ResponseDescriptor};
pub use store::CassetteStore;

use crate::{Result, VcrError};

/// File extension for cassette files
pub const CASSETTE_EXTENSION: &str = "json";

/// Validate a cassette name
///
/// Names become file names, so path separators, traversal components,
/// hidden-file prefixes, and NUL bytes are rejected.
///
/// # Errors
///
/// Returns [`VcrError::InvalidCassetteName`] if the name is invalid
pub fn validate_cassette_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VcrError::InvalidCassetteName(
            "Cassette name cannot be empty".to_string(),
        ));
    }

    if name.len() > 255 {
        return Err(VcrError::InvalidCassetteName(format!(
            "Cassette name too long: {} > 255",
            name.len()
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(VcrError::InvalidCassetteName(
            "Cassette name cannot contain path separators".to_string(),
        ));
    }

    if name.starts_with('.') {
        return Err(VcrError::InvalidCassetteName(
            "Cassette name cannot start with dot".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(VcrError::InvalidCassetteName(
            "Cassette name cannot contain null bytes".to_string(),
        ));
    }

    if name.contains("..") {
        return Err(VcrError::InvalidCassetteName(
            "Cassette name cannot contain '..'".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cassette_name() {
        assert!(validate_cassette_name("wikipedia_homepage").is_ok());
        assert!(validate_cassette_name("scenario-123").is_ok());
        assert!(validate_cassette_name("Login_Flow_2").is_ok());

        assert!(validate_cassette_name("").is_err());
        assert!(validate_cassette_name(".hidden").is_err());
        assert!(validate_cassette_name("a/b").is_err());
        assert!(validate_cassette_name("a\\b").is_err());
        assert!(validate_cassette_name("a..b").is_err());
        assert!(validate_cassette_name("a\0b").is_err());
        assert!(validate_cassette_name(&"x".repeat(256)).is_err());
    }
}
