//! `validator` glue for rules that live in `catalog_core`.

use catalog_core::naming::is_valid_key;
use validator::ValidationError;

/// Custom validator for caller-chosen primary keys.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_key"))
    }
}

/// Custom validator rejecting whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}
