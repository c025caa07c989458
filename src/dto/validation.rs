//! Validation and normalisation helpers shared by the request DTOs.

use std::collections::HashSet;

use validator::ValidationError;

/// Trim surrounding whitespace from a display name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_owned()
}

/// Validates that a display name is not blank once trimmed.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("name_required");
        err.message = Some("name must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Case-insensitive comparison key for unique names.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Keep the first occurrence of every name (compared case-insensitively), preserving order.
///
/// Returns the kept items and the number of dropped repeats.
pub fn dedup_by_name<T>(items: Vec<T>, name: impl Fn(&T) -> &str) -> (Vec<T>, usize) {
    let mut seen = HashSet::new();
    let total = items.len();
    let kept = items
        .into_iter()
        .filter(|item| seen.insert(name_key(name(item))))
        .collect::<Vec<_>>();
    let dropped = total - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("  Red Team \t"), "Red Team");
        assert_eq!(normalize_name("Blue"), "Blue");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Red").is_ok());
        assert!(validate_name(" x ").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_name_key_ignores_case_and_padding() {
        assert_eq!(name_key(" Chess "), name_key("CHESS"));
        assert_ne!(name_key("Chess"), name_key("Checkers"));
    }

    #[test]
    fn test_dedup_by_name_keeps_first_occurrence() {
        let (kept, dropped) = dedup_by_name(vec!["Ann", "bob", "ANN", "Bob ", "Cy"], |s| *s);
        assert_eq!(kept, vec!["Ann", "bob", "Cy"]);
        assert_eq!(dropped, 2);
    }
}
