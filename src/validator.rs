//! Request validation utilities.
//!
//! Handlers construct one [`Validator`] per request, run their field checks
//! through it, and reject the request with the accumulated `field -> message`
//! map when any check failed. The map keeps the first error recorded for a
//! field; later checks against the same key are no-ops.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Sanity-check pattern for email addresses (W3C HTML5 email pattern).
pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex must compile")
});

/// Accumulator of field-level validation failures.
///
/// Not synchronized; callers construct one per request and never share it
/// across tasks.
#[derive(Debug, Default)]
pub struct Validator {
    pub errors: HashMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no errors have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records `message` under `key` unless the key already holds an error.
    pub fn add_error(&mut self, key: &str, message: &str) {
        self.errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Records an error for `key` only when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }
}

/// True when `value` matches the supplied pattern.
pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// True when `value` appears in `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// True when all entries in `values` are distinct.
pub fn unique<T: PartialEq>(values: &[T]) -> bool {
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validator_is_valid() {
        let v = Validator::new();
        assert!(v.valid());
    }

    #[test]
    fn test_add_error_invalidates() {
        let mut v = Validator::new();
        v.add_error("field", "invalid value");

        assert!(!v.valid());
        assert_eq!(v.errors.len(), 1);
        assert_eq!(v.errors["field"], "invalid value");
    }

    #[test]
    fn test_first_error_wins() {
        let mut v = Validator::new();
        v.add_error("field", "invalid value");
        v.add_error("field", "another error");

        assert_eq!(v.errors.len(), 1);
        assert_eq!(v.errors["field"], "invalid value");
    }

    #[test]
    fn test_check_true_records_nothing() {
        let mut v = Validator::new();
        v.check(true, "field", "valid condition");

        assert!(v.valid());
        assert!(v.errors.is_empty());
    }

    #[test]
    fn test_check_false_records_error() {
        let mut v = Validator::new();
        v.check(false, "field", "invalid condition");

        assert_eq!(v.errors.len(), 1);
        assert_eq!(v.errors["field"], "invalid condition");
    }

    #[test]
    fn test_permitted_value() {
        assert!(permitted_value(&2, &[1, 2, 3]));
        assert!(!permitted_value(&4, &[1, 2, 3]));
        assert!(permitted_value(&"b", &["a", "b", "c"]));
        assert!(!permitted_value(&"d", &["a", "b", "c"]));
    }

    #[test]
    fn test_matches() {
        let rx = Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
        assert!(matches("123-456-7890", &rx));
        assert!(!matches("abc-123", &rx));
    }

    #[test]
    fn test_unique() {
        assert!(unique(&[1, 2, 3, 4]));
        assert!(!unique(&[1, 2, 3, 2]));
        assert!(unique(&["apple", "banana", "cherry"]));
        assert!(!unique(&["apple", "banana", "banana"]));
    }

    #[test]
    fn test_email_rx() {
        assert!(matches("alice@example.com", &EMAIL_RX));
        assert!(matches("a.b+tag@sub.example.co.uk", &EMAIL_RX));
        assert!(!matches("not-an-email", &EMAIL_RX));
        assert!(!matches("@example.com", &EMAIL_RX));
        assert!(!matches("alice@", &EMAIL_RX));
    }
}
