//! Validation capability and the error collection it fills.
//!
//! The rules themselves belong to the use case: implement [`Validate`] on the
//! field struct. The engine re-runs it on every call.

use serde::Serialize;
use std::fmt;

/// Field name for errors that do not belong to a specific field.
pub const BASE: &str = "base";

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Human-readable form, e.g. `"Author can't be blank"`.
    ///
    /// Errors on [`BASE`] render the bare message.
    pub fn full_message(&self) -> String {
        if self.field == BASE {
            self.message.clone()
        } else {
            format!("{} {}", humanize(&self.field), self.message)
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_message())
    }
}

/// Ordered collection of validation failures.
///
/// ```
/// use casework::Errors;
///
/// let mut errors = Errors::default();
/// errors.add("author", "can't be blank");
/// errors.add("title", "is too long");
///
/// assert_eq!(errors.to_sentence(), "Author can't be blank, Title is too long");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Errors {
    entries: Vec<FieldError>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Adds `"can't be blank"` for `field` when the value is missing or blank.
    pub fn require_present(&mut self, field: &str, value: Option<&str>) {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.add(field, "can't be blank");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    /// Messages recorded for one field.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.entries.iter().map(FieldError::full_message).collect()
    }

    /// Full messages joined by `", "`.
    pub fn to_sentence(&self) -> String {
        self.full_messages().join(", ")
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Reports the validation failures of a use case's fields.
///
/// ```
/// use casework::{Errors, Validate};
///
/// struct Signup {
///     email: Option<String>,
/// }
///
/// impl Validate for Signup {
///     fn validate(&self, errors: &mut Errors) {
///         errors.require_present("email", self.email.as_deref());
///     }
/// }
///
/// assert!(!Signup { email: None }.is_valid());
/// assert!(Signup { email: Some("a@b.c".into()) }.is_valid());
/// ```
pub trait Validate {
    /// Appends every failure to `errors`.
    fn validate(&self, errors: &mut Errors);

    /// Runs the validations into a fresh collection.
    fn errors(&self) -> Errors {
        let mut errors = Errors::new();
        self.validate(&mut errors);
        errors
    }

    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_messages() {
        let mut errors = Errors::new();
        errors.add("author_name", "can't be blank");
        errors.add(BASE, "Something went wrong");

        assert_eq!(
            errors.full_messages(),
            vec!["Author name can't be blank", "Something went wrong"]
        );
        assert_eq!(
            errors.to_sentence(),
            "Author name can't be blank, Something went wrong"
        );
    }

    #[test]
    fn test_require_present() {
        let mut errors = Errors::new();
        errors.require_present("title", Some("Hello"));
        errors.require_present("content", Some("   "));
        errors.require_present("author", None);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.on("content"), vec!["can't be blank"]);
        assert_eq!(errors.on("author"), vec!["can't be blank"]);
        assert!(errors.on("title").is_empty());
    }

    #[test]
    fn test_clear_and_iterate() {
        let mut errors = Errors::new();
        errors.add("a", "x");
        assert_eq!((&errors).into_iter().count(), 1);
        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_is_fresh_each_time() {
        use std::cell::Cell;

        struct Counter {
            runs: Cell<u32>,
        }

        impl Validate for Counter {
            fn validate(&self, errors: &mut Errors) {
                self.runs.set(self.runs.get() + 1);
                if self.runs.get() > 1 {
                    errors.add(BASE, "second run");
                }
            }
        }

        let counter = Counter { runs: Cell::new(0) };
        assert!(counter.is_valid());
        assert!(!counter.is_valid());
        assert_eq!(counter.runs.get(), 2);
    }
}
