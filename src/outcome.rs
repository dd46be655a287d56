//! The result value of a use case call.

use crate::validation::Errors;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Symbolic outcome classifier.
///
/// Codes are normalized on construction: surrounding whitespace and a
/// leading `:` are removed, so `":access_denied"` and `"access_denied"`
/// compare equal.
///
/// ```
/// use casework::Code;
///
/// assert_eq!(Code::new(" :access_denied "), Code::new("access_denied"));
/// assert_eq!(Code::SUCCESS.as_str(), "success");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(Cow<'static, str>);

impl Code {
    /// Every successful run.
    pub const SUCCESS: Code = Code(Cow::Borrowed("success"));
    /// Failures that carry no code of their own.
    pub const FAILURE: Code = Code(Cow::Borrowed("failure"));
    /// Validation did not pass before the first step.
    pub const VALIDATION_FAILED: Code = Code(Cow::Borrowed("validation_failed"));
    /// A step returned `false`.
    pub const STEP_FALSE: Code = Code(Cow::Borrowed("step_false"));
    /// The record refused to be saved.
    pub const SAVE_FAILED: Code = Code(Cow::Borrowed("save_failed"));

    /// Creates a normalized code.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        let normalized = trimmed.strip_prefix(':').unwrap_or(trimmed);
        Self(Cow::Owned(normalized.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Code {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Code {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// The terminating failure of a run: an optional code and a message.
///
/// A missing code is reported as [`Code::FAILURE`]; a missing message as
/// `"Failed"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    code: Option<Code>,
    message: String,
}

impl Default for Failure {
    fn default() -> Self {
        Self {
            code: None,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Failure {
    /// Message used when none is given.
    pub const DEFAULT_MESSAGE: &'static str = "Failed";

    /// Creates a failure with the given code and the default message.
    pub fn new(code: impl Into<Code>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub(crate) fn from_parts(code: Option<Code>, message: Option<String>) -> Self {
        Self {
            code,
            message: message.unwrap_or_else(|| Self::DEFAULT_MESSAGE.to_string()),
        }
    }

    /// The code given when the failure was raised, if any.
    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// The code reported in the outcome.
    pub fn outcome_code(&self) -> Code {
        self.code.clone().unwrap_or(Code::FAILURE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.outcome_code())
    }
}

/// Immutable result of a use case call.
///
/// Built once per call by the engine. The message is resolved at
/// construction: an explicit message wins, then the failure's message, then
/// the validation errors joined by `", "`.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<R> {
    success: bool,
    record: Option<R>,
    errors: Errors,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<Failure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    code: Code,
}

impl<R> Outcome<R> {
    /// Creates a successful outcome. The code is always [`Code::SUCCESS`].
    pub fn succeeded(record: Option<R>, errors: Errors, message: Option<String>) -> Self {
        let message = resolve_message(message, None, &errors);
        Self {
            success: true,
            record,
            errors,
            exception: None,
            message,
            code: Code::SUCCESS,
        }
    }

    /// Creates a failed outcome from the terminating failure.
    pub fn failed(
        record: Option<R>,
        errors: Errors,
        exception: Failure,
        message: Option<String>,
    ) -> Self {
        let message = resolve_message(message, Some(&exception), &errors);
        let code = exception.outcome_code();
        Self {
            success: false,
            record,
            errors,
            exception: Some(exception),
            message,
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failed(&self) -> bool {
        !self.success
    }

    pub fn record(&self) -> Option<&R> {
        self.record.as_ref()
    }

    /// Consumes the outcome and returns the record.
    pub fn into_record(self) -> Option<R> {
        self.record
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// The terminating failure. Always `None` on success.
    pub fn exception(&self) -> Option<&Failure> {
        self.exception.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn code(&self) -> &Code {
        &self.code
    }
}

fn resolve_message(
    explicit: Option<String>,
    exception: Option<&Failure>,
    errors: &Errors,
) -> Option<String> {
    explicit
        .or_else(|| exception.map(|failure| failure.message().to_string()))
        .or_else(|| (!errors.is_empty()).then(|| errors.to_sentence()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization() {
        assert_eq!(Code::new(":save_failed"), Code::SAVE_FAILED);
        assert_eq!(Code::new("  step_false\n"), Code::STEP_FALSE);
        assert_eq!(Code::from("custom"), "custom");
        assert_eq!(Code::new(":x").to_string(), "x");
    }

    #[test]
    fn test_failure_defaults() {
        let failure = Failure::default();
        assert_eq!(failure.code(), None);
        assert_eq!(failure.outcome_code(), Code::FAILURE);
        assert_eq!(failure.message(), "Failed");
        assert_eq!(failure.to_string(), "Failed (failure)");

        let failure = Failure::new("access_denied").with_message("No permission");
        assert_eq!(failure.outcome_code(), "access_denied");
        assert_eq!(failure.message(), "No permission");
    }

    #[test]
    fn test_success_outcome() {
        let outcome = Outcome::succeeded(Some(7), Errors::default(), None);
        assert!(outcome.is_success());
        assert!(!outcome.is_failed());
        assert_eq!(outcome.code(), &Code::SUCCESS);
        assert_eq!(outcome.record(), Some(&7));
        assert_eq!(outcome.message(), None);
        assert!(outcome.exception().is_none());
        assert_eq!(outcome.into_record(), Some(7));
    }

    #[test]
    fn test_message_resolution_order() {
        let mut errors = Errors::default();
        errors.add("title", "can't be blank");

        let explicit = Outcome::<()>::failed(
            None,
            errors.clone(),
            Failure::new("x").with_message("from failure"),
            Some("explicit".to_string()),
        );
        assert_eq!(explicit.message(), Some("explicit"));

        let from_exception = Outcome::<()>::failed(
            None,
            errors.clone(),
            Failure::new("x").with_message("from failure"),
            None,
        );
        assert_eq!(from_exception.message(), Some("from failure"));

        let from_errors = Outcome::<()>::succeeded(None, errors, None);
        assert_eq!(from_errors.message(), Some("Title can't be blank"));
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = Outcome::<String>::failed(
            None,
            Errors::default(),
            Failure::new(":access_denied").with_message("No permission"),
            None,
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "access_denied");
        assert_eq!(json["message"], "No permission");
        assert_eq!(json["exception"]["code"], "access_denied");
    }
}
