use crate::outcome::Failure;
use crate::step::StepName;
use thiserror::Error;

/// Boxed error carried by [`Halt::Fault`] and [`UseCaseError::Fault`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a step action returns.
///
/// - `Ok(true)` - continue with the next step
/// - `Ok(false)` - stop, the run fails with code `step_false`
/// - `Err(Halt::Failure(_))` - stop, the run fails with the failure's code and message
/// - `Err(Halt::Fault(_))` - stop, the error leaves `call` as [`UseCaseError::Fault`]
pub type StepResult = Result<bool, Halt>;

/// Interrupts the step loop.
///
/// A `Failure` is an expected business outcome and ends up in the
/// [`Outcome`](crate::Outcome). A `Fault` is a programmer or environment error
/// and is never turned into an outcome.
///
/// Any `std::error::Error` converts into `Halt::Fault`, so `?` inside a step
/// body propagates errors past the engine:
///
/// ```
/// use casework::{Halt, StepResult};
///
/// fn parse_amount(raw: &str) -> StepResult {
///     let amount: u32 = raw.parse()?;
///     Ok(amount > 0)
/// }
///
/// assert!(matches!(parse_amount("x"), Err(Halt::Fault(_))));
/// assert!(matches!(parse_amount("3"), Ok(true)));
/// ```
#[derive(Debug)]
pub enum Halt {
    /// Expected failure with a code and a message.
    Failure(Failure),
    /// Unexpected error, propagated out of the run.
    Fault(BoxError),
}

impl Halt {
    /// Creates a fault from anything convertible into a boxed error,
    /// including plain strings.
    pub fn fault(error: impl Into<BoxError>) -> Self {
        Halt::Fault(error.into())
    }

    /// Returns the failure if this is an expected business failure.
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Halt::Failure(failure) => Some(failure),
            Halt::Fault(_) => None,
        }
    }
}

impl From<Failure> for Halt {
    fn from(failure: Failure) -> Self {
        Halt::Failure(failure)
    }
}

impl<E> From<E> for Halt
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Halt::Fault(Box::new(error))
    }
}

/// Errors that escape a use case call instead of becoming an
/// [`Outcome`](crate::Outcome).
///
/// Business failures (validation, falsy steps, failed saves, custom codes)
/// are never reported here.
///
/// # Non-Exhaustive
///
/// Always include a wildcard arm when matching:
///
/// ```
/// use casework::UseCaseError;
///
/// fn report(error: &UseCaseError) -> String {
///     match error {
///         UseCaseError::MethodNotFound { step, .. } => format!("missing method {step}"),
///         UseCaseError::Fault { step, source, .. } => format!("{step} crashed: {source}"),
///         _ => error.to_string(),
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UseCaseError {
    /// The parameter mapping could not be turned into the use case's fields.
    #[error("Invalid parameters for use case '{use_case}': {source}")]
    InvalidParams {
        /// Name of the use case
        use_case: String,
        /// Deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A named step resolved to neither an own method nor a mixed-in one.
    #[error("Step '{step}' in use case '{use_case}' does not name a known method")]
    MethodNotFound {
        /// Name of the use case
        use_case: String,
        /// The unresolved step
        step: StepName,
    },

    /// A step raised an unexpected error.
    #[error("Step '{step}' in use case '{use_case}' raised: {source}")]
    Fault {
        /// Name of the use case
        use_case: String,
        /// The step that raised
        step: StepName,
        /// The raised error
        #[source]
        source: BoxError,
    },
}
