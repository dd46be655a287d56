use crate::error::{Halt, StepResult};
use crate::outcome::{Code, Failure, Outcome};
use crate::persistence::Persist;
use crate::validation::{Errors, Validate};
use crate::UseCase;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lifecycle of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Created,
    Preparing,
    Validating,
    RunningSteps,
    Succeeded,
    Failed,
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Succeeded | State::Failed)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Created => write!(f, "created"),
            State::Preparing => write!(f, "preparing"),
            State::Validating => write!(f, "validating"),
            State::RunningSteps => write!(f, "running_steps"),
            State::Succeeded => write!(f, "succeeded"),
            State::Failed => write!(f, "failed"),
        }
    }
}

/// How a run ended, before it is packaged into an [`Outcome`].
#[derive(Debug)]
pub(crate) enum Termination {
    Succeeded(Option<String>),
    Failed(Failure),
}

/// Per-call state handed to every step.
///
/// Dereferences to the use case's fields, so steps read `ctx.title` directly.
/// Created fresh for each call and consumed when the outcome is built.
pub struct Execution<U: UseCase> {
    fields: U,
    record: Option<U::Record>,
    error_code: Option<Code>,
    errors: Errors,
    state: State,
    started_at: Instant,
}

impl<U> fmt::Debug for Execution<U>
where
    U: UseCase + fmt::Debug,
    U::Record: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Execution")
            .field("fields", &self.fields)
            .field("record", &self.record)
            .field("error_code", &self.error_code)
            .field("errors", &self.errors)
            .field("state", &self.state)
            .finish()
    }
}

impl<U: UseCase> Deref for Execution<U> {
    type Target = U;

    fn deref(&self) -> &U {
        &self.fields
    }
}

impl<U: UseCase> DerefMut for Execution<U> {
    fn deref_mut(&mut self) -> &mut U {
        &mut self.fields
    }
}

impl<U: UseCase> Execution<U> {
    pub(crate) fn new(fields: U) -> Self {
        Self {
            fields,
            record: None,
            error_code: None,
            errors: Errors::new(),
            state: State::Created,
            started_at: Instant::now(),
        }
    }

    pub fn fields(&self) -> &U {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut U {
        &mut self.fields
    }

    /// The primary record, once a strategy or a step has set it.
    pub fn record(&self) -> Option<&U::Record> {
        self.record.as_ref()
    }

    pub fn record_mut(&mut self) -> Option<&mut U::Record> {
        self.record.as_mut()
    }

    pub fn set_record(&mut self, record: U::Record) {
        self.record = Some(record);
    }

    pub fn take_record(&mut self) -> Option<U::Record> {
        self.record.take()
    }

    pub(crate) fn assign_record(&mut self, record: Option<U::Record>) {
        self.record = record;
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut Errors {
        &mut self.errors
    }

    /// Code of the latest failure, set as soon as `fail`, `break_when_invalid`
    /// or a rejected save reports it.
    pub fn error_code(&self) -> Option<&Code> {
        self.error_code.as_ref()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Aborts the current step with a code and message.
    ///
    /// ```
    /// # use casework::{define_use_case, Errors, Execution, StepResult, Validate};
    /// # #[derive(serde::Deserialize)]
    /// # struct Refund { amount: u32 }
    /// # impl Validate for Refund { fn validate(&self, _: &mut Errors) {} }
    /// # define_use_case!(Refund, record = (), |p| p.build());
    /// fn check_limit(ctx: &mut Execution<Refund>) -> StepResult {
    ///     if ctx.amount > 500 {
    ///         return ctx.fail("over_limit", "Refunds above 500 need approval");
    ///     }
    ///     Ok(true)
    /// }
    /// ```
    pub fn fail(&mut self, code: impl Into<Code>, message: impl Into<String>) -> StepResult {
        self.fail_with(Failure::new(code).with_message(message))
    }

    /// Aborts the current step with a prepared failure. A failure without a
    /// code is reported as `failure`.
    pub fn fail_with(&mut self, failure: Failure) -> StepResult {
        self.error_code = Some(failure.outcome_code());
        Err(Halt::Failure(failure))
    }

    /// Re-runs the validations and fails with `validation_failed` when any
    /// error is reported. The error collection is replaced by the fresh result.
    pub fn break_when_invalid(&mut self) -> StepResult {
        self.errors = Validate::errors(&self.fields);
        if self.errors.is_empty() {
            Ok(true)
        } else {
            let message = self.errors.to_sentence();
            self.fail(Code::VALIDATION_FAILED, message)
        }
    }

    pub(crate) fn transition(&mut self, next: State) {
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }

    /// Packages the run into its outcome.
    pub(crate) fn conclude(mut self, termination: Termination) -> Outcome<U::Record> {
        match termination {
            Termination::Succeeded(message) => {
                self.transition(State::Succeeded);
                info!(
                    elapsed_ms = self.elapsed().as_millis() as u64,
                    "use case succeeded"
                );
                Outcome::succeeded(self.record, self.errors, message)
            }
            Termination::Failed(failure) => {
                self.transition(State::Failed);
                let code = failure.outcome_code();
                warn!(code = %code, message = %failure.message(), "use case failed");
                self.error_code = Some(code);
                Outcome::failed(self.record, self.errors, failure, None)
            }
        }
    }
}

impl<U> Execution<U>
where
    U: UseCase,
    U::Record: Persist,
{
    /// Saves the execution's own record.
    ///
    /// Returns `Ok(false)` without failing when there is no record.
    pub fn save_record(&mut self) -> StepResult {
        let saved = match self.record.as_mut() {
            Some(record) => persist(&mut self.errors, record),
            None => return Ok(false),
        };
        self.settle(saved)
    }
}

impl<U: UseCase> Execution<U> {
    /// Saves `record`.
    ///
    /// On rejection, adds one error named after the record's model with the
    /// record's messages joined, then fails with `save_failed`.
    pub fn save<R: Persist + ?Sized>(&mut self, record: &mut R) -> StepResult {
        let saved = persist(&mut self.errors, record);
        self.settle(saved)
    }

    fn settle(&mut self, saved: Result<(), Failure>) -> StepResult {
        match saved {
            Ok(()) => Ok(true),
            Err(failure) => self.fail_with(failure),
        }
    }
}

fn persist<R: Persist + ?Sized>(errors: &mut Errors, record: &mut R) -> Result<(), Failure> {
    if record.save() {
        return Ok(());
    }
    let messages = record.errors().join(", ");
    errors.add(record.model_name(), messages.clone());
    Err(Failure::new(Code::SAVE_FAILED).with_message(messages))
}
