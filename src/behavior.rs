//! Shared, named step methods.
//!
//! A process resolves a named step when it runs: first against its own
//! methods, then against its mixed-in behaviors, newest first.

use crate::context::Execution;
use crate::error::StepResult;
use crate::persistence::Persist;
use crate::step::{Action, StepName};
use crate::UseCase;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A bundle of step methods that can be mixed into a process.
///
/// # Examples
///
/// ```
/// use casework::{Behavior, Execution, StepResult, UseCase};
///
/// struct Audited;
///
/// impl<U: UseCase> Behavior<U> for Audited {
///     fn name(&self) -> &str {
///         "audited"
///     }
///
///     fn call(&self, method: &str, _ctx: &mut Execution<U>) -> Option<StepResult> {
///         match method {
///             "audit" => Some(Ok(true)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Behavior<U: UseCase>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Runs `method` if this behavior provides it, `None` otherwise.
    fn call(&self, method: &str, ctx: &mut Execution<U>) -> Option<StepResult>;
}

/// A named table of step methods.
///
/// Each process keeps one for its own methods; it can also be mixed into other
/// processes as a [`Behavior`].
pub struct Methods<U: UseCase> {
    name: String,
    table: HashMap<StepName, Action<U>>,
}

impl<U: UseCase> Clone for Methods<U> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            table: self.table.clone(),
        }
    }
}

impl<U: UseCase> fmt::Debug for Methods<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Methods")
            .field("name", &self.name)
            .field("methods", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<U: UseCase> Methods<U> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: HashMap::new(),
        }
    }

    /// Adds or replaces a method.
    pub fn method<F>(mut self, name: impl Into<StepName>, action: F) -> Self
    where
        F: Fn(&mut Execution<U>) -> StepResult + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(action));
        self
    }

    pub(crate) fn insert(&mut self, name: impl Into<StepName>, action: Action<U>) {
        self.table.insert(name.into(), action);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<U: UseCase> Behavior<U> for Methods<U> {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, method: &str, ctx: &mut Execution<U>) -> Option<StepResult> {
        self.table.get(method).map(|action| action(ctx))
    }
}

/// Provides `save!`, which saves the execution's record.
///
/// ```
/// # use casework::{define_use_case, Errors, Persist, RecordPersistence, Validate};
/// # struct Post;
/// # impl Persist for Post {
/// #     fn save(&mut self) -> bool { true }
/// #     fn errors(&self) -> Vec<String> { Vec::new() }
/// # }
/// # #[derive(serde::Deserialize)]
/// # struct CreatePost {}
/// # impl Validate for CreatePost { fn validate(&self, _: &mut Errors) {} }
/// define_use_case!(CreatePost, record = Post, |p| p
///     .mix_in(RecordPersistence)
///     .inline(|ctx| { ctx.set_record(Post); Ok(true) })
///     .step("save!")
///     .build());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordPersistence;

impl RecordPersistence {
    pub const SAVE: &'static str = "save!";
}

impl<U> Behavior<U> for RecordPersistence
where
    U: UseCase,
    U::Record: Persist,
{
    fn name(&self) -> &str {
        "record_persistence"
    }

    fn call(&self, method: &str, ctx: &mut Execution<U>) -> Option<StepResult> {
        (method == Self::SAVE).then(|| ctx.save_record())
    }
}
