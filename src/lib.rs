//! # Casework
//!
//! Business operations as use cases: a typed set of fields, an ordered list of
//! steps, and one uniform [`Outcome`].
//!
//! ## Features
//!
//! - **Ordered steps**: named methods, inline closures, `success` and `failure` control steps
//! - **Conditions**: `when` / `unless` predicates per step
//! - **Short-circuiting**: the first falsy step, failed validation or `fail` ends the run
//! - **Two error channels**: business failures become an [`Outcome`], faults come back as [`UseCaseError`]
//! - **Shared behavior**: named methods mixed in with [`Behavior`]
//! - **Frozen processes**: built once, read concurrently
//!
//! ## Quick Start
//!
//! ```rust
//! use casework::prelude::*;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Register {
//!     email: Option<String>,
//! }
//!
//! impl Validate for Register {
//!     fn validate(&self, errors: &mut Errors) {
//!         errors.require_present("email", self.email.as_deref());
//!     }
//! }
//!
//! define_use_case!(Register, record = String, |p| p
//!     .step("normalize")
//!     .method("normalize", |ctx| {
//!         let email = ctx.email.as_deref().unwrap_or_default().to_lowercase();
//!         ctx.set_record(email);
//!         Ok(true)
//!     })
//!     .build());
//!
//! let outcome = Register::call(json!({ "email": "Ada@Example.com" })).expect("no fault");
//! assert!(outcome.is_success());
//! assert_eq!(outcome.record().map(String::as_str), Some("ada@example.com"));
//!
//! let outcome = Register::call(json!({})).expect("no fault");
//! assert_eq!(outcome.code(), "validation_failed");
//! assert_eq!(outcome.message(), Some("Email can't be blank"));
//! ```
//!
//! ## Control Steps and Conditions
//!
//! ```rust
//! use casework::prelude::*;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct DeleteAccount {
//!     #[serde(default)]
//!     admin: bool,
//!     #[serde(default)]
//!     already_deleted: bool,
//! }
//!
//! impl Validate for DeleteAccount {
//!     fn validate(&self, _errors: &mut Errors) {}
//! }
//!
//! define_use_case!(DeleteAccount, record = (), |p| p
//!     .failure_code("access_denied", |o| o
//!         .message("No permission")
//!         .unless(|ctx| ctx.admin))
//!     .success_with(|o| o.when(|ctx| ctx.already_deleted))
//!     .inline_named("delete", |_ctx| Ok(true))
//!     .build());
//!
//! let outcome = DeleteAccount::call(json!({ "admin": false })).expect("no fault");
//! assert_eq!(outcome.code(), "access_denied");
//! assert_eq!(outcome.message(), Some("No permission"));
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use casework::prelude::*;
//! # use serde::Deserialize;
//! # use serde_json::json;
//! # #[derive(Deserialize)]
//! # struct Import { path: String }
//! # impl Validate for Import { fn validate(&self, _: &mut Errors) {} }
//! # define_use_case!(Import, record = (), |p| p
//! #     .inline_named("read", |ctx| {
//! #         let _len = std::fs::metadata(&ctx.path)?.len();
//! #         Ok(true)
//! #     })
//! #     .build());
//!
//! match Import::call(json!({ "path": "/does/not/exist" })) {
//!     Ok(outcome) if outcome.is_success() => println!("imported"),
//!     Ok(outcome) => eprintln!("{}: {:?}", outcome.code(), outcome.message()),
//!     Err(UseCaseError::Fault { step, source, .. }) => eprintln!("{step} crashed: {source}"),
//!     Err(error) => eprintln!("{error}"),
//! }
//! ```

mod behavior;
mod context;
mod error;
pub mod logging;
mod outcome;
mod persistence;
mod process;
mod step;
mod validation;

pub mod prelude;

pub use behavior::{Behavior, Methods, RecordPersistence};
pub use context::{Execution, State};
pub use error::{BoxError, Halt, StepResult, UseCaseError};
pub use outcome::{Code, Failure, Outcome};
pub use persistence::Persist;
pub use process::{Process, ProcessBuilder, RecordStrategy};
pub use step::{Action, Predicate, StepDeclaration, StepKind, StepName, StepOptions};
pub use validation::{Errors, FieldError, Validate, BASE};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A business operation with typed fields and one canonical [`Process`].
///
/// Usually implemented with [`define_use_case!`].
pub trait UseCase: Validate + DeserializeOwned + Send + Sync + Sized + 'static {
    /// The primary domain entity the use case produces or operates on.
    type Record;

    /// The frozen process shared by every call.
    fn process() -> &'static Process<Self>;

    /// Builds the fields from `params` and runs the process.
    fn call(params: Value) -> Result<Outcome<Self::Record>, UseCaseError> {
        Self::process().call(params)
    }

    /// Same as [`UseCase::call`].
    fn perform(params: Value) -> Result<Outcome<Self::Record>, UseCaseError> {
        Self::call(params)
    }

    /// Runs the process over these fields.
    fn run(self) -> Result<Outcome<Self::Record>, UseCaseError> {
        Self::process().run(self)
    }
}

/// Implements [`UseCase`] for a field struct.
///
/// The process is built on first use and shared afterwards.
///
/// # Example
///
/// ```rust
/// use casework::{define_use_case, Errors, UseCase, Validate};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Ping {}
///
/// impl Validate for Ping {
///     fn validate(&self, _errors: &mut Errors) {}
/// }
///
/// define_use_case!(Ping, record = (), |p| p.inline_named("pong", |_| Ok(true)).build());
///
/// assert_eq!(Ping::process().len(), 1);
/// assert!(Ping::call(serde_json::json!({})).unwrap().is_success());
/// ```
#[macro_export]
macro_rules! define_use_case {
    ($use_case:ty, record = $record:ty, $define:expr $(,)?) => {
        impl $crate::UseCase for $use_case {
            type Record = $record;

            fn process() -> &'static $crate::Process<Self> {
                static PROCESS: $crate::__private::Lazy<$crate::Process<$use_case>> =
                    $crate::__private::Lazy::new(|| {
                        $crate::__private::define::<$use_case, _>($define)
                    });
                &PROCESS
            }
        }
    };
}

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;

    use crate::{Process, ProcessBuilder, UseCase};

    pub fn define<U, F>(define: F) -> Process<U>
    where
        U: UseCase,
        F: FnOnce(ProcessBuilder<U>) -> Process<U>,
    {
        define(Process::builder())
    }
}
