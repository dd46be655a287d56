//! Commonly used types and traits

pub use crate::define_use_case;
pub use crate::error::{Halt, StepResult, UseCaseError};
pub use crate::outcome::{Code, Failure, Outcome};
pub use crate::persistence::Persist;
pub use crate::process::Process;
pub use crate::step::{StepName, StepOptions};
pub use crate::validation::{Errors, Validate};
pub use crate::{Behavior, Execution, Methods, RecordPersistence, UseCase};
