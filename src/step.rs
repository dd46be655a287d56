use crate::context::Execution;
use crate::error::StepResult;
use crate::outcome::{Code, Failure};
use crate::UseCase;
use std::fmt;
use std::sync::Arc;

/// Type-safe step name wrapper.
///
/// Three names are reserved: [`StepName::SUCCESS`] and [`StepName::FAILURE`]
/// mark control steps, [`StepName::INLINE`] labels anonymous inline steps.
///
/// # Examples
///
/// ```
/// use casework::StepName;
///
/// let name = StepName::new("build_post");
/// assert_eq!(name.as_str(), "build_post");
///
/// let name: StepName = "save!".into();
/// assert!(!name.is_reserved());
/// assert!(StepName::new(StepName::SUCCESS).is_reserved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepName(String);

impl StepName {
    /// Name of the control step that ends a run successfully.
    pub const SUCCESS: &'static str = "success";
    /// Name of the control step that ends a run with a failure.
    pub const FAILURE: &'static str = "failure";
    /// Label of inline steps declared without a name.
    pub const INLINE: &'static str = "inline";

    /// Creates a new StepName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a StepName from a type's name (last path segment, generics dropped)
    pub fn from_type_name<T: ?Sized>() -> Self {
        Self::new(short_type_name::<T>())
    }

    /// Returns the step name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `success` and `failure`.
    pub fn is_reserved(&self) -> bool {
        self.0 == Self::SUCCESS || self.0 == Self::FAILURE
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StepName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StepName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for StepName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StepName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for StepName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full_name = std::any::type_name::<T>();
    let without_generics = full_name.split('<').next().unwrap_or(full_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Condition evaluated against the running execution.
pub type Predicate<U> = Arc<dyn Fn(&Execution<U>) -> bool + Send + Sync>;

/// Inline step body or named method body.
pub type Action<U> = Arc<dyn Fn(&mut Execution<U>) -> StepResult + Send + Sync>;

/// Per-step configuration: conditions plus the code and message used by
/// control steps.
///
/// # Examples
///
/// ```
/// use casework::StepOptions;
/// # use casework::{define_use_case, Errors, Validate};
/// # #[derive(serde::Deserialize)]
/// # struct Publish { draft: bool }
/// # impl Validate for Publish { fn validate(&self, _: &mut Errors) {} }
/// # define_use_case!(Publish, record = (), |p| p.build());
///
/// let options = StepOptions::<Publish>::new()
///     .unless(|ctx| ctx.draft)
///     .code("not_ready")
///     .message("Drafts cannot be published");
/// ```
pub struct StepOptions<U: UseCase> {
    pub(crate) when: Option<Predicate<U>>,
    pub(crate) unless: Option<Predicate<U>>,
    pub(crate) code: Option<Code>,
    pub(crate) message: Option<String>,
}

impl<U: UseCase> Default for StepOptions<U> {
    fn default() -> Self {
        Self {
            when: None,
            unless: None,
            code: None,
            message: None,
        }
    }
}

impl<U: UseCase> Clone for StepOptions<U> {
    fn clone(&self) -> Self {
        Self {
            when: self.when.clone(),
            unless: self.unless.clone(),
            code: self.code.clone(),
            message: self.message.clone(),
        }
    }
}

impl<U: UseCase> fmt::Debug for StepOptions<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepOptions")
            .field("if", &self.when.is_some())
            .field("unless", &self.unless.is_some())
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

impl<U: UseCase> StepOptions<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the step only when `predicate` holds. Replaces an earlier `when`.
    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Execution<U>) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Arc::new(predicate));
        self
    }

    /// Skips the step when `predicate` holds. Replaces an earlier `unless`.
    pub fn unless<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Execution<U>) -> bool + Send + Sync + 'static,
    {
        self.unless = Some(Arc::new(predicate));
        self
    }

    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Both conditions must allow the step.
    pub(crate) fn permits(&self, execution: &Execution<U>) -> bool {
        let when = self.when.as_ref().map_or(true, |p| p(execution));
        let unless = self.unless.as_ref().map_or(false, |p| p(execution));
        when && !unless
    }
}

/// What a step does when it runs.
pub enum StepKind<U: UseCase> {
    /// Ends the run successfully.
    Success,
    /// Ends the run with the step's code and message.
    Failure,
    /// Calls a method by name, resolved when the step runs.
    Method(StepName),
    /// Calls the closure.
    Inline(Action<U>),
}

impl<U: UseCase> Clone for StepKind<U> {
    fn clone(&self) -> Self {
        match self {
            StepKind::Success => StepKind::Success,
            StepKind::Failure => StepKind::Failure,
            StepKind::Method(name) => StepKind::Method(name.clone()),
            StepKind::Inline(action) => StepKind::Inline(Arc::clone(action)),
        }
    }
}

impl<U: UseCase> fmt::Debug for StepKind<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Success => write!(f, "Success"),
            StepKind::Failure => write!(f, "Failure"),
            StepKind::Method(name) => write!(f, "Method({name})"),
            StepKind::Inline(_) => write!(f, "Inline"),
        }
    }
}

/// One entry of a process. Immutable once declared.
pub struct StepDeclaration<U: UseCase> {
    name: StepName,
    kind: StepKind<U>,
    options: StepOptions<U>,
}

impl<U: UseCase> Clone for StepDeclaration<U> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            options: self.options.clone(),
        }
    }
}

impl<U: UseCase> fmt::Debug for StepDeclaration<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDeclaration")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish()
    }
}

impl<U: UseCase> StepDeclaration<U> {
    /// A step dispatched by name. The reserved names produce control steps.
    pub(crate) fn named(name: StepName, options: StepOptions<U>) -> Self {
        let kind = match name.as_str() {
            StepName::SUCCESS => StepKind::Success,
            StepName::FAILURE => StepKind::Failure,
            _ => StepKind::Method(name.clone()),
        };
        Self {
            name,
            kind,
            options,
        }
    }

    /// The name only labels the step; the closure always runs.
    pub(crate) fn inline(name: StepName, options: StepOptions<U>, action: Action<U>) -> Self {
        Self {
            name,
            kind: StepKind::Inline(action),
            options,
        }
    }

    pub(crate) fn success(options: StepOptions<U>) -> Self {
        Self {
            name: StepName::new(StepName::SUCCESS),
            kind: StepKind::Success,
            options,
        }
    }

    pub(crate) fn failure(code: Option<Code>, mut options: StepOptions<U>) -> Self {
        if code.is_some() {
            options.code = code;
        }
        Self {
            name: StepName::new(StepName::FAILURE),
            kind: StepKind::Failure,
            options,
        }
    }

    pub fn name(&self) -> &StepName {
        &self.name
    }

    pub fn kind(&self) -> &StepKind<U> {
        &self.kind
    }

    pub fn options(&self) -> &StepOptions<U> {
        &self.options
    }

    pub(crate) fn permits(&self, execution: &Execution<U>) -> bool {
        self.options.permits(execution)
    }

    /// The failure a `failure` step ends the run with.
    pub(crate) fn failure_detail(&self) -> Failure {
        Failure::from_parts(self.options.code.clone(), self.options.message.clone())
    }
}
