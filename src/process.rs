use crate::behavior::{Behavior, Methods};
use crate::context::{Execution, State, Termination};
use crate::error::{Halt, StepResult, UseCaseError};
use crate::outcome::{Code, Failure, Outcome};
use crate::step::{short_type_name, StepDeclaration, StepKind, StepName, StepOptions};
use crate::UseCase;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info_span};

/// How the primary record is found before the first step runs.
pub enum RecordStrategy<U: UseCase> {
    /// Read a field of the use case.
    Field {
        name: String,
        read: Arc<dyn Fn(&U) -> Option<U::Record> + Send + Sync>,
    },
    /// Compute it from the execution.
    Compute(Arc<dyn Fn(&mut Execution<U>) -> Option<U::Record> + Send + Sync>),
}

impl<U: UseCase> Clone for RecordStrategy<U> {
    fn clone(&self) -> Self {
        match self {
            RecordStrategy::Field { name, read } => RecordStrategy::Field {
                name: name.clone(),
                read: Arc::clone(read),
            },
            RecordStrategy::Compute(compute) => RecordStrategy::Compute(Arc::clone(compute)),
        }
    }
}

impl<U: UseCase> fmt::Debug for RecordStrategy<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStrategy::Field { name, .. } => write!(f, "Field({name})"),
            RecordStrategy::Compute(_) => write!(f, "Compute"),
        }
    }
}

/// The frozen, ordered step list of a use case and the methods its named
/// steps resolve to.
///
/// Built once with [`Process::builder`]; read-only afterwards, so one process
/// can serve concurrent calls. Every call works on its own [`Execution`].
pub struct Process<U: UseCase> {
    name: String,
    steps: Vec<StepDeclaration<U>>,
    methods: Methods<U>,
    behaviors: Vec<Arc<dyn Behavior<U>>>,
    record: Option<RecordStrategy<U>>,
}

impl<U: UseCase> fmt::Debug for Process<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("name", &self.name)
            .field("steps", &self.step_names().collect::<Vec<_>>())
            .field("methods", &self.methods)
            .field(
                "behaviors",
                &self.behaviors.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("record", &self.record)
            .finish()
    }
}

impl<U: UseCase> Process<U> {
    pub fn builder() -> ProcessBuilder<U> {
        ProcessBuilder::new()
    }

    /// Starts a derived process from this one.
    ///
    /// The new builder begins with copies of this process's steps, methods,
    /// behaviors and record strategy. Nothing declared on it affects `self`
    /// or other processes derived from `self`.
    pub fn extend(&self) -> ProcessBuilder<U> {
        ProcessBuilder {
            name: self.name.clone(),
            steps: self.steps.clone(),
            methods: self.methods.clone(),
            behaviors: self.behaviors.clone(),
            record: self.record.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepDeclaration<U>] {
        &self.steps
    }

    pub fn step_names(&self) -> impl Iterator<Item = &StepName> {
        self.steps.iter().map(StepDeclaration::name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Deserializes the use case's fields from `params` and runs the steps.
    ///
    /// Business failures come back as a failed [`Outcome`]. Only
    /// unparseable params, unresolvable step names and faults raised by steps
    /// are returned as `Err`.
    pub fn call(&self, params: Value) -> Result<Outcome<U::Record>, UseCaseError> {
        let fields =
            serde_json::from_value::<U>(params).map_err(|source| UseCaseError::InvalidParams {
                use_case: self.name.clone(),
                source,
            })?;
        self.run(fields)
    }

    /// Same as [`Process::call`].
    pub fn perform(&self, params: Value) -> Result<Outcome<U::Record>, UseCaseError> {
        self.call(params)
    }

    /// Runs the steps over already-built fields.
    pub fn run(&self, fields: U) -> Result<Outcome<U::Record>, UseCaseError> {
        let span = info_span!("use_case", name = %self.name);
        let _guard = span.enter();

        let mut execution = Execution::new(fields);
        execution.transition(State::Preparing);
        let termination = self.drive(&mut execution)?;
        Ok(execution.conclude(termination))
    }

    fn drive(&self, execution: &mut Execution<U>) -> Result<Termination, UseCaseError> {
        execution.transition(State::Validating);
        if let Err(halt) = execution.break_when_invalid() {
            return self.halted(&StepName::new("validation"), halt);
        }

        if let Some(strategy) = &self.record {
            let record = match strategy {
                RecordStrategy::Field { read, .. } => read(execution.fields()),
                RecordStrategy::Compute(compute) => compute(execution),
            };
            execution.assign_record(record);
        }

        execution.transition(State::RunningSteps);
        for step in &self.steps {
            if !step.permits(execution) {
                debug!(step = %step.name(), "step skipped");
                continue;
            }
            debug!(step = %step.name(), "running step");

            let result = match step.kind() {
                StepKind::Success => {
                    return Ok(Termination::Succeeded(step.options().message.clone()));
                }
                StepKind::Failure => return Ok(Termination::Failed(step.failure_detail())),
                StepKind::Inline(action) => action(execution),
                StepKind::Method(method) => self.dispatch(method, execution)?,
            };

            match result {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(Termination::Failed(
                        Failure::new(Code::STEP_FALSE)
                            .with_message(format!("Step '{}' returned false", step.name())),
                    ));
                }
                Err(halt) => return self.halted(step.name(), halt),
            }
        }

        Ok(Termination::Succeeded(None))
    }

    /// Own methods first, then behaviors from the last mixed in.
    fn dispatch(
        &self,
        method: &StepName,
        execution: &mut Execution<U>,
    ) -> Result<StepResult, UseCaseError> {
        if let Some(result) = self.methods.call(method.as_str(), execution) {
            return Ok(result);
        }
        for behavior in self.behaviors.iter().rev() {
            if let Some(result) = behavior.call(method.as_str(), execution) {
                debug!(step = %method, behavior = behavior.name(), "resolved by behavior");
                return Ok(result);
            }
        }
        error!(step = %method, "no method for step");
        Err(UseCaseError::MethodNotFound {
            use_case: self.name.clone(),
            step: method.clone(),
        })
    }

    fn halted(&self, step: &StepName, halt: Halt) -> Result<Termination, UseCaseError> {
        match halt {
            Halt::Failure(failure) => Ok(Termination::Failed(failure)),
            Halt::Fault(source) => {
                error!(step = %step, error = %source, "step raised");
                Err(UseCaseError::Fault {
                    use_case: self.name.clone(),
                    step: step.clone(),
                    source,
                })
            }
        }
    }
}

/// Declares a process step by step.
///
/// ```
/// use casework::{define_use_case, Errors, Validate};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Greet {
///     name: Option<String>,
///     #[serde(default)]
///     shout: bool,
/// }
///
/// impl Validate for Greet {
///     fn validate(&self, errors: &mut Errors) {
///         errors.require_present("name", self.name.as_deref());
///     }
/// }
///
/// define_use_case!(Greet, record = String, |p| p
///     .record_with(|ctx| ctx.name.as_ref().map(|n| format!("Hello, {n}")))
///     .inline_with("shout", |o| o.when(|ctx| ctx.shout), |ctx| {
///         if let Some(greeting) = ctx.record_mut() {
///             *greeting = greeting.to_uppercase();
///         }
///         Ok(true)
///     })
///     .build());
///
/// use casework::UseCase;
/// let outcome = Greet::call(json!({ "name": "Ada", "shout": true })).unwrap();
/// assert_eq!(outcome.record().map(String::as_str), Some("HELLO, ADA"));
/// ```
pub struct ProcessBuilder<U: UseCase> {
    name: String,
    steps: Vec<StepDeclaration<U>>,
    methods: Methods<U>,
    behaviors: Vec<Arc<dyn Behavior<U>>>,
    record: Option<RecordStrategy<U>>,
}

impl<U: UseCase> Default for ProcessBuilder<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: UseCase> fmt::Debug for ProcessBuilder<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessBuilder")
            .field("name", &self.name)
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl<U: UseCase> ProcessBuilder<U> {
    pub fn new() -> Self {
        let name = short_type_name::<U>().to_string();
        Self {
            methods: Methods::new(name.clone()),
            name,
            steps: Vec::new(),
            behaviors: Vec::new(),
            record: None,
        }
    }

    /// Overrides the name used in logs and errors (defaults to the type name).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Drops every step declared so far, including inherited ones.
    pub fn clear_steps(mut self) -> Self {
        self.steps.clear();
        self
    }

    /// Appends a step that calls the method `name` when it runs.
    ///
    /// `success` and `failure` keep their control meaning.
    pub fn step(self, name: impl Into<StepName>) -> Self {
        self.step_with(name, |options| options)
    }

    /// Like [`ProcessBuilder::step`]; `configure` receives the step's
    /// [`StepOptions`], so conditions read the use case's fields directly.
    pub fn step_with<O>(mut self, name: impl Into<StepName>, configure: O) -> Self
    where
        O: FnOnce(StepOptions<U>) -> StepOptions<U>,
    {
        self.steps
            .push(StepDeclaration::named(name.into(), configure(StepOptions::new())));
        self
    }

    /// Appends an anonymous inline step.
    pub fn inline<F>(self, action: F) -> Self
    where
        F: Fn(&mut Execution<U>) -> StepResult + Send + Sync + 'static,
    {
        self.inline_with(StepName::INLINE, |options| options, action)
    }

    /// Appends an inline step. The name is only a label; no method lookup
    /// happens.
    pub fn inline_named<F>(self, name: impl Into<StepName>, action: F) -> Self
    where
        F: Fn(&mut Execution<U>) -> StepResult + Send + Sync + 'static,
    {
        self.inline_with(name, |options| options, action)
    }

    pub fn inline_with<O, F>(mut self, name: impl Into<StepName>, configure: O, action: F) -> Self
    where
        O: FnOnce(StepOptions<U>) -> StepOptions<U>,
        F: Fn(&mut Execution<U>) -> StepResult + Send + Sync + 'static,
    {
        self.steps.push(StepDeclaration::inline(
            name.into(),
            configure(StepOptions::new()),
            Arc::new(action),
        ));
        self
    }

    /// Appends a step that ends the run successfully.
    pub fn success(self) -> Self {
        self.success_with(|options| options)
    }

    /// Like [`ProcessBuilder::success`]; the configured message becomes the
    /// outcome's message.
    pub fn success_with<O>(mut self, configure: O) -> Self
    where
        O: FnOnce(StepOptions<U>) -> StepOptions<U>,
    {
        self.steps
            .push(StepDeclaration::success(configure(StepOptions::new())));
        self
    }

    /// Appends a step that ends the run failed with the configured code
    /// (default `failure`) and message.
    pub fn failure<O>(mut self, configure: O) -> Self
    where
        O: FnOnce(StepOptions<U>) -> StepOptions<U>,
    {
        self.steps
            .push(StepDeclaration::failure(None, configure(StepOptions::new())));
        self
    }

    /// Like [`ProcessBuilder::failure`] with an explicit code that wins over
    /// a configured one.
    pub fn failure_code<O>(mut self, code: impl Into<Code>, configure: O) -> Self
    where
        O: FnOnce(StepOptions<U>) -> StepOptions<U>,
    {
        self.steps.push(StepDeclaration::failure(
            Some(code.into()),
            configure(StepOptions::new()),
        ));
        self
    }

    /// Registers one of the use case's own methods. Replaces an inherited
    /// method of the same name, and takes precedence over behaviors.
    pub fn method<F>(mut self, name: impl Into<StepName>, action: F) -> Self
    where
        F: Fn(&mut Execution<U>) -> StepResult + Send + Sync + 'static,
    {
        self.methods.insert(name, Arc::new(action));
        self
    }

    /// Adds a behavior. Later behaviors take precedence over earlier ones.
    pub fn mix_in<B>(mut self, behavior: B) -> Self
    where
        B: Behavior<U> + 'static,
    {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Takes the record from a field. Replaces any earlier strategy.
    pub fn record_field<F>(mut self, name: impl Into<String>, read: F) -> Self
    where
        F: Fn(&U) -> Option<U::Record> + Send + Sync + 'static,
    {
        self.record = Some(RecordStrategy::Field {
            name: name.into(),
            read: Arc::new(read),
        });
        self
    }

    /// Computes the record. Replaces any earlier strategy.
    pub fn record_with<F>(mut self, compute: F) -> Self
    where
        F: Fn(&mut Execution<U>) -> Option<U::Record> + Send + Sync + 'static,
    {
        self.record = Some(RecordStrategy::Compute(Arc::new(compute)));
        self
    }

    pub fn build(self) -> Process<U> {
        Process {
            name: self.name,
            steps: self.steps,
            methods: self.methods,
            behaviors: self.behaviors,
            record: self.record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_use_case;
    use crate::validation::{Errors, Validate};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Default, Deserialize)]
    struct Job {
        #[serde(default)]
        name: String,
        #[serde(default)]
        urgent: bool,
        #[serde(default)]
        paused: bool,
    }

    impl Validate for Job {
        fn validate(&self, errors: &mut Errors) {
            if self.name == "invalid" {
                errors.add("name", "is reserved");
            }
        }
    }

    define_use_case!(Job, record = String, |p| p.build());

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Log, entry: &'static str, result: bool) -> impl Fn(&mut Execution<Job>) -> StepResult {
        let log = Arc::clone(log);
        move |_| {
            log.lock().unwrap().push(entry);
            Ok(result)
        }
    }

    fn entries(log: &Log) -> Vec<&'static str> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_all_truthy_steps_succeed() {
        let log = log();
        let process = Process::<Job>::builder()
            .inline_named("a", record(&log, "a", true))
            .inline_named("b", record(&log, "b", true))
            .build();

        let outcome = process.run(Job::default()).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.code(), &Code::SUCCESS);
        assert_eq!(entries(&log), vec!["a", "b"]);
    }

    #[test]
    fn test_false_step_halts() {
        let log = log();
        let process = Process::<Job>::builder()
            .inline_named("a", record(&log, "a", true))
            .inline_named("check", record(&log, "check", false))
            .inline_named("c", record(&log, "c", true))
            .build();

        let outcome = process.run(Job::default()).unwrap();
        assert!(outcome.is_failed());
        assert_eq!(outcome.code(), &Code::STEP_FALSE);
        assert_eq!(outcome.message(), Some("Step 'check' returned false"));
        assert_eq!(entries(&log), vec!["a", "check"]);
    }

    #[test]
    fn test_anonymous_inline_step_name() {
        let process = Process::<Job>::builder().inline(|_| Ok(false)).build();
        let outcome = process.run(Job::default()).unwrap();
        assert_eq!(outcome.message(), Some("Step 'inline' returned false"));
    }

    #[test]
    fn test_conditions_skip_steps() {
        let log = log();
        let process = Process::<Job>::builder()
            .inline_with("urgent_only", |o| o.when(|ctx| ctx.urgent), record(&log, "urgent_only", true))
            .inline_with("unless_paused", |o| o.unless(|ctx| ctx.paused), record(&log, "unless_paused", true))
            .inline_named("always", record(&log, "always", true))
            .build();

        let outcome = process
            .run(Job {
                urgent: false,
                paused: true,
                ..Job::default()
            })
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(entries(&log), vec!["always"]);
    }

    #[test]
    fn test_success_step_halts() {
        let log = log();
        let process = Process::<Job>::builder()
            .inline_named("a", record(&log, "a", true))
            .success_with(|o| o.message("Done early"))
            .inline_named("never", record(&log, "never", true))
            .build();

        let outcome = process.run(Job::default()).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.code(), &Code::SUCCESS);
        assert_eq!(outcome.message(), Some("Done early"));
        assert_eq!(entries(&log), vec!["a"]);
    }

    #[test]
    fn test_skipped_success_step_continues() {
        let log = log();
        let process = Process::<Job>::builder()
            .success_with(|o| o.when(|ctx| ctx.urgent))
            .inline_named("b", record(&log, "b", true))
            .build();

        assert!(process.run(Job::default()).unwrap().is_success());
        assert_eq!(entries(&log), vec!["b"]);
    }

    #[test]
    fn test_failure_step_halts() {
        let log = log();
        let process = Process::<Job>::builder()
            .failure_code("paused", |o| o.message("Job is paused").when(|ctx| ctx.paused))
            .failure(|o| o)
            .inline_named("never", record(&log, "never", true))
            .build();

        let outcome = process
            .run(Job {
                paused: true,
                ..Job::default()
            })
            .unwrap();
        assert_eq!(outcome.code(), "paused");
        assert_eq!(outcome.message(), Some("Job is paused"));

        let outcome = process.run(Job::default()).unwrap();
        assert_eq!(outcome.code(), &Code::FAILURE);
        assert_eq!(outcome.message(), Some("Failed"));
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_step_fail_propagates_code_and_message() {
        let process = Process::<Job>::builder()
            .inline_named("guard", |ctx| ctx.fail("busy", "Try later"))
            .build();

        let outcome = process.run(Job::default()).unwrap();
        assert_eq!(outcome.code(), "busy");
        assert_eq!(outcome.message(), Some("Try later"));
        assert_eq!(outcome.exception().unwrap().message(), "Try later");
    }

    #[test]
    fn test_named_step_condition() {
        let log = log();
        let process = Process::<Job>::builder()
            .step_with("escalate", |o| o.when(|ctx| ctx.urgent).unless(|ctx| ctx.paused))
            .method("escalate", record(&log, "escalate", true))
            .build();

        process.run(Job::default()).unwrap();
        process
            .run(Job {
                urgent: true,
                ..Job::default()
            })
            .unwrap();
        assert_eq!(entries(&log), vec!["escalate"]);
    }

    #[test]
    fn test_failed_helper_code_is_visible_to_the_step() {
        let process = Process::<Job>::builder()
            .inline_named("retry_on_busy", |ctx| {
                let failed = ctx.fail("busy", "Try later");
                if ctx.error_code().map_or(false, |code| code == "busy") {
                    return Ok(true);
                }
                failed
            })
            .build();

        assert!(process.run(Job::default()).unwrap().is_success());
    }

    #[test]
    fn test_fail_without_code_uses_failure() {
        let process = Process::<Job>::builder()
            .inline(|ctx| ctx.fail_with(Failure::default()))
            .build();

        let outcome = process.run(Job::default()).unwrap();
        assert_eq!(outcome.code(), &Code::FAILURE);
        assert_eq!(outcome.message(), Some("Failed"));
    }

    #[test]
    fn test_validation_failure_runs_no_steps() {
        let log = log();
        let process = Process::<Job>::builder()
            .inline_named("a", record(&log, "a", true))
            .build();

        let outcome = process
            .run(Job {
                name: "invalid".to_string(),
                ..Job::default()
            })
            .unwrap();
        assert_eq!(outcome.code(), &Code::VALIDATION_FAILED);
        assert_eq!(outcome.message(), Some("Name is reserved"));
        assert_eq!(outcome.errors().len(), 1);
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_fault_propagates() {
        let log = log();
        let process = Process::<Job>::builder()
            .inline_named("explode", |_| Err(Halt::fault("boom")))
            .inline_named("never", record(&log, "never", true))
            .build();

        match process.run(Job::default()) {
            Err(UseCaseError::Fault { step, source, .. }) => {
                assert_eq!(step, StepName::new("explode"));
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_named_step_resolution() {
        let log = log();
        let shared = Methods::<Job>::new("shared")
            .method("notify", record(&log, "shared.notify", true))
            .method("archive", record(&log, "shared.archive", true));
        let newer = Methods::<Job>::new("newer").method("archive", record(&log, "newer.archive", true));

        let process = Process::<Job>::builder()
            .step("notify")
            .step("archive")
            .step("audit")
            .mix_in(shared)
            .mix_in(newer)
            .method("audit", record(&log, "own.audit", true))
            .build();

        assert!(process.run(Job::default()).unwrap().is_success());
        assert_eq!(
            entries(&log),
            vec!["shared.notify", "newer.archive", "own.audit"]
        );
    }

    #[test]
    fn test_unknown_method_is_an_error() {
        let process = Process::<Job>::builder().step("missing").build();
        match process.run(Job::default()) {
            Err(UseCaseError::MethodNotFound { step, use_case }) => {
                assert_eq!(step, StepName::new("missing"));
                assert_eq!(use_case, "Job");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_record_strategy_last_wins() {
        let process = Process::<Job>::builder()
            .record_field("name", |job| Some(job.name.clone()))
            .record_with(|ctx| Some(format!("computed:{}", ctx.name)))
            .build();

        let outcome = process
            .run(Job {
                name: "x".to_string(),
                ..Job::default()
            })
            .unwrap();
        assert_eq!(outcome.record().map(String::as_str), Some("computed:x"));
    }

    #[test]
    fn test_record_strategy_sees_validated_fields() {
        let process = Process::<Job>::builder()
            .record_field("name", |job| Some(job.name.clone()))
            .inline(|ctx| Ok(ctx.record().is_some()))
            .build();

        let outcome = process.call(json!({ "name": "nightly" })).unwrap();
        assert_eq!(outcome.record().map(String::as_str), Some("nightly"));
    }

    #[test]
    fn test_extend_inherits_and_overrides() {
        let log = log();
        let base = Process::<Job>::builder()
            .step("prepare")
            .method("prepare", record(&log, "base.prepare", true))
            .build();

        let child = base
            .extend()
            .named("ChildJob")
            .method("prepare", record(&log, "child.prepare", true))
            .inline_named("finish", record(&log, "child.finish", true))
            .build();
        let sibling = base.extend().inline_named("other", record(&log, "sibling.other", true)).build();
        let fresh = base.extend().clear_steps().build();

        assert_eq!(base.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(sibling.len(), 2);
        assert!(fresh.is_empty());
        assert_eq!(child.name(), "ChildJob");

        child.run(Job::default()).unwrap();
        base.run(Job::default()).unwrap();
        assert_eq!(
            entries(&log),
            vec!["child.prepare", "child.finish", "base.prepare"]
        );
    }

    #[test]
    fn test_invalid_params() {
        let process = Process::<Job>::builder().build();
        let result = process.call(json!({ "urgent": "yes please" }));
        assert!(matches!(result, Err(UseCaseError::InvalidParams { .. })));
    }

    #[test]
    fn test_perform_is_call() {
        let process = Process::<Job>::builder().inline(|_| Ok(true)).build();
        let outcome = process.perform(json!({ "name": "x" })).unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_use_cases_are_shareable() {
        fn shareable<T: Send + Sync>() {}
        fn use_case<U: UseCase>() {
            shareable::<U>();
            shareable::<Process<U>>();
        }
        use_case::<Job>();
    }

    #[test]
    fn test_step_names() {
        let process = Process::<Job>::builder()
            .step("a")
            .inline(|_| Ok(true))
            .success()
            .build();
        let names: Vec<_> = process.step_names().map(StepName::as_str).collect();
        assert_eq!(names, vec!["a", "inline", "success"]);
        assert_eq!(process.steps().len(), 3);
    }
}
