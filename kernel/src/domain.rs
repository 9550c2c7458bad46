//! `Domain`: the registry of actions, commands, and refinement methods.
//!
//! The registry is the **contract surface** the planner dispatches against;
//! the callables are the **implementation**. Five tables: actions, commands,
//! task methods, unigoal methods, multigoal methods. Method order within a
//! table entry is declaration order, and declaration order is try order.
//!
//! Every callable is wrapped with an explicit name. Names are read via the
//! wrapper's `name()` accessor and nowhere else; the planner never
//! reconstructs a name from the callable.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::multigoal::Multigoal;
use crate::state::State;
use crate::term::Term;
use crate::todo::TodoItem;

/// An action callable: owned fresh clone in, successor state or `None` out.
///
/// The action enforces its own preconditions and returns `None` when they do
/// not hold. Whatever it returns becomes the state of the next search frame.
pub type ActionFn = dyn Fn(State, &[Term]) -> Option<State> + Send + Sync;

/// A command callable: the acting-time analogue of an action.
///
/// Same shape as [`ActionFn`]; may fail where the action would succeed,
/// modeling real-world execution.
pub type CommandFn = dyn Fn(State, &[Term]) -> Option<State> + Send + Sync;

/// A task method: refines a compound task into sub-items.
///
/// `Some(vec![])` means "done, no further work" — success, not failure.
/// `None` is the inapplicability sentinel.
pub type TaskMethodFn = dyn Fn(&State, &[Term]) -> Option<Vec<TodoItem>> + Send + Sync;

/// A unigoal method: refines a desired `var[arg] = value` binding.
///
/// Called with the argument and the desired value. Same `Some`/`None`
/// convention as [`TaskMethodFn`].
pub type UnigoalMethodFn = dyn Fn(&State, &Term, &Term) -> Option<Vec<TodoItem>> + Send + Sync;

/// A multigoal method: refines a conjunctive goal.
pub type MultigoalMethodFn = dyn Fn(&State, &Multigoal) -> Option<Vec<TodoItem>> + Send + Sync;

// ---------------------------------------------------------------------------
// Named callable wrappers
// ---------------------------------------------------------------------------

/// A named primitive action.
#[derive(Clone)]
pub struct Action {
    name: String,
    f: Arc<ActionFn>,
}

impl Action {
    /// Wrap a callable as a named action.
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(State, &[Term]) -> Option<State> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply to an owned state clone. `None` means preconditions failed.
    #[must_use]
    pub fn apply(&self, state: State, args: &[Term]) -> Option<State> {
        (self.f)(state, args)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A named command.
#[derive(Clone)]
pub struct Command {
    name: String,
    f: Arc<CommandFn>,
}

impl Command {
    /// Wrap a callable as a named command. Convention: the command for
    /// action `foo` is named `c_foo`.
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(State, &[Term]) -> Option<State> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute against an owned state clone. `None` means the command failed.
    #[must_use]
    pub fn run(&self, state: State, args: &[Term]) -> Option<State> {
        (self.f)(state, args)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A named task method.
#[derive(Clone)]
pub struct TaskMethod {
    name: String,
    f: Arc<TaskMethodFn>,
}

impl TaskMethod {
    /// Wrap a callable as a named task method.
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&State, &[Term]) -> Option<Vec<TodoItem>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Try to refine. `None` means this method is not applicable here.
    #[must_use]
    pub fn refine(&self, state: &State, args: &[Term]) -> Option<Vec<TodoItem>> {
        (self.f)(state, args)
    }

    fn same_callable(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for TaskMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskMethod").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A named unigoal method.
#[derive(Clone)]
pub struct UnigoalMethod {
    name: String,
    f: Arc<UnigoalMethodFn>,
}

impl UnigoalMethod {
    /// Wrap a callable as a named unigoal method.
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&State, &Term, &Term) -> Option<Vec<TodoItem>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Try to refine. `None` means this method is not applicable here.
    #[must_use]
    pub fn refine(&self, state: &State, arg: &Term, value: &Term) -> Option<Vec<TodoItem>> {
        (self.f)(state, arg, value)
    }

    fn same_callable(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for UnigoalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnigoalMethod").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A named multigoal method.
#[derive(Clone)]
pub struct MultigoalMethod {
    name: String,
    f: Arc<MultigoalMethodFn>,
}

impl MultigoalMethod {
    /// Wrap a callable as a named multigoal method.
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&State, &Multigoal) -> Option<Vec<TodoItem>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Try to refine. `None` means this method is not applicable here.
    #[must_use]
    pub fn refine(&self, state: &State, multigoal: &Multigoal) -> Option<Vec<TodoItem>> {
        (self.f)(state, multigoal)
    }

    fn same_callable(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for MultigoalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultigoalMethod").field("name", &self.name).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// DomainError
// ---------------------------------------------------------------------------

/// Which registry a name belongs to, for collision diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Action,
    Command,
    Task,
    GoalVariable,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Command => write!(f, "command"),
            Self::Task => write!(f, "task"),
            Self::GoalVariable => write!(f, "goal variable"),
        }
    }
}

/// Typed failure for domain declaration and call classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name is already registered in a different table; dispatch would be
    /// ambiguous.
    NameCollision {
        name: String,
        existing: RegistryKind,
        declared: RegistryKind,
    },
    /// An empty string was supplied as a registration name.
    EmptyName { declared: RegistryKind },
    /// A call head matched no registry table.
    UnknownName { name: String },
    /// A call head named a goal variable but did not carry exactly
    /// `(arg, value)`.
    MalformedUnigoal { var: String, arg_count: usize },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameCollision {
                name,
                existing,
                declared,
            } => write!(
                f,
                "name {name:?} already registered as a {existing}; declaring it as a {declared} \
                 would make dispatch ambiguous"
            ),
            Self::EmptyName { declared } => {
                write!(f, "empty name in {declared} declaration")
            }
            Self::UnknownName { name } => {
                write!(f, "{name:?} is not a registered action, task, or goal variable")
            }
            Self::MalformedUnigoal { var, arg_count } => write!(
                f,
                "goal variable {var:?} takes (arg, value); got {arg_count} argument(s)"
            ),
        }
    }
}

impl std::error::Error for DomainError {}

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

/// The planning domain: five registries under one name.
///
/// Built once via the `declare_*` operations, then treated as immutable
/// during planning. `BTreeMap` keeps registry iteration deterministic.
#[derive(Debug, Clone)]
pub struct Domain {
    name: String,
    actions: BTreeMap<String, Action>,
    commands: BTreeMap<String, Command>,
    task_methods: BTreeMap<String, Vec<TaskMethod>>,
    unigoal_methods: BTreeMap<String, Vec<UnigoalMethod>>,
    multigoal_methods: Vec<MultigoalMethod>,
}

impl Domain {
    /// Create an empty domain.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: BTreeMap::new(),
            commands: BTreeMap::new(),
            task_methods: BTreeMap::new(),
            unigoal_methods: BTreeMap::new(),
            multigoal_methods: Vec::new(),
        }
    }

    /// The domain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- declarations -------------------------------------------------------

    /// Register actions, keyed by their names. Re-declaring a name replaces
    /// the previous action.
    ///
    /// # Errors
    ///
    /// [`DomainError::NameCollision`] if a name is already a task or goal
    /// variable; [`DomainError::EmptyName`] on an empty name.
    pub fn declare_actions(&mut self, actions: Vec<Action>) -> Result<(), DomainError> {
        for action in actions {
            if action.name().is_empty() {
                return Err(DomainError::EmptyName {
                    declared: RegistryKind::Action,
                });
            }
            if let Some(existing) = self.kind_of(action.name(), RegistryKind::Action) {
                return Err(DomainError::NameCollision {
                    name: action.name().to_string(),
                    existing,
                    declared: RegistryKind::Action,
                });
            }
            self.actions.insert(action.name().to_string(), action);
        }
        Ok(())
    }

    /// Register commands, keyed by their names. Commands are a separate
    /// namespace; by convention the command for action `foo` is `c_foo`.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyName`] on an empty name.
    pub fn declare_commands(&mut self, commands: Vec<Command>) -> Result<(), DomainError> {
        for command in commands {
            if command.name().is_empty() {
                return Err(DomainError::EmptyName {
                    declared: RegistryKind::Command,
                });
            }
            self.commands.insert(command.name().to_string(), command);
        }
        Ok(())
    }

    /// Append task methods under `task_name`, in the given order, skipping
    /// methods already registered there (callable identity).
    ///
    /// # Errors
    ///
    /// [`DomainError::NameCollision`] if `task_name` is already an action or
    /// goal variable; [`DomainError::EmptyName`] on an empty name.
    pub fn declare_task_methods(
        &mut self,
        task_name: impl Into<String>,
        methods: Vec<TaskMethod>,
    ) -> Result<(), DomainError> {
        let task_name = task_name.into();
        if task_name.is_empty() {
            return Err(DomainError::EmptyName {
                declared: RegistryKind::Task,
            });
        }
        if let Some(existing) = self.kind_of(&task_name, RegistryKind::Task) {
            return Err(DomainError::NameCollision {
                name: task_name,
                existing,
                declared: RegistryKind::Task,
            });
        }
        let entry = self.task_methods.entry(task_name).or_default();
        for method in methods {
            if !entry.iter().any(|m| m.same_callable(&method)) {
                entry.push(method);
            }
        }
        Ok(())
    }

    /// Append unigoal methods under the state-variable name `var_name`, in
    /// the given order, skipping methods already registered there.
    ///
    /// # Errors
    ///
    /// [`DomainError::NameCollision`] if `var_name` is already an action or
    /// task; [`DomainError::EmptyName`] on an empty name.
    pub fn declare_unigoal_methods(
        &mut self,
        var_name: impl Into<String>,
        methods: Vec<UnigoalMethod>,
    ) -> Result<(), DomainError> {
        let var_name = var_name.into();
        if var_name.is_empty() {
            return Err(DomainError::EmptyName {
                declared: RegistryKind::GoalVariable,
            });
        }
        if let Some(existing) = self.kind_of(&var_name, RegistryKind::GoalVariable) {
            return Err(DomainError::NameCollision {
                name: var_name,
                existing,
                declared: RegistryKind::GoalVariable,
            });
        }
        let entry = self.unigoal_methods.entry(var_name).or_default();
        for method in methods {
            if !entry.iter().any(|m| m.same_callable(&method)) {
                entry.push(method);
            }
        }
        Ok(())
    }

    /// Append multigoal methods to the global ordered list, skipping methods
    /// already registered (callable identity).
    pub fn declare_multigoal_methods(&mut self, methods: Vec<MultigoalMethod>) {
        for method in methods {
            if !self.multigoal_methods.iter().any(|m| m.same_callable(&method)) {
                self.multigoal_methods.push(method);
            }
        }
    }

    /// Which registry holds `name`, ignoring `declaring` (so re-declaration
    /// into the same table is not a collision).
    fn kind_of(&self, name: &str, declaring: RegistryKind) -> Option<RegistryKind> {
        if declaring != RegistryKind::Action && self.actions.contains_key(name) {
            return Some(RegistryKind::Action);
        }
        if declaring != RegistryKind::Task && self.task_methods.contains_key(name) {
            return Some(RegistryKind::Task);
        }
        if declaring != RegistryKind::GoalVariable && self.unigoal_methods.contains_key(name) {
            return Some(RegistryKind::GoalVariable);
        }
        None
    }

    // -- lookups ------------------------------------------------------------

    /// Look up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Look up a command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// The task methods for `task_name`, in try order.
    #[must_use]
    pub fn task_methods(&self, task_name: &str) -> Option<&[TaskMethod]> {
        self.task_methods.get(task_name).map(Vec::as_slice)
    }

    /// The unigoal methods for `var_name`, in try order.
    #[must_use]
    pub fn unigoal_methods(&self, var_name: &str) -> Option<&[UnigoalMethod]> {
        self.unigoal_methods.get(var_name).map(Vec::as_slice)
    }

    /// The global multigoal methods, in try order.
    #[must_use]
    pub fn multigoal_methods(&self) -> &[MultigoalMethod] {
        &self.multigoal_methods
    }

    /// Classify a head-symbol call into a [`TodoItem`] by registry lookup:
    /// action first, then task, then goal variable.
    ///
    /// # Errors
    ///
    /// [`DomainError::UnknownName`] when `name` matches no table;
    /// [`DomainError::MalformedUnigoal`] when a goal-variable call does not
    /// carry exactly `(arg, value)`.
    pub fn classify_call(&self, name: &str, args: Vec<Term>) -> Result<TodoItem, DomainError> {
        if self.actions.contains_key(name) {
            return Ok(TodoItem::action(name, args));
        }
        if self.task_methods.contains_key(name) {
            return Ok(TodoItem::task(name, args));
        }
        if self.unigoal_methods.contains_key(name) {
            let arg_count = args.len();
            let mut it = args.into_iter();
            if let (Some(arg), Some(value), None) = (it.next(), it.next(), it.next()) {
                return Ok(TodoItem::Unigoal {
                    var: name.to_string(),
                    arg,
                    value,
                });
            }
            return Err(DomainError::MalformedUnigoal {
                var: name.to_string(),
                arg_count,
            });
        }
        Err(DomainError::UnknownName {
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "domain {}:", self.name)?;
        let action_names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        writeln!(f, "  actions: {action_names:?}")?;
        let command_names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        writeln!(f, "  commands: {command_names:?}")?;
        for (task, methods) in &self.task_methods {
            let names: Vec<&str> = methods.iter().map(TaskMethod::name).collect();
            writeln!(f, "  task {task}: {names:?}")?;
        }
        for (var, methods) in &self.unigoal_methods {
            let names: Vec<&str> = methods.iter().map(UnigoalMethod::name).collect();
            writeln!(f, "  unigoal {var}: {names:?}")?;
        }
        let names: Vec<&str> = self.multigoal_methods.iter().map(MultigoalMethod::name).collect();
        write!(f, "  multigoal: {names:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_action() -> Action {
        Action::new("noop", |state, _args| Some(state))
    }

    fn some_task_method(name: &str) -> TaskMethod {
        TaskMethod::new(name, |_state, _args| Some(vec![]))
    }

    #[test]
    fn declare_and_look_up_actions() {
        let mut domain = Domain::new("d");
        domain.declare_actions(vec![noop_action()]).unwrap();
        assert!(domain.action("noop").is_some());
        assert_eq!(domain.action("noop").unwrap().name(), "noop");
        assert!(domain.action("missing").is_none());
    }

    #[test]
    fn redeclaring_an_action_replaces_it() {
        let mut domain = Domain::new("d");
        domain.declare_actions(vec![noop_action()]).unwrap();
        domain
            .declare_actions(vec![Action::new("noop", |_state, _args| None)])
            .unwrap();
        let state = crate::state::State::new("s");
        assert_eq!(domain.action("noop").unwrap().apply(state, &[]), None);
    }

    #[test]
    fn task_method_order_is_declaration_order() {
        let mut domain = Domain::new("d");
        domain
            .declare_task_methods("work", vec![some_task_method("first"), some_task_method("second")])
            .unwrap();
        domain
            .declare_task_methods("work", vec![some_task_method("third")])
            .unwrap();
        let names: Vec<&str> = domain
            .task_methods("work")
            .unwrap()
            .iter()
            .map(TaskMethod::name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn redeclaring_the_same_method_is_skipped() {
        let mut domain = Domain::new("d");
        let method = some_task_method("only");
        domain
            .declare_task_methods("work", vec![method.clone()])
            .unwrap();
        domain.declare_task_methods("work", vec![method]).unwrap();
        assert_eq!(domain.task_methods("work").unwrap().len(), 1);
    }

    #[test]
    fn distinct_callables_with_equal_names_both_register() {
        let mut domain = Domain::new("d");
        domain
            .declare_task_methods("work", vec![some_task_method("m"), some_task_method("m")])
            .unwrap();
        assert_eq!(domain.task_methods("work").unwrap().len(), 2);
    }

    #[test]
    fn action_task_collision_rejected() {
        let mut domain = Domain::new("d");
        domain.declare_actions(vec![noop_action()]).unwrap();
        let err = domain
            .declare_task_methods("noop", vec![some_task_method("m")])
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::NameCollision {
                name: "noop".into(),
                existing: RegistryKind::Action,
                declared: RegistryKind::Task,
            }
        );
    }

    #[test]
    fn goal_variable_collisions_rejected_both_ways() {
        let mut domain = Domain::new("d");
        domain
            .declare_unigoal_methods("loc", vec![UnigoalMethod::new("m", |_s, _a, _v| None)])
            .unwrap();
        let err = domain
            .declare_actions(vec![Action::new("loc", |state, _| Some(state))])
            .unwrap_err();
        assert!(matches!(err, DomainError::NameCollision { .. }));

        let err = domain
            .declare_task_methods("loc", vec![some_task_method("m")])
            .unwrap_err();
        assert!(matches!(err, DomainError::NameCollision { .. }));
    }

    #[test]
    fn empty_names_rejected() {
        let mut domain = Domain::new("d");
        let err = domain
            .declare_actions(vec![Action::new("", |state, _| Some(state))])
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyName { .. }));
    }

    #[test]
    fn multigoal_methods_append_and_dedup() {
        let mut domain = Domain::new("d");
        let method = MultigoalMethod::new("split", |_s, _g| Some(vec![]));
        domain.declare_multigoal_methods(vec![method.clone()]);
        domain.declare_multigoal_methods(vec![method, MultigoalMethod::new("other", |_s, _g| None)]);
        let names: Vec<&str> = domain
            .multigoal_methods()
            .iter()
            .map(MultigoalMethod::name)
            .collect();
        assert_eq!(names, vec!["split", "other"]);
    }

    #[test]
    fn classify_call_dispatches_by_registry() {
        let mut domain = Domain::new("d");
        domain.declare_actions(vec![noop_action()]).unwrap();
        domain
            .declare_task_methods("work", vec![some_task_method("m")])
            .unwrap();
        domain
            .declare_unigoal_methods("loc", vec![UnigoalMethod::new("m", |_s, _a, _v| None)])
            .unwrap();

        let action = domain.classify_call("noop", vec![]).unwrap();
        assert_eq!(action.kind(), "action");

        let task = domain.classify_call("work", vec![Term::sym("b")]).unwrap();
        assert_eq!(task.kind(), "task");

        let goal = domain
            .classify_call("loc", vec![Term::sym("b"), Term::sym("room2")])
            .unwrap();
        assert_eq!(
            goal,
            TodoItem::unigoal("loc", "b", "room2")
        );

        let err = domain.classify_call("loc", vec![Term::sym("b")]).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedUnigoal {
                var: "loc".into(),
                arg_count: 1
            }
        );

        let err = domain.classify_call("mystery", vec![]).unwrap_err();
        assert_eq!(err, DomainError::UnknownName { name: "mystery".into() });
    }

    #[test]
    fn display_summarizes_the_registries() {
        let mut domain = Domain::new("d");
        domain.declare_actions(vec![noop_action()]).unwrap();
        domain
            .declare_task_methods("work", vec![some_task_method("first")])
            .unwrap();
        let rendered = domain.to_string();
        assert!(rendered.starts_with("domain d:"));
        assert!(rendered.contains("\"noop\""));
        assert!(rendered.contains("task work: [\"first\"]"));
    }

    #[test]
    fn command_namespace_is_separate() {
        let mut domain = Domain::new("d");
        domain.declare_actions(vec![noop_action()]).unwrap();
        domain
            .declare_commands(vec![Command::new("c_noop", |state, _| Some(state))])
            .unwrap();
        assert!(domain.command("c_noop").is_some());
        assert!(domain.command("noop").is_none());
        assert!(domain.action("c_noop").is_none());
    }
}
