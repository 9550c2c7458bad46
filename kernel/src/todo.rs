//! `TodoItem`: the heterogeneous agenda item, as an explicit tagged sum.
//!
//! The agenda the planner walks mixes primitive actions, compound tasks,
//! single-variable goals, conjunctive multigoals, and planner-injected
//! verification checks. Dispatch is on the tag; there is no structural
//! guessing. [`Domain::classify_call`](crate::domain::Domain::classify_call)
//! provides the head-symbol convenience form for callers that prefer it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::multigoal::Multigoal;
use crate::term::Term;

/// One primitive action invocation: the atom of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// The action name, as registered in the domain.
    pub name: String,
    /// The action arguments.
    pub args: Vec<Term>,
}

impl PlanStep {
    /// Build a plan step.
    #[must_use]
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

/// The linear sequence of primitive actions the planner produces.
pub type Plan = Vec<PlanStep>;

/// A planner-injected post-condition check.
///
/// Injected after a method's expansion so that a method which claims to
/// achieve a goal but does not is caught and backtracked past, instead of
/// silently producing a wrong plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerifyCheck {
    /// Check that `var[arg] = value` holds once the expansion ahead of this
    /// item has been planned.
    Goal {
        /// Name of the method whose expansion is being checked.
        method: String,
        var: String,
        arg: Term,
        value: Term,
        /// Recursion depth at which the method was applied (diagnostic).
        depth: u32,
    },
    /// Check that every binding listed in `multigoal` holds.
    Goals {
        /// Name of the method whose expansion is being checked.
        method: String,
        multigoal: Multigoal,
        /// Recursion depth at which the method was applied (diagnostic).
        depth: u32,
    },
}

/// One item on the planning agenda.
///
/// The first four variants are legal caller inputs; `Verify` is injected by
/// the planner and never supplied from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoItem {
    /// A primitive action, to be applied directly.
    Action { name: String, args: Vec<Term> },
    /// A compound task, to be refined by task methods.
    Task { name: String, args: Vec<Term> },
    /// A desired binding for a single state-variable argument.
    Unigoal { var: String, arg: Term, value: Term },
    /// A conjunction of unigoals.
    Multigoal(Multigoal),
    /// A planner-injected post-condition check.
    Verify(VerifyCheck),
}

impl TodoItem {
    /// Build an action item.
    #[must_use]
    pub fn action(name: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Self::Action {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Build a task item.
    #[must_use]
    pub fn task(name: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Self::Task {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Build a unigoal item.
    #[must_use]
    pub fn unigoal(var: impl Into<String>, arg: impl Into<Term>, value: impl Into<Term>) -> Self {
        Self::Unigoal {
            var: var.into(),
            arg: arg.into(),
            value: value.into(),
        }
    }

    /// The item kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Action { .. } => "action",
            Self::Task { .. } => "task",
            Self::Unigoal { .. } => "unigoal",
            Self::Multigoal(_) => "multigoal",
            Self::Verify(_) => "verify",
        }
    }
}

impl fmt::Display for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action { name, args } | Self::Task { name, args } => {
                write!(f, "({name}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
            Self::Unigoal { var, arg, value } => write!(f, "{var}[{arg}]={value}"),
            Self::Multigoal(goal) => write!(f, "multigoal {}", goal.name()),
            Self::Verify(VerifyCheck::Goal {
                method, var, arg, value, ..
            }) => write!(f, "verify {method} achieves {var}[{arg}]={value}"),
            Self::Verify(VerifyCheck::Goals { method, multigoal, .. }) => {
                write!(f, "verify {method} achieves multigoal {}", multigoal.name())
            }
        }
    }
}

/// Compact rendering of a plan, for trace lines.
pub struct PlanDisplay<'a>(pub &'a [PlanStep]);

impl fmt::Display for PlanDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{step}")?;
        }
        write!(f, "]")
    }
}

/// Compact rendering of a whole agenda, for trace lines.
pub struct TodoListDisplay<'a>(pub &'a [TodoItem]);

impl fmt::Display for TodoListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_step_display() {
        let step = PlanStep::new("move", [Term::sym("b"), Term::sym("room2")]);
        assert_eq!(step.to_string(), "(move b room2)");
        assert_eq!(PlanStep::new("wait", []).to_string(), "(wait)");
    }

    #[test]
    fn item_kinds_and_display() {
        let action = TodoItem::action("move", [Term::sym("b"), Term::sym("room2")]);
        assert_eq!(action.kind(), "action");
        assert_eq!(action.to_string(), "(move b room2)");

        let goal = TodoItem::unigoal("loc", "b", "room2");
        assert_eq!(goal.kind(), "unigoal");
        assert_eq!(goal.to_string(), "loc[b]=room2");

        let mg = TodoItem::Multigoal(Multigoal::new("g").with("loc", "b", "room2"));
        assert_eq!(mg.kind(), "multigoal");
    }

    #[test]
    fn agenda_display_is_compact() {
        let agenda = vec![
            TodoItem::task("transport", [Term::sym("b")]),
            TodoItem::unigoal("loc", "b", "room2"),
        ];
        assert_eq!(
            TodoListDisplay(&agenda).to_string(),
            "[(transport b), loc[b]=room2]"
        );
    }
}
