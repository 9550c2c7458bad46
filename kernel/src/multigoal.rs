//! `Multigoal`: a named conjunctive goal.
//!
//! The same shape as a [`State`] — variable name → argument→value bindings —
//! but interpreted as a conjunction: every listed `vars[v][a] = x` must hold
//! in the target state. Unlisted variables and unlisted arguments are
//! unconstrained.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{State, VarTable};
use crate::term::Term;

/// A conjunctive desired state fragment.
///
/// Equality is structural over the variable table; the `name` is a
/// diagnostic label only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Multigoal {
    name: String,
    #[serde(with = "crate::state::vars_serde")]
    vars: VarTable,
}

impl Multigoal {
    /// Create an empty multigoal with a diagnostic name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: VarTable::new(),
        }
    }

    /// The diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Require `var[arg] = value` in the target state.
    pub fn require(&mut self, var: impl Into<String>, arg: impl Into<Term>, value: impl Into<Term>) {
        self.vars
            .entry(var.into())
            .or_default()
            .insert(arg.into(), value.into());
    }

    /// Builder form of [`Multigoal::require`].
    #[must_use]
    pub fn with(mut self, var: impl Into<String>, arg: impl Into<Term>, value: impl Into<Term>) -> Self {
        self.require(var, arg, value);
        self
    }

    /// The required value for `var[arg]`, if listed.
    #[must_use]
    pub fn get(&self, var: &str, arg: &Term) -> Option<&Term> {
        self.vars.get(var).and_then(|bindings| bindings.get(arg))
    }

    /// The names of all variables constrained by this multigoal.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// The whole variable table.
    #[must_use]
    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    /// The listed bindings that do not yet hold in `state`.
    ///
    /// Pure: returns a fresh nested table, possibly empty. Only bindings the
    /// multigoal lists are ever reported; unlisted state content is ignored.
    #[must_use]
    pub fn goals_not_achieved(&self, state: &State) -> VarTable {
        let mut unachieved = VarTable::new();
        for (var, bindings) in &self.vars {
            for (arg, value) in bindings {
                if state.get(var, arg) != Some(value) {
                    unachieved
                        .entry(var.clone())
                        .or_default()
                        .insert(arg.clone(), value.clone());
                }
            }
        }
        unachieved
    }

    /// Whether every listed binding holds in `state`.
    #[must_use]
    pub fn is_achieved_in(&self, state: &State) -> bool {
        self.vars.iter().all(|(var, bindings)| {
            bindings
                .iter()
                .all(|(arg, value)| state.get(var, arg) == Some(value))
        })
    }
}

impl PartialEq for Multigoal {
    fn eq(&self, other: &Self) -> bool {
        self.vars == other.vars
    }
}

impl Eq for Multigoal {}

impl fmt::Display for Multigoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        if self.vars.is_empty() {
            return write!(f, " (empty)");
        }
        for (var, bindings) in &self.vars {
            for (arg, value) in bindings {
                write!(f, "\n  {var}[{arg}] = {value}")?;
            }
        }
        Ok(())
    }
}
