//! `State`: a named snapshot of world variable bindings.
//!
//! A state maps variable names (e.g. `loc`) to argument→value binding
//! tables. Both arguments and values are [`Term`]s. States are value types:
//! the planner clones on every branch and never mutates a state shared with
//! an ancestor search frame.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::term::Term;

/// Argument→value bindings for one state variable.
pub type Bindings = BTreeMap<Term, Term>;

/// The full variable table: variable name → bindings.
pub type VarTable = BTreeMap<String, Bindings>;

/// A snapshot of world variable bindings.
///
/// Equality is structural over the variable table; the `name` is a
/// diagnostic label only and does not participate in comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    name: String,
    #[serde(with = "vars_serde")]
    vars: VarTable,
}

impl State {
    /// Create an empty state with a diagnostic name.
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

    /// Bind `var[arg] = value`, creating the variable if absent.
    pub fn set(&mut self, var: impl Into<String>, arg: impl Into<Term>, value: impl Into<Term>) {
        self.vars
            .entry(var.into())
            .or_default()
            .insert(arg.into(), value.into());
    }

    /// Builder form of [`State::set`] for fixture construction.
    #[must_use]
    pub fn with(mut self, var: impl Into<String>, arg: impl Into<Term>, value: impl Into<Term>) -> Self {
        self.set(var, arg, value);
        self
    }

    /// The value bound to `var[arg]`, if any.
    #[must_use]
    pub fn get(&self, var: &str, arg: &Term) -> Option<&Term> {
        self.vars.get(var).and_then(|bindings| bindings.get(arg))
    }

    /// Whether `var[arg]` is bound to exactly `value`.
    #[must_use]
    pub fn satisfies(&self, var: &str, arg: &Term, value: &Term) -> bool {
        self.get(var, arg) == Some(value)
    }

    /// The bindings of one variable, if present.
    #[must_use]
    pub fn var(&self, var: &str) -> Option<&Bindings> {
        self.vars.get(var)
    }

    /// The names of all variables present in this state.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// The whole variable table.
    #[must_use]
    pub fn vars(&self) -> &VarTable {
        &self.vars
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.vars == other.vars
    }
}

impl Eq for State {}

impl fmt::Display for State {
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

/// Serialize a `VarTable` with JSON-compatible keys.
///
/// Inner binding tables are keyed by `Term`, which is not a valid JSON map
/// key; bindings serialize as pair lists instead.
pub(crate) mod vars_serde {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::VarTable;
    use crate::term::Term;

    pub fn serialize<S: Serializer>(vars: &VarTable, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: BTreeMap<&String, Vec<(&Term, &Term)>> = vars
            .iter()
            .map(|(var, bindings)| (var, bindings.iter().collect()))
            .collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<VarTable, D::Error> {
        let pairs: BTreeMap<String, Vec<(Term, Term)>> = Deserialize::deserialize(deserializer)?;
        Ok(pairs
            .into_iter()
            .map(|(var, bindings)| (var, bindings.into_iter().collect()))
            .collect())
    }
}
