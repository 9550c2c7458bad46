//! Typed planner errors.
//!
//! These are fatal domain-authoring errors that abort the whole search.
//! Method inapplicability and search exhaustion are NOT errors — they are
//! the `None` leg of the search result and recovered by backtracking.

/// Typed failure for planning and acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// An agenda item named an action absent from the domain.
    UnknownAction { name: String },

    /// An agenda item named a task with no registered methods.
    UnknownTask { name: String },

    /// An agenda item named a goal variable with no registered methods.
    UnknownGoalVariable { var: String },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction { name } => {
                write!(f, "agenda names unknown action {name:?}")
            }
            Self::UnknownTask { name } => {
                write!(f, "agenda names task {name:?} with no registered methods")
            }
            Self::UnknownGoalVariable { var } => {
                write!(f, "agenda names goal variable {var:?} with no registered methods")
            }
        }
    }
}

impl std::error::Error for PlanError {}
