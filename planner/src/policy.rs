//! Planning policy: the per-call configuration value.
//!
//! Replaces process-wide flags with an explicit value passed to every entry
//! point. The policy is read during planning, never written.

/// How much diagnostic output the engine emits.
///
/// `PartialOrd` so gating reads as `policy.verbosity >= Verbosity::Calls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No diagnostics.
    Silent,
    /// One line per top-level call and per final outcome.
    Calls,
    /// A line per recursion: depth, agenda head, chosen expansions.
    Recursion,
    /// Everything above plus intermediate states.
    States,
}

/// Budget and verification configuration for one planner call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPolicy {
    /// Diagnostic gate.
    pub verbosity: Verbosity,
    /// Inject a post-condition check after every unigoal/multigoal method
    /// expansion, so a method that fails to achieve its goal is backtracked
    /// past instead of corrupting the plan.
    pub verify_goals: bool,
    /// Recursion cutoff. Exceeding it fails the current branch (the search
    /// reports exhaustion, not a hard error), which bounds divergence in
    /// pathological domains.
    pub max_depth: u32,
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Calls,
            verify_goals: true,
            max_depth: 500,
        }
    }
}

impl PlanPolicy {
    /// A silent policy, convenient in tests and benchmarks.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            verbosity: Verbosity::Silent,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels_are_ordered() {
        assert!(Verbosity::Silent < Verbosity::Calls);
        assert!(Verbosity::Calls < Verbosity::Recursion);
        assert!(Verbosity::Recursion < Verbosity::States);
    }

    #[test]
    fn default_policy_verifies_goals() {
        let policy = PlanPolicy::default();
        assert!(policy.verify_goals);
        assert_eq!(policy.verbosity, Verbosity::Calls);
        assert!(policy.max_depth > 0);
    }
}
