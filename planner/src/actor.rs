//! The actor: `run_lazy_lookahead`.
//!
//! Interleaves planning with command execution. Commands are the acting-time
//! analogues of actions and may fail where the action would succeed; on
//! failure the actor re-plans from the current state and tries again, up to
//! a bounded number of attempts.

use tracing::{debug, info};

use wayfinder_kernel::domain::Domain;
use wayfinder_kernel::state::State;
use wayfinder_kernel::todo::{PlanStep, TodoItem};

use crate::error::PlanError;
use crate::policy::{PlanPolicy, Verbosity};
use crate::search::find_plan;

/// Plan the agenda, execute the plan through the domain's commands, and
/// re-plan whenever a command fails or the executed plan leaves work behind.
///
/// Returns the state the world ended up in:
/// - when a planning round finds the empty plan, the agenda is complete;
/// - when planning reports exhaustion, acting stops where it is;
/// - after `max_tries` rounds, the actor gives up and returns the current
///   state.
///
/// Commands resolve as `c_<action>` with a fallback to the action itself,
/// so domains only write commands for the steps that can fail differently
/// at acting time.
///
/// # Errors
///
/// Returns [`PlanError`] on fatal domain errors, either from planning or
/// because a plan step names an action with neither a command nor an action
/// registered.
pub fn run_lazy_lookahead(
    domain: &Domain,
    state: State,
    todo: &[TodoItem],
    policy: &PlanPolicy,
    max_tries: u32,
) -> Result<State, PlanError> {
    let mut state = state;
    for attempt in 1..=max_tries {
        if policy.verbosity >= Verbosity::Calls {
            info!(attempt, max_tries, "planning round");
        }
        let Some(plan) = find_plan(domain, &state, todo, policy)? else {
            if policy.verbosity >= Verbosity::Calls {
                info!(attempt, "no plan found; stopping where we are");
            }
            return Ok(state);
        };
        if plan.is_empty() {
            if policy.verbosity >= Verbosity::Calls {
                info!(attempt, "agenda complete");
            }
            return Ok(state);
        }
        for step in &plan {
            match execute_step(domain, &state, step)? {
                Some(next_state) => {
                    if policy.verbosity >= Verbosity::Recursion {
                        debug!(step = %step, "command succeeded");
                    }
                    state = next_state;
                }
                None => {
                    if policy.verbosity >= Verbosity::Calls {
                        info!(step = %step, "command failed; re-planning");
                    }
                    break;
                }
            }
        }
        // A fully executed plan still loops outward once more: the world may
        // have drifted, and the next round's empty plan confirms completion.
    }
    if policy.verbosity >= Verbosity::Calls {
        info!(max_tries, "giving up");
    }
    Ok(state)
}

/// Execute one plan step: the `c_`-prefixed command if registered, else the
/// action itself.
fn execute_step(domain: &Domain, state: &State, step: &PlanStep) -> Result<Option<State>, PlanError> {
    let command_name = format!("c_{}", step.name);
    if let Some(command) = domain.command(&command_name) {
        return Ok(command.run(state.clone(), &step.args));
    }
    if let Some(action) = domain.action(&step.name) {
        return Ok(action.apply(state.clone(), &step.args));
    }
    Err(PlanError::UnknownAction {
        name: step.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use wayfinder_kernel::domain::{Action, Command, UnigoalMethod};
    use wayfinder_kernel::term::Term;

    use super::*;

    /// Base domain: `stamp x` sets `stamped[x] = yes`, and the `stamped`
    /// goal variable refines to that action.
    fn stamping_domain() -> Domain {
        let mut domain = Domain::new("stamping");
        domain
            .declare_actions(vec![Action::new("stamp", |mut state, args| {
                let [x] = args else { return None };
                state.set("stamped", x.clone(), "yes");
                Some(state)
            })])
            .unwrap();
        domain
            .declare_unigoal_methods(
                "stamped",
                vec![UnigoalMethod::new("stamp_it", |_s, arg, _v| {
                    Some(vec![TodoItem::action("stamp", vec![arg.clone()])])
                })],
            )
            .unwrap();
        domain
    }

    fn goal_todo() -> Vec<TodoItem> {
        vec![TodoItem::unigoal("stamped", "x", "yes")]
    }

    #[test]
    fn commands_fall_back_to_actions() {
        let domain = stamping_domain();
        let state = run_lazy_lookahead(
            &domain,
            State::new("s0"),
            &goal_todo(),
            &PlanPolicy::silent(),
            10,
        )
        .unwrap();
        assert!(state.satisfies("stamped", &Term::sym("x"), &Term::sym("yes")));
    }

    #[test]
    fn converges_in_one_execution_round_when_commands_match_actions() {
        let executions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&executions);
        let mut domain = stamping_domain();
        domain
            .declare_commands(vec![Command::new("c_stamp", move |mut state, args| {
                counter.fetch_add(1, Ordering::SeqCst);
                let [x] = args else { return None };
                state.set("stamped", x.clone(), "yes");
                Some(state)
            })])
            .unwrap();

        let state = run_lazy_lookahead(
            &domain,
            State::new("s0"),
            &goal_todo(),
            &PlanPolicy::silent(),
            10,
        )
        .unwrap();
        assert!(state.satisfies("stamped", &Term::sym("x"), &Term::sym("yes")));
        // One execution of the single-step plan; the second round's empty
        // plan terminates without touching commands again.
        assert_eq!(executions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn replans_after_a_transient_command_failure() {
        let failures_left = Arc::new(AtomicUsize::new(1));
        let gate = Arc::clone(&failures_left);
        let mut domain = stamping_domain();
        domain
            .declare_commands(vec![Command::new("c_stamp", move |mut state, args| {
                if gate
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
                {
                    return None;
                }
                let [x] = args else { return None };
                state.set("stamped", x.clone(), "yes");
                Some(state)
            })])
            .unwrap();

        let state = run_lazy_lookahead(
            &domain,
            State::new("s0"),
            &goal_todo(),
            &PlanPolicy::silent(),
            10,
        )
        .unwrap();
        assert!(state.satisfies("stamped", &Term::sym("x"), &Term::sym("yes")));
    }

    #[test]
    fn gives_up_after_max_tries_of_persistent_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let mut domain = stamping_domain();
        domain
            .declare_commands(vec![Command::new("c_stamp", move |_state, _args| {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            })])
            .unwrap();

        let state = run_lazy_lookahead(
            &domain,
            State::new("s0"),
            &goal_todo(),
            &PlanPolicy::silent(),
            3,
        )
        .unwrap();
        assert!(!state.satisfies("stamped", &Term::sym("x"), &Term::sym("yes")));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unachievable_agenda_returns_current_state() {
        let mut domain = stamping_domain();
        domain
            .declare_unigoal_methods(
                "polished",
                vec![UnigoalMethod::new("no_way", |_s, _a, _v| None)],
            )
            .unwrap();
        let todo = vec![TodoItem::unigoal("polished", "x", "yes")];
        let initial = State::new("s0").with("stamped", "x", "yes");
        let state =
            run_lazy_lookahead(&domain, initial.clone(), &todo, &PlanPolicy::silent(), 10).unwrap();
        assert_eq!(state, initial);
    }

    #[test]
    fn missing_command_and_action_is_fatal() {
        let domain = stamping_domain();
        let step = PlanStep::new("vanish", []);
        let err = execute_step(&domain, &State::new("s0"), &step).unwrap_err();
        assert_eq!(err, PlanError::UnknownAction { name: "vanish".into() });
    }
}
