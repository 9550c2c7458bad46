//! The refinement engine: `find_plan` and its recursive worker.
//!
//! Depth-first search over a heterogeneous agenda. Each agenda head either
//! contributes a primitive action to the plan or expands into further items
//! via the domain's methods, tried in declaration order. Backtracking is
//! plain recursion plus return-value checking: `Ok(None)` fails the current
//! branch so the caller tries its next alternative.
//!
//! The search never mutates a state shared with an ancestor frame: actions
//! receive a fresh clone, and whatever they return becomes the state of the
//! next frame. Without that discipline, backtracking would corrupt ancestor
//! frames.

use tracing::{debug, info, trace};

use wayfinder_kernel::domain::Domain;
use wayfinder_kernel::multigoal::Multigoal;
use wayfinder_kernel::state::State;
use wayfinder_kernel::term::Term;
use wayfinder_kernel::todo::{Plan, PlanDisplay, PlanStep, TodoItem, TodoListDisplay, VerifyCheck};

use crate::error::PlanError;
use crate::policy::{PlanPolicy, Verbosity};

/// Plan an agenda into a linear sequence of primitive actions.
///
/// - `Ok(Some(plan))` — success; applying the plan's actions in order takes
///   `state` to one completing every agenda item
/// - `Ok(None)` — the search is exhausted; no combination of methods works
/// - `Err(_)` — a fatal domain-authoring problem (unknown name at dispatch)
///
/// The caller's `state` is never mutated.
///
/// # Errors
///
/// Returns [`PlanError`] when an agenda item names an action, task, or goal
/// variable the domain does not register. These indicate domain bugs, not
/// planning failures, and abort the whole search.
pub fn find_plan(
    domain: &Domain,
    state: &State,
    todo: &[TodoItem],
    policy: &PlanPolicy,
) -> Result<Option<Plan>, PlanError> {
    if policy.verbosity >= Verbosity::Calls {
        info!(
            domain = domain.name(),
            state = state.name(),
            agenda = %TodoListDisplay(todo),
            "planning"
        );
    }
    let engine = Engine { domain, policy };
    let result = engine.seek(state, todo, Plan::new(), 0);
    if policy.verbosity >= Verbosity::Calls {
        match &result {
            Ok(Some(plan)) => info!(steps = plan.len(), plan = %PlanDisplay(plan), "plan found"),
            Ok(None) => info!("search exhausted, no plan"),
            Err(err) => info!(error = %err, "planning aborted"),
        }
    }
    result
}

/// Append the untouched remainder of the agenda to a method's expansion.
fn with_rest(mut expansion: Vec<TodoItem>, rest: &[TodoItem]) -> Vec<TodoItem> {
    expansion.extend(rest.iter().cloned());
    expansion
}

struct Engine<'a> {
    domain: &'a Domain,
    policy: &'a PlanPolicy,
}

impl Engine<'_> {
    /// One search frame: dispatch on the agenda head.
    fn seek(
        &self,
        state: &State,
        todo: &[TodoItem],
        plan: Plan,
        depth: u32,
    ) -> Result<Option<Plan>, PlanError> {
        if self.policy.verbosity >= Verbosity::Recursion {
            debug!(depth, agenda = %TodoListDisplay(todo), "seek");
        }
        if self.policy.verbosity >= Verbosity::States {
            trace!(depth, state = %state, "current state");
        }
        let Some((head, rest)) = todo.split_first() else {
            return Ok(Some(plan));
        };
        if depth >= self.policy.max_depth {
            if self.policy.verbosity >= Verbosity::Recursion {
                debug!(depth, max_depth = self.policy.max_depth, "depth budget exhausted");
            }
            return Ok(None);
        }
        match head {
            TodoItem::Action { name, args } => {
                self.apply_action(state, name, args, rest, plan, depth)
            }
            TodoItem::Task { name, args } => self.refine_task(state, name, args, rest, plan, depth),
            TodoItem::Unigoal { var, arg, value } => {
                self.refine_unigoal(state, var, arg, value, rest, plan, depth)
            }
            TodoItem::Multigoal(goal) => self.refine_multigoal(state, goal, rest, plan, depth),
            TodoItem::Verify(check) => self.run_check(state, check, rest, plan, depth),
        }
    }

    /// Apply a primitive action and continue on its successor state.
    fn apply_action(
        &self,
        state: &State,
        name: &str,
        args: &[Term],
        rest: &[TodoItem],
        mut plan: Plan,
        depth: u32,
    ) -> Result<Option<Plan>, PlanError> {
        let action = self
            .domain
            .action(name)
            .ok_or_else(|| PlanError::UnknownAction {
                name: name.to_string(),
            })?;
        match action.apply(state.clone(), args) {
            Some(next_state) => {
                let step = PlanStep::new(name, args.iter().cloned());
                if self.policy.verbosity >= Verbosity::Recursion {
                    debug!(depth, action = %step, "action applied");
                }
                plan.push(step);
                self.seek(&next_state, rest, plan, depth + 1)
            }
            None => {
                if self.policy.verbosity >= Verbosity::Recursion {
                    debug!(depth, action = name, "action not applicable");
                }
                Ok(None)
            }
        }
    }

    /// Refine a compound task, trying its methods in declaration order.
    ///
    /// An empty expansion is success ("no further work"); only `None` moves
    /// on to the next method.
    fn refine_task(
        &self,
        state: &State,
        name: &str,
        args: &[Term],
        rest: &[TodoItem],
        plan: Plan,
        depth: u32,
    ) -> Result<Option<Plan>, PlanError> {
        let methods = self
            .domain
            .task_methods(name)
            .ok_or_else(|| PlanError::UnknownTask {
                name: name.to_string(),
            })?;
        for method in methods {
            let Some(expansion) = method.refine(state, args) else {
                if self.policy.verbosity >= Verbosity::Recursion {
                    debug!(depth, task = name, method = method.name(), "method not applicable");
                }
                continue;
            };
            if self.policy.verbosity >= Verbosity::Recursion {
                debug!(
                    depth,
                    task = name,
                    method = method.name(),
                    expansion = %TodoListDisplay(&expansion),
                    "task refined"
                );
            }
            let agenda = with_rest(expansion, rest);
            if let Some(found) = self.seek(state, &agenda, plan.clone(), depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Refine a single-variable goal.
    ///
    /// A goal that already holds is discharged without invoking any method.
    /// Otherwise methods are tried in order, each expansion followed by a
    /// verification check when the policy asks for one.
    #[allow(clippy::too_many_arguments)]
    fn refine_unigoal(
        &self,
        state: &State,
        var: &str,
        arg: &Term,
        value: &Term,
        rest: &[TodoItem],
        plan: Plan,
        depth: u32,
    ) -> Result<Option<Plan>, PlanError> {
        let methods =
            self.domain
                .unigoal_methods(var)
                .ok_or_else(|| PlanError::UnknownGoalVariable {
                    var: var.to_string(),
                })?;
        if state.satisfies(var, arg, value) {
            if self.policy.verbosity >= Verbosity::Recursion {
                debug!(depth, goal = %format!("{var}[{arg}]={value}"), "goal already holds");
            }
            return self.seek(state, rest, plan, depth + 1);
        }
        for method in methods {
            let Some(mut expansion) = method.refine(state, arg, value) else {
                if self.policy.verbosity >= Verbosity::Recursion {
                    debug!(depth, var, method = method.name(), "method not applicable");
                }
                continue;
            };
            if self.policy.verbosity >= Verbosity::Recursion {
                debug!(
                    depth,
                    var,
                    method = method.name(),
                    expansion = %TodoListDisplay(&expansion),
                    "goal refined"
                );
            }
            if self.policy.verify_goals {
                expansion.push(TodoItem::Verify(VerifyCheck::Goal {
                    method: method.name().to_string(),
                    var: var.to_string(),
                    arg: arg.clone(),
                    value: value.clone(),
                    depth,
                }));
            }
            let agenda = with_rest(expansion, rest);
            if let Some(found) = self.seek(state, &agenda, plan.clone(), depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Refine a conjunctive goal, trying the global multigoal methods in
    /// declaration order.
    fn refine_multigoal(
        &self,
        state: &State,
        goal: &Multigoal,
        rest: &[TodoItem],
        plan: Plan,
        depth: u32,
    ) -> Result<Option<Plan>, PlanError> {
        for method in self.domain.multigoal_methods() {
            let Some(mut expansion) = method.refine(state, goal) else {
                if self.policy.verbosity >= Verbosity::Recursion {
                    debug!(depth, multigoal = goal.name(), method = method.name(), "method not applicable");
                }
                continue;
            };
            if self.policy.verbosity >= Verbosity::Recursion {
                debug!(
                    depth,
                    multigoal = goal.name(),
                    method = method.name(),
                    expansion = %TodoListDisplay(&expansion),
                    "multigoal refined"
                );
            }
            if self.policy.verify_goals {
                expansion.push(TodoItem::Verify(VerifyCheck::Goals {
                    method: method.name().to_string(),
                    multigoal: goal.clone(),
                    depth,
                }));
            }
            let agenda = with_rest(expansion, rest);
            if let Some(found) = self.seek(state, &agenda, plan.clone(), depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Run a planner-injected post-condition check.
    ///
    /// A failed check fails the branch, which surfaces as inapplicability of
    /// the method whose expansion was checked — the refiner one level up then
    /// tries its next alternative.
    fn run_check(
        &self,
        state: &State,
        check: &VerifyCheck,
        rest: &[TodoItem],
        plan: Plan,
        depth: u32,
    ) -> Result<Option<Plan>, PlanError> {
        match check {
            VerifyCheck::Goal {
                method,
                var,
                arg,
                value,
                depth: applied_at,
            } => {
                if state.satisfies(var, arg, value) {
                    self.seek(state, rest, plan, depth + 1)
                } else {
                    if self.policy.verbosity >= Verbosity::Calls {
                        info!(
                            method = %method,
                            var = %var,
                            arg = %arg,
                            expected = %value,
                            applied_at = applied_at,
                            "method expansion did not achieve its goal"
                        );
                    }
                    Ok(None)
                }
            }
            VerifyCheck::Goals {
                method,
                multigoal,
                depth: applied_at,
            } => {
                if multigoal.goals_not_achieved(state).is_empty() {
                    self.seek(state, rest, plan, depth + 1)
                } else {
                    if self.policy.verbosity >= Verbosity::Calls {
                        info!(
                            method = %method,
                            multigoal = multigoal.name(),
                            applied_at = applied_at,
                            "method expansion did not achieve its multigoal"
                        );
                    }
                    Ok(None)
                }
            }
        }
    }
}
