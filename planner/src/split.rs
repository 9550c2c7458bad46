//! `split_multigoal`: the baseline multigoal method.
//!
//! Not registered automatically — domains opt in via
//! [`split_multigoal_method`]. The ordering is deliberately naive: unigoals
//! come out in the multigoal's own (deterministic) map order, with no
//! interaction analysis. Domains with ordering constraints should register a
//! smarter method ahead of it or instead of it.

use wayfinder_kernel::domain::MultigoalMethod;
use wayfinder_kernel::multigoal::Multigoal;
use wayfinder_kernel::state::State;
use wayfinder_kernel::todo::TodoItem;

/// Split a multigoal into one unigoal per unachieved binding.
///
/// If any binding is unachieved, the expansion is the unigoals followed by
/// the multigoal itself, so the planner loops on it until every conjunct
/// holds simultaneously (achieving one conjunct may undo another). If all
/// bindings already hold, the expansion is empty.
#[must_use]
pub fn split_multigoal(state: &State, multigoal: &Multigoal) -> Option<Vec<TodoItem>> {
    let unachieved = multigoal.goals_not_achieved(state);
    let mut expansion: Vec<TodoItem> = Vec::new();
    for (var, bindings) in &unachieved {
        for (arg, value) in bindings {
            expansion.push(TodoItem::Unigoal {
                var: var.clone(),
                arg: arg.clone(),
                value: value.clone(),
            });
        }
    }
    if !expansion.is_empty() {
        expansion.push(TodoItem::Multigoal(multigoal.clone()));
    }
    Some(expansion)
}

/// [`split_multigoal`] wrapped for registration with
/// [`Domain::declare_multigoal_methods`](wayfinder_kernel::domain::Domain::declare_multigoal_methods).
#[must_use]
pub fn split_multigoal_method() -> MultigoalMethod {
    MultigoalMethod::new("split_multigoal", split_multigoal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_unachieved_bindings_and_reappends_the_multigoal() {
        let state = State::new("s0")
            .with("loc", "b", "room1")
            .with("loc", "c", "room1");
        let goal = Multigoal::new("g")
            .with("loc", "b", "room2")
            .with("loc", "c", "room3");

        let expansion = split_multigoal(&state, &goal).unwrap();
        assert_eq!(
            expansion,
            vec![
                TodoItem::unigoal("loc", "b", "room2"),
                TodoItem::unigoal("loc", "c", "room3"),
                TodoItem::Multigoal(goal),
            ]
        );
    }

    #[test]
    fn achieved_bindings_are_not_emitted() {
        let state = State::new("s0")
            .with("loc", "b", "room2")
            .with("loc", "c", "room1");
        let goal = Multigoal::new("g")
            .with("loc", "b", "room2")
            .with("loc", "c", "room3");

        let expansion = split_multigoal(&state, &goal).unwrap();
        assert_eq!(expansion.len(), 2);
        assert_eq!(expansion[0], TodoItem::unigoal("loc", "c", "room3"));
    }

    #[test]
    fn fully_achieved_multigoal_expands_to_nothing() {
        let state = State::new("s0").with("loc", "b", "room2");
        let goal = Multigoal::new("g").with("loc", "b", "room2");
        assert_eq!(split_multigoal(&state, &goal), Some(vec![]));
    }

    #[test]
    fn wrapped_method_carries_its_name() {
        assert_eq!(split_multigoal_method().name(), "split_multigoal");
    }
}
