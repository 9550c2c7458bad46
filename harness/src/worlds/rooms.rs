//! `rooms`: objects moving between rooms.
//!
//! The smallest world that exercises every refinement path: one action, a
//! unigoal method over `loc`, `split_multigoal` for conjunctive goals, and
//! commands for the actor. The building blocks are exported individually so
//! suites can assemble variants (bad method orderings, flaky commands)
//! without a second world.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wayfinder_kernel::domain::{Action, Command, Domain, DomainError, UnigoalMethod};
use wayfinder_kernel::state::State;
use wayfinder_kernel::term::Term;
use wayfinder_kernel::todo::TodoItem;
use wayfinder_planner::split::split_multigoal_method;

/// The rooms that exist. Moving anywhere else fails.
pub const ROOMS: [&str; 4] = ["hub", "room1", "room2", "room3"];

/// `move_object obj dst`: relocate an object to a room.
///
/// Applicable when the object is somewhere (its `loc` is bound) and the
/// destination is one of [`ROOMS`].
#[must_use]
pub fn move_object_action() -> Action {
    Action::new("move_object", |mut state, args| {
        let [obj, dst] = args else { return None };
        state.get("loc", obj)?;
        if !ROOMS.contains(&dst.as_sym()?) {
            return None;
        }
        state.set("loc", obj.clone(), dst.clone());
        Some(state)
    })
}

/// Unigoal method for `loc`: go straight to the destination.
#[must_use]
pub fn go_direct_method() -> UnigoalMethod {
    UnigoalMethod::new("go_direct", |_state, obj, dst| {
        Some(vec![TodoItem::action(
            "move_object",
            vec![obj.clone(), dst.clone()],
        )])
    })
}

/// Unigoal method for `loc`: route through the hub first.
///
/// Longer than [`go_direct_method`] but equally valid; suites use the two
/// orderings to observe order sensitivity.
#[must_use]
pub fn go_via_hub_method() -> UnigoalMethod {
    UnigoalMethod::new("go_via_hub", |_state, obj, dst| {
        Some(vec![
            TodoItem::action("move_object", vec![obj.clone(), Term::sym("hub")]),
            TodoItem::action("move_object", vec![obj.clone(), dst.clone()]),
        ])
    })
}

/// A broken unigoal method: proposes moving to a room that does not exist,
/// so its expansion always fails at the action.
#[must_use]
pub fn go_nowhere_method() -> UnigoalMethod {
    UnigoalMethod::new("go_nowhere", |_state, obj, _dst| {
        Some(vec![TodoItem::action(
            "move_object",
            vec![obj.clone(), Term::sym("nowhere")],
        )])
    })
}

/// A lying unigoal method: claims the goal is achieved and expands to
/// nothing. Goal verification is what catches it.
#[must_use]
pub fn claim_arrived_method() -> UnigoalMethod {
    UnigoalMethod::new("claim_arrived", |_state, _obj, _dst| Some(vec![]))
}

/// The command for `move_object`, identical to the action.
#[must_use]
pub fn move_object_command() -> Command {
    Command::new("c_move_object", |mut state, args| {
        let [obj, dst] = args else { return None };
        state.get("loc", obj)?;
        if !ROOMS.contains(&dst.as_sym()?) {
            return None;
        }
        state.set("loc", obj.clone(), dst.clone());
        Some(state)
    })
}

/// A `move_object` command that fails its first `failures` invocations and
/// then behaves like the action. The returned counter reports how many times
/// the command ran.
#[must_use]
pub fn flaky_move_command(failures: usize) -> (Command, Arc<AtomicUsize>) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invocations);
    let command = Command::new("c_move_object", move |mut state, args| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        if n < failures {
            return None;
        }
        let [obj, dst] = args else { return None };
        state.get("loc", obj)?;
        if !ROOMS.contains(&dst.as_sym()?) {
            return None;
        }
        state.set("loc", obj.clone(), dst.clone());
        Some(state)
    });
    (command, invocations)
}

/// The standard rooms domain: `move_object`, `go_direct` for `loc`,
/// `split_multigoal`, and the faithful command.
///
/// # Errors
///
/// Propagates [`DomainError`] from the declarations; the standard assembly
/// never collides.
pub fn domain() -> Result<Domain, DomainError> {
    domain_with_methods(vec![go_direct_method()])
}

/// The rooms domain with a caller-chosen `loc` method ordering.
///
/// # Errors
///
/// Propagates [`DomainError`] from the declarations.
pub fn domain_with_methods(loc_methods: Vec<UnigoalMethod>) -> Result<Domain, DomainError> {
    let mut domain = Domain::new("rooms");
    domain.declare_actions(vec![move_object_action()])?;
    domain.declare_commands(vec![move_object_command()])?;
    domain.declare_unigoal_methods("loc", loc_methods)?;
    domain.declare_multigoal_methods(vec![split_multigoal_method()]);
    Ok(domain)
}

/// A state binding each `(object, room)` pair in `locs`.
#[must_use]
pub fn initial_state(locs: &[(&str, &str)]) -> State {
    let mut state = State::new("rooms-initial");
    for (obj, room) in locs {
        state.set("loc", *obj, *room);
    }
    state
}
