//! `blocks`: the classic table-and-stacks world.
//!
//! Three state variables: `pos` (a block is on the table, on another block,
//! or in the hand), `clear` (nothing on top), and `holding` (what the hand
//! carries). Four primitive actions, two conditional task methods refining
//! `take`/`put` into the applicable action, and a unigoal method over `pos`.
//! The second world of the harness: deeper refinement chains than `rooms`
//! and preconditions that genuinely interact.

use wayfinder_kernel::domain::{Action, Domain, DomainError, TaskMethod, UnigoalMethod};
use wayfinder_kernel::state::State;
use wayfinder_kernel::term::Term;
use wayfinder_kernel::todo::TodoItem;
use wayfinder_planner::split::split_multigoal_method;

fn table() -> Term {
    Term::sym("table")
}

fn hand() -> Term {
    Term::sym("hand")
}

fn yes() -> Term {
    Term::sym("yes")
}

fn no() -> Term {
    Term::sym("no")
}

fn nothing() -> Term {
    Term::sym("nothing")
}

fn is_clear(state: &State, block: &Term) -> bool {
    state.satisfies("clear", block, &yes())
}

fn hand_empty(state: &State) -> bool {
    state.satisfies("holding", &hand(), &nothing())
}

/// `pickup x`: lift a clear block off the table with an empty hand.
#[must_use]
pub fn pickup_action() -> Action {
    Action::new("pickup", |mut state, args| {
        let [x] = args else { return None };
        if !state.satisfies("pos", x, &table()) || !is_clear(&state, x) || !hand_empty(&state) {
            return None;
        }
        state.set("pos", x.clone(), hand());
        state.set("clear", x.clone(), no());
        state.set("holding", hand(), x.clone());
        Some(state)
    })
}

/// `unstack x y`: lift a clear block off another block with an empty hand.
#[must_use]
pub fn unstack_action() -> Action {
    Action::new("unstack", |mut state, args| {
        let [x, y] = args else { return None };
        if *y == table() || *y == hand() {
            return None;
        }
        if !state.satisfies("pos", x, y) || !is_clear(&state, x) || !hand_empty(&state) {
            return None;
        }
        state.set("pos", x.clone(), hand());
        state.set("clear", x.clone(), no());
        state.set("clear", y.clone(), yes());
        state.set("holding", hand(), x.clone());
        Some(state)
    })
}

/// `putdown x`: place the held block on the table.
#[must_use]
pub fn putdown_action() -> Action {
    Action::new("putdown", |mut state, args| {
        let [x] = args else { return None };
        if !state.satisfies("pos", x, &hand()) {
            return None;
        }
        state.set("pos", x.clone(), table());
        state.set("clear", x.clone(), yes());
        state.set("holding", hand(), nothing());
        Some(state)
    })
}

/// `stack x y`: place the held block on a clear block.
#[must_use]
pub fn stack_action() -> Action {
    Action::new("stack", |mut state, args| {
        let [x, y] = args else { return None };
        if !state.satisfies("pos", x, &hand()) || !is_clear(&state, y) {
            return None;
        }
        state.set("pos", x.clone(), y.clone());
        state.set("clear", x.clone(), yes());
        state.set("clear", y.clone(), no());
        state.set("holding", hand(), nothing());
        Some(state)
    })
}

/// `take x` refines to `pickup` or `unstack`, whichever the block's current
/// position calls for.
#[must_use]
pub fn take_method() -> TaskMethod {
    TaskMethod::new("take_from_pos", |state, args| {
        let [x] = args else { return None };
        if !hand_empty(state) || !is_clear(state, x) {
            return None;
        }
        let pos = state.get("pos", x)?;
        if *pos == table() {
            Some(vec![TodoItem::action("pickup", vec![x.clone()])])
        } else {
            Some(vec![TodoItem::action("unstack", vec![x.clone(), pos.clone()])])
        }
    })
}

/// `put x y` refines to `putdown` or `stack`, whichever the destination
/// calls for. Applicable only while holding `x`.
#[must_use]
pub fn put_method() -> TaskMethod {
    TaskMethod::new("put_at_dest", |state, args| {
        let [x, y] = args else { return None };
        if !state.satisfies("holding", &hand(), x) {
            return None;
        }
        if *y == table() {
            Some(vec![TodoItem::action("putdown", vec![x.clone()])])
        } else {
            Some(vec![TodoItem::action("stack", vec![x.clone(), y.clone()])])
        }
    })
}

/// `move_one x y`: take then put.
#[must_use]
pub fn move_one_method() -> TaskMethod {
    TaskMethod::new("take_and_put", |_state, args| {
        let [x, y] = args else { return None };
        Some(vec![
            TodoItem::task("take", vec![x.clone()]),
            TodoItem::task("put", vec![x.clone(), y.clone()]),
        ])
    })
}

/// Unigoal method for `pos`: move a block when both it and its destination
/// are ready.
#[must_use]
pub fn move_block_method() -> UnigoalMethod {
    UnigoalMethod::new("move_block", |state, x, y| {
        if !is_clear(state, x) || !hand_empty(state) {
            return None;
        }
        if *y != table() && !is_clear(state, y) {
            return None;
        }
        if x == y {
            return None;
        }
        Some(vec![TodoItem::task("move_one", vec![x.clone(), y.clone()])])
    })
}

/// The standard blocks domain.
///
/// # Errors
///
/// Propagates [`DomainError`] from the declarations; the standard assembly
/// never collides.
pub fn domain() -> Result<Domain, DomainError> {
    let mut domain = Domain::new("blocks");
    domain.declare_actions(vec![
        pickup_action(),
        unstack_action(),
        putdown_action(),
        stack_action(),
    ])?;
    domain.declare_task_methods("take", vec![take_method()])?;
    domain.declare_task_methods("put", vec![put_method()])?;
    domain.declare_task_methods("move_one", vec![move_one_method()])?;
    domain.declare_unigoal_methods("pos", vec![move_block_method()])?;
    domain.declare_multigoal_methods(vec![split_multigoal_method()]);
    Ok(domain)
}

/// A state where each `(block, support)` pair in `on` holds, every block
/// with nothing on top is clear, and the hand is empty.
#[must_use]
pub fn initial_state(on: &[(&str, &str)]) -> State {
    let mut state = State::new("blocks-initial");
    for (block, support) in on {
        state.set("pos", *block, *support);
    }
    for (block, _) in on {
        let covered = on.iter().any(|(_, support)| support == block);
        state.set("clear", *block, if covered { "no" } else { "yes" });
    }
    state.set("holding", hand(), nothing());
    state
}
