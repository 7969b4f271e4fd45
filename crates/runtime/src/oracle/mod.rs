//! Oracle implementations backing the scheduler's live reads.
mod roster;

pub use roster::{Combatant, Roster};
