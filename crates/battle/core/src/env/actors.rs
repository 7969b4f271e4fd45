//! Live actor capability consulted at comparison time.

use crate::action::MoveAction;
use crate::state::ActorId;

/// Read-only view of combatant state the scheduler needs for ordering.
///
/// Values are requested on every pop and never cached, so stat changes made
/// by earlier actions in the turn affect what runs next.
pub trait ActorOracle {
    /// Current effective speed of `actor`, after stat stages and effects.
    ///
    /// Unknown actors should report `0`.
    fn current_speed(&self, actor: ActorId) -> u32;

    /// Whether `actor` moves ahead of its bracket this turn regardless of
    /// speed (quick claw style effects).
    fn bypasses_speed(&self, actor: ActorId) -> bool {
        let _ = actor;
        false
    }

    /// Priority bracket the queued move resolves in right now.
    ///
    /// Defaults to the bracket declared on the move; override for abilities
    /// that shift priority at resolution time.
    fn effective_priority(&self, action: &MoveAction) -> i32 {
        i32::from(action.priority())
    }
}

impl<T: ActorOracle + ?Sized> ActorOracle for &T {
    fn current_speed(&self, actor: ActorId) -> u32 {
        (**self).current_speed(actor)
    }

    fn bypasses_speed(&self, actor: ActorId) -> bool {
        (**self).bypasses_speed(actor)
    }

    fn effective_priority(&self, action: &MoveAction) -> i32 {
        (**self).effective_priority(action)
    }
}
