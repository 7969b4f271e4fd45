use crate::action::{HasActor, MoveAction, MovePayload, MoveRef, TimingOverride};
use crate::env::ActorOracle;
use crate::state::ActorId;

use super::select::select_by_key;
use super::{OrderingQueue, PopContext};

/// Queue of move actions for the current turn.
///
/// Each pop compares, in order:
/// 1. timing override (forced first, normal, forced last)
/// 2. priority bracket as reported by the oracle
/// 3. speed bypass
/// 4. live speed, then a seeded tie-break
///
/// Popped actors are appended to the turn-order snapshot, which survives
/// [`OrderingQueue::clear`] and is reset only by [`MoveQueue::clear_turn_order`].
#[derive(Clone, Debug, Default)]
pub struct MoveQueue {
    pending: Vec<MoveAction>,
    turn_order: Vec<ActorId>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn first_mut(&mut self, predicate: impl Fn(&MoveAction) -> bool) -> Option<&mut MoveAction> {
        self.pending.iter_mut().find(|action| predicate(action))
    }

    /// Forces the first matching move to resolve first or last this turn.
    ///
    /// Returns false, changing nothing, when no queued move matches.
    pub fn set_timing_override(
        &mut self,
        predicate: impl Fn(&MoveAction) -> bool,
        timing: TimingOverride,
    ) -> bool {
        let Some(action) = self.first_mut(predicate) else {
            return false;
        };
        action.timing = timing;

        tracing::debug!(
            target: "battle_core::schedule",
            actor = %action.actor(),
            timing = %timing,
            "timing override set"
        );
        true
    }

    /// Substitutes the payload of the first matching move.
    ///
    /// Actor, timing override and use mode are preserved.
    pub fn replace_payload(
        &mut self,
        predicate: impl Fn(&MoveAction) -> bool,
        payload: MovePayload,
    ) -> bool {
        let Some(action) = self.first_mut(predicate) else {
            return false;
        };
        action.payload = payload;

        tracing::debug!(
            target: "battle_core::schedule",
            actor = %action.actor(),
            mv = %action.payload.mv.id,
            "move payload replaced"
        );
        true
    }

    /// Swaps the move of the first matching action, keeping its targets.
    pub fn replace_move(&mut self, predicate: impl Fn(&MoveAction) -> bool, mv: MoveRef) -> bool {
        let Some(action) = self.first_mut(predicate) else {
            return false;
        };
        action.payload.mv = mv;

        tracing::debug!(
            target: "battle_core::schedule",
            actor = %action.actor(),
            mv = %mv.id,
            "move replaced"
        );
        true
    }

    /// Retargets every queued move aimed at `removed` onto `substitute`.
    ///
    /// Moves used *by* `removed` are left alone; cancelling those is the
    /// caller's decision. Returns how many actions were rewritten.
    pub fn redirect(&mut self, removed: ActorId, substitute: ActorId) -> usize {
        let mut rewritten = 0;
        for action in self
            .pending
            .iter_mut()
            .filter(|action| action.actor() != removed)
        {
            if action.payload.targets.redirect(removed, substitute) {
                rewritten += 1;
            }
        }

        if rewritten > 0 {
            tracing::debug!(
                target: "battle_core::schedule",
                %removed,
                %substitute,
                rewritten,
                "moves redirected"
            );
        }
        rewritten
    }

    /// Removes the first matching move so it does not run this turn.
    pub fn cancel(&mut self, predicate: impl Fn(&MoveAction) -> bool) -> bool {
        let Some(index) = self.pending.iter().position(|action| predicate(action)) else {
            return false;
        };
        let action = self.pending.remove(index);

        tracing::debug!(
            target: "battle_core::schedule",
            actor = %action.actor(),
            mv = %action.payload.mv.id,
            "move cancelled"
        );
        true
    }

    /// Actors in the order their moves were popped since the last reset.
    pub fn turn_order(&self) -> &[ActorId] {
        &self.turn_order
    }

    pub fn clear_turn_order(&mut self) {
        self.turn_order.clear();
    }
}

impl OrderingQueue for MoveQueue {
    type Item = MoveAction;

    fn pending(&self) -> &[MoveAction] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<MoveAction> {
        &mut self.pending
    }

    fn select<O: ActorOracle + ?Sized>(&self, cx: &mut PopContext<'_, O>) -> Option<usize> {
        let oracle = cx.oracle;
        let order = cx.speed_order;

        select_by_key(&self.pending, cx.tie_breaker, |action| {
            let actor = action.actor();
            (
                action.timing.tier(),
                oracle.effective_priority(action),
                oracle.bypasses_speed(actor),
                order.rank(oracle.current_speed(actor)),
            )
        })
    }

    fn on_popped(&mut self, item: &MoveAction) {
        self.turn_order.push(item.actor());
    }
}
