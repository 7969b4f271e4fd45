//! Registry of dynamic queues and the only entry point other systems use.

use std::collections::HashMap;

use crate::action::{
    Action, ActionKind, ActorPhase, ActorPhaseKind, EntryEffect, HasActor, MoveAction,
    MovePayload, MoveRef, TimingOverride,
};
use crate::config::BattleConfig;
use crate::env::{ActorOracle, TieBreaker};
use crate::state::ActorId;

use super::{ActorSpeedQueue, MoveQueue, OrderingQueue, PopContext, SpeedOrder};

/// Outcome of [`Scheduler::enqueue`].
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Enqueue {
    /// The action is held by the scheduler; pop it with this kind.
    Dynamic(ActionKind),
    /// The kind is not dynamically ordered; the action is handed back for
    /// the static path.
    Static(Action),
}

impl Enqueue {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

/// Turn-order scheduler owned by the turn controller.
///
/// Holds one queue per dynamic kind: typed fields for the move and entry
/// effect queues, plus queues for other speed-ordered phases created on
/// first use. Also owns the battle's tie-break stream and speed order, so
/// every queue draws from the same seeded sequence.
#[derive(Clone, Debug)]
pub struct Scheduler {
    moves: MoveQueue,
    entry_effects: ActorSpeedQueue<EntryEffect>,
    phases: HashMap<ActorPhaseKind, ActorSpeedQueue<ActorPhase>>,
    tie_breaker: TieBreaker,
    speed_order: SpeedOrder,
}

impl Scheduler {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            moves: MoveQueue::new(),
            entry_effects: ActorSpeedQueue::new(),
            phases: HashMap::new(),
            tie_breaker: TieBreaker::new(config.seed),
            speed_order: config.speed_order,
        }
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Queues `action` if its kind is dynamically ordered.
    pub fn enqueue(&mut self, action: Action) -> Enqueue {
        let kind = action.kind();
        let actor = match action {
            Action::Move(action) => {
                let actor = action.actor();
                self.moves.push(action);
                actor
            }
            Action::EntryEffect(effect) => {
                let actor = effect.actor();
                self.entry_effects.push(effect);
                actor
            }
            Action::Actor(phase) if phase.kind().is_dynamic() => {
                let actor = phase.actor();
                self.phases.entry(phase.kind()).or_default().push(phase);
                actor
            }
            other => return Enqueue::Static(other),
        };

        tracing::trace!(
            target: "battle_core::schedule",
            %kind,
            %actor,
            "queued dynamic action"
        );
        Enqueue::Dynamic(kind)
    }

    /// Pops the next action of `kind`, reading live values from `oracle`.
    ///
    /// Returns `None` for an empty queue and for kinds that are not dynamic.
    pub fn pop_next<O: ActorOracle + ?Sized>(
        &mut self,
        kind: ActionKind,
        oracle: &O,
    ) -> Option<Action> {
        let mut cx = PopContext::new(oracle, &mut self.tie_breaker, self.speed_order);

        let action = match kind {
            ActionKind::Move => self.moves.pop(&mut cx).map(Action::Move),
            ActionKind::EntryEffect => self.entry_effects.pop(&mut cx).map(Action::EntryEffect),
            ActionKind::Actor(phase) if phase.is_dynamic() => self
                .phases
                .get_mut(&phase)
                .and_then(|queue| queue.pop(&mut cx))
                .map(Action::Actor),
            ActionKind::Actor(_) | ActionKind::Message => None,
        };

        if let Some(actor) = action.as_ref().and_then(Action::actor) {
            tracing::debug!(
                target: "battle_core::schedule",
                %kind,
                %actor,
                remaining = self.pending_len(kind),
                "released action"
            );
        }
        action
    }

    /// Typed shortcut for popping the next move.
    pub fn pop_move<O: ActorOracle + ?Sized>(&mut self, oracle: &O) -> Option<MoveAction> {
        self.pop_next(ActionKind::Move, oracle)
            .and_then(Action::into_move)
    }

    /// Number of actions of `kind` still queued.
    pub fn pending_len(&self, kind: ActionKind) -> usize {
        match kind {
            ActionKind::Move => self.moves.len(),
            ActionKind::EntryEffect => self.entry_effects.len(),
            ActionKind::Actor(phase) => self.phases.get(&phase).map_or(0, |queue| queue.len()),
            ActionKind::Message => 0,
        }
    }

    pub fn has_pending(&self, kind: ActionKind) -> bool {
        self.pending_len(kind) > 0
    }

    /// Empties every queue. Registered queues stay registered and the
    /// turn-order snapshot is kept.
    pub fn clear_all(&mut self) {
        self.moves.clear();
        self.entry_effects.clear();
        for queue in self.phases.values_mut() {
            queue.clear();
        }

        tracing::debug!(target: "battle_core::schedule", "cleared all queues");
    }

    /// Restarts the tie-break stream for `turn`.
    pub fn begin_turn(&mut self, turn: u32) {
        self.tie_breaker.begin_turn(turn);
    }

    pub fn speed_order(&self) -> SpeedOrder {
        self.speed_order
    }

    pub fn set_speed_order(&mut self, order: SpeedOrder) {
        if self.speed_order != order {
            tracing::debug!(target: "battle_core::schedule", %order, "speed order changed");
        }
        self.speed_order = order;
    }

    pub fn tie_breaker(&self) -> &TieBreaker {
        &self.tie_breaker
    }

    /// Number of phase kinds with a registered queue.
    pub fn registered_phase_queues(&self) -> usize {
        self.phases.len()
    }

    // ========================================================================
    // Generic queue access
    // ========================================================================

    pub fn has_entry_effect(&self, predicate: impl Fn(&EntryEffect) -> bool) -> bool {
        self.entry_effects.has(predicate)
    }

    pub fn remove_entry_effect(&mut self, predicate: impl Fn(&EntryEffect) -> bool) -> bool {
        self.entry_effects.remove(predicate)
    }

    pub fn has_phase(
        &self,
        kind: ActorPhaseKind,
        predicate: impl Fn(&ActorPhase) -> bool,
    ) -> bool {
        self.phases
            .get(&kind)
            .is_some_and(|queue| queue.has(predicate))
    }

    pub fn remove_phase(
        &mut self,
        kind: ActorPhaseKind,
        predicate: impl Fn(&ActorPhase) -> bool,
    ) -> bool {
        self.phases
            .get_mut(&kind)
            .is_some_and(|queue| queue.remove(predicate))
    }

    // ========================================================================
    // Move queue passthroughs
    // ========================================================================

    pub fn set_timing_override(
        &mut self,
        predicate: impl Fn(&MoveAction) -> bool,
        timing: TimingOverride,
    ) -> bool {
        self.moves.set_timing_override(predicate, timing)
    }

    /// Makes the first matching move resolve next.
    pub fn force_move_next(&mut self, predicate: impl Fn(&MoveAction) -> bool) -> bool {
        self.set_timing_override(predicate, TimingOverride::ForceFirst)
    }

    /// Makes the first matching move resolve after every other move.
    pub fn force_move_last(&mut self, predicate: impl Fn(&MoveAction) -> bool) -> bool {
        self.set_timing_override(predicate, TimingOverride::ForceLast)
    }

    pub fn replace_action(
        &mut self,
        predicate: impl Fn(&MoveAction) -> bool,
        payload: MovePayload,
    ) -> bool {
        self.moves.replace_payload(predicate, payload)
    }

    pub fn replace_move(&mut self, predicate: impl Fn(&MoveAction) -> bool, mv: MoveRef) -> bool {
        self.moves.replace_move(predicate, mv)
    }

    /// Retargets queued moves aimed at `removed` onto `substitute`.
    pub fn redirect_actor(&mut self, removed: ActorId, substitute: ActorId) -> usize {
        self.moves.redirect(removed, substitute)
    }

    pub fn cancel_action(&mut self, predicate: impl Fn(&MoveAction) -> bool) -> bool {
        self.moves.cancel(predicate)
    }

    pub fn find(&self, predicate: impl Fn(&MoveAction) -> bool) -> Option<&MoveAction> {
        self.moves.find(predicate)
    }

    pub fn has(&self, predicate: impl Fn(&MoveAction) -> bool) -> bool {
        self.moves.has(predicate)
    }

    pub fn remove(&mut self, predicate: impl Fn(&MoveAction) -> bool) -> bool {
        self.moves.remove(predicate)
    }

    /// Copy of the actors whose moves were popped since the last reset.
    pub fn turn_order_snapshot(&self) -> Vec<ActorId> {
        self.moves.turn_order().to_vec()
    }

    pub fn clear_turn_order_snapshot(&mut self) {
        self.moves.clear_turn_order();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(&BattleConfig::default())
    }
}
