//! Turn execution loop that owns the scheduler.

use std::collections::VecDeque;

use battle_core::{Action, ActionKind, ActorId, ActorOracle, Enqueue, Scheduler};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

use super::{TurnCommand, TurnCommands};

/// Position in the turn's run order.
///
/// Dynamic actions leave a marker naming their kind; the concrete action is
/// chosen by the scheduler only when the marker is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    Static(Action),
    Dynamic(ActionKind),
}

/// Runs one popped action to completion.
///
/// The executor may push, cancel or retarget queued actions through the
/// controller, and change actor state through the oracle, before the next
/// action is selected.
pub trait ActionExecutor<O: ActorOracle> {
    fn execute(&mut self, action: Action, turn: &mut TurnController, oracle: &mut O)
    -> Result<()>;
}

/// Drives a battle turn by turn.
///
/// Constructed at encounter start and owned by the battle; nothing reaches
/// the scheduler except through this controller.
#[derive(Debug)]
pub struct TurnController {
    config: RuntimeConfig,
    scheduler: Scheduler,
    slots: VecDeque<Slot>,
    commands: TurnCommands,
    turn: u32,
    last_turn_order: Vec<ActorId>,
}

impl TurnController {
    pub fn new(config: RuntimeConfig) -> Self {
        let scheduler = Scheduler::new(&config.battle);
        Self {
            config,
            scheduler,
            slots: VecDeque::new(),
            commands: TurnCommands::default(),
            turn: 0,
            last_turn_order: Vec::new(),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Mutation surface for effect handlers (redirect, cancel, force timing).
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn commands(&self) -> &TurnCommands {
        &self.commands
    }

    pub fn command(&self, actor: ActorId) -> Option<&TurnCommand> {
        self.commands.get(actor)
    }

    pub fn record_command(&mut self, actor: ActorId, command: TurnCommand) {
        if let Some(previous) = self.commands.record(actor, command) {
            debug!(target: "runtime::turn", %actor, ?previous, "command replaced");
        }
    }

    /// Actor order of the previous turn's moves.
    pub fn last_turn_order(&self) -> &[ActorId] {
        &self.last_turn_order
    }

    /// Queues `action` to run after everything already queued.
    pub fn push(&mut self, action: Action) {
        let slot = self.slot_for(action);
        self.slots.push_back(slot);
    }

    /// Queues `action` to run right after the current one.
    pub fn unshift(&mut self, action: Action) {
        let slot = self.slot_for(action);
        self.slots.push_front(slot);
    }

    fn slot_for(&mut self, action: Action) -> Slot {
        match self.scheduler.enqueue(action) {
            Enqueue::Dynamic(kind) => Slot::Dynamic(kind),
            Enqueue::Static(action) => Slot::Static(action),
        }
    }

    /// Slots still waiting to run, including markers whose action may have
    /// been cancelled.
    pub fn pending_slots(&self) -> usize {
        self.slots.len()
    }

    /// Drops leading markers whose action was cancelled or removed.
    fn discard_orphan_markers(&mut self) {
        while let Some(Slot::Dynamic(kind)) = self.slots.front() {
            let kind = *kind;
            if self.scheduler.has_pending(kind) {
                break;
            }
            self.slots.pop_front();
            debug!(target: "runtime::turn", %kind, "marker without pending action");
        }
    }

    /// Next action to run, or `None` when the turn is exhausted.
    pub fn next_action<O: ActorOracle + ?Sized>(&mut self, oracle: &O) -> Option<Action> {
        while let Some(slot) = self.slots.pop_front() {
            match slot {
                Slot::Static(action) => return Some(action),
                Slot::Dynamic(kind) => match self.scheduler.pop_next(kind, oracle) {
                    Some(action) => return Some(action),
                    // the action behind this marker was cancelled or removed
                    None => debug!(target: "runtime::turn", %kind, "marker without pending action"),
                },
            }
        }
        None
    }

    /// Runs actions until the turn is exhausted. Returns how many ran.
    pub fn run_turn<O, E>(&mut self, oracle: &mut O, executor: &mut E) -> Result<usize>
    where
        O: ActorOracle,
        E: ActionExecutor<O>,
    {
        let limit = self.config.max_actions_per_turn;
        let mut executed = 0;

        loop {
            // checked before popping: popped moves enter the turn-order snapshot
            self.discard_orphan_markers();
            if self.slots.is_empty() {
                break;
            }
            if executed == limit {
                warn!(target: "runtime::turn", turn = self.turn, limit, "action limit reached");
                return Err(RuntimeError::TurnOverflow {
                    turn: self.turn,
                    limit,
                });
            }
            let Some(action) = self.next_action(&*oracle) else {
                break;
            };

            let kind = action.kind();
            let actor = action.actor();
            if let Err(error) = executor.execute(action, self, oracle) {
                warn!(target: "runtime::turn", %kind, ?actor, %error, "action failed");
                return Err(error);
            }
            executed += 1;
        }

        debug!(target: "runtime::turn", turn = self.turn, executed, "turn exhausted");
        Ok(executed)
    }

    /// Empties the scheduler's queues, the run order and the turn commands.
    pub fn clear_all(&mut self) {
        self.scheduler.clear_all();
        self.slots.clear();
        self.commands.reset();
    }

    /// Closes the previous turn and prepares a fresh one.
    pub fn start_turn(&mut self) {
        self.last_turn_order = self.scheduler.turn_order_snapshot();
        self.scheduler.clear_turn_order_snapshot();
        self.clear_all();

        self.turn += 1;
        self.scheduler.begin_turn(self.turn);

        info!(
            target: "runtime::turn",
            turn = self.turn,
            last_order = ?self.last_turn_order,
            "turn started"
        );
    }

    /// Resets every turn-scoped and encounter-scoped value.
    pub fn end_encounter(&mut self) {
        self.clear_all();
        self.scheduler.clear_turn_order_snapshot();
        self.scheduler
            .set_speed_order(self.config.battle.speed_order);
        self.last_turn_order.clear();
        self.turn = 0;
        self.scheduler.begin_turn(0);

        info!(target: "runtime::turn", "encounter ended");
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{
        ActorPhase, ActorPhaseKind, EntryEffect, HasActor, Message, MoveAction, MoveId,
        MovePayload, MoveRef, Targets,
    };

    use super::*;
    use crate::oracle::{Combatant, Roster};

    fn roster(speeds: &[(u32, u32)]) -> Roster {
        let mut roster = Roster::new();
        for &(id, speed) in speeds {
            roster.insert(ActorId(id), Combatant::new(speed));
        }
        roster
    }

    fn use_move(actor: u32, target: u32) -> Action {
        MoveAction::new(
            ActorId(actor),
            MovePayload::new(MoveRef::new(MoveId(1), 0), Targets::single(ActorId(target))),
        )
        .into()
    }

    #[test]
    fn static_slots_keep_queue_position() {
        let roster = roster(&[(1, 10), (2, 20)]);
        let mut turn = TurnController::default();
        turn.push(Message::new("go").into());
        turn.push(use_move(1, 2));
        turn.push(ActorPhase::new(ActorPhaseKind::Faint, ActorId(1)).into());
        turn.push(use_move(2, 1));

        let kinds: Vec<_> = std::iter::from_fn(|| turn.next_action(&roster))
            .map(|action| (action.kind(), action.actor()))
            .collect();

        assert_eq!(
            kinds,
            vec![
                (ActionKind::Message, None),
                (ActionKind::Move, Some(ActorId(2))),
                (ActionKind::Actor(ActorPhaseKind::Faint), Some(ActorId(1))),
                (ActionKind::Move, Some(ActorId(1))),
            ]
        );
    }

    #[test]
    fn cancelled_action_leaves_harmless_marker() {
        let roster = roster(&[(1, 10), (2, 20)]);
        let mut turn = TurnController::default();
        turn.push(use_move(1, 2));
        turn.push(use_move(2, 1));
        turn.scheduler_mut()
            .cancel_action(|action| action.actor() == ActorId(2));

        let first = turn.next_action(&roster).and_then(|action| action.actor());
        assert_eq!(first, Some(ActorId(1)));
        assert!(turn.next_action(&roster).is_none());
        assert_eq!(turn.pending_slots(), 0);
    }

    #[test]
    fn start_turn_rolls_snapshot_and_resets_commands() {
        let roster = roster(&[(1, 10), (2, 20)]);
        let mut turn = TurnController::default();
        turn.start_turn();
        turn.record_command(ActorId(1), TurnCommand::Run);
        turn.record_command(ActorId(2), TurnCommand::Switch { party_slot: 3 });
        turn.record_command(ActorId(2), TurnCommand::Fight {
            mv: MoveRef::new(MoveId(1), 0),
        });
        assert_eq!(turn.command(ActorId(1)), Some(&TurnCommand::Run));
        assert_eq!(turn.commands().len(), 2);
        turn.push(use_move(1, 2));
        turn.push(use_move(2, 1));
        turn.push(EntryEffect::new(ActorId(1)).into());
        while turn.next_action(&roster).is_some() {}

        turn.start_turn();

        assert_eq!(turn.turn(), 2);
        assert_eq!(turn.last_turn_order(), &[ActorId(2), ActorId(1)]);
        assert!(turn.scheduler().turn_order_snapshot().is_empty());
        assert!(turn.commands().is_empty());
    }

    #[test]
    fn end_encounter_forgets_everything() {
        let roster = roster(&[(1, 10)]);
        let mut turn = TurnController::default();
        turn.start_turn();
        turn.push(use_move(1, 2));
        turn.next_action(&roster);
        turn.start_turn();
        turn.push(use_move(1, 2));

        turn.end_encounter();

        assert_eq!(turn.turn(), 0);
        assert!(turn.last_turn_order().is_empty());
        assert_eq!(turn.pending_slots(), 0);
        assert!(!turn.scheduler().has_pending(ActionKind::Move));
    }
}
