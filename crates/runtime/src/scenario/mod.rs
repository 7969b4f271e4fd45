//! Scenario files for setting up an encounter.
//!
//! A scenario lists the combatants on the field and the actions queued for
//! the first turn. Loading one yields a roster for live reads and a turn
//! controller already primed with those actions.

use std::path::Path;

use battle_core::{
    Action, ActorId, ActorPhase, ActorPhaseKind, EntryEffect, Message, MoveAction, MoveId,
    MovePayload, MoveRef, MoveUseMode, Targets, TimingOverride,
};
use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::oracle::{Combatant, Roster};
use crate::turn::TurnController;

/// Combatant placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub id: u32,
    pub base_speed: u32,
    #[serde(default)]
    pub speed_stage: i8,
    #[serde(default)]
    pub bypass_speed: bool,
    #[serde(default)]
    pub priority_boost: i8,
}

impl CombatantSpec {
    fn combatant(&self) -> Combatant {
        Combatant {
            base_speed: self.base_speed,
            speed_stage: self.speed_stage,
            bypass_speed: self.bypass_speed,
            priority_boost: self.priority_boost,
        }
    }
}

/// Action queued before the first turn runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueuedSpec {
    Move {
        actor: u32,
        move_id: u16,
        #[serde(default)]
        priority: i8,
        #[serde(default)]
        targets: Vec<u32>,
        #[serde(default)]
        timing: TimingOverride,
        #[serde(default)]
        use_mode: MoveUseMode,
    },
    EntryEffect {
        actor: u32,
    },
    Phase {
        kind: ActorPhaseKind,
        actor: u32,
    },
    Message(String),
}

impl QueuedSpec {
    fn to_action(&self, roster: &Roster) -> Result<Action> {
        let known = |id: u32| {
            let actor = ActorId(id);
            if roster.contains(actor) {
                Ok(actor)
            } else {
                Err(RuntimeError::UnknownCombatant { actor })
            }
        };

        let action: Action = match self {
            Self::Move {
                actor,
                move_id,
                priority,
                targets,
                timing,
                use_mode,
            } => {
                let targets = targets
                    .iter()
                    .map(|&id| known(id))
                    .collect::<Result<Vec<_>>>()?;
                let payload = MovePayload::new(
                    MoveRef::new(MoveId(*move_id), *priority),
                    Targets::try_from_iter(targets)?,
                );
                MoveAction::new(known(*actor)?, payload)
                    .with_timing(*timing)
                    .with_use_mode(*use_mode)
                    .into()
            }
            Self::EntryEffect { actor } => EntryEffect::new(known(*actor)?).into(),
            Self::Phase { kind, actor } => ActorPhase::new(*kind, known(*actor)?).into(),
            Self::Message(text) => Message::new(text.clone()).into(),
        };
        Ok(action)
    }
}

/// Encounter setup loaded from RON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: RuntimeConfig,
    pub combatants: Vec<CombatantSpec>,
    #[serde(default)]
    pub actions: Vec<QueuedSpec>,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to read scenario file: {}", e))
        })?;

        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to parse scenario RON: {}", e))
        })
    }

    pub fn roster(&self) -> Result<Roster> {
        let mut roster = Roster::new();
        for spec in &self.combatants {
            let actor = ActorId(spec.id);
            if roster.contains(actor) || actor.is_system() {
                return Err(RuntimeError::InvalidConfig(format!(
                    "duplicate or reserved combatant id {}",
                    spec.id
                )));
            }
            roster.insert(actor, spec.combatant());
        }
        Ok(roster)
    }

    /// Builds the roster and a controller with the first turn started and
    /// every scenario action queued.
    pub fn build(&self) -> Result<(TurnController, Roster)> {
        if self.config.max_actions_per_turn == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_actions_per_turn must be positive".to_string(),
            ));
        }

        let roster = self.roster()?;
        let actions = self
            .actions
            .iter()
            .map(|spec| spec.to_action(&roster))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            target: "runtime::turn",
            combatants = roster.len(),
            actions = actions.len(),
            "scenario loaded"
        );

        let mut controller = TurnController::new(self.config.clone());
        controller.start_turn();
        for action in actions {
            controller.push(action);
        }
        Ok((controller, roster))
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{ActionKind, BattleError};

    use super::*;

    const DUEL: &str = r#"(
        combatants: [
            (id: 1, base_speed: 40),
            (id: 2, base_speed: 90, speed_stage: -2),
        ],
        actions: [
            Message("a wild battle begins"),
            Move(actor: 1, move_id: 10, targets: [2]),
            Move(actor: 2, move_id: 11, targets: [1]),
        ],
    )"#;

    #[test]
    fn builds_primed_controller() {
        let scenario = Scenario::from_ron(DUEL).unwrap();
        let (mut turn, roster) = scenario.build().unwrap();

        assert_eq!(turn.turn(), 1);
        assert_eq!(turn.scheduler().pending_len(ActionKind::Move), 2);

        let message = turn.next_action(&roster).unwrap();
        assert_eq!(message.kind(), ActionKind::Message);

        // 90 at -2 is 45, still ahead of 40
        let first = turn.next_action(&roster).and_then(|a| a.actor());
        assert_eq!(first, Some(ActorId(2)));
    }

    #[test]
    fn rejects_unknown_target() {
        let scenario = Scenario::from_ron(
            r#"(
                combatants: [(id: 1, base_speed: 10)],
                actions: [Move(actor: 1, move_id: 1, targets: [7])],
            )"#,
        )
        .unwrap();

        let err = scenario.build().unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UnknownCombatant { actor } if actor == ActorId(7)
        ));
        assert_eq!(err.error_code(), "RUNTIME_UNKNOWN_COMBATANT");
    }

    #[test]
    fn rejects_too_many_targets() {
        let scenario = Scenario::from_ron(
            r#"(
                combatants: [
                    (id: 1, base_speed: 10),
                    (id: 2, base_speed: 10),
                    (id: 3, base_speed: 10),
                    (id: 4, base_speed: 10),
                    (id: 5, base_speed: 10),
                ],
                actions: [Move(actor: 1, move_id: 1, targets: [2, 3, 4, 5])],
            )"#,
        )
        .unwrap();

        assert!(matches!(scenario.build(), Err(RuntimeError::Target(_))));
    }

    #[test]
    fn rejects_duplicate_combatants() {
        let scenario = Scenario::from_ron(
            "(combatants: [(id: 1, base_speed: 10), (id: 1, base_speed: 20)])",
        )
        .unwrap();

        assert!(matches!(
            scenario.roster(),
            Err(RuntimeError::InvalidConfig(_))
        ));
    }
}
