use std::collections::HashMap;

use battle_core::{ActorId, MoveRef};
use serde::{Deserialize, Serialize};

/// Command an actor chose for the current turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnCommand {
    Fight { mv: MoveRef },
    Switch { party_slot: u8 },
    Item { item: u16 },
    Run,
}

/// Per-turn record of chosen commands, reset together with the queues.
#[derive(Clone, Debug, Default)]
pub struct TurnCommands {
    commands: HashMap<ActorId, TurnCommand>,
}

impl TurnCommands {
    /// Records `command`, replacing any earlier choice by the same actor.
    pub fn record(&mut self, actor: ActorId, command: TurnCommand) -> Option<TurnCommand> {
        self.commands.insert(actor, command)
    }

    pub fn get(&self, actor: ActorId) -> Option<&TurnCommand> {
        self.commands.get(&actor)
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
