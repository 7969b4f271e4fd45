//! Action domain: the units the scheduler holds and releases.
//!
//! # Module Structure
//!
//! - `kind`: closed set of action kinds and their scheduling class
//! - `moves`: move actions (payload, targets, timing override, use mode)
//! - `phase`: entry effects, generic actor phases and messages
//!
//! Actions are built by command selection upstream. The scheduler owns them
//! while queued and hands ownership to the turn loop on pop.

mod kind;
mod moves;
mod phase;

pub use kind::{ActionKind, ActorPhaseKind, Scheduling};
pub use moves::{
    MoveAction, MovePayload, MoveRef, MoveUseMode, TargetError, Targets, TimingOverride,
};
pub use phase::{ActorPhase, EntryEffect, Message, PhaseDetail};

use crate::state::ActorId;

/// Capability of payloads that belong to exactly one acting combatant.
///
/// Only actor-scoped payloads implement it; speed ordering is defined in
/// terms of this trait, so a payload without an owner cannot be queued
/// dynamically.
pub trait HasActor {
    fn actor(&self) -> ActorId;
}

/// Tagged action record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    EntryEffect(EntryEffect),
    Actor(ActorPhase),
    Message(Message),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Move(_) => ActionKind::Move,
            Self::EntryEffect(_) => ActionKind::EntryEffect,
            Self::Actor(phase) => ActionKind::Actor(phase.kind()),
            Self::Message(_) => ActionKind::Message,
        }
    }

    /// Owning actor, for actor-scoped actions.
    pub fn actor(&self) -> Option<ActorId> {
        match self {
            Self::Move(action) => Some(action.actor()),
            Self::EntryEffect(effect) => Some(effect.actor()),
            Self::Actor(phase) => Some(phase.actor()),
            Self::Message(_) => None,
        }
    }

    pub fn as_move(&self) -> Option<&MoveAction> {
        match self {
            Self::Move(action) => Some(action),
            _ => None,
        }
    }

    pub fn into_move(self) -> Option<MoveAction> {
        match self {
            Self::Move(action) => Some(action),
            _ => None,
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<EntryEffect> for Action {
    fn from(effect: EntryEffect) -> Self {
        Self::EntryEffect(effect)
    }
}

impl From<ActorPhase> for Action {
    fn from(phase: ActorPhase) -> Self {
        Self::Actor(phase)
    }
}

impl From<Message> for Action {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}
