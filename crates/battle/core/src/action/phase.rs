//! Non-move actions: entry effects, generic actor phases and messages.

use crate::state::ActorId;

use super::{ActorPhaseKind, HasActor};

/// On-entry effects (abilities, hazards) for an actor that just entered the field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryEffect {
    actor: ActorId,
    /// Ability that triggers on entry, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability: Option<u16>,
}

impl EntryEffect {
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            ability: None,
        }
    }

    #[must_use]
    pub fn with_ability(mut self, ability: u16) -> Self {
        self.ability = Some(ability);
        self
    }
}

impl HasActor for EntryEffect {
    fn actor(&self) -> ActorId {
        self.actor
    }
}

/// Kind-specific argument of an [`ActorPhase`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseDetail {
    #[default]
    None,
    /// Stat index and stage delta.
    StatStages { stat: u8, delta: i8 },
    /// Status condition identifier.
    Status(u16),
    /// Held item identifier.
    Item(u16),
    /// Party slot to bring in.
    PartySlot(u8),
}

/// Any actor-scoped phase that is not a move or an entry effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorPhase {
    kind: ActorPhaseKind,
    actor: ActorId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: PhaseDetail,
}

impl ActorPhase {
    pub fn new(kind: ActorPhaseKind, actor: ActorId) -> Self {
        Self {
            kind,
            actor,
            detail: PhaseDetail::None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: PhaseDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn kind(&self) -> ActorPhaseKind {
        self.kind
    }
}

impl HasActor for ActorPhase {
    fn actor(&self) -> ActorId {
        self.actor
    }
}

/// Battle text. Carries no actor and is never speed ordered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
