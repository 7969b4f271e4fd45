//! Action kinds and their scheduling class.
//!
//! Whether a kind is ordered dynamically is declared here, next to the kind
//! itself, through exhaustive matches. Adding a variant does not compile until
//! its scheduling class is decided.

/// How actions of a kind are released during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Scheduling {
    /// Runs in the order it was queued, outside the scheduler.
    Static,
    /// Ordered by live actor speed.
    ActorSpeed,
    /// Ordered by timing override, priority bracket, then live speed.
    MovePriority,
}

impl Scheduling {
    pub const fn is_dynamic(self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// Actor-scoped phases that are not moves.
///
/// Some of them carry an actor but must still run in queue order; that is
/// declared by [`ActorPhaseKind::is_dynamic`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActorPhaseKind {
    // ========================================================================
    // Speed ordered
    // ========================================================================
    /// Stat stage change resolving after a move or ability.
    StatStageChange,

    /// End-of-turn status damage (poison, burn).
    StatusTick,

    /// Held berry activation.
    Berry,

    // ========================================================================
    // Queue ordered
    // ========================================================================
    /// Command selection for one combatant.
    Command,

    /// Bringing a combatant onto the field.
    Summon,

    /// Replacing a combatant mid-turn.
    SwitchSummon,

    /// Removing a fainted combatant.
    Faint,
}

impl ActorPhaseKind {
    /// Returns true if queued phases of this kind are ordered by speed.
    pub const fn is_dynamic(self) -> bool {
        match self {
            Self::StatStageChange | Self::StatusTick | Self::Berry => true,
            Self::Command | Self::Summon | Self::SwitchSummon | Self::Faint => false,
        }
    }
}

/// Tag identifying which queue owns an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// A combatant using a move.
    Move,
    /// Effects triggered when a combatant enters the field.
    EntryEffect,
    /// Any other actor-scoped phase.
    Actor(ActorPhaseKind),
    /// Battle text with no owning actor.
    Message,
}

impl ActionKind {
    pub const fn scheduling(self) -> Scheduling {
        match self {
            Self::Move => Scheduling::MovePriority,
            Self::EntryEffect => Scheduling::ActorSpeed,
            Self::Actor(phase) if phase.is_dynamic() => Scheduling::ActorSpeed,
            Self::Actor(_) | Self::Message => Scheduling::Static,
        }
    }

    #[inline]
    pub const fn is_dynamic(self) -> bool {
        self.scheduling().is_dynamic()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::EntryEffect => "entry_effect",
            Self::Actor(phase) => phase.into(),
            Self::Message => "message",
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn moves_use_priority_scheduling() {
        assert_eq!(ActionKind::Move.scheduling(), Scheduling::MovePriority);
        assert_eq!(ActionKind::EntryEffect.scheduling(), Scheduling::ActorSpeed);
        assert!(!ActionKind::Message.is_dynamic());
    }

    #[test]
    fn only_speed_ordered_phases_are_dynamic() {
        let dynamic: Vec<_> = ActorPhaseKind::iter()
            .filter(|phase| ActionKind::Actor(*phase).is_dynamic())
            .collect();

        assert_eq!(
            dynamic,
            vec![
                ActorPhaseKind::StatStageChange,
                ActorPhaseKind::StatusTick,
                ActorPhaseKind::Berry
            ]
        );
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(ActionKind::Actor(ActorPhaseKind::SwitchSummon).name(), "switch_summon");
        assert_eq!(ActionKind::EntryEffect.to_string(), "entry_effect");
    }
}
