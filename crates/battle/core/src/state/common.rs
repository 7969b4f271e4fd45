use core::fmt;

/// Opaque handle for a combatant taking part in the battle.
///
/// Handles are assigned by the engine; the scheduler only compares them and
/// passes them back to the actor oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for engine-issued actions with no combatant behind them.
    pub const SYSTEM: Self = Self(u32::MAX);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns true if this handle is the reserved system actor.
    #[inline]
    pub const fn is_system(self) -> bool {
        self.0 == Self::SYSTEM.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_system() {
            f.write_str("#system")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Identifier of a move definition (looked up by move rules outside the scheduler).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveId(pub u16);

impl MoveId {
    /// Placeholder used when a move slot is empty.
    pub const NONE: Self = Self(0);
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move:{}", self.0)
    }
}
