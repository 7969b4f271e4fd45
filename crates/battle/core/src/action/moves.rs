//! Move actions: the payload of the move-priority queue.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{ActorId, MoveId};

use super::HasActor;

/// Errors raised while building a move payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("move cannot target more than {capacity} combatants")]
    TooManyTargets { capacity: usize },
}

impl BattleError for TargetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyTargets { .. } => "TARGET_TOO_MANY",
        }
    }
}

/// Bounded set of targeted actors, in the order they were chosen.
///
/// Deserialization goes through [`Targets::try_from_iter`], so loaded sets
/// are deduplicated and capacity-checked like built ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ActorId>", into = "Vec<ActorId>")
)]
pub struct Targets(ArrayVec<ActorId, { BattleConfig::MAX_TARGETS }>);

impl Targets {
    pub fn new() -> Self {
        Self(ArrayVec::new())
    }

    pub fn single(target: ActorId) -> Self {
        let mut targets = Self::new();
        targets.0.push(target);
        targets
    }

    /// Builds a target set, rejecting more targets than a field can hold.
    pub fn try_from_iter(
        targets: impl IntoIterator<Item = ActorId>,
    ) -> Result<Self, TargetError> {
        let mut set = Self::new();
        for target in targets {
            set.insert(target)?;
        }
        Ok(set)
    }

    /// Adds a target unless it is already present.
    pub fn insert(&mut self, target: ActorId) -> Result<(), TargetError> {
        if self.contains(target) {
            return Ok(());
        }
        self.0
            .try_push(target)
            .map_err(|_| TargetError::TooManyTargets {
                capacity: BattleConfig::MAX_TARGETS,
            })
    }

    pub fn contains(&self, target: ActorId) -> bool {
        self.0.contains(&target)
    }

    pub fn as_slice(&self) -> &[ActorId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrites `removed` to `substitute`. Returns true if anything changed.
    ///
    /// When `substitute` is already targeted the stale entry is dropped
    /// instead, so a target is never hit twice by the same move.
    pub(crate) fn redirect(&mut self, removed: ActorId, substitute: ActorId) -> bool {
        let Some(index) = self.0.iter().position(|&target| target == removed) else {
            return false;
        };

        if self.contains(substitute) {
            self.0.remove(index);
        } else {
            self.0[index] = substitute;
        }
        true
    }
}

impl TryFrom<Vec<ActorId>> for Targets {
    type Error = TargetError;

    fn try_from(targets: Vec<ActorId>) -> Result<Self, TargetError> {
        Self::try_from_iter(targets)
    }
}

impl From<Targets> for Vec<ActorId> {
    fn from(targets: Targets) -> Self {
        targets.0.into_iter().collect()
    }
}

/// Reference to the move an actor will use and its declared priority bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRef {
    pub id: MoveId,
    /// Priority bracket; higher resolves first regardless of speed.
    pub priority: i8,
}

impl MoveRef {
    pub const fn new(id: MoveId, priority: i8) -> Self {
        Self { id, priority }
    }
}

/// Kind-specific data of a move action: what is used, and on whom.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovePayload {
    pub mv: MoveRef,
    pub targets: Targets,
}

impl MovePayload {
    pub fn new(mv: MoveRef, targets: Targets) -> Self {
        Self { mv, targets }
    }
}

/// Forced placement that overrides bracket and speed for one action.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TimingOverride {
    #[default]
    Normal,
    /// Resolves before every action that is not also forced first.
    ForceFirst,
    /// Resolves after every action that is not also forced last.
    ForceLast,
}

impl TimingOverride {
    /// Ordering tier; larger tiers pop first.
    pub(crate) const fn tier(self) -> u8 {
        match self {
            Self::ForceFirst => 2,
            Self::Normal => 1,
            Self::ForceLast => 0,
        }
    }
}

/// How the move came to be queued.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MoveUseMode {
    /// Chosen by the player or AI during command selection.
    #[default]
    Normal,
    /// Called or copied by another effect (dancer, instruct).
    Indirect,
    /// Continuation of a multi-turn move.
    FollowUp,
}

/// "Actor will use move X on targets Y" for the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    actor: ActorId,
    pub payload: MovePayload,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: TimingOverride,
    #[cfg_attr(feature = "serde", serde(default))]
    pub use_mode: MoveUseMode,
}

impl MoveAction {
    pub fn new(actor: ActorId, payload: MovePayload) -> Self {
        Self {
            actor,
            payload,
            timing: TimingOverride::Normal,
            use_mode: MoveUseMode::Normal,
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TimingOverride) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn with_use_mode(mut self, use_mode: MoveUseMode) -> Self {
        self.use_mode = use_mode;
        self
    }

    pub fn move_ref(&self) -> MoveRef {
        self.payload.mv
    }

    /// Declared priority bracket of the queued move.
    pub fn priority(&self) -> i8 {
        self.payload.mv.priority
    }

    pub fn targets(&self) -> &Targets {
        &self.payload.targets
    }

    pub fn targets_actor(&self, target: ActorId) -> bool {
        self.payload.targets.contains(target)
    }
}

impl HasActor for MoveAction {
    fn actor(&self) -> ActorId {
        self.actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_reject_overflow() {
        let err = Targets::try_from_iter((1..=4).map(ActorId)).unwrap_err();
        assert_eq!(
            err,
            TargetError::TooManyTargets {
                capacity: BattleConfig::MAX_TARGETS
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn targets_ignore_duplicates() {
        let targets = Targets::try_from_iter([ActorId(2), ActorId(2), ActorId(3)]).unwrap();
        assert_eq!(targets.as_slice(), &[ActorId(2), ActorId(3)]);
    }

    #[test]
    fn redirect_drops_entry_when_substitute_already_targeted() {
        let mut targets = Targets::try_from_iter([ActorId(2), ActorId(3)]).unwrap();

        assert!(targets.redirect(ActorId(2), ActorId(3)));
        assert_eq!(targets.as_slice(), &[ActorId(3)]);
        assert!(!targets.redirect(ActorId(9), ActorId(1)));
    }

    #[test]
    fn vec_conversion_deduplicates_and_checks_capacity() {
        let targets = Targets::try_from(vec![ActorId(4), ActorId(4), ActorId(1)]).unwrap();
        assert_eq!(targets.as_slice(), &[ActorId(4), ActorId(1)]);
        assert_eq!(Vec::from(targets), vec![ActorId(4), ActorId(1)]);

        let overflow = Targets::try_from((1..=4).map(ActorId).collect::<Vec<_>>());
        assert!(overflow.is_err());
    }

    #[test]
    fn timing_tiers_order_first_normal_last() {
        assert!(TimingOverride::ForceFirst.tier() > TimingOverride::Normal.tier());
        assert!(TimingOverride::Normal.tier() > TimingOverride::ForceLast.tier());
    }
}
