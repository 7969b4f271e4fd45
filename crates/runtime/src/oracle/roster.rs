use std::collections::HashMap;

use battle_core::{ActorId, ActorOracle, HasActor, MoveAction};
use serde::{Deserialize, Serialize};

/// Live combat values of one actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub base_speed: u32,
    /// Stat stage in `[-6, 6]`; each stage scales speed by half a step.
    #[serde(default)]
    pub speed_stage: i8,
    /// Moves ahead of its priority bracket this turn.
    #[serde(default)]
    pub bypass_speed: bool,
    /// Added to the bracket of every move this actor uses.
    #[serde(default)]
    pub priority_boost: i8,
}

impl Combatant {
    pub const MAX_STAGE: i8 = 6;

    pub fn new(base_speed: u32) -> Self {
        Self {
            base_speed,
            speed_stage: 0,
            bypass_speed: false,
            priority_boost: 0,
        }
    }

    /// Speed after stat stages: `base * (2 + s) / 2` when raised,
    /// `base * 2 / (2 - s)` when lowered. Saturates at `u32::MAX`.
    pub fn effective_speed(&self) -> u32 {
        let base = u64::from(self.base_speed);
        let stage = u64::from(self.speed_stage.unsigned_abs());
        let speed = if self.speed_stage >= 0 {
            base * (2 + stage) / 2
        } else {
            base * 2 / (2 + stage)
        };
        u32::try_from(speed).unwrap_or(u32::MAX)
    }
}

/// In-memory actor table the scheduler reads speed and priority from.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    combatants: HashMap<ActorId, Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, actor: ActorId, combatant: Combatant) {
        self.combatants.insert(actor, combatant);
    }

    pub fn get(&self, actor: ActorId) -> Option<&Combatant> {
        self.combatants.get(&actor)
    }

    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&actor)
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.combatants.contains_key(&actor)
    }

    /// Removes an actor from the battle (fainted, switched out).
    pub fn remove(&mut self, actor: ActorId) -> Option<Combatant> {
        self.combatants.remove(&actor)
    }

    /// Shifts the speed stage, clamped to the legal range. Returns the new stage.
    pub fn change_speed_stage(&mut self, actor: ActorId, delta: i8) -> Option<i8> {
        let combatant = self.combatants.get_mut(&actor)?;
        combatant.speed_stage = combatant
            .speed_stage
            .saturating_add(delta)
            .clamp(-Combatant::MAX_STAGE, Combatant::MAX_STAGE);
        Some(combatant.speed_stage)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl ActorOracle for Roster {
    fn current_speed(&self, actor: ActorId) -> u32 {
        self.get(actor).map_or(0, Combatant::effective_speed)
    }

    fn bypasses_speed(&self, actor: ActorId) -> bool {
        self.get(actor).is_some_and(|combatant| combatant.bypass_speed)
    }

    fn effective_priority(&self, action: &MoveAction) -> i32 {
        let boost = self
            .get(action.actor())
            .map_or(0, |combatant| combatant.priority_boost);
        i32::from(action.priority()) + i32::from(boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_scale_speed() {
        let mut combatant = Combatant::new(100);
        assert_eq!(combatant.effective_speed(), 100);

        combatant.speed_stage = 2;
        assert_eq!(combatant.effective_speed(), 200);

        combatant.speed_stage = -2;
        assert_eq!(combatant.effective_speed(), 50);
    }

    #[test]
    fn huge_base_speed_saturates() {
        let mut roster = Roster::new();
        let mut combatant = Combatant::new(u32::MAX);
        combatant.speed_stage = Combatant::MAX_STAGE;
        roster.insert(ActorId(1), combatant);
        roster.insert(ActorId(2), Combatant::new(1_100_000_000));
        roster.change_speed_stage(ActorId(2), 6);

        assert_eq!(roster.current_speed(ActorId(1)), u32::MAX);
        assert_eq!(roster.current_speed(ActorId(2)), u32::MAX);

        roster.change_speed_stage(ActorId(1), -12);
        assert_eq!(roster.current_speed(ActorId(1)), u32::MAX / 4);
    }

    #[test]
    fn stage_changes_clamp() {
        let mut roster = Roster::new();
        roster.insert(ActorId(1), Combatant::new(80));

        assert_eq!(roster.change_speed_stage(ActorId(1), 5), Some(5));
        assert_eq!(roster.change_speed_stage(ActorId(1), 5), Some(6));
        assert_eq!(roster.change_speed_stage(ActorId(1), -20), Some(-6));
        assert_eq!(roster.change_speed_stage(ActorId(2), 1), None);
    }

    #[test]
    fn unknown_actors_are_slowest() {
        let roster = Roster::new();
        assert_eq!(roster.current_speed(ActorId(4)), 0);
        assert!(!roster.bypasses_speed(ActorId(4)));
    }
}
