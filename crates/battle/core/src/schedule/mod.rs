//! Dynamic turn-order scheduling.
//!
//! Queues store actions unordered and pick the next one on every pop, reading
//! speed and priority from the [`ActorOracle`] at that moment. Pushing is
//! O(1) because actions are often cancelled or replaced before they run.
//!
//! - [`OrderingQueue`]: base contract (push / pop / has / remove / find / clear)
//! - [`ActorSpeedQueue`]: fastest actor first
//! - [`MoveQueue`]: timing override, priority bracket, then speed
//! - [`Scheduler`]: registry that owns one queue per dynamic kind

mod moves;
mod scheduler;
mod select;
mod speed;

pub use moves::MoveQueue;
pub use scheduler::{Enqueue, Scheduler};
pub use speed::ActorSpeedQueue;

use crate::action::HasActor;
use crate::env::{ActorOracle, TieBreaker};

/// Direction of speed comparisons for the whole battle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpeedOrder {
    /// Faster actors act first.
    #[default]
    Descending,
    /// Slower actors act first (trick room).
    Reversed,
}

impl SpeedOrder {
    /// Maps a speed to a rank where larger ranks pop first.
    #[inline]
    pub(crate) fn rank(self, speed: u32) -> i64 {
        match self {
            Self::Descending => i64::from(speed),
            Self::Reversed => -i64::from(speed),
        }
    }
}

/// Everything a queue needs to decide what runs next.
pub struct PopContext<'a, O: ActorOracle + ?Sized> {
    pub oracle: &'a O,
    pub tie_breaker: &'a mut TieBreaker,
    pub speed_order: SpeedOrder,
}

impl<'a, O: ActorOracle + ?Sized> PopContext<'a, O> {
    pub fn new(oracle: &'a O, tie_breaker: &'a mut TieBreaker, speed_order: SpeedOrder) -> Self {
        Self {
            oracle,
            tie_breaker,
            speed_order,
        }
    }
}

/// Container of same-kind actions that computes its next action lazily.
///
/// Implementors provide storage and [`OrderingQueue::select`]; every other
/// operation is shared. Predicates are expected to be pure functions of the
/// action they are given.
pub trait OrderingQueue {
    type Item: HasActor;

    fn pending(&self) -> &[Self::Item];

    fn pending_mut(&mut self) -> &mut Vec<Self::Item>;

    /// Index of the action that should run next, given current actor state.
    fn select<O: ActorOracle + ?Sized>(&self, cx: &mut PopContext<'_, O>) -> Option<usize>;

    /// Called with each action right before it leaves the queue through `pop`.
    fn on_popped(&mut self, _item: &Self::Item) {}

    fn push(&mut self, item: Self::Item) {
        self.pending_mut().push(item);
    }

    /// Removes and returns the action that should run next.
    fn pop<O: ActorOracle + ?Sized>(&mut self, cx: &mut PopContext<'_, O>) -> Option<Self::Item> {
        let index = self.select(cx)?;
        // `remove` keeps insertion order for the remaining tie-breaks
        let item = self.pending_mut().remove(index);
        self.on_popped(&item);

        tracing::trace!(
            target: "battle_core::schedule",
            actor = %item.actor(),
            remaining = self.len(),
            "popped action"
        );

        Some(item)
    }

    fn has(&self, predicate: impl Fn(&Self::Item) -> bool) -> bool {
        self.pending().iter().any(|item| predicate(item))
    }

    fn find(&self, predicate: impl Fn(&Self::Item) -> bool) -> Option<&Self::Item> {
        self.pending().iter().find(|&item| predicate(item))
    }

    /// Removes the first action, in insertion order, matching `predicate`.
    fn remove(&mut self, predicate: impl Fn(&Self::Item) -> bool) -> bool {
        match self.pending().iter().position(|item| predicate(item)) {
            Some(index) => {
                self.pending_mut().remove(index);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.pending_mut().clear();
    }

    fn len(&self) -> usize {
        self.pending().len()
    }

    fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }
}
