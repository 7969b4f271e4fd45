use crate::action::HasActor;
use crate::env::ActorOracle;

use super::select::select_by_key;
use super::{OrderingQueue, PopContext};

/// Queue that releases the fastest actor's action first.
///
/// Used for actor-scoped actions without priority brackets, such as entry
/// effects that must resolve fastest-actor-first.
#[derive(Clone, Debug)]
pub struct ActorSpeedQueue<T> {
    pending: Vec<T>,
}

impl<T> ActorSpeedQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> Default for ActorSpeedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasActor> OrderingQueue for ActorSpeedQueue<T> {
    type Item = T;

    fn pending(&self) -> &[T] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<T> {
        &mut self.pending
    }

    fn select<O: ActorOracle + ?Sized>(&self, cx: &mut PopContext<'_, O>) -> Option<usize> {
        let oracle = cx.oracle;
        let order = cx.speed_order;

        select_by_key(&self.pending, cx.tie_breaker, |item| {
            order.rank(oracle.current_speed(item.actor()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EntryEffect;
    use crate::env::TieBreaker;
    use crate::env::testing::SpeedTable;
    use crate::schedule::SpeedOrder;
    use crate::state::ActorId;

    fn drain(
        queue: &mut ActorSpeedQueue<EntryEffect>,
        speeds: &SpeedTable,
        order: SpeedOrder,
    ) -> Vec<u32> {
        let mut stream = TieBreaker::new(3);
        let mut cx = PopContext::new(speeds, &mut stream, order);
        let mut popped = Vec::new();
        while let Some(effect) = queue.pop(&mut cx) {
            popped.push(effect.actor().0);
        }
        popped
    }

    fn queue_of(ids: &[u32]) -> ActorSpeedQueue<EntryEffect> {
        let mut queue = ActorSpeedQueue::new();
        for &id in ids {
            queue.push(EntryEffect::new(ActorId(id)));
        }
        queue
    }

    #[test]
    fn pops_in_descending_speed() {
        let speeds = SpeedTable::new(&[(1, 40), (2, 90), (3, 65), (4, 10)]);
        let mut queue = queue_of(&[1, 2, 3, 4]);

        assert_eq!(drain(&mut queue, &speeds, SpeedOrder::Descending), vec![2, 3, 1, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn reversed_order_pops_slowest_first() {
        let speeds = SpeedTable::new(&[(1, 40), (2, 90), (3, 65)]);
        let mut queue = queue_of(&[1, 2, 3]);

        assert_eq!(drain(&mut queue, &speeds, SpeedOrder::Reversed), vec![1, 3, 2]);
    }

    #[test]
    fn reads_speed_at_pop_time() {
        let mut speeds = SpeedTable::new(&[(1, 50), (2, 60)]);
        let mut queue = queue_of(&[1, 2]);
        speeds.set(2, 10);

        assert_eq!(drain(&mut queue, &speeds, SpeedOrder::Descending), vec![1, 2]);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let speeds = SpeedTable::default();
        let mut queue: ActorSpeedQueue<EntryEffect> = ActorSpeedQueue::new();
        let mut stream = TieBreaker::new(0);
        let mut cx = PopContext::new(&speeds, &mut stream, SpeedOrder::Descending);

        assert!(queue.pop(&mut cx).is_none());
    }

    #[test]
    fn remove_takes_only_first_match() {
        let mut queue = queue_of(&[1, 2, 1]);

        assert!(queue.remove(|effect| effect.actor() == ActorId(1)));
        assert_eq!(queue.len(), 2);
        assert!(queue.has(|effect| effect.actor() == ActorId(1)));
        assert!(!queue.remove(|effect| effect.actor() == ActorId(7)));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut queue = queue_of(&[1, 2]);
        queue.clear();
        queue.clear();

        assert!(queue.is_empty());
        assert!(queue.find(|_| true).is_none());
    }
}
