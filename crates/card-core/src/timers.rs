//! Cancellable one-shot timers checked at frame boundaries.

use fnv::FnvHashMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending actions keyed by id, due at an absolute scene time.
#[derive(Debug)]
pub struct TimerSet<A> {
    pending: FnvHashMap<TimerId, (Duration, A)>,
    next_id: u64,
}

impl<A> Default for TimerSet<A> {
    fn default() -> Self {
        Self {
            pending: FnvHashMap::default(),
            next_id: 0,
        }
    }
}

impl<A> TimerSet<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` at absolute time `due`.
    pub fn schedule(&mut self, due: Duration, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, (due, action));
        id
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    /// Remove and return every action due at or before `now`, ordered by due
    /// time and then by scheduling order.
    pub fn advance_to(&mut self, now: Duration) -> Vec<A> {
        let mut due: Vec<TimerId> = self
            .pending
            .iter()
            .filter(|(_, (at, _))| *at <= now)
            .map(|(id, _)| *id)
            .collect();
        if due.is_empty() {
            return Vec::new();
        }
        due.sort_by_key(|id| (self.pending[id].0, *id));
        due.into_iter()
            .filter_map(|id| self.pending.remove(&id).map(|(_, a)| a))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
