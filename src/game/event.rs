//! Event System
//!
//! Systems talk through per-frame queues instead of calling each other:
//! overlap detection fills `overlaps`, the collision resolver drains it, and
//! every rule that changes the run reports what happened in `run` so the
//! runtime can log it and tests can assert on it.

use super::components::{Category, PowerUpKind};
use super::entity::Entity;
use super::timers::Effect;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Take every queued event, leaving the queue empty
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The runner touched an entity this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapEvent {
    pub entity: Entity,
    pub category: Category,
}

/// Something that changed the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunEvent {
    CoinCollected { total: u32 },
    PowerUpCollected(PowerUpKind),
    /// Hyper rush plowed through an entity
    Smashed(Category),
    /// The shield absorbed a hit
    ShieldConsumed(Category),
    CloseCall(Category),
    ColorRushStarted,
    EffectExpired(Effect),
    GameOver { score: u32, distance: f32, killer: Category },
}

/// Container for all game events. Cleared at the start of every tick.
#[derive(Debug, Default)]
pub struct Events {
    pub overlaps: EventQueue<OverlapEvent>,
    pub run: EventQueue<RunEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_all(&mut self) {
        self.overlaps.clear();
        self.run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.take(), vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();
        events.run.send(RunEvent::ColorRushStarted);
        events.run.send(RunEvent::CoinCollected { total: 1 });
        assert_eq!(events.run.len(), 2);

        events.clear_all();
        assert!(events.run.is_empty());
        assert!(events.overlaps.is_empty());
    }
}
