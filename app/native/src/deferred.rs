//! Deferred actions on the UI event loop.
//!
//! Some window operations must not run on a call stack that started in a
//! window-event callback: reparenting a surface while the window manager is
//! still dispatching an event for it corrupts the window manager's state on
//! macOS. Those operations are scheduled here and run a few ticks later, where
//! a tick is one iteration of the host's event loop.
//!
//! # Guarantees
//!
//! - An action never runs inline with `schedule`; a delay of 0 is bumped to 1.
//! - Actions run in scheduling order. An action never becomes due before one
//!   scheduled ahead of it, so a short delay waits behind a longer one.
//! - Actions are never dropped or cancelled.
//! - An action scheduled while a tick is being processed waits for a later tick.
//!
//! The queue is owned by whatever it mutates (`T`), so due actions are taken
//! out with [`DeferredActionQueue::advance`] before the owner runs them with
//! `&mut self`.

use std::collections::VecDeque;

/// A unit of deferred work operating on the queue owner.
pub type Action<T> = Box<dyn FnOnce(&mut T)>;

/// An action that became due, ready to run.
pub struct DueAction<T> {
    /// Name used in logs.
    pub label: &'static str,
    /// Tick the action was scheduled on.
    pub scheduled_at: u64,
    action: Action<T>,
}

impl<T> DueAction<T> {
    /// Runs the action against its owner.
    pub fn run(self, owner: &mut T) {
        tracing::trace!(label = self.label, scheduled_at = self.scheduled_at, "running deferred action");
        (self.action)(owner);
    }
}

struct Scheduled<T> {
    due: u64,
    due_action: DueAction<T>,
}

/// Tick-driven FIFO of deferred actions.
pub struct DeferredActionQueue<T> {
    now: u64,
    scheduled: VecDeque<Scheduled<T>>,
}

impl<T> Default for DeferredActionQueue<T> {
    fn default() -> Self { Self::new() }
}

impl<T> DeferredActionQueue<T> {
    /// Creates an empty queue at tick 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: 0,
            scheduled: VecDeque::new(),
        }
    }

    /// Schedules `action` to run `delay_ticks` ticks from now.
    pub fn schedule<F>(&mut self, label: &'static str, delay_ticks: u32, action: F)
    where F: FnOnce(&mut T) + 'static {
        let requested = self.now + u64::from(delay_ticks.max(1));
        let due = self.scheduled.back().map_or(requested, |last| requested.max(last.due));
        tracing::trace!(label, now = self.now, due, "scheduled deferred action");
        self.scheduled.push_back(Scheduled {
            due,
            due_action: DueAction {
                label,
                scheduled_at: self.now,
                action: Box::new(action),
            },
        });
    }

    /// Advances the clock by one tick and removes every action that is due.
    ///
    /// The returned actions are in scheduling order.
    #[must_use = "due actions are removed from the queue and must be run"]
    pub fn advance(&mut self) -> Vec<DueAction<T>> {
        self.now += 1;
        let now = self.now;

        // Due ticks never decrease from front to back.
        let mut due = Vec::new();
        while self.scheduled.front().is_some_and(|entry| entry.due <= now) {
            if let Some(entry) = self.scheduled.pop_front() {
                due.push(entry.due_action);
            }
        }
        due
    }

    /// Number of actions waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize { self.scheduled.len() }

    /// Current tick.
    #[must_use]
    pub const fn now(&self) -> u64 { self.now }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Owner {
        log: Vec<&'static str>,
        queue: DeferredActionQueue<Owner>,
    }

    impl Owner {
        fn tick(&mut self) {
            for action in self.queue.advance() {
                action.run(self);
            }
        }
    }

    #[test]
    fn test_action_never_runs_inline() {
        let mut owner = Owner::default();
        owner.queue.schedule("a", 0, |o| o.log.push("a"));
        assert!(owner.log.is_empty());
        assert_eq!(owner.queue.pending(), 1);

        owner.tick();
        assert_eq!(owner.log, vec!["a"]);
    }

    #[test]
    fn test_action_waits_for_its_delay() {
        let mut owner = Owner::default();
        owner.queue.schedule("a", 2, |o| o.log.push("a"));

        owner.tick();
        assert!(owner.log.is_empty());
        owner.tick();
        assert_eq!(owner.log, vec!["a"]);
        assert_eq!(owner.queue.pending(), 0);
    }

    #[test]
    fn test_same_tick_actions_run_in_scheduling_order() {
        let mut owner = Owner::default();
        owner.queue.schedule("first", 2, |o| o.log.push("first"));
        owner.queue.schedule("second", 2, |o| o.log.push("second"));
        owner.queue.schedule("third", 2, |o| o.log.push("third"));

        owner.tick();
        owner.tick();
        assert_eq!(owner.log, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_shorter_delay_waits_behind_earlier_action() {
        let mut owner = Owner::default();
        owner.queue.schedule("slow", 3, |o| o.log.push("slow"));
        owner.queue.schedule("fast", 1, |o| o.log.push("fast"));

        owner.tick();
        assert!(owner.log.is_empty());
        owner.tick();
        assert!(owner.log.is_empty());

        owner.tick();
        assert_eq!(owner.log, vec!["slow", "fast"]);
        assert_eq!(owner.queue.pending(), 0);
    }

    #[test]
    fn test_later_action_keeps_its_own_longer_delay() {
        let mut owner = Owner::default();
        owner.queue.schedule("short", 1, |o| o.log.push("short"));
        owner.queue.schedule("long", 3, |o| o.log.push("long"));

        owner.tick();
        assert_eq!(owner.log, vec!["short"]);
        owner.tick();
        assert_eq!(owner.log, vec!["short"]);
        owner.tick();
        assert_eq!(owner.log, vec!["short", "long"]);
    }

    #[test]
    fn test_action_scheduled_during_tick_waits() {
        let mut owner = Owner::default();
        owner.queue.schedule("outer", 1, |o| {
            o.log.push("outer");
            o.queue.schedule("inner", 1, |o| o.log.push("inner"));
        });

        owner.tick();
        assert_eq!(owner.log, vec!["outer"]);
        assert_eq!(owner.queue.pending(), 1);

        owner.tick();
        assert_eq!(owner.log, vec!["outer", "inner"]);
    }

    #[test]
    fn test_nothing_is_dropped() {
        let mut owner = Owner::default();
        for _ in 0..10 {
            owner.queue.schedule("n", 2, |o| o.log.push("n"));
        }
        for _ in 0..5 {
            owner.tick();
        }
        assert_eq!(owner.log.len(), 10);
    }

    #[test]
    fn test_clock_advances_per_tick() {
        let mut owner = Owner::default();
        assert_eq!(owner.queue.now(), 0);
        owner.tick();
        owner.tick();
        assert_eq!(owner.queue.now(), 2);
    }
}
