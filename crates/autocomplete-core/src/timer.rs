//! Timer queue for the autocomplete controller.
//!
//! Timers do not read the wall clock. Every operation takes the current
//! instant from the caller, which is usually a [`Clock`](crate::Clock).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

#[derive(Debug)]
struct TimerData {
    next_fire: Instant,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages a set of one-shot timers.
#[derive(Debug)]
pub struct TimerManager {
    timers: SlotMap<TimerId, TimerData>,
    /// Pending fires. Entries for stopped timers are skipped lazily.
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires `duration` after `now`.
    pub fn start_one_shot(&mut self, duration: Duration, now: Instant) -> TimerId {
        let next_fire = now + duration;
        let id = self.timers.insert(TimerData { next_fire });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: next_fire,
        });
        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a timer.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// The instant the given timer will next fire, if it is active.
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.timers.get(id).map(|t| t.next_fire)
    }

    /// Process all timers that are due at `now`.
    ///
    /// Returns the ids of the timers that fired, earliest first.
    #[tracing::instrument(skip(self), target = "autocomplete_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            // Stopped timers leave their heap entry behind.
            if self.timers.remove(entry.id).is_none() {
                continue;
            }

            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push(entry.id);
        }

        fired
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}
