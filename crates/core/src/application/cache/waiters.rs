// Waiter registry - parked consumers and their handoff slots

use crate::domain::{Metajob, Priority, Threshold};
use std::sync::{Arc, Condvar, Mutex};

/// What a parked consumer eventually observes in its slot
#[derive(Debug)]
enum Handoff {
    Pending,
    Delivered(Metajob),
    Stopped,
}

/// One parked consumer
///
/// Lock order: the cache lock may be held while taking a slot lock, never
/// the reverse.
#[derive(Debug)]
pub(crate) struct Waiter {
    threshold: Threshold,
    seq: u64,
    slot: Mutex<Handoff>,
    signal: Condvar,
}

impl Waiter {
    fn new(threshold: Threshold, seq: u64) -> Self {
        Self {
            threshold,
            seq,
            slot: Mutex::new(Handoff::Pending),
            signal: Condvar::new(),
        }
    }

    pub(crate) fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Hand a job to this consumer and wake it
    ///
    /// Only called on a waiter already detached from the registry, so the
    /// slot is still pending.
    pub(crate) fn deliver(&self, job: Metajob) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Handoff::Delivered(job);
        self.signal.notify_one();
    }

    /// Wake this consumer with the shutdown sentinel
    pub(crate) fn interrupt(&self) {
        let mut slot = self.slot.lock().unwrap();
        if matches!(*slot, Handoff::Pending) {
            *slot = Handoff::Stopped;
        }
        self.signal.notify_one();
    }

    /// Park until a job arrives or the cache stops
    pub(crate) fn wait_for_handoff(&self) -> Option<Metajob> {
        let mut slot = self.slot.lock().unwrap();
        while matches!(*slot, Handoff::Pending) {
            slot = self.signal.wait(slot).unwrap();
        }
        match std::mem::replace(&mut *slot, Handoff::Stopped) {
            Handoff::Delivered(job) => Some(job),
            _ => None,
        }
    }
}

/// Parked consumers ordered ascending by threshold, `Any` last, ties by
/// arrival
#[derive(Debug, Default)]
pub(crate) struct WaiterRegistry {
    waiters: Vec<Arc<Waiter>>,
    next_seq: u64,
}

impl WaiterRegistry {
    pub(crate) fn new() -> Self {
        Self {
            waiters: Vec::new(),
            next_seq: 0,
        }
    }

    /// Park a new consumer with the given threshold
    pub(crate) fn register(&mut self, threshold: Threshold) -> Arc<Waiter> {
        let waiter = Arc::new(Waiter::new(threshold, self.next_seq));
        self.next_seq += 1;

        let at = self
            .waiters
            .partition_point(|held| (held.threshold, held.seq) <= (threshold, waiter.seq));
        self.waiters.insert(at, Arc::clone(&waiter));
        waiter
    }

    /// Detach the waiter that should receive a job of this priority
    ///
    /// Picks the highest threshold still strictly dominating the priority,
    /// reserving low-importance jobs for the consumers that asked for them;
    /// ties go to the earliest arrival. `None` if nobody admits the job.
    pub(crate) fn select_for(&mut self, priority: Priority) -> Option<Arc<Waiter>> {
        let last = self.waiters.last()?;
        if !last.threshold.admits(priority) {
            return None;
        }

        let winning = last.threshold;
        let at = self.waiters.partition_point(|held| held.threshold < winning);
        Some(self.waiters.remove(at))
    }

    /// Detach every waiter (shutdown path)
    pub(crate) fn drain_all(&mut self) -> Vec<Arc<Waiter>> {
        std::mem::take(&mut self.waiters)
    }

    pub(crate) fn len(&self) -> usize {
        self.waiters.len()
    }

    /// Parked consumers that accept any priority
    pub(crate) fn any_count(&self) -> usize {
        self.waiters
            .iter()
            .rev()
            .take_while(|waiter| waiter.threshold == Threshold::Any)
            .count()
    }
}
