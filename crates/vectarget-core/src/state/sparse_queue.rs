//! FIFO keyed by sparse, increasing sequence numbers
//!
//! The host stamps orders from every session with one global counter, so
//! the sequence numbers landing in a single actor's queue have gaps. The
//! queue tracks its occupied span `[first, last]` explicitly:
//!
//! - empty when `first > last` (a fresh or cleared queue is `first = 0, last = -1`)
//! - `last` survives draining by `pop_front`, so the highest sequence ever
//!   queued since the last `clear` stays visible to staleness checks
//! - pushes must strictly increase `last`; entries leave in insertion order

use std::collections::BTreeMap;

use crate::errors::{Result, VectorTargetError};

/// Default bound, mirroring the host's own per-actor order queue limit
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub struct SparseSequenceQueue<T> {
    slots: BTreeMap<i64, T>,
    first: i64,
    last: i64,
    capacity: usize,
}

impl<T> Default for SparseSequenceQueue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl<T> SparseSequenceQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            first: 0,
            last: -1,
            capacity,
        }
    }

    /// Append `value` under `sequence`, or under `last + 1` when `None`
    ///
    /// Returns the sequence the value was stored under.
    ///
    /// # Errors
    ///
    /// * `QueueOverflow` - queue already holds `capacity` entries
    /// * `SequenceRegression` - `sequence` is not above `last`
    ///
    /// The queue is untouched on error.
    pub fn push(&mut self, value: T, sequence: Option<i64>) -> Result<i64> {
        if self.slots.len() >= self.capacity {
            return Err(VectorTargetError::QueueOverflow {
                capacity: self.capacity,
            });
        }

        let sequence = sequence.unwrap_or(self.last + 1);
        if sequence <= self.last {
            return Err(VectorTargetError::SequenceRegression {
                sequence,
                last: self.last,
            });
        }

        if self.is_empty() {
            self.first = sequence;
        }
        self.last = sequence;
        self.slots.insert(sequence, value);
        Ok(sequence)
    }

    /// Remove and return the oldest entry with its sequence number
    ///
    /// # Errors
    ///
    /// * `NothingQueued` - the queue is empty
    pub fn pop_front(&mut self) -> Result<(i64, T)> {
        if self.is_empty() {
            return Err(VectorTargetError::NothingQueued);
        }
        let sequence = self.first;
        let value = self
            .slots
            .remove(&sequence)
            .ok_or(VectorTargetError::NothingQueued)?;

        // Slots are sparse: the next boundary is the lowest occupied slot
        self.first = match self.slots.keys().next() {
            Some(&next) => next,
            None => self.last + 1,
        };
        Ok((sequence, value))
    }

    /// Remove and return the newest entry with its sequence number
    ///
    /// # Errors
    ///
    /// * `NothingQueued` - the queue is empty
    pub fn pop_back(&mut self) -> Result<(i64, T)> {
        if self.is_empty() {
            return Err(VectorTargetError::NothingQueued);
        }
        let sequence = self.last;
        let value = self
            .slots
            .remove(&sequence)
            .ok_or(VectorTargetError::NothingQueued)?;

        self.last = match self.slots.keys().next_back() {
            Some(&prev) => prev,
            None => self.first - 1,
        };
        Ok((sequence, value))
    }

    pub fn peek_front(&self) -> Option<(i64, &T)> {
        self.slots.iter().next().map(|(seq, v)| (*seq, v))
    }

    pub fn peek_back(&self) -> Option<(i64, &T)> {
        self.slots.iter().next_back().map(|(seq, v)| (*seq, v))
    }

    /// Drop every entry and reset to `first = 0, last = -1`
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.slots.len();
        self.slots.clear();
        self.first = 0;
        self.last = -1;
        removed
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lower boundary of the occupied span
    pub fn first(&self) -> i64 {
        self.first
    }

    /// Highest sequence pushed since the last `clear` (-1 if none)
    pub fn last(&self) -> i64 {
        self.last
    }

    /// Entries in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        self.slots.iter().map(|(seq, v)| (*seq, v))
    }
}
