use std::fmt;

use log::trace;

use crate::store::breakpoint::Breakpoint;
use crate::store::rangeerror::RangeError;
use crate::store::stepfunction::StepFunction;

// ─────────────────────────────────────────────
// SegmentStore
// ─────────────────────────────────────────────

/// Sparse representation of a piecewise-constant intensity function over the
/// whole integer line. The function is `0` everywhere until a breakpoint sets
/// a new value, which holds until the next breakpoint.
///
/// The breakpoint vector is kept minimal at all times:
/// - starts are strictly increasing, no duplicates,
/// - no two consecutive breakpoints carry the same value,
/// - the first breakpoint never restates the implicit leading `0`.
///
/// `add` and `set` rewrite every breakpoint inside the edited range but only
/// touch a bounded number of breakpoints at the two boundaries, located with
/// a binary search.
#[derive(Clone, Debug)]
pub struct SegmentStore {
    points: Vec<Breakpoint>
}

impl SegmentStore {
    pub fn new() -> SegmentStore {
        SegmentStore { points: Vec::new() }
    }

    /// Returns an independent copy of the breakpoint sequence.
    pub fn snapshot(&self) -> Vec<Breakpoint> {
        self.points.clone()
    }

    /// Replaces the whole breakpoint sequence. The caller is trusted to hand
    /// in a sequence that is already sorted and duplicate-free.
    pub fn restore(&mut self, points: Vec<Breakpoint>) {
        self.points = points;
        debug_assert!(self.is_normalized());
    }

    /// Formats the breakpoint sequence as `"[start,value], [start,value]"`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Adds `amount` to the intensity of every `x` in `[from, to)`.
    ///
    /// Fails without mutating when the range is empty or `amount` is `0`.
    pub fn add(&mut self, from: i64, to: i64, amount: i64) -> Result<(), RangeError> {
        if from >= to {
            return Err(RangeError::EmptyRange { from, to });
        }
        if amount == 0 {
            return Err(RangeError::ZeroAmount);
        }
        trace!("add {} on [{}, {})", amount, from, to);
        let mut i = self.head_for_add(from, amount);
        while i < self.points.len() && self.points[i].start() < to {
            let raised = self.points[i].value() + amount;
            self.points[i] = Breakpoint::new(self.points[i].start(), raised);
            if self.is_redundant(i) {
                // Only the first breakpoint of the walk can collapse into its
                // left context; later ones kept distinct values before the
                // edit and all receive the same amount.
                self.points.remove(i);
            } else {
                i += 1;
            }
        }
        self.tail_for_add(to, amount, i);
        debug_assert!(self.is_normalized());
        Ok(())
    }

    /// Overwrites the intensity of every `x` in `[from, to)` with `amount`.
    /// `amount == 0` is allowed and zeroes the range.
    ///
    /// Fails without mutating when the range is empty.
    pub fn set(&mut self, from: i64, to: i64, amount: i64) -> Result<(), RangeError> {
        if from >= to {
            return Err(RangeError::EmptyRange { from, to });
        }
        trace!("set [{}, {}) to {}", from, to, amount);
        let (mut i, mut last_value) = self.head_for_set(from, amount);
        while i < self.points.len() && self.points[i].start() < to {
            last_value = self.points[i].value();
            self.points.remove(i);
        }
        self.tail_for_set(to, amount, i, last_value);
        debug_assert!(self.is_normalized());
        Ok(())
    }

    // ─────────────────────────────────────────────
    // Head and tail handlers
    // ─────────────────────────────────────────────

    /// Resolves the `from` boundary of an additive update and returns the
    /// index where the in-range walk starts. A breakpoint sitting exactly at
    /// `from` is left to the walk, which adds `amount` to it in place.
    fn head_for_add(&mut self, from: i64, amount: i64) -> usize {
        match self.floor_index(from) {
            None => {
                self.points.insert(0, Breakpoint::new(from, amount));
                1
            },
            Some(index) if self.points[index].start() == from => index,
            Some(index) => {
                let raised = self.points[index].value() + amount;
                self.points.insert(index + 1, Breakpoint::new(from, raised));
                index + 2
            }
        }
    }

    /// Resolves the `to` boundary of an additive update. `i` is the index
    /// just past the last breakpoint rewritten by the walk.
    ///
    /// A breakpoint already sitting at `to` survives unless it now repeats
    /// the value in effect to its left. Otherwise the value that held just
    /// below `to` before the edit is frozen into a new breakpoint: the walk
    /// added `amount` to `points[i - 1]`, so subtracting it recovers the
    /// pre-edit value (also after a head merge, which fires on equality and
    /// leaves an untouched predecessor with the merged breakpoint's value).
    fn tail_for_add(&mut self, to: i64, amount: i64, i: usize) {
        if i < self.points.len() && self.points[i].start() == to {
            if self.is_redundant(i) {
                trace!("dropping redundant tail breakpoint at {}", to);
                self.points.remove(i);
            }
        } else {
            let prior = match i.checked_sub(1) {
                Some(previous) => self.points[previous].value() - amount,
                None => -amount
            };
            self.points.insert(i, Breakpoint::new(to, prior));
        }
    }

    /// Resolves the `from` boundary of an overwrite. Returns the index where
    /// the deletion walk starts together with the value that held at `from`
    /// before the edit (the walk refines it to the value just below `to`).
    fn head_for_set(&mut self, from: i64, amount: i64) -> (usize, i64) {
        match self.floor_index(from) {
            None => {
                if amount == 0 {
                    // The implicit leading zero already represents the range.
                    (0, 0)
                } else {
                    self.points.insert(0, Breakpoint::new(from, amount));
                    (1, 0)
                }
            },
            Some(index) if self.points[index].start() == from => {
                let previous = self.points[index].value();
                self.points[index] = Breakpoint::new(from, amount);
                if self.is_redundant(index) {
                    self.points.remove(index);
                    (index, previous)
                } else {
                    (index + 1, previous)
                }
            },
            Some(index) => {
                let floor_value = self.points[index].value();
                if floor_value == amount {
                    (index + 1, floor_value)
                } else {
                    self.points.insert(index + 1, Breakpoint::new(from, amount));
                    (index + 2, floor_value)
                }
            }
        }
    }

    /// Resolves the `to` boundary of an overwrite. `last_value` is the value
    /// that held just below `to` before the edit; it is frozen at `to` unless
    /// a breakpoint already records the post-range value or the frozen value
    /// would only repeat `amount`.
    fn tail_for_set(&mut self, to: i64, amount: i64, i: usize, last_value: i64) {
        if i < self.points.len() && self.points[i].start() == to {
            if self.points[i].value() == amount {
                trace!("dropping tail breakpoint at {} equal to the written value", to);
                self.points.remove(i);
            }
        } else if last_value != amount {
            self.points.insert(i, Breakpoint::new(to, last_value));
        }
    }

    // ─────────────────────────────────────────────
    // Lookup and invariant helpers
    // ─────────────────────────────────────────────

    /// Index of the rightmost breakpoint with `start <= target`, or `None`
    /// when every breakpoint lies beyond `target`.
    fn floor_index(&self, target: i64) -> Option<usize> {
        self.points
            .partition_point(|point| point.start() <= target)
            .checked_sub(1)
    }

    /// A breakpoint is redundant when it repeats the value already in effect
    /// to its left, counting the implicit `0` in front of the sequence.
    fn is_redundant(&self, index: usize) -> bool {
        let value = self.points[index].value();
        match index.checked_sub(1) {
            None => value == 0,
            Some(previous) => value == self.points[previous].value()
        }
    }

    fn is_normalized(&self) -> bool {
        if self.points.first().is_some_and(|first| first.value() == 0) {
            return false;
        }
        self.points.windows(2).all(|pair| {
            pair[0].start() < pair[1].start() && pair[0].value() != pair[1].value()
        })
    }
}

impl StepFunction for SegmentStore {
    fn value_at(&self, x: i64) -> i64 {
        self.floor_index(x)
            .map_or(0, |index| self.points[index].value())
    }
}

impl fmt::Display for SegmentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, point) in self.points.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{},{}]", point.start(), point.value())?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
