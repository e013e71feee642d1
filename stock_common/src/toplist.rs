//! Bounded, comparator-ordered ranked list.
//!
//! `TopList` keeps the best `capacity` values seen so far under a caller-supplied
//! strict "ranks ahead of" ordering, online and in one pass. Values are stored
//! best-first in a `Vec` that never grows past `capacity`; each `add` is a linear
//! scan, which is fine for the small display counts this is used with.
//!
//! Ties: a value that is not strictly better than an element already held is
//! placed after it, so among equally ranked values the first one seen stays ahead.

/// Bounded list of the best values under `better_than`.
///
/// `better_than(a, b)` must be a strict ordering: irreflexive and transitive,
/// returning `true` when `a` ranks strictly ahead of `b`.
pub struct TopList<T, F = fn(&T, &T) -> bool> {
    items: Vec<T>,
    capacity: usize,
    better_than: F,
}

impl<T, F> TopList<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Create an empty list holding at most `capacity` values.
    pub fn new(capacity: usize, better_than: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            better_than,
        }
    }

    /// Offer `value` to the list. Returns whether it was retained.
    ///
    /// A full list only accepts a value strictly better than its current worst,
    /// which is then evicted. A rejected value leaves the list untouched.
    pub fn add(&mut self, value: T) -> bool {
        if self.items.len() >= self.capacity {
            match self.items.last() {
                Some(worst) if (self.better_than)(&value, worst) => {
                    self.items.pop();
                }
                // capacity 0 has no tail to beat
                _ => return false,
            }
        }

        let at = self.position_for(&value);
        self.items.insert(at, value);
        true
    }

    /// Index at which `value` lands: the head if it beats the current best,
    /// otherwise right after the last element it does not strictly beat.
    fn position_for(&self, value: &T) -> usize {
        match self.items.first() {
            None => 0,
            Some(best) if (self.better_than)(value, best) => 0,
            // the head is not beaten, so the scan stops at index 1 at the latest
            Some(_) => {
                let mut at = self.items.len();
                while (self.better_than)(value, &self.items[at - 1]) {
                    at -= 1;
                }
                at
            }
        }
    }

    /// Held values, best first.
    pub fn elements(&self) -> &[T] {
        &self.items
    }

    /// Consume the list, returning its values best first.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no value is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of values ever held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
