//! Explicit fetch state for user-triggered lookups.
//!
//! Each started fetch gets a fresh [`Generation`]. Results carrying an older
//! generation are discarded, so the most recently started fetch always wins.

use crate::resolver::Result;

/// Monotonic token identifying one started fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Lifecycle of a single lookup
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Fetching(Generation),
    Resolved(T),
    Failed(String),
}

/// Tracks the latest fetch and applies results last-write-wins
#[derive(Debug)]
pub struct FetchTracker<T> {
    state: FetchState<T>,
    latest: u64,
}

impl<T> FetchTracker<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            latest: 0,
        }
    }

    /// Start a new fetch, superseding any in flight
    pub fn begin(&mut self) -> Generation {
        self.latest += 1;
        let generation = Generation(self.latest);
        self.state = FetchState::Fetching(generation);
        generation
    }

    /// Start and immediately resolve a fetch that needs no I/O
    pub fn resolve_now(&mut self, value: T) -> Generation {
        let generation = self.begin();
        self.state = FetchState::Resolved(value);
        generation
    }

    /// Apply a result; returns `false` when it belongs to a superseded fetch
    pub fn complete(&mut self, generation: Generation, result: Result<T>) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        self.state = match result {
            Ok(value) => FetchState::Resolved(value),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        true
    }

    /// Drop back to idle; anything in flight becomes stale
    pub fn reset(&mut self) {
        self.latest += 1;
        self.state = FetchState::Idle;
    }

    #[must_use]
    pub const fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Resolved value, if any
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            FetchState::Resolved(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for FetchTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverError;

    #[test]
    fn test_stale_result_is_discarded() {
        let mut tracker = FetchTracker::<u32>::new();

        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.complete(first, Ok(1)));
        assert!(matches!(tracker.state(), FetchState::Fetching(_)));

        assert!(tracker.complete(second, Ok(2)));
        assert_eq!(tracker.value(), Some(&2));

        // Late arrival of the first fetch must not overwrite
        assert!(!tracker.complete(first, Ok(1)));
        assert_eq!(tracker.value(), Some(&2));
    }

    #[test]
    fn test_failure_state() {
        let mut tracker = FetchTracker::<u32>::new();
        let generation = tracker.begin();

        tracker.complete(generation, Err(ResolverError::Parse("bad".to_string())));

        assert!(matches!(tracker.state(), FetchState::Failed(_)));
        assert!(tracker.value().is_none());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut tracker = FetchTracker::<u32>::new();
        let generation = tracker.begin();

        tracker.reset();

        assert!(!tracker.complete(generation, Ok(5)));
        assert_eq!(tracker.state(), &FetchState::Idle);
    }

    #[test]
    fn test_generations_increase() {
        let mut tracker = FetchTracker::<()>::new();
        let a = tracker.begin();
        let b = tracker.resolve_now(());
        assert!(b > a);
        assert_eq!(b.value(), 2);
    }
}
