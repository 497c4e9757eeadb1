//! Pacing gate for outbound calls.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ConfigError;

/// Spaces call starts at least `interval` apart across all threads.
///
/// Callers pass the gate one at a time. The lock is held across the wait, and
/// the next slot is measured from the instant the previous caller was actually
/// released, so oversleeping never lets two starts land closer than `interval`.
/// Any window of `n * interval` therefore holds at most `n` starts.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum spacing between two call starts.
    interval: Duration,
    /// Earliest instant the next caller may be released (None before the first call).
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with a fixed spacing between call starts.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Create a limiter allowing `requests_per_second` call starts per second.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is not positive and finite.
    pub fn per_second(requests_per_second: f64) -> Result<Self, ConfigError> {
        if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
            return Err(ConfigError::RequestRate(requests_per_second));
        }
        let interval = Duration::try_from_secs_f64(requests_per_second.recip())
            .map_err(|_| ConfigError::RequestRate(requests_per_second))?;
        Ok(Self::new(interval))
    }

    /// Spacing between call starts.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the caller may start a call, returning its release instant.
    pub fn acquire(&self) -> Instant {
        let mut next = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = *next {
            let now = Instant::now();
            if slot > now {
                thread::sleep(slot - now);
            }
        }
        let released = Instant::now();
        *next = Some(released + self.interval);
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_second_interval() {
        let limiter = RateLimiter::per_second(4.0).unwrap();
        assert_eq!(limiter.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_per_second_rejects_non_positive() {
        assert!(RateLimiter::per_second(0.0).is_err());
        assert!(RateLimiter::per_second(-2.0).is_err());
        assert!(RateLimiter::per_second(f64::NAN).is_err());
    }

    #[test]
    fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let start = Instant::now();
        limiter.acquire();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_slots_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(10));
        let slots: Vec<_> = (0..5).map(|_| limiter.acquire()).collect();
        for pair in slots.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(10));
        }
    }

    #[test]
    fn test_concurrent_starts_are_spaced() {
        let interval = Duration::from_millis(5);
        let limiter = RateLimiter::new(interval);
        let mut starts: Vec<Instant> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..3)
                            .map(|_| {
                                limiter.acquire();
                                Instant::now()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        starts.sort();
        assert_eq!(starts.len(), 24);
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= interval, "gap {:?}", pair[1] - pair[0]);
        }
    }
}
