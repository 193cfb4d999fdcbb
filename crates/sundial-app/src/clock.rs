//! Simulated wall clock advanced by a fixed step every rendered tick.

use chrono::{DateTime, TimeDelta, Utc};

/// Errors raised by the simulated clock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The step is zero or negative; simulated time must move forward.
    #[error("clock step must be positive, got {0}")]
    NonPositiveStep(TimeDelta),

    /// Adding the step left chrono's representable range.
    #[error("simulated clock overflowed advancing {current} by {step}")]
    Overflow {
        /// Instant before the failed advance.
        current: DateTime<Utc>,
        /// The step that could not be added.
        step: TimeDelta,
    },
}

/// Strictly increasing simulated time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedClock {
    current: DateTime<Utc>,
    step: TimeDelta,
    ticks: u64,
}

impl SimulatedClock {
    /// Start at `start`, adding `step` per [`advance`](Self::advance).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NonPositiveStep`] if `step <= 0`.
    pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Result<Self, ClockError> {
        if step <= TimeDelta::zero() {
            return Err(ClockError::NonPositiveStep(step));
        }
        Ok(Self {
            current: start,
            step,
            ticks: 0,
        })
    }

    /// Step given in whole minutes.
    pub fn from_minutes(start: DateTime<Utc>, minutes: u32) -> Result<Self, ClockError> {
        Self::new(start, TimeDelta::minutes(i64::from(minutes)))
    }

    /// Current simulated instant.
    pub fn current(&self) -> DateTime<Utc> {
        self.current
    }

    /// Time added per advance.
    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// Use `step` for subsequent advances.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NonPositiveStep`] and keeps the old step if
    /// `step <= 0`.
    pub fn set_step(&mut self, step: TimeDelta) -> Result<(), ClockError> {
        if step <= TimeDelta::zero() {
            return Err(ClockError::NonPositiveStep(step));
        }
        self.step = step;
        Ok(())
    }

    /// Number of successful advances.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Move forward by one step and return the new instant.
    ///
    /// The clock is unchanged when the add overflows.
    pub fn advance(&mut self) -> Result<DateTime<Utc>, ClockError> {
        let next = self
            .current
            .checked_add_signed(self.step)
            .ok_or(ClockError::Overflow {
                current: self.current,
                step: self.step,
            })?;
        self.current = next;
        self.ticks += 1;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_advance_adds_step() {
        let mut clock = SimulatedClock::from_minutes(start(), 10).unwrap();
        let t1 = clock.advance().unwrap();
        let t2 = clock.advance().unwrap();
        assert_eq!(t1, start() + TimeDelta::minutes(10));
        assert_eq!(t2, start() + TimeDelta::minutes(20));
        assert_eq!(clock.current(), t2);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_one_day_of_ticks() {
        let mut clock = SimulatedClock::from_minutes(start(), 10).unwrap();
        for _ in 0..144 {
            clock.advance().unwrap();
        }
        assert_eq!(clock.current(), start() + TimeDelta::days(1));
    }

    #[test]
    fn test_time_strictly_increases() {
        let mut clock = SimulatedClock::from_minutes(start(), 1).unwrap();
        let mut previous = clock.current();
        for _ in 0..100 {
            let now = clock.advance().unwrap();
            assert!(now > previous);
            previous = now;
        }
    }

    #[test]
    fn test_rejects_non_positive_step() {
        assert_eq!(
            SimulatedClock::new(start(), TimeDelta::zero()),
            Err(ClockError::NonPositiveStep(TimeDelta::zero()))
        );
        assert!(SimulatedClock::new(start(), TimeDelta::minutes(-5)).is_err());
        assert!(SimulatedClock::from_minutes(start(), 0).is_err());
    }

    #[test]
    fn test_set_step_changes_next_advance() {
        let mut clock = SimulatedClock::from_minutes(start(), 10).unwrap();
        clock.advance().unwrap();
        assert!(clock.set_step(TimeDelta::minutes(-1)).is_err());
        clock.set_step(TimeDelta::hours(1)).unwrap();
        assert_eq!(
            clock.advance().unwrap(),
            start() + TimeDelta::minutes(70)
        );
    }

    #[test]
    fn test_overflow_leaves_clock_unchanged() {
        let mut clock = SimulatedClock::new(DateTime::<Utc>::MAX_UTC, TimeDelta::minutes(1)).unwrap();
        let err = clock.advance().unwrap_err();
        assert!(matches!(err, ClockError::Overflow { .. }));
        assert_eq!(clock.current(), DateTime::<Utc>::MAX_UTC);
        assert_eq!(clock.ticks(), 0);
    }
}
