//! Deadline handle used for the countdown and the delete grace period.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    deadline: Instant,
    period: Option<Duration>,
}

impl Timer {
    pub fn once(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            period: None,
        }
    }

    pub fn repeating(now: Instant, period: Duration) -> Self {
        Self {
            deadline: now + period,
            period: Some(period),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Move a repeating timer to its next deadline. One-shot timers stay put.
    pub fn rearm(&mut self) {
        if let Some(period) = self.period {
            self.deadline += period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_timer_rearms_by_period() {
        let start = Instant::now();
        let mut timer = Timer::repeating(start, Duration::from_secs(1));
        assert!(!timer.is_due(start));
        assert!(timer.is_due(start + Duration::from_secs(1)));

        timer.rearm();
        assert_eq!(timer.deadline(), start + Duration::from_secs(2));
    }

    #[test]
    fn test_one_shot_does_not_rearm() {
        let start = Instant::now();
        let mut timer = Timer::once(start, Duration::from_secs(3));
        timer.rearm();
        assert_eq!(timer.deadline(), start + Duration::from_secs(3));
    }
}
