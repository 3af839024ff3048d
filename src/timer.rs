//! One-shot deadline timers polled by the event loop.
//!
//! A `OneShot` is owned by whichever screen armed it. It fires at most once;
//! dropping it before the deadline means it never fires, which is how leaving
//! a screen tears down its pending delay.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OneShot {
    deadline: Instant,
    state: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Armed,
    Fired,
}

impl OneShot {
    /// Arm a timer that fires `delay` after `now`.
    pub fn start(now: Instant, delay: Duration) -> Self {
        OneShot {
            deadline: now + delay,
            state: TimerState::Armed,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state == TimerState::Armed
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state == TimerState::Armed && now >= self.deadline {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    /// Time left before the deadline, or `None` once fired.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Armed => Some(self.deadline.saturating_duration_since(now)),
            TimerState::Fired => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = OneShot::start(t0, Duration::from_millis(2000));
        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(1999)));
        assert!(timer.poll(t0 + Duration::from_millis(2000)));
        assert!(!timer.poll(t0 + Duration::from_millis(5000)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_fired_timer_has_no_remaining() {
        let t0 = Instant::now();
        let mut timer = OneShot::start(t0, Duration::from_millis(10));
        assert!(timer.poll(t0 + Duration::from_secs(1)));
        assert_eq!(timer.remaining(t0), None);
    }

    #[test]
    fn test_remaining_counts_down() {
        let t0 = Instant::now();
        let timer = OneShot::start(t0, Duration::from_millis(1500));
        assert_eq!(timer.remaining(t0), Some(Duration::from_millis(1500)));
        assert_eq!(
            timer.remaining(t0 + Duration::from_millis(500)),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(timer.remaining(t0 + Duration::from_secs(3)), Some(Duration::ZERO));
    }

    #[test]
    fn test_zero_delay_fires_immediately() {
        let t0 = Instant::now();
        let mut timer = OneShot::start(t0, Duration::ZERO);
        assert!(timer.poll(t0));
    }
}
