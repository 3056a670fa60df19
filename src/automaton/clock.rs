//! Animation clock

use serde::{Deserialize, Serialize};

/// Frame counter driving phase selection.
///
/// `frame` only ever increases. With a `period` the value seen by the phase
/// table wraps, so the choreography loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Clock {
    frame: u64,
    period: Option<u64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose phase time wraps every `period` frames
    pub fn looping(period: u64) -> Self {
        Self {
            frame: 0,
            period: Some(period).filter(|&p| p > 0),
        }
    }

    /// Start counting from `frame` instead of zero
    pub fn starting_at(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }

    /// Frames elapsed since the animation started
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn period(&self) -> Option<u64> {
        self.period
    }

    /// The value the phase table is evaluated at
    pub fn phase_time(&self) -> u64 {
        match self.period {
            Some(period) => self.frame % period,
            None => self.frame,
        }
    }

    pub(crate) fn tick(&mut self) {
        self.frame = self.frame.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock() {
        let mut clock = Clock::new();
        for expected in 0..5 {
            assert_eq!(clock.frame(), expected);
            assert_eq!(clock.phase_time(), expected);
            clock.tick();
        }
    }

    #[test]
    fn test_looping_clock() {
        let mut clock = Clock::looping(3).starting_at(2);
        assert_eq!(clock.phase_time(), 2);
        clock.tick();
        assert_eq!(clock.frame(), 3);
        assert_eq!(clock.phase_time(), 0);
    }

    #[test]
    fn test_zero_period_means_no_wrap() {
        let clock = Clock::looping(0).starting_at(10);
        assert_eq!(clock.period(), None);
        assert_eq!(clock.phase_time(), 10);
    }
}
