//! The countdown timers of the chip.

/// Represents a timer inside of the chip
/// infrastructure, it will count down to
/// zero from what ever number it was given.
///
/// The timer is stepped by the chipset once per cycle, so the speed it counts down at is
/// the speed the chipset is driven at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// will store the value of the timer
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Checks if the timer is still counting down.
    pub fn is_running(&self) -> bool {
        self.value > 0
    }

    /// Moves the timer one step towards zero, stopping there.
    pub fn tick(&mut self) {
        if self.value > 0 {
            self.value -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::timer;

    #[test]
    fn test_timer() {
        let mut timer = Timer::new(timer::START);
        assert!(timer.is_running());

        for _ in 0..timer::START {
            timer.tick();
        }
        assert_eq!(timer.get_value(), 0);
        assert!(!timer.is_running());

        // has to stay at zero
        timer.tick();
        assert_eq!(timer.get_value(), 0);
    }

    #[test]
    fn test_set_value() {
        let mut timer = Timer::new(0);
        timer.set_value(2);
        timer.tick();
        assert_eq!(timer.get_value(), 1);
    }
}
