//! Digital output used for the activity indicator.
//!
//! The dispatcher drives any [`embedded_hal::digital::OutputPin`] high while it
//! renders a page and low afterwards. [`SimulatedLed`] stands in for a board LED
//! on the host.

use std::convert::Infallible;

/// GPIO pin level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicLevel {
    /// Driven high.
    High,
    /// Driven low.
    Low,
}

impl LogicLevel {
    /// Returns `true` if the level is [`LogicLevel::High`].
    pub fn is_high(self) -> bool {
        matches!(self, LogicLevel::High)
    }

    /// Returns `true` if the level is [`LogicLevel::Low`].
    pub fn is_low(self) -> bool {
        matches!(self, LogicLevel::Low)
    }
}

/// An LED on a simulated board.
///
/// Tracks the current level and how many times it has been switched on, so that
/// tests can check the indicator was pulsed.
#[derive(Debug)]
pub struct SimulatedLed {
    pin: usize,
    level: LogicLevel,
    pulses: usize,
}

impl SimulatedLed {
    /// Create an LED on `pin`, initially off.
    pub fn new(pin: usize) -> Self {
        Self {
            pin,
            level: LogicLevel::Low,
            pulses: 0,
        }
    }

    /// Pin the LED is attached to.
    pub fn pin(&self) -> usize {
        self.pin
    }

    /// Current output level.
    pub fn level(&self) -> LogicLevel {
        self.level
    }

    /// Number of low-to-high transitions so far.
    pub fn pulses(&self) -> usize {
        self.pulses
    }

    fn set_level(&mut self, level: LogicLevel) {
        if self.level.is_low() && level.is_high() {
            self.pulses += 1;
        }
        self.level = level;
    }
}

impl embedded_hal::digital::ErrorType for SimulatedLed {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for SimulatedLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::High);
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for SimulatedLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.is_low())
    }
}
