use std::collections::BTreeMap;

use crate::Mode;

/// Hardware operations needed by the [`PinController`].
///
/// Implementations do not validate their arguments: pin indices have been
/// bounds-checked and modes resolved before these methods are called.
///
/// [`PinController`]: crate::PinController
pub trait Platform {
    /// Put `pin` into `mode`.
    fn set_pin_mode(&mut self, pin: usize, mode: Mode);

    /// Take one raw reading from the ADC channel attached to `pin`.
    fn analog_read(&mut self, pin: usize) -> u16;
}

impl<P: Platform + ?Sized> Platform for &mut P {
    fn set_pin_mode(&mut self, pin: usize, mode: Mode) {
        (**self).set_pin_mode(pin, mode);
    }

    fn analog_read(&mut self, pin: usize) -> u16 {
        (**self).analog_read(pin)
    }
}

/// Simple PRNG for simulated readings.
#[derive(Debug, Clone)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// Seed used when none (or zero, which xorshift cannot leave) is given.
    pub const DEFAULT_SEED: u64 = 0x2545_F491_4F6C_DD1D;

    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { Self::DEFAULT_SEED } else { seed };
        Self { state }
    }

    /// Generate the next random u64.
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Generate a value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        (self.next_u64() % u64::from(bound)) as u32
    }
}

/// Electrical state of a pin, broken out of its [`Mode`] code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinConfig {
    /// Digital input buffer enabled.
    pub input: bool,
    /// Output driver enabled.
    pub output: bool,
    /// Internal pull-up enabled.
    pub pullup: bool,
    /// Internal pull-down enabled.
    pub pulldown: bool,
    /// Output stage is open-drain.
    pub open_drain: bool,
    /// Routed to the ADC.
    pub analog: bool,
}

impl From<Mode> for PinConfig {
    fn from(mode: Mode) -> Self {
        Self {
            input: mode.is_input(),
            output: mode.is_output(),
            pullup: mode.has_pullup(),
            pulldown: mode.has_pulldown(),
            open_drain: mode.is_open_drain(),
            analog: mode.is_analog(),
        }
    }
}

/// Host stand-in for a board with 12-bit ADCs.
///
/// Applied modes are kept in order so tests can see exactly what reached the
/// "hardware", and each pin's resulting [`PinConfig`] is tracked the way a
/// pin multiplexer would hold it. Analog readings are pseudo-random and
/// reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    applied: Vec<(usize, Mode)>,
    pins: BTreeMap<usize, PinConfig>,
    rng: XorShift,
    reads: usize,
}

impl SimulatedBoard {
    /// Largest value the simulated ADC returns.
    pub const ADC_MAX: u16 = 4095;

    /// Create a board whose ADC readings are generated from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            applied: Vec::new(),
            pins: BTreeMap::new(),
            rng: XorShift::new(seed),
            reads: 0,
        }
    }

    /// Every mode change applied so far, oldest first.
    pub fn applied_modes(&self) -> &[(usize, Mode)] {
        &self.applied
    }

    /// Current electrical state of `pin`, if a mode has been applied to it.
    pub fn pin_config(&self, pin: usize) -> Option<PinConfig> {
        self.pins.get(&pin).copied()
    }

    /// Total number of analog readings taken.
    pub fn analog_reads(&self) -> usize {
        self.reads
    }
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self::new(XorShift::DEFAULT_SEED)
    }
}

impl Platform for SimulatedBoard {
    fn set_pin_mode(&mut self, pin: usize, mode: Mode) {
        self.applied.push((pin, mode));
        self.pins.insert(pin, PinConfig::from(mode));
    }

    fn analog_read(&mut self, _pin: usize) -> u16 {
        self.reads += 1;
        self.rng.below(u32::from(Self::ADC_MAX) + 1) as u16
    }
}
