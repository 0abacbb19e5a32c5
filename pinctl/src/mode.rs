use std::fmt;

use bit_field::BitField;

/// Electrical configuration of a pin.
///
/// The numeric codes are the `pinMode` constants of the ESP32 Arduino core, so
/// clients may send either the name (`"INPUT_PULLUP"`) or the code (`5`).
///
/// [`Mode::AllModes`] is not a real pin configuration. It is the value formed by
/// OR-ing every other code together, and older clients send it as a mode in its
/// own right. It is accepted and stored like any other mode but has no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digital input, no pull resistor.
    Input,
    /// Digital output (the input buffer stays enabled).
    Output,
    /// Pull-up resistor only.
    Pullup,
    /// Pull-down resistor only.
    Pulldown,
    /// Digital input with pull-up.
    InputPullup,
    /// Digital input with pull-down.
    InputPulldown,
    /// Open-drain only.
    OpenDrain,
    /// Open-drain output.
    OutputOpenDrain,
    /// Analog input.
    Analog,
    /// Composite of every mode code, see the type documentation.
    AllModes,
}

impl Mode {
    /// The modes that can be requested by name, in code order.
    pub const NAMED: [Mode; 9] = [
        Mode::Input,
        Mode::Output,
        Mode::Pullup,
        Mode::InputPullup,
        Mode::Pulldown,
        Mode::InputPulldown,
        Mode::OpenDrain,
        Mode::OutputOpenDrain,
        Mode::Analog,
    ];

    /// Code of [`Mode::AllModes`], the OR of every named mode's code.
    pub const ALL_MODES_CODE: u8 = 0xDF;

    /// Numeric code of this mode.
    pub fn code(self) -> u8 {
        match self {
            Mode::Input => 0x01,
            Mode::Output => 0x03,
            Mode::Pullup => 0x04,
            Mode::InputPullup => 0x05,
            Mode::Pulldown => 0x08,
            Mode::InputPulldown => 0x09,
            Mode::OpenDrain => 0x10,
            Mode::OutputOpenDrain => 0x13,
            Mode::Analog => 0xC0,
            Mode::AllModes => Self::ALL_MODES_CODE,
        }
    }

    /// Symbolic name of this mode, or `None` for [`Mode::AllModes`].
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Mode::Input => "INPUT",
            Mode::Output => "OUTPUT",
            Mode::Pullup => "PULLUP",
            Mode::Pulldown => "PULLDOWN",
            Mode::InputPullup => "INPUT_PULLUP",
            Mode::InputPulldown => "INPUT_PULLDOWN",
            Mode::OpenDrain => "OPEN_DRAIN",
            Mode::OutputOpenDrain => "OUTPUT_OPEN_DRAIN",
            Mode::Analog => "ANALOG",
            Mode::AllModes => return None,
        };
        Some(name)
    }

    /// Look up a mode by its symbolic name.
    ///
    /// Matching is exact and case-sensitive: `"input"` is not a mode.
    pub fn encode(name: &str) -> Option<Mode> {
        let mode = match name {
            "INPUT" => Mode::Input,
            "OUTPUT" => Mode::Output,
            "PULLUP" => Mode::Pullup,
            "PULLDOWN" => Mode::Pulldown,
            "INPUT_PULLUP" => Mode::InputPullup,
            "INPUT_PULLDOWN" => Mode::InputPulldown,
            "OPEN_DRAIN" => Mode::OpenDrain,
            "OUTPUT_OPEN_DRAIN" => Mode::OutputOpenDrain,
            "ANALOG" => Mode::Analog,
            _ => return None,
        };
        Some(mode)
    }

    /// Look up a mode by its numeric code.
    pub fn decode(code: u8) -> Option<Mode> {
        let mode = match code {
            0x01 => Mode::Input,
            0x03 => Mode::Output,
            0x04 => Mode::Pullup,
            0x05 => Mode::InputPullup,
            0x08 => Mode::Pulldown,
            0x09 => Mode::InputPulldown,
            0x10 => Mode::OpenDrain,
            0x13 => Mode::OutputOpenDrain,
            0xC0 => Mode::Analog,
            Self::ALL_MODES_CODE => Mode::AllModes,
            _ => return None,
        };
        Some(mode)
    }

    /// Whether the digital input buffer is enabled.
    pub fn is_input(self) -> bool {
        self.code().get_bit(0)
    }

    /// Whether the pin drives its output.
    pub fn is_output(self) -> bool {
        self.code().get_bit(1)
    }

    /// Whether the internal pull-up resistor is enabled.
    pub fn has_pullup(self) -> bool {
        self.code().get_bit(2)
    }

    /// Whether the internal pull-down resistor is enabled.
    pub fn has_pulldown(self) -> bool {
        self.code().get_bit(3)
    }

    /// Whether the output stage is open-drain.
    pub fn is_open_drain(self) -> bool {
        self.code().get_bit(4)
    }

    /// Whether the pin is routed to the ADC.
    pub fn is_analog(self) -> bool {
        self.code().get_bits(6..=7) == 0b11
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#04X}", self.code()),
        }
    }
}
