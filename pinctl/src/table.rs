use crate::{Error, Mode};

/// Number of pins tracked by the [`PinModeTable`].
pub const MAX_PINS: usize = 256;

/// Last mode configured for each pin.
///
/// Entries start out unset and are only written after a mode has been applied
/// to the hardware. Nothing is persisted; a restart clears the table.
#[derive(Debug, Clone)]
pub struct PinModeTable {
    modes: [Option<Mode>; MAX_PINS],
}

impl PinModeTable {
    /// Create a table with every pin unset.
    pub fn new() -> Self {
        Self {
            modes: [None; MAX_PINS],
        }
    }

    /// Get the mode last recorded for `pin`, or `None` if it was never set.
    pub fn get(&self, pin: usize) -> Result<Option<Mode>, Error> {
        self.modes
            .get(pin)
            .copied()
            .ok_or(Error::PinOutOfRange(pin))
    }

    /// Record `mode` for `pin`, replacing any earlier entry.
    pub fn set(&mut self, pin: usize, mode: Mode) -> Result<(), Error> {
        let slot = self.modes.get_mut(pin).ok_or(Error::PinOutOfRange(pin))?;
        *slot = Some(mode);
        Ok(())
    }

    /// Iterate over the pins that have a recorded mode, in pin order.
    pub fn configured(&self) -> impl Iterator<Item = (usize, Mode)> + '_ {
        self.modes
            .iter()
            .enumerate()
            .filter_map(|(pin, mode)| mode.map(|mode| (pin, mode)))
    }
}

impl Default for PinModeTable {
    fn default() -> Self {
        Self::new()
    }
}
