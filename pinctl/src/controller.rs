use log::debug;

use crate::{Error, Mode, PinModeTable, Platform};

/// Kind of sampling requested on the data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Raw ADC readings.
    Analog,
    /// Digital levels. Not implemented.
    Digital,
}

/// Resolve a mode specifier as sent by a client.
///
/// A specifier that parses as a number is tried as a numeric code first, then
/// the specifier is matched against the symbolic names.
pub fn resolve_mode(specifier: &str) -> Option<Mode> {
    specifier
        .parse::<u8>()
        .ok()
        .and_then(Mode::decode)
        .or_else(|| Mode::encode(specifier))
}

/// Applies pin modes to the hardware and remembers them.
///
/// The controller owns the [`PinModeTable`]; it is the only thing that writes
/// to it, and only after the platform call has been made.
#[derive(Debug)]
pub struct PinController<P> {
    platform: P,
    table: PinModeTable,
}

impl<P: Platform> PinController<P> {
    /// Create a controller with an empty mode table.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            table: PinModeTable::new(),
        }
    }

    /// Put `pin` into the mode named by `specifier` and record it.
    ///
    /// On failure neither the hardware nor the table is touched.
    pub fn configure_pin(&mut self, pin: usize, specifier: &str) -> Result<Mode, Error> {
        let mode = resolve_mode(specifier).ok_or_else(|| Error::InvalidMode(specifier.into()))?;
        // Bounds check before the hardware call.
        self.table.get(pin)?;
        self.platform.set_pin_mode(pin, mode);
        self.table.set(pin, mode)?;
        debug!("pin {pin} set to {mode} ({:#04X})", mode.code());
        Ok(mode)
    }

    /// Mode last configured on `pin`, without reading the hardware.
    pub fn query_pin_mode(&self, pin: usize) -> Result<Option<Mode>, Error> {
        self.table.get(pin)
    }

    /// Take `count` consecutive ADC readings from `pin`, in sampling order.
    pub fn sample_analog(&mut self, pin: usize, count: usize) -> Result<Vec<u16>, Error> {
        self.table.get(pin)?;
        let samples: Vec<u16> = (0..count)
            .map(|_| self.platform.analog_read(pin))
            .collect();
        debug!("took {count} analog samples from pin {pin}");
        Ok(samples)
    }

    /// Take `count` samples of the given kind from `pin`.
    ///
    /// Digital sampling always fails with [`Error::UnsupportedOperation`] and
    /// takes no readings.
    pub fn sample(&mut self, pin: usize, kind: SampleKind, count: usize) -> Result<Vec<u16>, Error> {
        match kind {
            SampleKind::Analog => self.sample_analog(pin, count),
            SampleKind::Digital => Err(Error::UnsupportedOperation("digital sampling")),
        }
    }

    /// The recorded pin modes.
    pub fn table(&self) -> &PinModeTable {
        &self.table
    }

    /// The underlying platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }
}
