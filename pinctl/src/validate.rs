//! Parameter checks run before a handler does anything.

use crate::{Error, MAX_PINS, Malformed};

/// Return `value` if it is present and non-empty.
pub fn require_non_empty<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingParameter { name }),
    }
}

/// Parse `raw` as an integer in `min..=max`.
///
/// Zero is refused even when `min` is zero. Surrounding whitespace is ignored;
/// anything else that is not part of a decimal integer makes the value
/// malformed.
pub fn require_integer_in_range(
    name: &'static str,
    raw: &str,
    min: usize,
    max: usize,
) -> Result<usize, Error> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::malformed(name, raw, Malformed::NotANumber))?;
    if value == 0 {
        return Err(Error::malformed(name, raw, Malformed::Zero));
    }
    usize::try_from(value)
        .ok()
        .filter(|value| (min..=max).contains(value))
        .ok_or_else(|| Error::malformed(name, raw, Malformed::OutOfRange { min, max }))
}

/// Require a non-empty parameter that is an integer in `min..=max`.
pub fn require_integer(
    name: &'static str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Result<usize, Error> {
    let raw = require_non_empty(name, value)?;
    require_integer_in_range(name, raw, min, max)
}

/// Require a `pin` parameter addressing the pin mode table.
pub fn require_pin(value: Option<&str>) -> Result<usize, Error> {
    require_integer("pin", value, 1, MAX_PINS - 1)
}
