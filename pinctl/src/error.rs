use std::fmt;

/// Problems handling a pin-control request.
///
/// Every variant is turned into an HTTP response by the [`Dispatcher`]; none of
/// them is fatal to the server.
///
/// [`Dispatcher`]: crate::Dispatcher
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required parameter was absent or empty.
    #[error("{name} is empty")]
    MissingParameter {
        /// Name of the request parameter.
        name: &'static str,
    },
    /// A parameter was present but its value could not be used.
    #[error("{name}= {value:?}: {reason}")]
    MalformedParameter {
        /// Name of the request parameter.
        ///
        /// For a rejected mode change this is `pin;val`, with the value holding
        /// both parameters joined the same way.
        name: &'static str,
        /// The value as it was received.
        value: String,
        /// Why the value was rejected.
        reason: Malformed,
    },
    /// The mode specifier is neither a known name nor a known numeric code.
    #[error("unrecognised mode {0:?}")]
    InvalidMode(String),
    /// The pin index does not fit in the pin mode table.
    ///
    /// Requests are validated before reaching the table, so this indicates a
    /// caller that skipped validation.
    #[error("pin {0} is outside the pin mode table")]
    PinOutOfRange(usize),
    /// The operation exists in the protocol but has no implementation.
    #[error("{0} is not supported")]
    UnsupportedOperation(&'static str),
    /// The endpoint does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,
    /// The settings endpoint was asked about something other than `io`.
    #[error("unknown settings query {0:?}")]
    UnknownQuery(String),
}

impl Error {
    pub(crate) fn malformed(name: &'static str, value: &str, reason: Malformed) -> Self {
        Self::MalformedParameter {
            name,
            value: value.to_owned(),
            reason,
        }
    }
}

/// Reason a parameter value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The value is not an integer.
    NotANumber,
    /// The value is zero, which is never accepted.
    ///
    /// Older firmware could not tell zero apart from a failed parse, and clients
    /// rely on zero being refused.
    Zero,
    /// The value is an integer outside the accepted range.
    OutOfRange {
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// The value is not one of the accepted words.
    UnknownValue,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::NotANumber => f.write_str("not a number"),
            Malformed::Zero => f.write_str("zero is not accepted"),
            Malformed::OutOfRange { min, max } => write!(f, "outside {min}..={max}"),
            Malformed::UnknownValue => f.write_str("unrecognised value"),
        }
    }
}
