#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod controller;
mod endpoints;
mod error;
pub mod gpio;
pub mod http;
mod mode;
mod platform;
mod table;
pub mod validate;

pub use controller::{PinController, SampleKind, resolve_mode};
pub use endpoints::{DEFAULT_MAX_SAMPLES, Dispatcher};
pub use error::{Error, Malformed};
pub use http::{Method, Request, Response, StatusCode};
pub use mode::Mode;
pub use platform::{PinConfig, Platform, SimulatedBoard, XorShift};
pub use table::{MAX_PINS, PinModeTable};
