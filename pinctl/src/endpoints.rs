use std::fmt::Write as _;
use std::time::Instant;

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::validate::{require_integer, require_non_empty, require_pin};
use crate::{
    Error, Malformed, Method, Mode, PinController, Platform, Request, Response, SampleKind,
    StatusCode, XorShift,
};

/// Default upper bound for the `len` parameter of the data endpoint.
pub const DEFAULT_MAX_SAMPLES: usize = 4096;

/// Spellings of the `io` settings query that are accepted. This is a fixed
/// list, not a case-insensitive comparison.
const IO_QUERY: [&str; 4] = ["io", "IO", "Io", "iO"];

/// Routes requests to the pin-control endpoints and the status pages.
///
/// The dispatcher owns the [`PinController`] (and through it the pin mode
/// table) and an indicator LED that is lit while the status and not-found pages
/// are rendered. Requests are handled one at a time through `&mut self`.
#[derive(Debug)]
pub struct Dispatcher<P, L> {
    controller: PinController<P>,
    led: L,
    max_samples: usize,
    started: Instant,
    rng: XorShift,
}

impl<P: Platform, L: OutputPin> Dispatcher<P, L> {
    /// Create a dispatcher. `max_samples` bounds a single `/data` request.
    pub fn new(controller: PinController<P>, led: L, max_samples: usize) -> Self {
        Self {
            controller,
            led,
            max_samples,
            started: Instant::now(),
            rng: XorShift::new(XorShift::DEFAULT_SEED),
        }
    }

    /// Handle one request.
    pub fn dispatch(&mut self, request: &Request) -> Response {
        match request.path.as_str() {
            "/" => self.with_indicator(Self::status_page),
            "/test.svg" => self.graph(),
            "/inline" => Response::text(StatusCode::OK, "this works as well"),
            "/data" => self.data(request).unwrap_or_else(Response::from),
            "/opts" => self.settings(request).unwrap_or_else(Response::from),
            _ => self.with_indicator(|_| not_found(request)),
        }
    }

    /// The pin controller.
    pub fn controller(&self) -> &PinController<P> {
        &self.controller
    }

    /// The indicator LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    fn data(&mut self, request: &Request) -> Result<Response, Error> {
        let pin = require_pin(request.param("pin"))?;
        match request.method {
            Method::Get => {
                let kind = match request.param("mode").unwrap_or_default() {
                    "" => SampleKind::Analog,
                    "digital" => SampleKind::Digital,
                    other => return Err(Error::malformed("mode", other, Malformed::UnknownValue)),
                };
                let count = match kind {
                    // Rejected by the controller before a length is needed.
                    SampleKind::Digital => 0,
                    SampleKind::Analog => {
                        require_integer("len", request.param("len"), 1, self.max_samples)?
                    }
                };
                let samples = self.controller.sample(pin, kind, count)?;
                Ok(Response::csv(join_samples(&samples)))
            }
            Method::Put => Err(Error::UnsupportedOperation("writing pin data")),
            _ => Err(Error::MethodNotAllowed),
        }
    }

    fn settings(&mut self, request: &Request) -> Result<Response, Error> {
        let q = require_non_empty("q", request.param("q"))?;
        if !IO_QUERY.contains(&q) {
            return Err(Error::UnknownQuery(q.to_owned()));
        }
        let pin = require_pin(request.param("pin"))?;
        match request.method {
            Method::Get => {
                let code = self.controller.query_pin_mode(pin)?.map_or(0, Mode::code);
                Ok(Response::text(StatusCode::OK, code.to_string()))
            }
            Method::Post => {
                let val = require_non_empty("val", request.param("val"))?;
                self.controller
                    .configure_pin(pin, val)
                    .map_err(|err| match err {
                        Error::InvalidMode(_) => Error::malformed(
                            "pin;val",
                            &format!("{};{val}", request.param("pin").unwrap_or_default()),
                            Malformed::UnknownValue,
                        ),
                        other => other,
                    })?;
                Ok(Response::text(StatusCode::OK, "OK"))
            }
            _ => Err(Error::MethodNotAllowed),
        }
    }

    fn status_page(&mut self) -> Response {
        let seconds = self.started.elapsed().as_secs();
        let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
        let configured = self.controller.table().configured().count();
        Response::html(format!(
            "<html>\
<head>\
<meta http-equiv='refresh' content='5'/>\
<title>pinctl</title>\
<style>body {{ background-color: #cccccc; font-family: Arial, Helvetica, Sans-Serif; color: #000088; }}</style>\
</head>\
<body>\
<h1>pinctl</h1>\
<p>Uptime: {hours:02}:{minutes:02}:{seconds:02}</p>\
<p>Configured pins: {configured}</p>\
<img src=\"/test.svg\" />\
</body>\
</html>"
        ))
    }

    /// A 400x150 line graph of random points.
    fn graph(&mut self) -> Response {
        let mut out = String::from(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"400\" height=\"150\">\n\
<rect width=\"400\" height=\"150\" fill=\"rgb(250, 230, 210)\" stroke-width=\"1\" stroke=\"rgb(0, 0, 0)\" />\n\
<g stroke=\"black\">\n",
        );
        let mut y = self.rng.below(130);
        for x in (10..390).step_by(10) {
            let y2 = self.rng.below(130);
            let _ = writeln!(
                out,
                "<line x1=\"{x}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"1\" />",
                140 - y,
                x + 10,
                140 - y2
            );
            y = y2;
        }
        out.push_str("</g>\n</svg>\n");
        Response::svg(out)
    }

    fn with_indicator(&mut self, render: impl FnOnce(&mut Self) -> Response) -> Response {
        self.set_indicator(true);
        let response = render(self);
        self.set_indicator(false);
        response
    }

    fn set_indicator(&mut self, on: bool) {
        let result = if on {
            self.led.set_high()
        } else {
            self.led.set_low()
        };
        if let Err(err) = result {
            warn!("failed to switch activity LED: {err:?}");
        }
    }
}

fn not_found(request: &Request) -> Response {
    let mut message = format!(
        "File Not Found\n\nURI: {}\nMethod: {}\nArguments: {}\n",
        request.path,
        request.method,
        request.params().len()
    );
    for (name, value) in request.params() {
        let _ = writeln!(message, " {name}: {value}");
    }
    Response::text(StatusCode::NOT_FOUND, message)
}

/// Join samples with commas, without a trailing separator.
fn join_samples(samples: &[u16]) -> String {
    samples
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
