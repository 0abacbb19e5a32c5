//! Transport-independent request and response types.

use std::fmt;

use crate::Error;

/// HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// Any other method, as received.
    Other(String),
}

impl Method {
    /// Parse a method token. Methods are case-sensitive.
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            other => Method::Other(other.to_owned()),
        }
    }

    /// The method token.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request, as delivered by the transport.
///
/// Query and form parameters share one list. When a name appears more than
/// once, the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    params: Vec<(String, String)>,
}

impl Request {
    /// Create a request with no parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_param(name, value);
        self
    }

    /// Add a parameter in place.
    pub fn push_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    /// Value of the first parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All parameters in the order received.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 200
    pub const OK: StatusCode = StatusCode(200);
    /// 400
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    /// 404
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    /// 405
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    /// 501
    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(501);

    /// Reason phrase for the status line.
    pub fn reason(self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason())
    }
}

/// A complete response, ready for the transport to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code.
    pub status: StatusCode,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

impl Response {
    /// A `text/plain` response.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }

    /// A 200 `text/csv` response.
    pub fn csv(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/csv",
            body,
        }
    }

    /// A 200 `text/html` response.
    pub fn html(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/html",
            body,
        }
    }

    /// A 200 `image/svg+xml` response.
    pub fn svg(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "image/svg+xml",
            body,
        }
    }

    fn bad_request(status: StatusCode, name: &str, value: &str) -> Self {
        Self::text(status, format!("Bad Request\n\n{name}= \"{value}\"\n"))
    }
}

/// Convert a handler failure into the response clients expect.
///
/// Missing and malformed parameters are reported with status 405 rather than
/// 400; deployed clients check for it.
impl From<Error> for Response {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingParameter { name } => Response::text(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Bad Request\n\n{name} is empty\n"),
            ),
            Error::MalformedParameter { name, value, .. } => {
                Response::bad_request(StatusCode::METHOD_NOT_ALLOWED, name, &value)
            }
            Error::InvalidMode(value) => {
                Response::bad_request(StatusCode::METHOD_NOT_ALLOWED, "val", &value)
            }
            Error::PinOutOfRange(pin) => {
                Response::bad_request(StatusCode::METHOD_NOT_ALLOWED, "pin", &pin.to_string())
            }
            Error::UnknownQuery(value) => {
                Response::bad_request(StatusCode::BAD_REQUEST, "q", &value)
            }
            Error::UnsupportedOperation(what) => Response::text(
                StatusCode::NOT_IMPLEMENTED,
                format!("Not Implemented\n\n{what} is not supported\n"),
            ),
            Error::MethodNotAllowed => {
                Response::text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            }
        }
    }
}
