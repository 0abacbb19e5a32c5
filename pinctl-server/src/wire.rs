//! HTTP/1.x request parsing and response writing.
//!
//! Only what the pin-control protocol needs: the request line, `Content-Length`
//! and `Content-Type` headers, query strings, and url-encoded form bodies.
//! Every response closes the connection.

use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use pinctl::{Method, Request, Response};

/// Largest request head or body accepted.
pub const MAX_REQUEST_SIZE: usize = 8192;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Read one request from `reader`.
///
/// Returns `Ok(None)` if the peer closed the connection without sending
/// anything.
pub fn read_request(reader: &mut impl Read) -> Result<Option<Request>> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    // Read until we see the end of headers.
    let (header_end, body_start) = loop {
        if let Some(ends) = find_header_end(&buf) {
            break ends;
        }
        if buf.len() >= MAX_REQUEST_SIZE {
            bail!("request head exceeds {MAX_REQUEST_SIZE} bytes");
        }
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(None);
            }
            bail!("connection closed before end of headers");
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..header_end]).context("request is not valid UTF-8")?;
    let mut lines = head
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        bail!("malformed request line {request_line:?}");
    };
    if !version.starts_with("HTTP/1.") {
        bail!("unsupported protocol version {version:?}");
    }

    let mut content_length = 0usize;
    let mut form_body = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            bail!("malformed header {line:?}");
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value
                .parse()
                .with_context(|| format!("invalid Content-Length {value:?}"))?;
        } else if name.eq_ignore_ascii_case("content-type") {
            form_body = value
                .get(..FORM_CONTENT_TYPE.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FORM_CONTENT_TYPE));
        }
    }
    if content_length > MAX_REQUEST_SIZE {
        bail!("request body of {content_length} bytes is too large");
    }

    let method = Method::parse(method);
    let target = target.to_owned();

    while buf.len() < body_start + content_length {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            bail!("truncated request body");
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
    let mut request = Request::new(method, decode_component(path, false));
    push_params(&mut request, query);
    if form_body {
        let body = std::str::from_utf8(&buf[body_start..body_start + content_length])
            .context("form body is not valid UTF-8")?;
        push_params(&mut request, body);
    }
    Ok(Some(request))
}

/// Write `response` with a minimal set of headers.
pub fn write_response(writer: &mut impl Write, response: &Response) -> io::Result<()> {
    write!(
        writer,
        "HTTP/1.1 {}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        response.status,
        response.content_type,
        response.body.len()
    )?;
    writer.write_all(response.body.as_bytes())?;
    writer.flush()
}

/// Locate the blank line ending the request head.
///
/// Returns the end of the head and the start of the body. Lines may end in
/// CRLF or a bare LF.
fn find_header_end(buf: &[u8]) -> Option<(usize, usize)> {
    buf.iter().enumerate().find_map(|(i, &byte)| {
        if byte != b'\n' {
            return None;
        }
        match &buf[i + 1..] {
            [b'\n', ..] => Some((i, i + 2)),
            [b'\r', b'\n', ..] => Some((i, i + 3)),
            _ => None,
        }
    })
}

fn push_params(request: &mut Request, encoded: &str) {
    for pair in encoded.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        request.push_param(decode_component(name, true), decode_component(value, true));
    }
}

/// Percent-decode `raw`. Invalid escapes are kept as they are.
fn decode_component(raw: &str, plus_as_space: bool) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match bytes.get(i + 1..i + 3).and_then(hex_byte) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(digits: &[u8]) -> Option<u8> {
    let digit = |d: u8| (d as char).to_digit(16);
    Some((digit(digits[0])? * 16 + digit(digits[1])?) as u8)
}
