use thiserror::Error;

use crate::http::headers::HeaderMap;
use crate::http::request::{Method, RequestHead};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    InvalidRequest,
    #[error("unknown HTTP method")]
    InvalidMethod,
    #[error("malformed header line")]
    InvalidHeader,
    #[error("Content-Length is not a valid number or exceeds the body limit")]
    InvalidContentLength,
    #[error("need more data")]
    Incomplete,
}

/// Largest request body the server accepts. Content-Length comes from the
/// peer; anything above this is answered 400 before a body byte is read.
pub const MAX_BODY_LEN: usize = 1024 * 1024;

/// Parses a request head (request line + headers) from the front of `buf`.
///
/// Returns the parsed head and the number of bytes consumed, including the
/// blank line. Body bytes are NOT consumed here; the caller feeds them to a
/// `BodyReader` using the head's `content_length`. `Incomplete` means the
/// terminating `\r\n\r\n` has not arrived yet and the caller should read
/// more before retrying.
pub fn parse_request_head(buf: &[u8]) -> Result<(RequestHead, usize), ParseError> {
    // Empty lines before the request line are ignored (RFC 9112 §2.2);
    // some clients emit a stray CRLF after a keep-alive body.
    let mut skipped = 0;
    while buf[skipped..].starts_with(b"\r\n") {
        skipped += 2;
    }
    let buf = &buf[skipped..];

    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers. Repeated names merge per HTTP semantics (append).
    let mut headers = HeaderMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (name, value) = line
            .split_once(':')
            .ok_or(ParseError::InvalidHeader)?;

        headers.append(name.trim(), value.trim());
    }

    // Validate Content-Length up front so the body phase can trust it
    if let Some(v) = headers.get("Content-Length") {
        let len = v
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength)?;
        if len > MAX_BODY_LEN {
            return Err(ParseError::InvalidContentLength);
        }
    }

    let head = RequestHead {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
    };

    Ok((head, skipped + headers_end + 4))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
