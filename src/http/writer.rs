use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::HeaderMap;
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WriterError {
    #[error("status and headers are already committed")]
    AlreadyCommitted,
    #[error("response already finished")]
    AlreadyFinished,
}

/// Accumulates a response and commits it to the transport exactly once,
/// in wire order: status line, headers, blank line, body.
///
/// The first body write (or `finish`) commits the status and headers;
/// from that point on they are frozen and any mutation fails with
/// [`WriterError::AlreadyCommitted`]. `finish` seals the response —
/// calling it twice fails with [`WriterError::AlreadyFinished`] — and
/// fills in `Content-Length` from the accumulated body unless the
/// handler set one explicitly.
///
/// The serialized image is pushed to the transport by
/// [`flush_to`](Self::flush_to), which loops over partial writes so
/// backpressure pauses the writer instead of assuming unbounded
/// transport buffering.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    committed: bool,
    finished: bool,
    body: BytesMut,
    wire: Vec<u8>,
    written: usize,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    /// Creates a writer with the default 200 status and no headers.
    pub fn new() -> Self {
        Self {
            status: StatusCode::Ok,
            headers: HeaderMap::new(),
            committed: false,
            finished: false,
            body: BytesMut::new(),
            wire: Vec::new(),
            written: 0,
        }
    }

    /// Sets the status code. Fails once the response is committed.
    pub fn set_status(&mut self, status: StatusCode) -> Result<(), WriterError> {
        if self.committed {
            return Err(WriterError::AlreadyCommitted);
        }
        self.status = status;
        Ok(())
    }

    /// Sets a header (case-insensitive name, last write wins).
    /// Fails once the response is committed.
    pub fn set_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), WriterError> {
        if self.committed {
            return Err(WriterError::AlreadyCommitted);
        }
        self.headers.set(name, value);
        Ok(())
    }

    /// Appends body bytes. The first call commits the status and headers.
    pub fn write_body(&mut self, chunk: &[u8]) -> Result<(), WriterError> {
        if self.finished {
            return Err(WriterError::AlreadyFinished);
        }
        self.committed = true;
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    /// Seals the response and builds the wire image.
    ///
    /// Commits if nothing has been written yet, so a header-only response
    /// (404 with no body, for instance) still gets a complete wire image.
    pub fn finish(&mut self) -> Result<(), WriterError> {
        if self.finished {
            return Err(WriterError::AlreadyFinished);
        }
        self.committed = true;
        self.finished = true;

        if !self.headers.contains("Content-Length") {
            self.headers.set("Content-Length", self.body.len().to_string());
        }

        // Status line
        self.wire.extend_from_slice(
            format!(
                "{} {} {}\r\n",
                HTTP_VERSION,
                self.status.as_u16(),
                self.status.reason_phrase()
            )
            .as_bytes(),
        );

        // Headers, in insertion order
        for (name, value) in self.headers.iter() {
            self.wire.extend_from_slice(name.as_bytes());
            self.wire.extend_from_slice(b": ");
            self.wire.extend_from_slice(value.as_bytes());
            self.wire.extend_from_slice(b"\r\n");
        }

        // Header/body separator
        self.wire.extend_from_slice(b"\r\n");

        // Body
        self.wire.extend_from_slice(&self.body);

        Ok(())
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total body bytes accepted so far.
    pub fn body_bytes_sent(&self) -> usize {
        self.body.len()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The serialized response. Empty until `finish` has been called.
    pub fn wire_image(&self) -> &[u8] {
        &self.wire
    }

    /// Writes the wire image to the transport, looping on partial writes.
    pub async fn flush_to<W: AsyncWrite + Unpin>(&mut self, stream: &mut W) -> anyhow::Result<()> {
        if !self.finished {
            anyhow::bail!("flush before finish");
        }

        while self.written < self.wire.len() {
            let n = stream.write(&self.wire[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
