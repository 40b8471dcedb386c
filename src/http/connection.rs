use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::http::body::BodyReader;
use crate::http::parser::{ParseError, parse_request_head};
use crate::http::request::{Request, RequestHead};
use crate::http::response::StatusCode;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    router: Arc<Router>,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequest,
    ReadingBody(RequestHead),
    Routing(Request),
    Responding(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

enum HeadOutcome {
    Head(RequestHead),
    EndOfStream,
    Malformed(ParseError),
}

impl Connection {
    pub fn new(stream: TcpStream, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(4096),
            router,
            state: ConnectionState::AwaitingRequest,
        }
    }

    /// Drives the connection state machine to completion.
    ///
    /// All request-level failures (malformed input, body read failure,
    /// handler fault) are answered on this connection and never escape as
    /// process errors; the returned error only reports transport-level
    /// problems worth logging at the listener.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequest => match self.read_head().await? {
                    HeadOutcome::Head(head) => ConnectionState::ReadingBody(head),
                    HeadOutcome::EndOfStream => ConnectionState::Closed,
                    HeadOutcome::Malformed(e) => {
                        tracing::warn!(error = %e, "Malformed request");
                        self.reject(StatusCode::BadRequest).await;
                        ConnectionState::Closed
                    }
                },

                ConnectionState::ReadingBody(head) => match self.read_body(&head).await? {
                    Some(body) => ConnectionState::Routing(head.into_request(body)),
                    None => {
                        tracing::warn!(
                            method = head.method.as_str(),
                            path = %head.path,
                            "Body read failed"
                        );
                        self.reject(StatusCode::BadRequest).await;
                        ConnectionState::Closed
                    }
                },

                ConnectionState::Routing(request) => {
                    let keep_alive = request.keep_alive();

                    match self.dispatch(&request)? {
                        Some(writer) => ConnectionState::Responding(writer, keep_alive),
                        None => ConnectionState::Closed, // handler fault after commit
                    }
                }

                ConnectionState::Responding(mut writer, keep_alive) => {
                    writer.flush_to(&mut self.stream).await?;

                    if keep_alive {
                        ConnectionState::AwaitingRequest // next request, same connection
                    } else {
                        ConnectionState::Closed
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until a complete request head is buffered and parses it.
    ///
    /// Bytes past the head (body, pipelined requests) stay in the buffer.
    async fn read_head(&mut self) -> anyhow::Result<HeadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_request_head(&self.buffer) {
                Ok((head, consumed)) => {
                    self.buffer.drain(..consumed);
                    return Ok(HeadOutcome::Head(head));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Ok(HeadOutcome::Malformed(e));
                }
            }

            let mut temp = [0u8; 1024];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // EOF between requests is a clean close; mid-head it is not
                return Ok(if self.buffer.is_empty() {
                    HeadOutcome::EndOfStream
                } else {
                    HeadOutcome::Malformed(ParseError::Incomplete)
                });
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    /// Feeds the body reader from the buffer and socket until the declared
    /// length arrives. `None` means the read failed and 400 should go out.
    async fn read_body(&mut self, head: &RequestHead) -> anyhow::Result<Option<bytes::Bytes>> {
        let mut reader = BodyReader::new(head.content_length());

        // Leftover bytes from head parsing come first, in arrival order.
        // Anything past the declared length is the next pipelined request.
        let take = reader.remaining().min(self.buffer.len());
        if take > 0 {
            if reader.push_chunk(&self.buffer[..take]).is_err() {
                return Ok(None);
            }
            self.buffer.drain(..take);
        }

        while !reader.is_complete() {
            let mut temp = [0u8; 1024];
            let n = match self.stream.read(&mut temp).await {
                Ok(0) => {
                    // Peer went away mid-body
                    reader.fail();
                    return Ok(None);
                }
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(error = %e, "Transport error while reading body");
                    reader.fail();
                    return Ok(None);
                }
            };

            let take = reader.remaining().min(n);
            if reader.push_chunk(&temp[..take]).is_err() {
                return Ok(None);
            }
            self.buffer.extend_from_slice(&temp[take..n]);
        }

        match reader.finish() {
            Ok(body) => Ok(Some(body)),
            Err(e) => {
                tracing::error!(error = %e, "Body finalize failed");
                Ok(None)
            }
        }
    }

    /// Routes the request and runs its handler.
    ///
    /// Returns the finished writer to flush, or `None` when a handler
    /// faulted after committing and the connection must be abandoned.
    fn dispatch(&self, request: &Request) -> anyhow::Result<Option<ResponseWriter>> {
        let mut writer = ResponseWriter::new();

        match self.router.find(request.method, &request.path) {
            Some(handler) => {
                if let Err(fault) = handler.as_ref()(request, &mut writer) {
                    tracing::error!(
                        method = request.method.as_str(),
                        path = %request.path,
                        error = %fault,
                        "Handler fault"
                    );

                    if writer.is_committed() {
                        // Headers may be on their way out; nothing sane to send
                        return Ok(None);
                    }

                    writer = ResponseWriter::new();
                    writer.set_status(StatusCode::InternalServerError)?;
                }
            }

            None => {
                tracing::info!(
                    method = request.method.as_str(),
                    path = %request.path,
                    "No route matched"
                );
                writer.set_status(StatusCode::NotFound)?;
            }
        }

        // Handlers may finish explicitly; seal the response if they didn't
        if !writer.is_finished() {
            writer.finish()?;
        }

        Ok(Some(writer))
    }

    /// Best-effort error response; failures here only get logged.
    async fn reject(&mut self, status: StatusCode) {
        let mut writer = ResponseWriter::new();
        if writer.set_status(status).is_err() || writer.finish().is_err() {
            return;
        }

        if let Err(e) = writer.flush_to(&mut self.stream).await {
            tracing::warn!(error = %e, "Failed to deliver error response");
        }
    }
}
