use bytes::{Bytes, BytesMut};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("chunk received after the body was finished or failed")]
    LateChunk,
    #[error("body already finished")]
    AlreadyFinished,
    #[error("body incomplete: have {have} of {expected} bytes")]
    Incomplete { have: usize, expected: usize },
    #[error("body read failed")]
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Reading,
    Done,
    Failed,
}

/// Accumulates inbound body bytes toward a known Content-Length.
///
/// Chunks arrive in transport order via [`push_chunk`](Self::push_chunk);
/// once the expected length is reached, [`finish`](Self::finish) freezes
/// the buffer into an immutable `Bytes` exactly once. A transport failure
/// is signaled with [`fail`](Self::fail), which discards partial data.
/// Chunks after finish or fail are rejected with `LateChunk` — the caller
/// logs and moves on, the process never dies for it.
#[derive(Debug)]
pub struct BodyReader {
    expected: usize,
    buf: BytesMut,
    state: BodyState,
}

/// Upper bound on the capacity reserved up front. The declared length is
/// peer-controlled, so the buffer grows on demand past this instead of
/// trusting the header with a single huge allocation.
const INITIAL_CAPACITY_LIMIT: usize = 8 * 1024;

impl BodyReader {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            buf: BytesMut::with_capacity(expected.min(INITIAL_CAPACITY_LIMIT)),
            state: BodyState::Reading,
        }
    }

    /// Bytes still missing before the body is complete.
    pub fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.buf.len())
    }

    pub fn is_complete(&self) -> bool {
        self.state == BodyState::Reading && self.buf.len() >= self.expected
    }

    /// Appends the next chunk from the transport.
    ///
    /// The caller must not feed more than [`remaining`](Self::remaining)
    /// bytes; anything past the declared length belongs to the next
    /// pipelined request and stays in the connection buffer.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<(), BodyError> {
        if self.state != BodyState::Reading {
            return Err(BodyError::LateChunk);
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Finalizes the accumulated bytes into an immutable body.
    ///
    /// Errors with `Incomplete` if fewer bytes than declared have arrived,
    /// `AlreadyFinished` on a second call, and `Failed` after `fail`.
    pub fn finish(&mut self) -> Result<Bytes, BodyError> {
        match self.state {
            BodyState::Done => Err(BodyError::AlreadyFinished),
            BodyState::Failed => Err(BodyError::Failed),
            BodyState::Reading => {
                if self.buf.len() < self.expected {
                    return Err(BodyError::Incomplete {
                        have: self.buf.len(),
                        expected: self.expected,
                    });
                }
                self.state = BodyState::Done;
                Ok(self.buf.split().freeze())
            }
        }
    }

    /// Marks the body as failed and discards whatever was buffered.
    pub fn fail(&mut self) {
        self.state = BodyState::Failed;
        self.buf.clear();
    }
}
