//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 server with support for
//! keep-alive connections and routed handlers.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming request heads from byte buffers
//! - **`headers`**: Case-insensitive header multimap
//! - **`request`**: HTTP request representation (head and full descriptor)
//! - **`body`**: Incremental request-body accumulation
//! - **`response`**: HTTP status codes
//! - **`writer`**: Commit-ordered response serialization and writing
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌──────────────────┐
//!        │  AwaitingRequest │ ← Parse method, path and headers
//!        └──────┬───────────┘
//!               │ Head received
//!               ▼
//!        ┌──────────────────┐
//!        │   ReadingBody    │ ← Accumulate body per Content-Length
//!        └──────┬───────────┘
//!               │ Body complete
//!               ▼
//!        ┌──────────────────┐
//!        │     Routing      │ ← Match (method, path), run handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← Flush response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → AwaitingRequest (same connection)
//!               └─ Close → Closed
//! ```
//!
//! Any transport failure short-circuits to `Closed`; malformed input and
//! body read failures answer 400 first when the transport still allows it.

pub mod body;
pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
