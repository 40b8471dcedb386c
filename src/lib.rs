//! Beacon - Minimal HTTP/1.1 echo-and-routing server
//!
//! Core library for the HTTP building blocks: header map, request
//! descriptor, body reader, router, response writer and connection loop.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
