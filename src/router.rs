//! Request routing
//!
//! An ordered table of (method, path) → handler bindings. Routes are
//! registered at startup, the table is wrapped in an `Arc`, and every
//! connection task reads it concurrently without locking.

use std::sync::Arc;

use crate::http::request::{Method, Request};
use crate::http::writer::ResponseWriter;

/// Application-supplied function invoked on a route match.
///
/// The handler has exclusive use of the writer; returning an error is a
/// handler fault, answered with 500 if nothing has been committed yet.
pub type Handler =
    Arc<dyn Fn(&Request, &mut ResponseWriter) -> anyhow::Result<()> + Send + Sync>;

/// A (method, path) → handler binding.
pub struct Route {
    pub method: Method,
    pub path: String,
    handler: Handler,
}

/// Ordered route table with exact-match lookup.
///
/// Matching is deterministic: routes are tried in registration order and
/// the first (method, path) match wins, so duplicate registrations shadow
/// later ones. No mutation happens after the listener starts.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route. Order matters: first match wins.
    pub fn route<F>(&mut self, method: Method, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut ResponseWriter) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.into(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Looks up the first route whose method and path match exactly.
    pub fn find(&self, method: Method, path: &str) -> Option<&Handler> {
        self.routes
            .iter()
            .find(|r| r.method == method && r.path == path)
            .map(|r| &r.handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
