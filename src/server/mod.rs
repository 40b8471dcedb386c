//! Server entry points: the accept loop lives in `listener`.

pub mod listener;
