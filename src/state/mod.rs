//! Client-side application state.
//!
//! One container so far - the layer registry. Anything else the client keeps
//! per-session (tool selection, view transform, ...) would live alongside it
//! here.

pub mod layers;
