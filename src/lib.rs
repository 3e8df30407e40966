//! # easel-core
//!
//! Client-side layer state for a canvas drawing application: the ordered
//! layer list, the active-layer pointer, and the rendering-surface handles
//! the frontend registers per layer. Mutations are synchronous and notify
//! subscribers before they return; see [`state::layers`] for the contract.
//!
//! Out of scope by design: rendering, input handling, undo/redo,
//! persistence, and multi-user sync all live elsewhere in the application.

pub mod color;
pub mod data;
pub mod id;
pub mod shared;
pub mod state;
pub mod surface;

pub use id::LayerId;
pub use state::layers::{Layer, LayerRegistry};
