//! Rendering-surface handles.
//!
//! Each layer is drawn onto some surface owned by the rendering side of the
//! application - a GPU texture, an HTML canvas, whatever the frontend uses.
//! The registry never draws; it only keeps weak handles around so that UI and
//! render code can find a layer's surface later. Weak on purpose: dropping a
//! surface must never be blocked by the registry, which is append-only and
//! never prunes (see [`crate::state::layers::LayerRegistry::add_surface`]).

/// Marker trait for types usable as a layer's drawing surface.
///
/// The registry treats surfaces as fully opaque, so there is nothing to
/// implement - the trait exists to name the role in signatures.
pub trait RenderSurface: Send + Sync {}

/// Non-owning handle to a surface, as stored by the registry.
pub type SurfaceRef = std::sync::Weak<dyn RenderSurface>;
