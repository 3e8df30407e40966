//! # Layers
//!
//! The layer registry: an ordered list of layers (topmost first), the
//! active-layer pointer, and the rendering-surface handles the frontend has
//! registered. This is the ground truth the UI and renderer read from; all
//! mutations go through the methods here and notify subscribers before they
//! return.
//!
//! Two oddities of the registry's contract are load-bearing and documented
//! rather than fixed:
//! - [`LayerRegistry::toggle_hidden`] trusts a caller-supplied previous
//!   value instead of the stored flag.
//! - the surface list has a lifecycle independent of the layer list - it is
//!   append-only and removal of a layer never prunes it.

pub mod events;

use crate::{
    color::Color,
    data::ImageData,
    id::{LayerId, UserId},
    surface::SurfaceRef,
};
pub use events::{LayerEvent, SubscriberId};

/// One drawable surface in the composition.
#[derive(Clone, PartialEq, Debug)]
pub struct Layer {
    /// Unique among live layers - by caller contract, not enforcement.
    pub id: LayerId,
    /// Display name.
    pub name: String,
    /// Stacking order. Not auto-maintained on insert or remove; the caller
    /// renumbers when it cares.
    pub z: i32,
    pub hidden: bool,
    pub background: Color,
    /// Owning user/session. Opaque here.
    pub owner: UserId,
    /// Serialized image contents, absent until the first rasterization.
    pub data: Option<ImageData>,
}
impl Layer {
    /// A visible, white, empty layer with `z = 1`.
    #[must_use]
    pub fn new(id: LayerId, name: impl Into<String>, owner: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            z: 1,
            hidden: false,
            background: Color::default(),
            owner,
            data: None,
        }
    }
    /// The layer every registry starts with.
    fn seed() -> Self {
        Self::new(LayerId(1), "Layer 1", UserId(1))
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    #[error("ID not found")]
    TargetNotFound,
}

/// An owned copy of the registry's state, for presentation code that wants a
/// coherent view without holding the registry itself.
#[derive(Clone)]
pub struct Snapshot {
    pub layers: Vec<Layer>,
    pub current: Option<LayerId>,
    pub surfaces: Vec<SurfaceRef>,
}

pub struct LayerRegistry {
    /// Display order, index 0 on top. New layers are prepended.
    layers: Vec<Layer>,
    /// May dangle: removing the active layer does not clear this. Callers
    /// that need a live layer go through [`Self::current_layer`].
    current: Option<LayerId>,
    /// Append-only. Deliberately not reconciled with `layers`.
    surfaces: Vec<SurfaceRef>,
    subscribers: events::Subscribers,
}
impl Default for LayerRegistry {
    fn default() -> Self {
        Self {
            layers: vec![Layer::seed()],
            current: Some(LayerId(1)),
            surfaces: Vec::new(),
            subscribers: events::Subscribers::default(),
        }
    }
}
// Read surface.
impl LayerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// All layers, topmost first.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
    /// Get a layer by id. First match wins if the caller has broken the
    /// uniqueness contract.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }
    #[must_use]
    pub fn current(&self) -> Option<LayerId> {
        self.current
    }
    /// The active layer, or None if the pointer is unset or dangling.
    #[must_use]
    pub fn current_layer(&self) -> Option<&Layer> {
        self.get(self.current?)
    }
    /// Layers the renderer should draw, topmost first.
    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter().filter(|layer| !layer.hidden)
    }
    /// Every surface handle ever registered, in registration order.
    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceRef] {
        &self.surfaces
    }
    /// Clone out a coherent view of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            layers: self.layers.clone(),
            current: self.current,
            surfaces: self.surfaces.clone(),
        }
    }
    fn position_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }
    fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }
}
// Mutations. Each notifies subscribers exactly once before returning;
// a `TargetNotFound` leaves the state untouched and notifies nothing.
impl LayerRegistry {
    /// Register the rendering surface for a newly created layer.
    ///
    /// Handles are appended, never deduplicated, and never removed - the
    /// rendering side owns the surfaces and is responsible for keeping its
    /// ordering aligned with the layer list if that alignment matters to it.
    pub fn add_surface(&mut self, surface: SurfaceRef) {
        self.surfaces.push(surface);
        self.notify(LayerEvent::SurfaceAdded {
            index: self.surfaces.len() - 1,
        });
    }
    /// Prepend a layer, making it topmost.
    ///
    /// Id uniqueness is the caller's job. A colliding id is accepted but
    /// shadows the older layer in every by-id operation.
    pub fn add_layer(&mut self, layer: Layer) {
        if self.position_of(layer.id).is_some() {
            log::warn!("{} already present, new layer shadows it", layer.id);
        }
        let id = layer.id;
        self.layers.insert(0, layer);
        self.notify(LayerEvent::LayerAdded(id));
    }
    /// Remove every layer with this id (at most one, when the uniqueness
    /// contract holds).
    ///
    /// Does not touch the active-layer pointer, even when it pointed at the
    /// removed layer - [`Self::current`] then dangles until the caller sets
    /// it again.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<(), TargetError> {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        if self.layers.len() == before {
            return Err(TargetError::TargetNotFound);
        }
        if self.current == Some(id) {
            log::warn!("removed active {}, current pointer now dangles", id);
        }
        self.notify(LayerEvent::LayerRemoved(id));
        Ok(())
    }
    /// Replace the active-layer pointer, unconditionally.
    ///
    /// No validation against the layer list - pointing at an id that does
    /// not exist is allowed and the caller's problem.
    pub fn set_current(&mut self, id: Option<LayerId>) {
        self.current = id;
        self.notify(LayerEvent::CurrentChanged(id));
    }
    /// Set one layer's background color, leaving its other fields untouched.
    pub fn set_background(&mut self, id: LayerId, color: Color) -> Result<(), TargetError> {
        let layer = self.get_mut(id).ok_or(TargetError::TargetNotFound)?;
        layer.background = color.clone();
        self.notify(LayerEvent::BackgroundChanged { target: id, color });
        Ok(())
    }
    /// Replace one layer's serialized image payload.
    pub fn set_data(&mut self, id: LayerId, data: ImageData) -> Result<(), TargetError> {
        let layer = self.get_mut(id).ok_or(TargetError::TargetNotFound)?;
        layer.data = Some(data);
        self.notify(LayerEvent::DataChanged(id));
        Ok(())
    }
    /// Set `hidden` to the opposite of `prev` - the *caller's* belief about
    /// the previous state, not the stored flag.
    ///
    /// A caller holding a stale `prev` will therefore not toggle: two calls
    /// with `prev = false` both end with the layer hidden. Long-standing
    /// contract, kept as-is; the returned value is the new stored flag so
    /// callers can refresh their belief.
    pub fn toggle_hidden(&mut self, id: LayerId, prev: bool) -> Result<bool, TargetError> {
        let layer = self.get_mut(id).ok_or(TargetError::TargetNotFound)?;
        let hidden = !prev;
        layer.hidden = hidden;
        self.notify(LayerEvent::HiddenChanged { target: id, hidden });
        Ok(hidden)
    }
    fn notify(&mut self, event: LayerEvent) {
        self.subscribers.dispatch(&event);
    }
}
// Observer registration.
impl LayerRegistry {
    /// Register an observer, called synchronously for every state change.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&LayerEvent) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.subscribers.insert(Box::new(callback))
    }
    /// Drop an observer. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    fn layer(id: u64) -> Layer {
        Layer::new(LayerId(id), format!("Layer {id}"), UserId(1))
    }

    #[test]
    fn initial_state() {
        let registry = LayerRegistry::new();
        assert_eq!(registry.layers().len(), 1);
        let seed = &registry.layers()[0];
        assert_eq!(seed.id, LayerId(1));
        assert_eq!(seed.name, "Layer 1");
        assert_eq!(seed.z, 1);
        assert!(!seed.hidden);
        assert_eq!(seed.background.as_str(), Color::WHITE);
        assert_eq!(seed.owner, UserId(1));
        assert!(seed.data.is_none());
        assert_eq!(registry.current(), Some(LayerId(1)));
        assert!(registry.surfaces().is_empty());
    }
    #[test]
    fn add_prepends() {
        let mut registry = LayerRegistry::new();
        registry.add_layer(layer(2));
        registry.add_layer(layer(3));
        let ids: Vec<_> = registry.layers().iter().map(|l| l.id.0).collect();
        // Most recent first, seed last.
        assert_eq!(ids, [3, 2, 1]);
    }
    #[test]
    fn remove_present_and_absent() {
        let mut registry = LayerRegistry::new();
        registry.add_layer(layer(2));
        assert_eq!(registry.remove_layer(LayerId(2)), Ok(()));
        assert_eq!(registry.layers().len(), 1);
        assert!(registry.get(LayerId(2)).is_none());
        // Absent id: error, list untouched.
        let before = registry.snapshot().layers;
        assert_eq!(
            registry.remove_layer(LayerId(99)),
            Err(TargetError::TargetNotFound)
        );
        assert_eq!(registry.layers(), &before[..]);
    }
    #[test]
    fn removing_active_layer_leaves_pointer_dangling() {
        let mut registry = LayerRegistry::new();
        registry.remove_layer(LayerId(1)).unwrap();
        // Contract: the pointer is NOT cleared.
        assert_eq!(registry.current(), Some(LayerId(1)));
        assert!(registry.current_layer().is_none());
    }
    #[test]
    fn background_change_touches_one_field() {
        let mut registry = LayerRegistry::new();
        let before = registry.get(LayerId(1)).unwrap().clone();
        registry
            .set_background(LayerId(1), Color::new("#123456"))
            .unwrap();
        let after = registry.get(LayerId(1)).unwrap();
        assert_eq!(after.background.as_str(), "#123456");
        assert_eq!(after.name, before.name);
        assert_eq!(after.z, before.z);
        assert_eq!(after.hidden, before.hidden);
        assert_eq!(after.owner, before.owner);
        assert_eq!(after.data, before.data);
        // Unknown id: no-op, reported.
        assert_eq!(
            registry.set_background(LayerId(9), Color::new("#000000")),
            Err(TargetError::TargetNotFound)
        );
        assert_eq!(registry.layers().len(), 1);
    }
    #[test]
    fn set_data() {
        let mut registry = LayerRegistry::new();
        let payload = ImageData::new("data:image/png;base64,aGk=");
        registry.set_data(LayerId(1), payload.clone()).unwrap();
        assert_eq!(registry.get(LayerId(1)).unwrap().data, Some(payload));
        assert_eq!(
            registry.set_data(LayerId(9), ImageData::new("x")),
            Err(TargetError::TargetNotFound)
        );
    }
    #[test]
    fn toggle_hidden_trusts_caller() {
        let mut registry = LayerRegistry::new();
        assert_eq!(registry.toggle_hidden(LayerId(1), false), Ok(true));
        assert!(registry.get(LayerId(1)).unwrap().hidden);
        // A stale caller repeats `prev = false`: NOT a toggle back.
        // This non-idempotence is the documented contract.
        assert_eq!(registry.toggle_hidden(LayerId(1), false), Ok(true));
        assert!(registry.get(LayerId(1)).unwrap().hidden);
        // A refreshed caller un-hides.
        assert_eq!(registry.toggle_hidden(LayerId(1), true), Ok(false));
        assert!(!registry.get(LayerId(1)).unwrap().hidden);
        assert_eq!(
            registry.toggle_hidden(LayerId(9), false),
            Err(TargetError::TargetNotFound)
        );
    }
    #[test]
    fn current_pointer_is_unvalidated() {
        let mut registry = LayerRegistry::new();
        registry.set_current(None);
        assert_eq!(registry.current(), None);
        // Id 5 does not exist. Allowed anyway.
        registry.set_current(Some(LayerId(5)));
        assert_eq!(registry.current(), Some(LayerId(5)));
        assert!(registry.current_layer().is_none());
    }
    #[test]
    fn visible_layers_skips_hidden() {
        let mut registry = LayerRegistry::new();
        registry.add_layer(layer(2));
        registry.toggle_hidden(LayerId(1), false).unwrap();
        let visible: Vec<_> = registry.visible_layers().map(|l| l.id).collect();
        assert_eq!(visible, [LayerId(2)]);
    }
    #[test]
    fn surfaces_outlive_layers() {
        struct Dummy;
        impl crate::surface::RenderSurface for Dummy {}

        let mut registry = LayerRegistry::new();
        let surface: Arc<dyn crate::surface::RenderSurface> = Arc::new(Dummy);
        registry.add_surface(Arc::downgrade(&surface));
        registry.add_surface(Arc::downgrade(&surface));
        assert_eq!(registry.surfaces().len(), 2);
        // Removing the layer does not prune the handle list.
        registry.remove_layer(LayerId(1)).unwrap();
        assert_eq!(registry.surfaces().len(), 2);
        // Handles are weak: once the renderer drops the surface they no
        // longer upgrade, but they still occupy their slot.
        drop(surface);
        assert_eq!(registry.surfaces().len(), 2);
        assert!(registry.surfaces()[0].upgrade().is_none());
    }
    #[test]
    fn events_are_synchronous_and_ordered() {
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);

        let mut registry = LayerRegistry::new();
        registry.subscribe(move |event| sink.lock().push(event.clone()));

        registry.add_layer(layer(2));
        registry.set_current(Some(LayerId(2)));
        registry.toggle_hidden(LayerId(2), false).unwrap();
        registry.remove_layer(LayerId(2)).unwrap();
        // Failed mutations are silent.
        let _ = registry.remove_layer(LayerId(2));

        assert_eq!(
            *log.lock(),
            [
                LayerEvent::LayerAdded(LayerId(2)),
                LayerEvent::CurrentChanged(Some(LayerId(2))),
                LayerEvent::HiddenChanged {
                    target: LayerId(2),
                    hidden: true
                },
                LayerEvent::LayerRemoved(LayerId(2)),
            ]
        );
    }
    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let sink = Arc::clone(&count);

        let mut registry = LayerRegistry::new();
        let subscriber = registry.subscribe(move |_| {
            sink.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        });
        registry.set_current(None);
        assert!(registry.unsubscribe(subscriber));
        // Double unsubscribe reports failure.
        assert!(!registry.unsubscribe(subscriber));
        registry.set_current(None);
        assert_eq!(count.load(std::sync::atomic::Ordering::Relaxed), 1);
    }
    #[test]
    fn snapshot_is_independent() {
        let mut registry = LayerRegistry::new();
        let snapshot = registry.snapshot();
        registry.add_layer(layer(2));
        registry.set_current(None);
        assert_eq!(snapshot.layers.len(), 1);
        assert_eq!(snapshot.current, Some(LayerId(1)));
    }
    #[test]
    fn duplicate_id_shadows() {
        let mut registry = LayerRegistry::new();
        let mut twin = layer(1);
        twin.name = "Imposter 1".to_owned();
        registry.add_layer(twin);
        // By-id lookup sees the newer, shadowing layer.
        assert_eq!(registry.get(LayerId(1)).unwrap().name, "Imposter 1");
        // Removal takes out both.
        registry.remove_layer(LayerId(1)).unwrap();
        assert!(registry.layers().is_empty());
    }
}
