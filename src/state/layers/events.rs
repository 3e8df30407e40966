//! Change notifications.
//!
//! Every successful mutation of a [`super::LayerRegistry`] is reported to
//! subscribers as exactly one [`LayerEvent`], synchronously, before the
//! mutating call returns. Mutations that fail with
//! [`super::TargetError::TargetNotFound`] report nothing - the state did not
//! change, so there is nothing to re-render.

use crate::{color::Color, id::LayerId};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LayerEvent {
    /// A rendering-surface handle was appended at this index.
    SurfaceAdded { index: usize },
    /// A layer was prepended to the list.
    LayerAdded(LayerId),
    /// All layers with this id were removed.
    LayerRemoved(LayerId),
    /// The active-layer pointer changed.
    CurrentChanged(Option<LayerId>),
    BackgroundChanged { target: LayerId, color: Color },
    DataChanged(LayerId),
    HiddenChanged { target: LayerId, hidden: bool },
}

/// Handle for a registered observer, for later [`super::LayerRegistry::unsubscribe`].
/// Values are local to one registry and never reused within it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct SubscriberId(u64);

pub(super) type Callback = Box<dyn FnMut(&LayerEvent) + Send + Sync>;

/// Observer list. Dispatch order is subscription order.
#[derive(Default)]
pub(super) struct Subscribers {
    entries: Vec<(SubscriberId, Callback)>,
    // Monotonic, so removal never causes an old handle to alias a new one.
    next: u64,
}
impl Subscribers {
    pub fn insert(&mut self, callback: Callback) -> SubscriberId {
        self.next += 1;
        let id = SubscriberId(self.next);
        self.entries.push((id, callback));
        id
    }
    /// Returns false if the handle was already gone.
    pub fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }
    pub fn dispatch(&mut self, event: &LayerEvent) {
        log::trace!("notifying {} subscriber(s): {:?}", self.entries.len(), event);
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}
