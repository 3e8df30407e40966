//! # IDs
//!
//! Layers and their owners are identified by plain numeric IDs assigned by the
//! client that creates them. The registry never allocates IDs of its own and
//! never validates uniqueness - that contract belongs to the caller (see
//! [`crate::state::layers::LayerRegistry::add_layer`]).

/// Identifies one layer within a registry.
///
/// Uniqueness among live layers is a caller-maintained invariant, not
/// something this type (or the registry) enforces.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Layer#{}", self.0)
    }
}
impl From<u64> for LayerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifies the user or session that owns a layer. Opaque to the registry.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User#{}", self.0)
    }
}
impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
