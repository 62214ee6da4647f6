//! Identity and ownership primitives for the vehicle object model
//!
//! Every sub-object of a vehicle (capabilities, climatization, charging)
//! carries a stable instance identity and a non-owning back-reference to
//! the vehicle that owns it. Cloning a vehicle from an origin snapshot
//! moves these sub-objects into the new vehicle and rebinds their owner
//! reference through [`Adopt::adopt`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of an object instance.
///
/// Assigned once at fresh construction and preserved across adoption, so
/// callers can verify that a cloned vehicle carries the *same* sub-object
/// rather than a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-owning back-reference to the vehicle that owns a sub-object.
///
/// Used for addressing and lookup only; the owning vehicle holds the
/// sub-object by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Instance identity of the owning vehicle
    pub vehicle: InstanceId,

    /// Hierarchical address of the owner, e.g. `/garage/<vin>`
    pub path: String,
}

impl OwnerRef {
    pub fn new(vehicle: InstanceId, path: impl Into<String>) -> Self {
        Self {
            vehicle,
            path: path.into(),
        }
    }

    /// Address of a child object below this owner
    pub fn child(&self, name: &str) -> String {
        format!("{}/{}", self.path, name)
    }
}

/// Ownership transfer for vehicle sub-objects.
///
/// `adopt` consumes the origin's sub-object and returns the same instance
/// bound to `new_owner`: contents and [`InstanceId`] are preserved, only
/// owner back-references change (recursively for nested children). The
/// origin is gone after the call, so no stale reference into the old
/// vehicle can survive.
pub trait Adopt: Sized {
    fn adopt(origin: Self, new_owner: &OwnerRef) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_are_unique() {
        assert_ne!(InstanceId::new(), InstanceId::new());
    }

    #[test]
    fn owner_ref_child_address() {
        let owner = OwnerRef::new(InstanceId::new(), "/garage/TMBJB9NY6RF000000");
        assert_eq!(
            owner.child("capabilities"),
            "/garage/TMBJB9NY6RF000000/capabilities"
        );
    }
}
