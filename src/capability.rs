//! Vehicle capability model
//!
//! Capabilities are named feature/restriction flags reported by the
//! manufacturer API. Each carries an append-only log of observed status
//! codes explaining why the capability may currently be restricted.

use crate::error::{EnyaqError, Result};
use crate::objects::{Adopt, InstanceId, OwnerRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status codes explaining why a capability is restricted.
///
/// The codes originate from the manufacturer API wire format and must
/// round-trip exactly. Codes this crate does not know yet map to
/// `Unknown` instead of failing, so newly introduced codes on the server
/// side never break deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum CapabilityStatus {
    Unknown,
    Deactivated,
    InitiallyDisabled,
    DisabledByUser,
    OfflineMode,
    WorkshopMode,
    MissingOperation,
    MissingService,
    PlayProtection,
    PowerBudgetReached,
    DeepSleep,
    LocationDataDisabled,
    LicenseInactive,
    LicenseExpired,
    MissingLicense,
    UserNotVerified,
    TermsAndConditionsNotAccepted,
    InsufficientRights,
    ConsentMissing,
    LimitedFeature,
    AuthAppCertError,
    StatusUnsupported,
}

impl CapabilityStatus {
    /// Wire code of this status
    pub fn code(self) -> u32 {
        u32::from(self)
    }
}

impl From<u32> for CapabilityStatus {
    fn from(code: u32) -> Self {
        match code {
            1001 => Self::Deactivated,
            1003 => Self::InitiallyDisabled,
            1004 => Self::DisabledByUser,
            1005 => Self::OfflineMode,
            1006 => Self::WorkshopMode,
            1007 => Self::MissingOperation,
            1008 => Self::MissingService,
            1009 => Self::PlayProtection,
            1010 => Self::PowerBudgetReached,
            1011 => Self::DeepSleep,
            1013 => Self::LocationDataDisabled,
            2001 => Self::LicenseInactive,
            2002 => Self::LicenseExpired,
            2003 => Self::MissingLicense,
            3001 => Self::UserNotVerified,
            3002 => Self::TermsAndConditionsNotAccepted,
            3003 => Self::InsufficientRights,
            3004 => Self::ConsentMissing,
            3005 => Self::LimitedFeature,
            3006 => Self::AuthAppCertError,
            4001 => Self::StatusUnsupported,
            _ => Self::Unknown,
        }
    }
}

impl From<CapabilityStatus> for u32 {
    fn from(status: CapabilityStatus) -> Self {
        match status {
            CapabilityStatus::Unknown => 0,
            CapabilityStatus::Deactivated => 1001,
            CapabilityStatus::InitiallyDisabled => 1003,
            CapabilityStatus::DisabledByUser => 1004,
            CapabilityStatus::OfflineMode => 1005,
            CapabilityStatus::WorkshopMode => 1006,
            CapabilityStatus::MissingOperation => 1007,
            CapabilityStatus::MissingService => 1008,
            CapabilityStatus::PlayProtection => 1009,
            CapabilityStatus::PowerBudgetReached => 1010,
            CapabilityStatus::DeepSleep => 1011,
            CapabilityStatus::LocationDataDisabled => 1013,
            CapabilityStatus::LicenseInactive => 2001,
            CapabilityStatus::LicenseExpired => 2002,
            CapabilityStatus::MissingLicense => 2003,
            CapabilityStatus::UserNotVerified => 3001,
            CapabilityStatus::TermsAndConditionsNotAccepted => 3002,
            CapabilityStatus::InsufficientRights => 3003,
            CapabilityStatus::ConsentMissing => 3004,
            CapabilityStatus::LimitedFeature => 3005,
            CapabilityStatus::AuthAppCertError => 3006,
            CapabilityStatus::StatusUnsupported => 4001,
        }
    }
}

/// A single capability of a vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    /// Capability identifier, immutable once set
    id: String,

    /// Owning vehicle back-reference
    owner: OwnerRef,

    /// Observed statuses, append-only
    pub statuses: Vec<CapabilityStatus>,

    /// Whether the capability is enabled
    pub enabled: bool,
}

impl Capability {
    /// Create a capability attached to its owning vehicle.
    ///
    /// Fails with a validation error when the id is empty.
    pub fn new(id: impl Into<String>, owner: OwnerRef) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(EnyaqError::validation(
                "capability_id".to_string(),
                "capability id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            owner,
            statuses: Vec::new(),
            enabled: true,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Append an observed status to the log
    pub fn record_status(&mut self, status: CapabilityStatus) {
        self.statuses.push(status);
    }

    /// Most recently observed status, if any
    pub fn current_status(&self) -> Option<CapabilityStatus> {
        self.statuses.last().copied()
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

impl Adopt for Capability {
    fn adopt(origin: Self, new_owner: &OwnerRef) -> Self {
        Self {
            owner: new_owner.clone(),
            ..origin
        }
    }
}

/// Registry of a vehicle's capabilities, keyed by capability id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    instance: InstanceId,
    owner: OwnerRef,
    entries: BTreeMap<String, Capability>,
}

impl Capabilities {
    pub fn new(owner: OwnerRef) -> Self {
        Self {
            instance: InstanceId::new(),
            owner,
            entries: BTreeMap::new(),
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Insert a capability, replacing any previous entry with the same id
    pub fn add(&mut self, capability: Capability) {
        self.entries.insert(capability.id().to_string(), capability);
    }

    pub fn get(&self, id: &str) -> Option<&Capability> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Capability> {
        self.entries.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Adopt for Capabilities {
    fn adopt(origin: Self, new_owner: &OwnerRef) -> Self {
        let entries = origin
            .entries
            .into_iter()
            .map(|(id, cap)| (id, Capability::adopt(cap, new_owner)))
            .collect();
        Self {
            instance: origin.instance,
            owner: new_owner.clone(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> OwnerRef {
        OwnerRef::new(InstanceId::new(), "/garage/TESTVIN")
    }

    #[test]
    fn capability_defaults() {
        let cap = Capability::new("charging", owner()).unwrap();
        assert_eq!(cap.id(), "charging");
        assert!(cap.enabled);
        assert!(cap.statuses.is_empty());
        assert_eq!(cap.to_string(), "charging");
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = Capability::new("", owner()).unwrap_err();
        assert!(matches!(err, EnyaqError::Validation { .. }));
    }

    #[test]
    fn unknown_codes_normalize() {
        assert_eq!(CapabilityStatus::from(9999), CapabilityStatus::Unknown);
        assert_eq!(CapabilityStatus::from(1002), CapabilityStatus::Unknown);
        assert_eq!(CapabilityStatus::from(1001), CapabilityStatus::Deactivated);
    }

    #[test]
    fn status_codes_round_trip() {
        for code in [
            0u32, 1001, 1003, 1004, 1005, 1006, 1007, 1008, 1009, 1010, 1011, 1013, 2001, 2002,
            2003, 3001, 3002, 3003, 3004, 3005, 3006, 4001,
        ] {
            assert_eq!(CapabilityStatus::from(code).code(), code);
        }
    }

    #[test]
    fn registry_replaces_by_id() {
        let mut caps = Capabilities::new(owner());
        caps.add(Capability::new("parking-position", owner()).unwrap());
        caps.add(Capability::new("parking-position", owner()).unwrap());
        assert_eq!(caps.len(), 1);
    }
}
