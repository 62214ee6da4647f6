//! Charging state for Skoda electric and hybrid vehicles
//!
//! The Skoda API reports charging through its own set of state strings;
//! this module maps them onto the generic charging states the rest of the
//! model works with.

use crate::fault::Fault;
use crate::objects::{Adopt, InstanceId, OwnerRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generic charging state used across the vehicle model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingState {
    Off,
    ReadyForCharging,
    Charging,
    Conservation,
    Discharging,
    Error,
    Unsupported,
    Unknown,
}

/// Charging states as reported on the wire by the Skoda API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkodaChargingState {
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "connectCable")]
    ConnectCable,
    #[serde(rename = "readyForCharging")]
    ReadyForCharging,
    #[serde(rename = "notReadyForCharging")]
    NotReadyForCharging,
    #[serde(rename = "conservation")]
    Conservation,
    #[serde(rename = "chargePurposeReachedAndNotConservationCharging")]
    ChargePurposeReachedNotConservationCharging,
    #[serde(rename = "chargePurposeReachedAndConservation")]
    ChargePurposeReachedConservation,
    #[serde(rename = "charging")]
    Charging,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "unsupported")]
    Unsupported,
    #[serde(rename = "discharging")]
    Discharging,
    #[serde(other, rename = "unknown charging state")]
    Unknown,
}

impl SkodaChargingState {
    /// Parse a wire value, normalizing unrecognized strings to `Unknown`
    pub fn from_wire(value: &str) -> Self {
        match value {
            "off" => Self::Off,
            "connectCable" => Self::ConnectCable,
            "readyForCharging" => Self::ReadyForCharging,
            "notReadyForCharging" => Self::NotReadyForCharging,
            "conservation" => Self::Conservation,
            "chargePurposeReachedAndNotConservationCharging" => {
                Self::ChargePurposeReachedNotConservationCharging
            }
            "chargePurposeReachedAndConservation" => Self::ChargePurposeReachedConservation,
            "charging" => Self::Charging,
            "error" => Self::Error,
            "unsupported" => Self::Unsupported,
            "discharging" => Self::Discharging,
            _ => Self::Unknown,
        }
    }
}

/// Map a Skoda charging state onto the generic charging state
pub fn map_charging_state(state: SkodaChargingState) -> ChargingState {
    match state {
        SkodaChargingState::Off
        | SkodaChargingState::ConnectCable
        | SkodaChargingState::NotReadyForCharging => ChargingState::Off,
        SkodaChargingState::ReadyForCharging
        | SkodaChargingState::ChargePurposeReachedNotConservationCharging => {
            ChargingState::ReadyForCharging
        }
        SkodaChargingState::Conservation
        | SkodaChargingState::ChargePurposeReachedConservation => ChargingState::Conservation,
        SkodaChargingState::Charging => ChargingState::Charging,
        SkodaChargingState::Error => ChargingState::Error,
        SkodaChargingState::Unsupported => ChargingState::Unsupported,
        SkodaChargingState::Discharging => ChargingState::Discharging,
        SkodaChargingState::Unknown => ChargingState::Unknown,
    }
}

/// Charging sub-object of an electric or hybrid vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charging {
    instance: InstanceId,
    owner: OwnerRef,

    /// Generic charging state
    pub state: ChargingState,

    /// Last raw manufacturer state, kept for diagnostics
    pub raw_state: Option<SkodaChargingState>,

    /// Faults keyed by fault code, populated by the transport layer
    errors: BTreeMap<String, Fault>,
}

impl Charging {
    /// Fresh construction attached to `owner`
    pub fn new(owner: OwnerRef) -> Self {
        Self {
            instance: InstanceId::new(),
            owner,
            state: ChargingState::Unknown,
            raw_state: None,
            errors: BTreeMap::new(),
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Record a manufacturer state, updating the generic state through
    /// the fixed mapping table
    pub fn record_state(&mut self, raw: SkodaChargingState) {
        self.raw_state = Some(raw);
        self.state = map_charging_state(raw);
    }

    pub fn report_fault(&mut self, fault: Fault) {
        self.errors.insert(fault.code.clone(), fault);
    }

    pub fn faults(&self) -> impl Iterator<Item = &Fault> {
        self.errors.values()
    }
}

impl Adopt for Charging {
    fn adopt(origin: Self, new_owner: &OwnerRef) -> Self {
        Self {
            owner: new_owner.clone(),
            ..origin
        }
    }
}
