//! Climatization state for Skoda vehicles
//!
//! Wraps the generic climatization shape with the manufacturer-specific
//! settings record and a fault map populated by the transport layer.

use crate::fault::Fault;
use crate::objects::{Adopt, InstanceId, OwnerRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Climatization settings as exposed by the Skoda API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimatizationSettings {
    /// Target cabin temperature in degrees Celsius
    pub target_temperature_c: Option<f64>,

    /// Window heating enabled
    pub window_heating: Option<bool>,

    /// Front-left seat heating enabled
    pub seat_heating_front_left: Option<bool>,

    /// Front-right seat heating enabled
    pub seat_heating_front_right: Option<bool>,

    /// Start climatization when the vehicle is unlocked
    pub climatization_at_unlock: Option<bool>,
}

/// Climatization sub-object of a vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Climatization {
    instance: InstanceId,
    owner: OwnerRef,

    /// Settings tree, child of this object
    pub settings: ClimatizationSettings,

    /// Faults keyed by fault code, populated by the transport layer
    errors: BTreeMap<String, Fault>,
}

impl Climatization {
    /// Fresh construction with default settings, attached to `owner`
    pub fn new(owner: OwnerRef) -> Self {
        Self {
            instance: InstanceId::new(),
            owner,
            settings: ClimatizationSettings::default(),
            errors: BTreeMap::new(),
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Record a fault, replacing any previous report with the same code
    pub fn report_fault(&mut self, fault: Fault) {
        self.errors.insert(fault.code.clone(), fault);
    }

    pub fn fault(&self, code: &str) -> Option<&Fault> {
        self.errors.get(code)
    }

    pub fn faults(&self) -> impl Iterator<Item = &Fault> {
        self.errors.values()
    }

    pub fn clear_faults(&mut self) {
        self.errors.clear();
    }
}

impl Adopt for Climatization {
    fn adopt(origin: Self, new_owner: &OwnerRef) -> Self {
        Self {
            owner: new_owner.clone(),
            ..origin
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
    fn fresh_climatization_has_defaults() {
        let clima = Climatization::new(owner());
        assert_eq!(clima.settings, ClimatizationSettings::default());
        assert_eq!(clima.faults().count(), 0);
    }

    #[test]
    fn faults_replace_by_code() {
        let mut clima = Climatization::new(owner());
        clima.report_fault(Fault::new("CLIMA_SENSOR", None));
        clima.report_fault(Fault::new("CLIMA_SENSOR", Some("stale".into())));
        assert_eq!(clima.faults().count(), 1);
        assert_eq!(
            clima.fault("CLIMA_SENSOR").and_then(|f| f.description.clone()),
            Some("stale".to_string())
        );
    }
}
