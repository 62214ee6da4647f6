//! Skoda vehicle model
//!
//! A vehicle is a single concrete record tagged with its drivetrain kind;
//! electric and hybrid vehicles additionally carry a charging sub-object.
//! Vehicles are built either fresh or by cloning a prior snapshot
//! ("origin"), in which case the origin's sub-objects are moved into the
//! new vehicle and re-parented rather than copied.

use crate::capability::Capabilities;
use crate::charging::Charging;
use crate::climatization::Climatization;
use crate::error::{EnyaqError, Result};
use crate::objects::{Adopt, InstanceId, OwnerRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Manufacturer display name, set on every vehicle regardless of how it
/// was constructed
pub const MANUFACTURER: &str = "Škoda";

/// Drivetrain kind of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Electric,
    Combustion,
    Hybrid,
}

impl VehicleKind {
    /// Whether vehicles of this kind carry a charging sub-object
    pub fn has_charging(self) -> bool {
        matches!(self, Self::Electric | Self::Hybrid)
    }
}

/// Odometer reading with its capture timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odometer {
    pub km: f64,
    pub captured_at: DateTime<Utc>,
}

/// Inputs for a fresh vehicle construction
#[derive(Debug, Clone, Default)]
pub struct FreshArgs {
    /// Vehicle identification number; may still be unset at construction
    pub vin: Option<String>,

    /// Identifier of the connector managing this vehicle
    pub connector_id: Option<String>,

    /// Whether the vehicle keeps an image store (resolved from config)
    pub support_images: bool,
}

/// Source of a vehicle construction.
///
/// Fresh inputs and an origin snapshot are mutually exclusive by
/// construction; a caller cannot supply both.
#[derive(Debug)]
pub enum VehicleSource {
    Fresh(FreshArgs),
    Origin(Box<Vehicle>),
}

/// A Skoda vehicle composing capabilities, climatization and (for
/// electric/hybrid kinds) charging state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    instance: InstanceId,
    kind: VehicleKind,
    vin: Option<String>,
    manufacturer: String,
    connector_id: Option<String>,

    /// License plate, when known
    pub license_plate: Option<String>,

    /// Last known odometer reading
    pub odometer: Option<Odometer>,

    /// Capability registry
    pub capabilities: Capabilities,

    /// Climatization sub-object
    pub climatization: Climatization,

    /// Charging sub-object, present for electric/hybrid kinds
    pub charging: Option<Charging>,

    /// Vehicle images keyed by image id, present when image support is on
    images: Option<BTreeMap<String, Vec<u8>>>,
}

fn garage_address(vin: Option<&str>, instance: InstanceId) -> String {
    match vin {
        Some(v) => format!("/garage/{v}"),
        None => format!("/garage/{instance}"),
    }
}

impl Vehicle {
    /// Construct a vehicle of the given kind, either fresh or from an
    /// origin snapshot.
    ///
    /// The origin path moves the origin's sub-objects into the new
    /// vehicle and rebinds their owner references; the origin is consumed,
    /// so exactly one live object graph references them afterwards.
    /// Cloning a charging-capable kind from an origin that carries no
    /// charging sub-object silently yields none. Either way the
    /// manufacturer field ends up as the fixed brand literal.
    pub fn new(kind: VehicleKind, source: VehicleSource) -> Self {
        let mut vehicle = match source {
            VehicleSource::Origin(origin) => {
                let origin = *origin;
                let instance = InstanceId::new();
                let owner = OwnerRef::new(instance, garage_address(origin.vin.as_deref(), instance));
                let charging = if kind.has_charging() {
                    origin.charging.map(|c| Charging::adopt(c, &owner))
                } else {
                    None
                };
                Self {
                    instance,
                    kind,
                    vin: origin.vin,
                    manufacturer: origin.manufacturer,
                    connector_id: origin.connector_id,
                    license_plate: origin.license_plate,
                    odometer: origin.odometer,
                    capabilities: Capabilities::adopt(origin.capabilities, &owner),
                    climatization: Climatization::adopt(origin.climatization, &owner),
                    charging,
                    images: origin.images,
                }
            }
            VehicleSource::Fresh(args) => {
                let instance = InstanceId::new();
                let owner = OwnerRef::new(instance, garage_address(args.vin.as_deref(), instance));
                let charging = kind.has_charging().then(|| Charging::new(owner.clone()));
                Self {
                    instance,
                    kind,
                    vin: args.vin,
                    manufacturer: String::new(),
                    connector_id: args.connector_id,
                    license_plate: None,
                    odometer: None,
                    capabilities: Capabilities::new(owner.clone()),
                    climatization: Climatization::new(owner.clone()),
                    charging,
                    images: args.support_images.then(BTreeMap::new),
                }
            }
        };
        vehicle.manufacturer = MANUFACTURER.to_string();
        vehicle
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn vin(&self) -> Option<&str> {
        self.vin.as_deref()
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn connector_id(&self) -> Option<&str> {
        self.connector_id.as_deref()
    }

    /// Back-reference handle for sub-objects owned by this vehicle
    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new(self.instance, garage_address(self.vin.as_deref(), self.instance))
    }

    /// Whether this vehicle keeps an image store
    pub fn images_supported(&self) -> bool {
        self.images.is_some()
    }

    /// Store an image; returns false when image support is off
    pub fn set_image(&mut self, id: impl Into<String>, data: Vec<u8>) -> bool {
        match self.images.as_mut() {
            Some(images) => {
                images.insert(id.into(), data);
                true
            }
            None => false,
        }
    }

    pub fn image(&self, id: &str) -> Option<&[u8]> {
        self.images.as_ref()?.get(id).map(Vec::as_slice)
    }
}

/// VIN-keyed collection of the vehicles known to the connector
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Garage {
    vehicles: BTreeMap<String, Vehicle>,
}

impl Garage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vehicle(&mut self, vin: impl Into<String>, vehicle: Vehicle) {
        self.vehicles.insert(vin.into(), vehicle);
    }

    pub fn get_vehicle(&self, vin: &str) -> Option<&Vehicle> {
        self.vehicles.get(vin)
    }

    pub fn get_vehicle_mut(&mut self, vin: &str) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(vin)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vehicle)> {
        self.vehicles.iter().map(|(vin, v)| (vin.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Re-construct a vehicle as another kind via the origin clone
    /// protocol, keeping its sub-objects.
    ///
    /// Used when later data reveals the drivetrain, e.g. a generic entry
    /// turns out to be electric. A no-op when the kind already matches.
    pub fn upgrade_kind(&mut self, vin: &str, kind: VehicleKind) -> Result<()> {
        let Some(current) = self.vehicles.get(vin) else {
            return Err(EnyaqError::api(format!("Vehicle {vin} not found in garage")));
        };
        if current.kind() == kind {
            return Ok(());
        }
        // remove/re-insert keeps the clone a single-owner move
        if let Some(origin) = self.vehicles.remove(vin) {
            let upgraded = Vehicle::new(kind, VehicleSource::Origin(Box::new(origin)));
            self.vehicles.insert(vin.to_string(), upgraded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(kind: VehicleKind, vin: &str) -> Vehicle {
        Vehicle::new(
            kind,
            VehicleSource::Fresh(FreshArgs {
                vin: Some(vin.to_string()),
                ..FreshArgs::default()
            }),
        )
    }

    #[test]
    fn fresh_vehicle_owns_its_subobjects() {
        let vehicle = fresh(VehicleKind::Electric, "TMBJB9NY6RF000001");
        let owner = vehicle.owner_ref();
        assert_eq!(vehicle.capabilities.owner(), &owner);
        assert_eq!(vehicle.climatization.owner(), &owner);
        assert_eq!(vehicle.charging.as_ref().map(Charging::owner), Some(&owner));
        assert_eq!(vehicle.manufacturer(), "Škoda");
    }

    #[test]
    fn combustion_has_no_charging() {
        let vehicle = fresh(VehicleKind::Combustion, "TMBJB9NY6RF000002");
        assert!(vehicle.charging.is_none());
    }

    #[test]
    fn garage_upgrade_preserves_capabilities_instance() {
        let mut garage = Garage::new();
        let vehicle = fresh(VehicleKind::Combustion, "TMBJB9NY6RF000003");
        let caps_id = vehicle.capabilities.instance_id();
        garage.add_vehicle("TMBJB9NY6RF000003", vehicle);

        garage
            .upgrade_kind("TMBJB9NY6RF000003", VehicleKind::Electric)
            .unwrap();
        let upgraded = garage.get_vehicle("TMBJB9NY6RF000003").unwrap();
        assert_eq!(upgraded.kind(), VehicleKind::Electric);
        assert_eq!(upgraded.capabilities.instance_id(), caps_id);
        // origin was combustion, so there is no charging object to adopt
        assert!(upgraded.charging.is_none());
    }

    #[test]
    fn upgrade_unknown_vin_is_an_error() {
        let mut garage = Garage::new();
        assert!(garage.upgrade_kind("MISSING", VehicleKind::Electric).is_err());
    }
}
