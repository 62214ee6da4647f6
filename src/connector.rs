//! Connector core: applies Skoda API payloads to the vehicle model
//!
//! Transport (HTTP, authentication, caching, retries) lives behind the
//! [`VehicleApi`] trait and is implemented outside this crate. The
//! connector drives a `VehicleApi`, folds the decoded payloads into its
//! garage and keeps simple request timing statistics.

use crate::capability::{Capabilities, Capability, CapabilityStatus};
use crate::config::ConnectorConfig;
use crate::error::{EnyaqError, Result};
use crate::logging::get_logger;
use crate::vehicle::{FreshArgs, Garage, Vehicle, VehicleKind, VehicleSource};
use crate::wire::{GarageResponse, VehicleStatusResponse, parse_timestamp};
use std::time::{Duration, Instant};

/// Identifier this connector stamps onto the vehicles it manages
pub const CONNECTOR_ID: &str = "skoda";

/// Transport collaborator boundary.
///
/// Implementations fetch and decode the two Skoda Connect endpoints the
/// connector consumes. Session management and retry policy belong to the
/// implementation, not to this crate.
#[async_trait::async_trait]
pub trait VehicleApi: Send + Sync {
    async fn fetch_garage(&self) -> Result<GarageResponse>;
    async fn fetch_vehicle_status(&self, vin: &str) -> Result<VehicleStatusResponse>;
}

/// Skoda connector holding the garage of known vehicles
pub struct Connector {
    config: ConnectorConfig,
    garage: Garage,
    elapsed: Vec<Duration>,
    logger: crate::logging::StructuredLogger,
}

impl Connector {
    pub fn new(config: ConnectorConfig) -> Self {
        let logger = get_logger("connector");
        Self {
            config,
            garage: Garage::new(),
            elapsed: Vec::new(),
            logger,
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn garage(&self) -> &Garage {
        &self.garage
    }

    pub fn garage_mut(&mut self) -> &mut Garage {
        &mut self.garage
    }

    /// Fetch everything the connector knows how to fetch
    pub async fn fetch_all(&mut self, api: &dyn VehicleApi) -> Result<()> {
        self.fetch_vehicles(api).await
    }

    /// Fetch the garage listing and a status for every listed vehicle
    pub async fn fetch_vehicles(&mut self, api: &dyn VehicleApi) -> Result<()> {
        let started = Instant::now();
        let listing = api.fetch_garage().await?;
        self.record_elapsed(started.elapsed());

        let vins = self.apply_garage(&listing)?;
        for vin in vins {
            let started = Instant::now();
            let status = api.fetch_vehicle_status(&vin).await?;
            self.record_elapsed(started.elapsed());
            self.apply_vehicle_status(&vin, &status)?;
        }
        Ok(())
    }

    /// Fold a garage listing into the garage; returns the VINs present in
    /// the payload.
    ///
    /// New vehicles enter as electric, the listing endpoint does not
    /// distinguish drivetrains; `Garage::upgrade_kind` corrects the tag
    /// when later data disagrees.
    pub fn apply_garage(&mut self, listing: &GarageResponse) -> Result<Vec<String>> {
        let mut vins = Vec::new();
        for entry in &listing.vehicles {
            let Some(vin) = entry.vin.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            if self.garage.get_vehicle(vin).is_none() {
                let vehicle = Vehicle::new(
                    VehicleKind::Electric,
                    VehicleSource::Fresh(FreshArgs {
                        vin: Some(vin.to_string()),
                        connector_id: Some(CONNECTOR_ID.to_string()),
                        support_images: self.config.support_images,
                    }),
                );
                self.logger.info(&format!("Adding vehicle {vin} to garage"));
                self.garage.add_vehicle(vin, vehicle);
            }
            let Some(vehicle) = self.garage.get_vehicle_mut(vin) else {
                continue;
            };
            if entry.license_plate.is_some() {
                vehicle.license_plate = entry.license_plate.clone();
            }
            let owner = vehicle.owner_ref();
            apply_capabilities(&mut vehicle.capabilities, entry, &owner)?;
            vins.push(vin.to_string());
        }
        Ok(vins)
    }

    /// Fold a vehicle status payload into the vehicle with the given VIN
    pub fn apply_vehicle_status(
        &mut self,
        vin: &str,
        status: &VehicleStatusResponse,
    ) -> Result<()> {
        let vehicle = self
            .garage
            .get_vehicle_mut(vin)
            .ok_or_else(|| EnyaqError::api(format!("Vehicle {vin} not found in garage")))?;
        let remote = status
            .remote
            .as_ref()
            .ok_or_else(|| EnyaqError::api("Could not fetch vehicle status"))?;
        let captured_at = remote
            .captured_at
            .as_deref()
            .ok_or_else(|| EnyaqError::api("Could not fetch vehicle status, capturedAt missing"))?;
        let captured_at = parse_timestamp(captured_at)?;

        if let Some(km) = remote.mileage_in_km {
            vehicle.odometer = Some(crate::vehicle::Odometer { km, captured_at });
        }
        Ok(())
    }

    /// Record the elapsed time of one API request
    pub fn record_elapsed(&mut self, elapsed: Duration) {
        self.elapsed.push(elapsed);
    }

    /// Mean request time over everything recorded so far
    pub fn average_elapsed(&self) -> Option<Duration> {
        if self.elapsed.is_empty() {
            return None;
        }
        let total: Duration = self.elapsed.iter().sum();
        Some(total / self.elapsed.len() as u32)
    }

    /// Release resources and log the shutdown
    pub fn shutdown(&mut self) {
        self.logger.info("Skoda connector shutting down");
    }
}

fn apply_capabilities(
    capabilities: &mut Capabilities,
    entry: &crate::wire::GarageVehicle,
    owner: &crate::objects::OwnerRef,
) -> Result<()> {
    for wire_cap in &entry.capabilities {
        if capabilities.get(&wire_cap.id).is_none() {
            capabilities.add(Capability::new(wire_cap.id.clone(), owner.clone())?);
        }
        // insert above guarantees the entry exists
        if let Some(cap) = capabilities.get_mut(&wire_cap.id) {
            if let Some(enabled) = wire_cap.enabled {
                cap.enabled = enabled;
            }
            for code in &wire_cap.statuses {
                cap.record_status(CapabilityStatus::from(*code));
            }
        }
    }
    Ok(())
}
