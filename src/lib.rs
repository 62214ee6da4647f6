//! # Enyaq - Skoda Connect vehicle data connector
//!
//! A Rust connector modeling Skoda vehicles on top of a generic
//! vehicle-data shape: capabilities, climatization and charging state,
//! with a small web UI registration for the host shell.
//!
//! ## Features
//!
//! - **Typed vehicle model**: one concrete vehicle record tagged with its
//!   drivetrain kind, charging present only where it makes sense
//! - **Clone-and-attach**: vehicles rebuilt from an origin snapshot adopt
//!   the origin's sub-objects and re-parent them, with move semantics
//!   guaranteeing a single live object graph
//! - **Tolerant wire decoding**: unknown capability status codes and
//!   charging state strings normalize instead of failing
//! - **Transport boundary**: HTTP, auth and caching live behind the
//!   `VehicleApi` trait, outside this crate
//! - **Web Interface**: health, navigation and vehicle routes under
//!   `/skoda`
//! - **Configuration**: YAML-based configuration with validation
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `objects`: Identity and ownership primitives (`Adopt`, `OwnerRef`)
//! - `capability`: Capability registry and status codes
//! - `climatization`: Climatization settings and faults
//! - `charging`: Charging state and wire mapping
//! - `fault`: Fault records reported by the API
//! - `vehicle`: Vehicle record, construction protocol, garage
//! - `wire`: API payload types and timestamp parsing
//! - `connector`: Applies payloads to the model, transport trait
//! - `web`: UI registration and HTTP server

pub mod capability;
pub mod charging;
pub mod climatization;
pub mod config;
pub mod connector;
pub mod error;
pub mod fault;
pub mod logging;
pub mod objects;
pub mod vehicle;
#[cfg(feature = "web")]
pub mod web;
pub mod wire;

// Re-export commonly used types
pub use config::Config;
pub use connector::{Connector, VehicleApi};
pub use error::{EnyaqError, Result};
pub use vehicle::{Garage, Vehicle, VehicleKind, VehicleSource};
