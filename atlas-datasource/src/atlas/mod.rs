//! Access to the Atlas monitoring API
//!
//! `client` owns the HTTP transport, `paths` the endpoint layout, `types` the wire shapes,
//! and `topology` / `measurements` the typed calls built on top of them.

pub mod client;
pub mod measurements;
pub mod paths;
pub mod topology;
pub mod types;

pub use client::{AtlasApi, AtlasClient, QueryParams};
pub use paths::ApiPath;
pub use topology::{HostDisks, resolve_disks, resolve_hosts};
pub use types::{DataPoint, Measurement, MeasurementsPage};
