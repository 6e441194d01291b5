//! Dashboard datasource adapter for the MongoDB Atlas monitoring API.
//!
//! Dashboard queries (time range, interval, metric names) are translated into Atlas
//! measurement requests, fanned out over every host of the cluster (and every disk
//! partition for disk metrics), and reshaped into `{target, datapoints}` series.

pub mod atlas;
pub mod catalog;
pub mod core;
pub mod query;
pub mod server;
