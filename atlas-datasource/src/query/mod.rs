//! Dashboard query execution
//!
//! - `translate`: pure conversion of a dashboard query into per-family upstream parameters
//! - `aggregate`: the concurrent fan-out over hosts/disks and the flattening into series

pub mod aggregate;
pub mod translate;

pub use aggregate::{execute, flatten, PointFilter, SeriesOptions, TimeSeries};
pub use translate::{Granularity, QueryPlan, QueryRequest};
