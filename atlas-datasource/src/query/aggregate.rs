use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde::Serialize;
use tracing::{debug, info};

use super::translate::QueryPlan;
use crate::atlas::measurements::{fetch_disk_measurements, fetch_process_measurements};
use crate::atlas::{resolve_disks, resolve_hosts, AtlasApi, MeasurementsPage};
use crate::catalog::Catalog;
use crate::core::{Credentials, Result};

/// Which upstream data points make it into a series.
///
/// `DropFalsy` is the historical behavior and drops legitimate zero readings along with
/// nulls. `DropNull` keeps zeros and only discards missing or non-finite values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointFilter {
    #[default]
    DropFalsy,
    DropNull,
}

impl PointFilter {
    pub fn from_keep_zero(keep_zero: bool) -> Self {
        if keep_zero {
            PointFilter::DropNull
        } else {
            PointFilter::DropFalsy
        }
    }

    pub fn keep(self, value: Option<f64>) -> Option<f64> {
        let v = value?;
        match self {
            PointFilter::DropFalsy if v == 0.0 || v.is_nan() => None,
            PointFilter::DropNull if !v.is_finite() => None,
            _ => Some(v),
        }
    }
}

/// How upstream responses are turned into series
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeriesOptions {
    pub point_filter: PointFilter,
    /// Append the partition name to disk series targets. Off by default, in which case
    /// every series is keyed `"<label> (<processId>)"`.
    pub label_disk_partitions: bool,
}

/// One dashboard series; each point serializes as `[value, epoch_ms]`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TimeSeries {
    pub target: String,
    pub datapoints: Vec<(f64, i64)>,
}

pub fn timestamp_to_epoch_ms(timestamp: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Resolve the topology, fan out one request per host (process metrics) and per host
/// partition (disk metrics), and flatten every response into series.
///
/// The fan-out is all-or-nothing: the first failing request fails the whole query.
pub async fn execute(
    api: &dyn AtlasApi,
    creds: &Credentials,
    plan: &QueryPlan,
    catalog: &Catalog,
    options: SeriesOptions,
) -> Result<Vec<TimeSeries>> {
    let hosts = resolve_hosts(api, creds).await?;
    if plan.is_empty() {
        debug!("no known metrics requested");
    }

    let host_disks = match plan.disk {
        Some(_) => try_join_all(hosts.iter().map(|h| resolve_disks(api, creds, h))).await?,
        None => Vec::new(),
    };

    let mut requests: Vec<BoxFuture<'_, Result<MeasurementsPage>>> = Vec::new();
    if let Some(disk) = &plan.disk {
        for hd in &host_disks {
            for partition in &hd.disks {
                requests.push(
                    fetch_disk_measurements(
                        api,
                        &creds.project_id,
                        &hd.host,
                        partition,
                        &disk.params,
                    )
                    .boxed(),
                );
            }
        }
    }
    if let Some(host) = &plan.host {
        for h in &hosts {
            requests.push(
                fetch_process_measurements(api, &creds.project_id, h, &host.params).boxed(),
            );
        }
    }

    info!(
        hosts = hosts.len(),
        granularity = %plan.granularity,
        "issuing {} measurement requests",
        requests.len()
    );
    let pages = try_join_all(requests).await?;

    Ok(flatten(&pages, catalog, options))
}

/// One series per measurement block, in response order.
pub fn flatten(
    pages: &[MeasurementsPage],
    catalog: &Catalog,
    options: SeriesOptions,
) -> Vec<TimeSeries> {
    let mut out = Vec::new();
    for page in pages {
        for measurement in &page.measurements {
            let label = catalog
                .label(&measurement.name)
                .unwrap_or(measurement.name.as_str());
            let target = match &page.partition_name {
                Some(partition) if options.label_disk_partitions => {
                    format!("{} ({} {})", label, page.process_id, partition)
                }
                _ => format!("{} ({})", label, page.process_id),
            };

            let mut datapoints = Vec::with_capacity(measurement.data_points.len());
            for point in &measurement.data_points {
                let Some(value) = options.point_filter.keep(point.value) else {
                    continue;
                };
                match timestamp_to_epoch_ms(&point.timestamp) {
                    Some(ts) => datapoints.push((value, ts)),
                    None => debug!("skipping point with bad timestamp {:?}", point.timestamp),
                }
            }

            out.push(TimeSeries { target, datapoints });
        }
    }
    out
}
