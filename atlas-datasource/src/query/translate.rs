use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::atlas::QueryParams;
use crate::catalog::{Catalog, MetricFamily};

/// Body of a dashboard `/query` request. Fields the adapter has no use for are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub range: TimeRange,
    #[serde(default)]
    pub interval_ms: Option<f64>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub target: Option<String>,
}

/// Upstream sampling bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    OneMinute,
    FiveMinutes,
    OneHour,
    OneDay,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::OneMinute => "PT1M",
            Granularity::FiveMinutes => "PT5M",
            Granularity::OneHour => "PT1H",
            Granularity::OneDay => "P1D",
        }
    }

    /// First bucket whose threshold the interval does not exceed. A missing interval
    /// matches no threshold and falls through to one day.
    pub fn for_interval_ms(interval_ms: Option<f64>) -> Self {
        let secs = interval_ms.map_or(f64::NAN, |ms| ms / 1000.0);
        if secs <= 60.0 {
            Granularity::OneMinute
        } else if secs <= 500.0 {
            Granularity::FiveMinutes
        } else if secs <= 3600.0 {
            Granularity::OneHour
        } else {
            Granularity::OneDay
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics of one family plus the full parameter list to send with them
#[derive(Clone, Debug, PartialEq)]
pub struct FamilyRequest {
    pub metrics: Vec<String>,
    pub params: QueryParams,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryPlan {
    pub granularity: Granularity,
    /// Process-level metrics, queried once per host
    pub host: Option<FamilyRequest>,
    /// Disk-level metrics, queried once per host partition
    pub disk: Option<FamilyRequest>,
}

/// Split requested names into (process, disk) metrics, dropping anything not in the catalog.
pub fn partition_targets<'a, I>(names: I, catalog: &Catalog) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut host_targets = Vec::new();
    let mut disk_targets = Vec::new();
    for name in names {
        match catalog.family_of(name) {
            Some(MetricFamily::Process) => host_targets.push(name.to_string()),
            Some(MetricFamily::Disk) => disk_targets.push(name.to_string()),
            None => debug!("dropping unknown metric {:?}", name),
        }
    }
    (host_targets, disk_targets)
}

impl QueryPlan {
    pub fn build(req: &QueryRequest, catalog: &Catalog) -> Self {
        let names = req.targets.iter().filter_map(|t| t.target.as_deref());
        let (host_targets, disk_targets) = partition_targets(names, catalog);

        let granularity = Granularity::for_interval_ms(req.interval_ms);
        let base: QueryParams = vec![
            ("start".to_string(), req.range.from.clone()),
            ("end".to_string(), req.range.to.clone()),
            ("granularity".to_string(), granularity.as_str().to_string()),
        ];

        Self {
            granularity,
            host: family_request(&base, host_targets),
            disk: family_request(&base, disk_targets),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.disk.is_none()
    }
}

fn family_request(base: &QueryParams, metrics: Vec<String>) -> Option<FamilyRequest> {
    if metrics.is_empty() {
        return None;
    }
    let mut params = base.clone();
    params.extend(metrics.iter().map(|m| ("m".to_string(), m.clone())));
    Some(FamilyRequest { metrics, params })
}
