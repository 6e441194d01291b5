//! Cluster topology lookups: which hosts (and which disks on each host) to query.
//!
//! Nothing is cached: every call reflects the topology the API reports right now.

use tracing::debug;

use super::client::AtlasApi;
use super::paths;
use super::types::{Cluster, DiskList};
use crate::core::{Credentials, Result};

const URI_SCHEME: &str = "mongodb://";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostDisks {
    pub host: String,
    pub disks: Vec<String>,
}

/// Split a connection string into `host:port` identifiers.
pub fn hosts_from_uri(uri: &str) -> Vec<String> {
    let hosts = uri.strip_prefix(URI_SCHEME).unwrap_or(uri);
    // drop a trailing `/database?options` part
    let hosts = hosts.split('/').next().unwrap_or_default();
    hosts
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn resolve_hosts(api: &dyn AtlasApi, creds: &Credentials) -> Result<Vec<String>> {
    let path = paths::cluster(&creds.project_id, &creds.cluster_name);
    let cluster: Cluster = serde_json::from_value(api.get(&path, &[]).await?)?;
    let hosts = hosts_from_uri(cluster.mongo_uri.as_deref().unwrap_or_default());
    debug!(cluster = %creds.cluster_name, "resolved {} hosts", hosts.len());
    Ok(hosts)
}

pub async fn resolve_disks(
    api: &dyn AtlasApi,
    creds: &Credentials,
    host: &str,
) -> Result<HostDisks> {
    let path = paths::process_disks(&creds.project_id, host);
    let list: DiskList = serde_json::from_value(api.get(&path, &[]).await?)?;
    Ok(HostDisks {
        host: host.to_string(),
        disks: list.results.into_iter().map(|d| d.partition_name).collect(),
    })
}
