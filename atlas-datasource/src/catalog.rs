//! Static catalog of the measurements the datasource can chart
//!
//! Two disjoint families exist: process-level measurements, fetched per host, and
//! disk-level measurements, fetched per host partition. Each metric name maps to a display
//! label derived from the name itself. The catalog is built once and shared read-only.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

pub const PROCESS_METRICS: &[&str] = &[
    "ASSERT_REGULAR",
    "ASSERT_WARNING",
    "ASSERT_MSG",
    "ASSERT_USER",
    "CACHE_BYTES_READ_INTO",
    "CACHE_BYTES_WRITTEN_FROM",
    "CACHE_USAGE_DIRTY",
    "CACHE_USAGE_USED",
    "CONNECTIONS",
    "CURSORS_TOTAL_OPEN",
    "CURSORS_TOTAL_TIMED_OUT",
    "DB_STORAGE_TOTAL",
    "DB_DATA_SIZE_TOTAL",
    "DOCUMENT_METRICS_RETURNED",
    "DOCUMENT_METRICS_INSERTED",
    "DOCUMENT_METRICS_UPDATED",
    "DOCUMENT_METRICS_DELETED",
    "EXTRA_INFO_PAGE_FAULTS",
    "GLOBAL_LOCK_CURRENT_QUEUE_TOTAL",
    "GLOBAL_LOCK_CURRENT_QUEUE_READERS",
    "GLOBAL_LOCK_CURRENT_QUEUE_WRITERS",
    "MEMORY_RESIDENT",
    "MEMORY_VIRTUAL",
    "MEMORY_MAPPED",
    "NETWORK_BYTES_IN",
    "NETWORK_BYTES_OUT",
    "NETWORK_NUM_REQUESTS",
    "OPCOUNTER_CMD",
    "OPCOUNTER_QUERY",
    "OPCOUNTER_UPDATE",
    "OPCOUNTER_DELETE",
    "OPCOUNTER_GETMORE",
    "OPCOUNTER_INSERT",
    "OPCOUNTER_REPL_CMD",
    "OPCOUNTER_REPL_UPDATE",
    "OPCOUNTER_REPL_DELETE",
    "OPCOUNTER_REPL_INSERT",
    "OPERATIONS_SCAN_AND_ORDER",
    "OP_EXECUTION_TIME_READS",
    "OP_EXECUTION_TIME_WRITES",
    "OP_EXECUTION_TIME_COMMANDS",
    "OPLOG_MASTER_TIME",
    "OPLOG_RATE_GB_PER_HOUR",
    "QUERY_EXECUTOR_SCANNED",
    "QUERY_EXECUTOR_SCANNED_OBJECTS",
    "QUERY_TARGETING_SCANNED_PER_RETURNED",
    "QUERY_TARGETING_SCANNED_OBJECTS_PER_RETURNED",
    "TICKETS_AVAILABLE_READS",
    "TICKETS_AVAILABLE_WRITES",
    "PROCESS_CPU_USER",
    "PROCESS_CPU_KERNEL",
    "PROCESS_CPU_CHILDREN_USER",
    "PROCESS_CPU_CHILDREN_KERNEL",
    "PROCESS_NORMALIZED_CPU_USER",
    "PROCESS_NORMALIZED_CPU_KERNEL",
    "PROCESS_NORMALIZED_CPU_CHILDREN_USER",
    "PROCESS_NORMALIZED_CPU_CHILDREN_KERNEL",
    "SYSTEM_CPU_USER",
    "SYSTEM_CPU_KERNEL",
    "SYSTEM_CPU_NICE",
    "SYSTEM_CPU_IOWAIT",
    "SYSTEM_CPU_IRQ",
    "SYSTEM_CPU_SOFTIRQ",
    "SYSTEM_CPU_GUEST",
    "SYSTEM_CPU_STEAL",
    "SYSTEM_NORMALIZED_CPU_USER",
    "SYSTEM_NORMALIZED_CPU_KERNEL",
    "SYSTEM_NORMALIZED_CPU_NICE",
    "SYSTEM_NORMALIZED_CPU_IOWAIT",
    "SYSTEM_NORMALIZED_CPU_IRQ",
    "SYSTEM_NORMALIZED_CPU_SOFTIRQ",
    "SYSTEM_NORMALIZED_CPU_GUEST",
    "SYSTEM_NORMALIZED_CPU_STEAL",
];

pub const DISK_METRICS: &[&str] = &[
    "DISK_PARTITION_IOPS_READ",
    "DISK_PARTITION_IOPS_WRITE",
    "DISK_PARTITION_IOPS_TOTAL",
    "DISK_PARTITION_LATENCY_READ",
    "DISK_PARTITION_LATENCY_WRITE",
    "DISK_PARTITION_UTILIZATION",
    "DISK_PARTITION_SPACE_FREE",
    "DISK_PARTITION_SPACE_USED",
    "DISK_PARTITION_SPACE_PERCENT_FREE",
    "DISK_PARTITION_SPACE_PERCENT_USED",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricFamily {
    Process,
    Disk,
}

#[derive(Clone, Debug)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub label: String,
    pub family: MetricFamily,
}

/// `/search` response item
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SearchEntry {
    pub text: String,
    pub value: String,
}

pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<&'static str, usize>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// Process-wide catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// `OPLOG_RATE_GB_PER_HOUR` -> `Oplog rate gb per hour`
pub fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ").to_lowercase();
    let spaced = spaced.trim();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Catalog {
    fn build() -> Self {
        let entries: Vec<CatalogEntry> = PROCESS_METRICS
            .iter()
            .map(|&n| (n, MetricFamily::Process))
            .chain(DISK_METRICS.iter().map(|&n| (n, MetricFamily::Disk)))
            .map(|(name, family)| CatalogEntry {
                name,
                label: humanize(name),
                family,
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name, i))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn family_of(&self, name: &str) -> Option<MetricFamily> {
        self.get(name).map(|e| e.family)
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.get(name).map(|e| e.label.as_str())
    }

    /// Process metrics first, then disk metrics, each in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries_in(&self, family: MetricFamily) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.family == family)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search_entries(&self) -> Vec<SearchEntry> {
        self.entries
            .iter()
            .map(|e| SearchEntry {
                text: e.label.clone(),
                value: e.name.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn humanize_names() {
        assert_eq!(humanize("CONNECTIONS"), "Connections");
        assert_eq!(humanize("OPLOG_RATE_GB_PER_HOUR"), "Oplog rate gb per hour");
        assert_eq!(
            humanize("DISK_PARTITION_IOPS_READ"),
            "Disk partition iops read"
        );
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn families_are_disjoint() {
        let process: HashSet<_> = PROCESS_METRICS.iter().collect();
        let disk: HashSet<_> = DISK_METRICS.iter().collect();
        assert!(process.is_disjoint(&disk));
        assert_eq!(process.len(), PROCESS_METRICS.len());
        assert_eq!(disk.len(), DISK_METRICS.len());
    }

    #[test]
    fn lookups() {
        let c = catalog();
        assert_eq!(c.len(), PROCESS_METRICS.len() + DISK_METRICS.len());
        assert_eq!(c.family_of("CONNECTIONS"), Some(MetricFamily::Process));
        assert_eq!(
            c.family_of("DISK_PARTITION_SPACE_FREE"),
            Some(MetricFamily::Disk)
        );
        assert_eq!(c.family_of("connections"), None);
        assert_eq!(c.label("MEMORY_RESIDENT"), Some("Memory resident"));
        assert_eq!(c.entries_in(MetricFamily::Disk).count(), DISK_METRICS.len());
    }

    #[test]
    fn search_entries_are_process_then_disk() {
        let entries = catalog().search_entries();
        assert_eq!(entries.len(), catalog().len());
        assert_eq!(entries[0].value, PROCESS_METRICS[0]);
        assert_eq!(entries[PROCESS_METRICS.len()].value, DISK_METRICS[0]);
        assert!(entries.iter().all(|e| catalog().get(&e.value).is_some()));
    }
}
