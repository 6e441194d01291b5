//! Endpoint paths, relative to the API base URL.
//!
//! Paths are kept as segment lists: cluster names, project ids and host names come from
//! the caller, and each one must land in exactly one percent-encoded segment.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiPath(Vec<String>);

impl ApiPath {
    fn new<const N: usize>(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

pub fn cluster(project_id: &str, cluster_name: &str) -> ApiPath {
    ApiPath::new(["groups", project_id, "clusters", cluster_name])
}

pub fn process_disks(project_id: &str, host: &str) -> ApiPath {
    ApiPath::new(["groups", project_id, "processes", host, "disks"])
}

pub fn process_measurements(project_id: &str, host: &str) -> ApiPath {
    ApiPath::new(["groups", project_id, "processes", host, "measurements"])
}

pub fn disk_measurements(project_id: &str, host: &str, disk: &str) -> ApiPath {
    ApiPath::new([
        "groups",
        project_id,
        "processes",
        host,
        "disks",
        disk,
        "measurements",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_slash_joined_path() {
        assert_eq!(
            disk_measurements("p1", "a:27017", "data").to_string(),
            "/groups/p1/processes/a:27017/disks/data/measurements"
        );
        assert_eq!(cluster("", "").to_string(), "/groups//clusters/");
    }

    #[test]
    fn caller_values_stay_single_segments() {
        let path = cluster("p1", "../../orgs");
        assert_eq!(path.segments().count(), 4);
        assert_eq!(path.segments().last(), Some("../../orgs"));
    }
}
