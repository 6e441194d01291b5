use super::client::AtlasApi;
use super::paths;
use super::types::MeasurementsPage;
use crate::core::Result;

/// Fetch process-level measurements for one host
pub async fn fetch_process_measurements(
    api: &dyn AtlasApi,
    project_id: &str,
    host: &str,
    params: &[(String, String)],
) -> Result<MeasurementsPage> {
    let path = paths::process_measurements(project_id, host);
    Ok(serde_json::from_value(api.get(&path, params).await?)?)
}

/// Fetch disk-level measurements for one partition of one host
pub async fn fetch_disk_measurements(
    api: &dyn AtlasApi,
    project_id: &str,
    host: &str,
    disk: &str,
    params: &[(String, String)],
) -> Result<MeasurementsPage> {
    let path = paths::disk_measurements(project_id, host, disk);
    let mut page: MeasurementsPage = serde_json::from_value(api.get(&path, params).await?)?;
    if page.partition_name.is_none() {
        page.partition_name = Some(disk.to_string());
    }
    Ok(page)
}
