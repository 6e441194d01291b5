//! Wire shapes of the Atlas responses this adapter reads
//!
//! Only the fields that are used are modelled; everything else is ignored.

use serde::Deserialize;

/// `GET /groups/{project}/clusters/{cluster}`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Cluster {
    #[serde(rename = "mongoURI", default)]
    pub mongo_uri: Option<String>,
}

/// `GET /groups/{project}/processes/{host}/disks`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DiskList {
    #[serde(default)]
    pub results: Vec<Disk>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub partition_name: String,
}

/// Process and disk measurement responses share this shape; disk responses also carry
/// the partition name.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementsPage {
    #[serde(default)]
    pub process_id: String,
    #[serde(default)]
    pub partition_name: Option<String>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub name: String,
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DataPoint {
    pub timestamp: String,
    #[serde(default)]
    pub value: Option<f64>,
}
