/// Default base URL of the Atlas monitoring API.
pub const DEFAULT_ATLAS_BASE_URL: &str = "https://cloud.mongodb.com/api/atlas/v1.0";

/// Configuration for the upstream Atlas client
#[derive(Clone, Debug)]
pub struct AtlasConfig {
    pub base_url: String,
    /// Account identifier used as the basic-auth user
    pub username: String,
    pub api_key: String,
}
