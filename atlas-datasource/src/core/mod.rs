pub mod config;
pub mod credentials;
pub mod errors;

pub use config::AtlasConfig;
pub use credentials::Credentials;
pub use errors::{AtlasError, Result};
