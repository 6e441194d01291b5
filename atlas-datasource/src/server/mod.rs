mod app;
pub mod handlers;
pub mod http;

pub use app::{build_router, create_app_state, AppState};

use anyhow::Result;
use clap::Args;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing::info;

use crate::core::config::DEFAULT_ATLAS_BASE_URL;
use crate::core::AtlasConfig;

#[derive(Debug, Args, Clone)]
pub struct ServerArgs {
    /// Interface the HTTP server binds to
    #[arg(long, default_value = "0.0.0.0", env = "ATLAS_DATASOURCE_LISTEN_ADDR")]
    pub listen_addr: IpAddr,

    /// HTTP server port
    #[arg(long, default_value_t = 3333, env = "PORT")]
    pub port: u16,

    /// Atlas API account identifier
    #[arg(long, env = "ATLAS_USERNAME")]
    pub atlas_username: String,

    /// Atlas API key
    #[arg(long, env = "ATLAS_API_KEY", hide_env_values = true)]
    pub atlas_api_key: String,

    /// Atlas API base URL
    #[arg(long, default_value = DEFAULT_ATLAS_BASE_URL, env = "ATLAS_BASE_URL")]
    pub atlas_base_url: String,

    /// Keep zero-valued data points instead of dropping them with nulls
    #[arg(long, env = "ATLAS_DATASOURCE_KEEP_ZERO_VALUES")]
    pub keep_zero_values: bool,

    /// Append the partition name to disk series targets
    #[arg(long, env = "ATLAS_DATASOURCE_LABEL_DISK_PARTITIONS")]
    pub label_disk_partitions: bool,
}

impl ServerArgs {
    pub fn atlas_config(&self) -> AtlasConfig {
        AtlasConfig {
            base_url: self.atlas_base_url.clone(),
            username: self.atlas_username.clone(),
            api_key: self.atlas_api_key.clone(),
        }
    }
}

pub async fn run(args: ServerArgs) -> Result<()> {
    info!("Initializing atlas-datasource server");

    let state = create_app_state(&args)?;
    let router = build_router(state);

    let addr = SocketAddr::new(args.listen_addr, args.port);
    info!("Server is listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
