use anyhow::Result;
use atlas_datasource::catalog::{catalog, MetricFamily};
use atlas_datasource::server;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "atlas-datasource")]
#[command(about = "Dashboard datasource for MongoDB Atlas cluster metrics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP datasource server
    #[command(alias = "server")]
    Serve(server::ServerArgs),

    /// Print the metric catalog
    Catalog {
        /// Only list one metric family
        #[arg(long, value_enum)]
        family: Option<Family>,

        #[arg(long, value_enum, default_value = "plain")]
        output: Output,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Family {
    Process,
    Disk,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Plain,
    Json,
}

impl From<Family> for MetricFamily {
    fn from(f: Family) -> Self {
        match f {
            Family::Process => MetricFamily::Process,
            Family::Disk => MetricFamily::Disk,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` values feed the clap `env` fallbacks; real environment variables win
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting atlas-datasource server");
            server::run(args).await
        }
        Commands::Catalog { family, output } => print_catalog(family, output),
    }
}

fn print_catalog(family: Option<Family>, output: Output) -> Result<()> {
    let entries: Vec<_> = match family {
        Some(f) => catalog().entries_in(f.into()).collect(),
        None => catalog().entries().collect(),
    };

    match output {
        Output::Plain => {
            for e in entries {
                println!("{}\t{}", e.name, e.label);
            }
        }
        Output::Json => {
            let items: Vec<_> = entries
                .iter()
                .map(|e| serde_json::json!({ "text": e.label, "value": e.name }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }
    Ok(())
}
