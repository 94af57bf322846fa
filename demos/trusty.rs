//! Command line demo of trusty-client.
//!
//! ```text
//! cargo run --example trusty -- report --name requests --ecosystem pypi
//! cargo run --example trusty -- alternatives --purl pkg:npm/left-pad@1.3.0
//! cargo run --example trusty -- group-report pkg:pypi/requests pkg:npm/react
//! ```
//!
//! Set `TRUSTY_ENDPOINT` to query another API root and `RUST_LOG` to tune
//! logging.

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use trusty_client::{ClientOptions, Dependency, Ecosystem, TrustyClient};

#[derive(Parser)]
#[command(name = "trusty", about = "Query the Trusty package API")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// API root, overrides TRUSTY_ENDPOINT
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Return reports immediately, even while the package is being ingested
    #[arg(long, global = true)]
    no_wait: bool,

    /// Fail when the package ingestion failed upstream
    #[arg(long, global = true)]
    strict: bool,

    /// Maximum number of extra requests while waiting for ingestion
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    /// Seconds between two polls of a package being ingested
    #[arg(long, global = true, default_value_t = 5)]
    retry_wait: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full package report (v1)
    Report(PackageArgs),
    /// Reports of several packages given as purls
    GroupReport {
        /// Package URLs
        #[arg(required = true)]
        purls: Vec<String>,
    },
    /// Security summary (v2)
    Summary(PackageArgs),
    /// Package metadata (v2)
    PkgMeta(PackageArgs),
    /// Alternative packages (v2)
    Alternatives(PackageArgs),
    /// Provenance details (v2)
    Provenance(PackageArgs),
}

#[derive(Args)]
struct PackageArgs {
    /// Package name
    #[arg(long, required_unless_present = "purl", conflicts_with = "purl")]
    name: Option<String>,

    /// Package ecosystem (npm, go, pypi, crates, maven)
    #[arg(long, default_value = "npm")]
    ecosystem: Ecosystem,

    /// Package version
    #[arg(long)]
    version: Option<String>,

    /// Package URL, instead of --name/--ecosystem/--version
    #[arg(long)]
    purl: Option<String>,
}

impl PackageArgs {
    fn dependency(&self) -> trusty_client::Result<Dependency> {
        if let Some(purl) = &self.purl {
            return trusty_client::purl_to_dependency(purl);
        }
        Ok(Dependency {
            name: self.name.clone().unwrap_or_default(),
            ecosystem: Some(self.ecosystem),
            version: self.version.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let mut options = ClientOptions::from_env();
    if let Some(endpoint) = &cli.endpoint {
        options.base_url = endpoint.clone();
    }
    options.wait_for_ingestion = !cli.no_wait;
    options.err_on_failed_ingestion = cli.strict;
    options.ingestion_max_retries = cli.max_retries;
    options.ingestion_retry_wait = Duration::from_secs(cli.retry_wait);

    let client = match TrustyClient::with_options(options) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, cancelling");
            trigger.cancel();
        }
    });

    match run(&client, &cli.command, &cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    client: &TrustyClient,
    command: &Commands,
    cancel: &CancellationToken,
) -> trusty_client::Result<()> {
    match command {
        Commands::Report(args) => {
            let reply = client.report_with_cancel(&args.dependency()?, cancel).await?;
            print_json(&reply)
        }
        Commands::GroupReport { purls } => {
            let dependencies = purls
                .iter()
                .map(|p| client.purl_to_dependency(p))
                .collect::<trusty_client::Result<Vec<_>>>()?;
            let replies = client.group_report_with_cancel(&dependencies, cancel).await?;
            print_json(&replies)
        }
        Commands::Summary(args) => print_json(&client.summary(&args.dependency()?).await?),
        Commands::PkgMeta(args) => print_json(&client.package_metadata(&args.dependency()?).await?),
        Commands::Alternatives(args) => print_json(&client.alternatives(&args.dependency()?).await?),
        Commands::Provenance(args) => print_json(&client.provenance(&args.dependency()?).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> trusty_client::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
