//! ec2-launcher: launch the cheapest EC2 instance matching vCPU and memory bounds
//!
//! Looks up every current-generation x86_64 instance type in the region,
//! prices the ones inside the bounds, and launches the cheapest as spot
//! (falling back to on-demand) or on-demand.

use anyhow::Result;
use clap::Parser;
use ec2_launcher::aws::classify_anyhow_error;
use ec2_launcher::{config, orchestrator};
use ec2_launcher_common::defaults::{
    DEFAULT_MAX_MEMORY_GIB, DEFAULT_MAX_VCPU, DEFAULT_MIN_MEMORY_GIB, DEFAULT_MIN_VCPU,
    DEFAULT_REGION, DEFAULT_SPOT_TIMEOUT_SECS, default_catalog_path,
};
use ec2_launcher_common::{PurchaseModel, Region, SelectionConstraints};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ec2-launcher")]
#[command(about = "Launch the cheapest EC2 instance matching vCPU and memory bounds")]
#[command(version)]
struct Args {
    /// Minimum vCPU count
    #[arg(long, default_value_t = DEFAULT_MIN_VCPU)]
    min_cpu: u32,

    /// Maximum vCPU count
    #[arg(long, default_value_t = DEFAULT_MAX_VCPU)]
    max_cpu: u32,

    /// Minimum memory in GiB
    #[arg(long, default_value_t = DEFAULT_MIN_MEMORY_GIB)]
    min_mem: u32,

    /// Maximum memory in GiB
    #[arg(long, default_value_t = DEFAULT_MAX_MEMORY_GIB)]
    max_mem: u32,

    /// AWS region to launch into
    #[arg(long, default_value = DEFAULT_REGION, value_parser = parse_region)]
    region: Region,

    /// Launch as a spot instance, falling back to on-demand (default)
    #[arg(long, conflicts_with = "on_demand")]
    spot: bool,

    /// Launch as an on-demand instance
    #[arg(long)]
    on_demand: bool,

    /// Seconds to wait for a spot request to be fulfilled
    #[arg(long, default_value_t = DEFAULT_SPOT_TIMEOUT_SECS)]
    spot_timeout: u64,

    /// Instance catalog cache file (default: <temp dir>/instance_types.json)
    #[arg(long, env = "EC2_LAUNCHER_CATALOG_CACHE")]
    catalog_cache: Option<PathBuf>,

    /// Re-fetch the instance catalog even if the cache file exists
    #[arg(long)]
    refresh_catalog: bool,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long)]
    aws_profile: Option<String>,

    /// Select an instance type without launching it
    #[arg(long)]
    dry_run: bool,
}

fn parse_region(s: &str) -> Result<Region, String> {
    Region::parse(s).map_err(|e| e.to_string())
}

impl Args {
    fn purchase_preference(&self) -> PurchaseModel {
        if self.on_demand && !self.spot {
            PurchaseModel::OnDemand
        } else {
            PurchaseModel::Spot
        }
    }
}

impl From<Args> for config::LaunchConfig {
    fn from(args: Args) -> Self {
        let purchase_preference = args.purchase_preference();
        Self {
            constraints: SelectionConstraints {
                min_vcpu: args.min_cpu,
                max_vcpu: args.max_cpu,
                min_memory_gib: args.min_mem,
                max_memory_gib: args.max_mem,
                region: args.region,
                purchase_preference,
            },
            catalog: config::CatalogConfig {
                path: args.catalog_cache.unwrap_or_else(default_catalog_path),
                refresh: args.refresh_catalog,
            },
            aws: config::AwsConfig {
                aws_profile: args.aws_profile,
            },
            flags: config::RuntimeFlags {
                dry_run: args.dry_run,
                spot_timeout: Duration::from_secs(args.spot_timeout),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    // Print main error message
    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    // Print error chain (causes)
    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(suggestion) = classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {suggestion}");
    }

    // Only print backtrace hint if not already showing
    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

/// Default filter: INFO, with the AWS SDK reduced to warnings and errors
const DEFAULT_LOG_FILTER: &str = "info,aws_config=warn,aws_smithy_runtime=warn,\
    aws_sdk_ec2=warn,aws_sdk_pricing=warn,aws_sdk_ssm=warn";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if let Some(profile) = &args.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let config: config::LaunchConfig = args.into();
    config.constraints.validate()?;

    info!(
        region = %config.region(),
        purchase = %config.purchase_preference(),
        catalog = %config.catalog.path.display(),
        dry_run = config.dry_run(),
        "Starting launcher"
    );

    orchestrator::run(config).await?;
    Ok(())
}
