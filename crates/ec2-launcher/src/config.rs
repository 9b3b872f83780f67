//! Configuration types for the launcher

use ec2_launcher_common::defaults::{DEFAULT_SPOT_TIMEOUT_SECS, default_catalog_path};
use std::path::PathBuf;
use std::time::Duration;

// Re-export from common for use by orchestration code
pub use ec2_launcher_common::{PurchaseModel, Region, SelectionConstraints};

/// Instance catalog cache settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Snapshot file location
    pub path: PathBuf,
    /// Re-fetch and overwrite the snapshot even if it exists
    pub refresh: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            refresh: false,
        }
    }
}

/// AWS client configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AwsConfig {
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

/// Runtime behavior flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFlags {
    /// Select an instance type but launch nothing
    pub dry_run: bool,
    /// How long to wait for a spot request to be fulfilled
    pub spot_timeout: Duration,
}

impl Default for RuntimeFlags {
    fn default() -> Self {
        Self {
            dry_run: false,
            spot_timeout: Duration::from_secs(DEFAULT_SPOT_TIMEOUT_SECS),
        }
    }
}

/// Configuration for one launcher run
///
/// Composed of focused sub-configs. The target region lives in
/// `constraints` since pricing lookups are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchConfig {
    pub constraints: SelectionConstraints,
    pub catalog: CatalogConfig,
    pub aws: AwsConfig,
    pub flags: RuntimeFlags,
}

impl LaunchConfig {
    pub fn region(&self) -> Region {
        self.constraints.region
    }

    pub fn purchase_preference(&self) -> PurchaseModel {
        self.constraints.purchase_preference
    }

    pub fn dry_run(&self) -> bool {
        self.flags.dry_run
    }
}
