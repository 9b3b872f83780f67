//! AWS client modules for the launcher
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: Instance type catalog, spot requests and on-demand launches
//! - Pricing: On-demand hourly rates
//! - SSM: Latest machine image lookup

pub mod context;
pub mod ec2;
pub mod error;
pub mod pricing;
pub mod ssm;

pub use context::AwsContext;
pub use ec2::{CatalogSource, Ec2Client, Ec2Operations, OnDemandRequest, SpotRequest};
pub use pricing::{PriceLookup, PricingClient};
pub use ssm::{ImageLookup, SsmClient};

// Error handling
pub use error::{AwsError, classify_anyhow_error, classify_aws_error};
