//! EC2 catalog and instance launch operations

mod catalog;
mod instance;
mod operations;
mod types;

pub use operations::{CatalogSource, Ec2Operations};
pub use types::{OnDemandRequest, SpotRequest};

#[cfg(test)]
pub use operations::{MockCatalogSource, MockEc2Operations};

use crate::aws::context::AwsContext;
use aws_sdk_ec2::Client;

/// EC2 client for describing instance types and launching instances
pub struct Ec2Client {
    pub(crate) client: Client,
}

impl Ec2Client {
    /// Create a new EC2 client (loads AWS config from environment)
    pub async fn new(region: &str) -> Self {
        let ctx = AwsContext::new(region).await;
        Self::from_context(&ctx)
    }

    /// Create an EC2 client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}
