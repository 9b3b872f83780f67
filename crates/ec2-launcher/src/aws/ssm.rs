//! Machine image lookup through SSM public parameters

use crate::aws::context::AwsContext;
use anyhow::{Context, Result};
use aws_sdk_ssm::Client;
use ec2_launcher_common::defaults::LATEST_AMI_PARAMETER;
use tracing::debug;

/// Lookup of the image id new instances boot from.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait ImageLookup: Send + Sync {
    /// Latest Amazon Linux 2 x86_64 AMI id in the client's region
    async fn latest_image_id(&self) -> Result<String>;
}

/// SSM client for reading public parameters
pub struct SsmClient {
    client: Client,
}

impl SsmClient {
    /// Create an SSM client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ssm_client(),
        }
    }

    pub async fn latest_image_id(&self) -> Result<String> {
        let response = self
            .client
            .get_parameter()
            .name(LATEST_AMI_PARAMETER)
            .send()
            .await
            .with_context(|| format!("Failed to read SSM parameter {LATEST_AMI_PARAMETER}"))?;

        let image_id = response
            .parameter()
            .and_then(|p| p.value())
            .filter(|v| !v.is_empty())
            .with_context(|| format!("SSM parameter {LATEST_AMI_PARAMETER} has no value"))?;

        debug!(image_id = %image_id, "Resolved latest AMI");
        Ok(image_id.to_string())
    }
}

impl ImageLookup for SsmClient {
    async fn latest_image_id(&self) -> Result<String> {
        SsmClient::latest_image_id(self).await
    }
}
