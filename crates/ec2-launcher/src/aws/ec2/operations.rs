//! EC2 operations traits for testing

use super::Ec2Client;
use super::types::{OnDemandRequest, SpotRequest};
use anyhow::Result;
use ec2_launcher_common::{InstanceTypeRecord, SpotRequestStatus};

/// Source of the full instance type catalog.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource: Send + Sync {
    /// Describe every instance type in the region
    async fn describe_instance_types(&self) -> Result<Vec<InstanceTypeRecord>>;
}

/// Trait for EC2 launch operations that can be mocked in tests.
///
/// This trait abstracts the EC2 client operations to enable unit testing
/// of the spot/on-demand fallback logic without hitting real AWS.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Operations: Send + Sync {
    /// Submit a spot request, returning its request id
    async fn request_spot_instance(&self, request: SpotRequest) -> Result<String>;

    /// Current status of a spot request
    async fn describe_spot_request(&self, request_id: &str) -> Result<SpotRequestStatus>;

    /// Cancel a spot request
    async fn cancel_spot_request(&self, request_id: &str) -> Result<()>;

    /// Launch one on-demand instance, returning its instance id
    async fn run_instance(&self, request: OnDemandRequest) -> Result<String>;
}

impl CatalogSource for Ec2Client {
    async fn describe_instance_types(&self) -> Result<Vec<InstanceTypeRecord>> {
        Ec2Client::describe_instance_types(self).await
    }
}

impl Ec2Operations for Ec2Client {
    async fn request_spot_instance(&self, request: SpotRequest) -> Result<String> {
        Ec2Client::request_spot_instance(self, request).await
    }

    async fn describe_spot_request(&self, request_id: &str) -> Result<SpotRequestStatus> {
        Ec2Client::describe_spot_request(self, request_id).await
    }

    async fn cancel_spot_request(&self, request_id: &str) -> Result<()> {
        Ec2Client::cancel_spot_request(self, request_id).await
    }

    async fn run_instance(&self, request: OnDemandRequest) -> Result<String> {
        Ec2Client::run_instance(self, request).await
    }
}
