//! Spot and on-demand instance requests

use super::Ec2Client;
use super::types::{OnDemandRequest, SpotRequest};
use crate::aws::error::classify_anyhow_error;
use anyhow::{Context, Result};
use aws_sdk_ec2::types::{InstanceType, RequestSpotLaunchSpecification};
use ec2_launcher_common::SpotRequestStatus;
use tracing::{debug, info};

impl Ec2Client {
    /// Submit a one-time spot request for a single instance.
    ///
    /// Returns the spot instance request id.
    pub async fn request_spot_instance(&self, request: SpotRequest) -> Result<String> {
        info!(
            instance_type = %request.instance_type,
            image_id = %request.image_id,
            max_price = %request.max_price,
            "Requesting spot instance"
        );

        let response = self
            .client
            .request_spot_instances()
            .spot_price(request.max_price.to_string())
            .instance_count(1)
            .launch_specification(
                RequestSpotLaunchSpecification::builder()
                    .image_id(&request.image_id)
                    .instance_type(InstanceType::from(request.instance_type.as_str()))
                    .build(),
            )
            .send()
            .await
            .context("Failed to request spot instance")?;

        let request_id = response
            .spot_instance_requests()
            .first()
            .and_then(|r| r.spot_instance_request_id())
            .context("RequestSpotInstances returned no request id")?;

        debug!(request_id = %request_id, "Spot request submitted");
        Ok(request_id.to_string())
    }

    /// Read the current status of a spot request.
    ///
    /// A request that is not yet visible (eventual consistency right after
    /// submission) is reported as pending.
    pub async fn describe_spot_request(&self, request_id: &str) -> Result<SpotRequestStatus> {
        let result = self
            .client
            .describe_spot_instance_requests()
            .spot_instance_request_ids(request_id)
            .send()
            .await
            .context("Failed to describe spot instance request");

        let response = match result {
            Ok(response) => response,
            Err(e) if classify_anyhow_error(&e).is_not_found() => {
                debug!(request_id = %request_id, "Spot request not visible yet");
                return Ok(SpotRequestStatus::Pending { code: None });
            }
            Err(e) => return Err(e),
        };

        let Some(spot) = response.spot_instance_requests().first() else {
            return Ok(SpotRequestStatus::Pending { code: None });
        };

        let status = spot.status();
        Ok(SpotRequestStatus::classify(
            status.and_then(|s| s.code()),
            status.and_then(|s| s.message()),
            spot.instance_id(),
        ))
    }

    /// Cancel a spot request. An instance it already launched keeps running.
    pub async fn cancel_spot_request(&self, request_id: &str) -> Result<()> {
        self.client
            .cancel_spot_instance_requests()
            .spot_instance_request_ids(request_id)
            .send()
            .await
            .context("Failed to cancel spot instance request")?;

        info!(request_id = %request_id, "Cancelled spot request");
        Ok(())
    }

    /// Launch one on-demand instance and return its id without waiting
    pub async fn run_instance(&self, request: OnDemandRequest) -> Result<String> {
        info!(
            instance_type = %request.instance_type,
            image_id = %request.image_id,
            "Launching on-demand instance"
        );

        let response = self
            .client
            .run_instances()
            .image_id(&request.image_id)
            .instance_type(InstanceType::from(request.instance_type.as_str()))
            .min_count(1)
            .max_count(1)
            .send()
            .await
            .context("Failed to launch instance")?;

        let instance_id = response
            .instances()
            .first()
            .and_then(|i| i.instance_id())
            .context("RunInstances returned no instance id")?;

        Ok(instance_id.to_string())
    }
}
