//! Instance launch with spot-to-on-demand fallback
//!
//! A spot launch is attempted first when preferred. If the selected type
//! cannot run as spot, or the request is not fulfilled in time, exactly one
//! on-demand launch follows, unless the cancelled request turns out to have
//! been fulfilled in the meantime. Errors submitting the spot request itself and
//! errors from the on-demand launch are returned to the caller.

use crate::aws::{Ec2Operations, OnDemandRequest, SpotRequest};
use crate::wait::{WaitConfig, WaitOutcome, poll_until};
use anyhow::{Result, anyhow};
use ec2_launcher_common::{PurchaseModel, QuotedInstanceType, SpotRequestStatus};
use tracing::{debug, info, warn};

/// A launched instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchResult {
    pub instance_id: String,
    /// How the instance was actually purchased
    pub purchase_model: PurchaseModel,
    /// True when a spot attempt was abandoned for on-demand
    pub fell_back: bool,
}

/// Result of a spot attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotAttempt {
    Launched { instance_id: String },
    /// The instance type does not offer the spot usage class
    Unsupported,
    /// The request timed out or failed before fulfillment
    NotFulfilled,
}

/// Launches the selected instance type
pub struct Launcher<'a, E: Ec2Operations> {
    ec2: &'a E,
    spot_wait: WaitConfig,
}

impl<'a, E: Ec2Operations> Launcher<'a, E> {
    pub fn new(ec2: &'a E, spot_wait: WaitConfig) -> Self {
        Self { ec2, spot_wait }
    }

    /// Launch `selected` from `image_id` under the preferred purchase model
    pub async fn launch(
        &self,
        selected: &QuotedInstanceType,
        image_id: &str,
        preference: PurchaseModel,
    ) -> Result<LaunchResult> {
        if preference == PurchaseModel::OnDemand {
            let instance_id = self.launch_on_demand(selected, image_id).await?;
            return Ok(LaunchResult {
                instance_id,
                purchase_model: PurchaseModel::OnDemand,
                fell_back: false,
            });
        }

        match self.try_spot(selected, image_id).await? {
            SpotAttempt::Launched { instance_id } => Ok(LaunchResult {
                instance_id,
                purchase_model: PurchaseModel::Spot,
                fell_back: false,
            }),
            attempt @ (SpotAttempt::Unsupported | SpotAttempt::NotFulfilled) => {
                warn!(
                    instance_type = %selected.name(),
                    reason = ?attempt,
                    "Spot launch unavailable, falling back to on-demand"
                );
                let instance_id = self.launch_on_demand(selected, image_id).await?;
                Ok(LaunchResult {
                    instance_id,
                    purchase_model: PurchaseModel::OnDemand,
                    fell_back: true,
                })
            }
        }
    }

    /// Request a spot instance capped at the quoted on-demand price and wait
    /// for fulfillment
    pub async fn try_spot(
        &self,
        selected: &QuotedInstanceType,
        image_id: &str,
    ) -> Result<SpotAttempt> {
        if !selected.descriptor.supports_spot() {
            info!(instance_type = %selected.name(), "Instance type does not support spot");
            return Ok(SpotAttempt::Unsupported);
        }

        let request_id = self
            .ec2
            .request_spot_instance(SpotRequest::new(selected.name(), image_id, selected.price()))
            .await?;

        let ec2 = self.ec2;
        let id = request_id.as_str();
        let outcome = poll_until(
            &self.spot_wait,
            || async move {
                match ec2.describe_spot_request(id).await? {
                    SpotRequestStatus::Fulfilled { instance_id } => Ok(Some(instance_id)),
                    SpotRequestStatus::Pending { code } => {
                        debug!(request_id = %id, code = ?code, "Spot request pending");
                        Ok(None)
                    }
                    SpotRequestStatus::Failed { code, message } => Err(anyhow!(
                        "spot request {id} failed with status {code}: {}",
                        message.unwrap_or_default()
                    )),
                }
            },
            &format!("spot request {request_id}"),
        )
        .await;

        match outcome {
            WaitOutcome::Ready(instance_id) => {
                info!(
                    request_id = %request_id,
                    instance_id = %instance_id,
                    "Spot request fulfilled"
                );
                Ok(SpotAttempt::Launched { instance_id })
            }
            WaitOutcome::TimedOut { attempts, elapsed } => {
                warn!(
                    request_id = %request_id,
                    attempts,
                    elapsed_secs = elapsed.as_secs(),
                    "Spot request not fulfilled before timeout"
                );
                Ok(self.cancel_unfulfilled(&request_id).await)
            }
            WaitOutcome::Failed(e) => {
                warn!(request_id = %request_id, error = %e, "Spot request did not complete");
                Ok(self.cancel_unfulfilled(&request_id).await)
            }
        }
    }

    /// Cancel an unfulfilled request, then check it once more: a request
    /// fulfilled just before the cancel keeps its instance running, and that
    /// instance is the launch.
    async fn cancel_unfulfilled(&self, request_id: &str) -> SpotAttempt {
        if let Err(e) = self.ec2.cancel_spot_request(request_id).await {
            warn!(request_id = %request_id, error = ?e, "Failed to cancel spot request");
            return SpotAttempt::NotFulfilled;
        }

        match self.ec2.describe_spot_request(request_id).await {
            Ok(SpotRequestStatus::Fulfilled { instance_id }) => {
                info!(
                    request_id = %request_id,
                    instance_id = %instance_id,
                    "Spot request fulfilled before cancellation"
                );
                SpotAttempt::Launched { instance_id }
            }
            Ok(_) => SpotAttempt::NotFulfilled,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    error = ?e,
                    "Failed to check spot request after cancellation"
                );
                SpotAttempt::NotFulfilled
            }
        }
    }

    async fn launch_on_demand(
        &self,
        selected: &QuotedInstanceType,
        image_id: &str,
    ) -> Result<String> {
        let instance_id = self
            .ec2
            .run_instance(OnDemandRequest::new(selected.name(), image_id))
            .await?;
        info!(
            instance_type = %selected.name(),
            instance_id = %instance_id,
            "On-demand instance launched"
        );
        Ok(instance_id)
    }
}
