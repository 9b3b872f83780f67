//! EC2 launch request types

use rust_decimal::Decimal;

/// Parameters for a one-time spot instance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotRequest {
    /// EC2 instance type (e.g., "t3.micro")
    pub instance_type: String,
    pub image_id: String,
    /// Maximum hourly price in USD; the on-demand rate of the type
    pub max_price: Decimal,
}

/// Parameters for a single on-demand instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnDemandRequest {
    /// EC2 instance type (e.g., "t3.micro")
    pub instance_type: String,
    pub image_id: String,
}

impl SpotRequest {
    pub fn new(
        instance_type: impl Into<String>,
        image_id: impl Into<String>,
        max_price: Decimal,
    ) -> Self {
        Self {
            instance_type: instance_type.into(),
            image_id: image_id.into(),
            max_price,
        }
    }
}

impl OnDemandRequest {
    pub fn new(instance_type: impl Into<String>, image_id: impl Into<String>) -> Self {
        Self {
            instance_type: instance_type.into(),
            image_id: image_id.into(),
        }
    }
}
