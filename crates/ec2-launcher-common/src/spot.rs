//! Spot request status classification
//!
//! Mirrors the acceptors of the EC2 `spot_instance_request_fulfilled` waiter:
//! a request is done when its status code says it was fulfilled (and an
//! instance id is attached), failed when the code is one of the terminal
//! failure codes, and pending otherwise.

/// Status codes meaning capacity was granted
pub const FULFILLED_CODES: &[&str] = &["fulfilled", "request-canceled-and-instance-running"];

/// Status codes meaning the request will never be fulfilled
pub const TERMINAL_FAILURE_CODES: &[&str] = &[
    "schedule-expired",
    "canceled-before-fulfillment",
    "bad-parameters",
    "system-error",
];

/// Observed state of a spot instance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotRequestStatus {
    /// Still waiting on capacity or evaluation
    Pending { code: Option<String> },
    /// Capacity granted; the instance id is known
    Fulfilled { instance_id: String },
    /// The request reached a terminal failure code
    Failed { code: String, message: Option<String> },
}

impl SpotRequestStatus {
    /// Classify a spot request from its status code, message and instance id
    pub fn classify(code: Option<&str>, message: Option<&str>, instance_id: Option<&str>) -> Self {
        match (code, instance_id) {
            (Some(c), Some(id)) if FULFILLED_CODES.contains(&c) && !id.is_empty() => {
                SpotRequestStatus::Fulfilled {
                    instance_id: id.to_string(),
                }
            }
            (Some(c), _) if TERMINAL_FAILURE_CODES.contains(&c) => SpotRequestStatus::Failed {
                code: c.to_string(),
                message: message.map(str::to_string),
            },
            _ => SpotRequestStatus::Pending {
                code: code.map(str::to_string),
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SpotRequestStatus::Pending { .. })
    }
}
