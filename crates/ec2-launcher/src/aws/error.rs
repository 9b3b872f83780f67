//! AWS error classification and handling
//!
//! Provides typed errors for AWS SDK operations using the `.code()` method
//! instead of string matching on Debug format.

use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// AWS error categories for launch and polling logic
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource was not found (may be eventual consistency right after create)
    #[error("Resource not found: {message}")]
    NotFound { code: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Not enough capacity for the instance type
    #[error("Insufficient capacity: {code}")]
    InsufficientCapacity { code: String },

    /// Account or service limit reached
    #[error("Limit exceeded: {code}")]
    LimitExceeded { code: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// The AWS error code, when known
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { code, .. }
            | AwsError::InsufficientCapacity { code }
            | AwsError::LimitExceeded { code } => Some(code),
            AwsError::Throttled => Some("Throttling"),
            AwsError::Sdk { code, .. } => code.as_deref(),
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        self.code().and_then(suggestion_for_code)
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidSpotInstanceRequestID.NotFound",
    "InvalidInstanceID.NotFound",
    "ParameterNotFound",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for capacity shortages
const CAPACITY_CODES: &[&str] = &[
    "InsufficientInstanceCapacity",
    "InsufficientHostCapacity",
    "InsufficientCapacity",
];

/// Known AWS error codes for account limits
const LIMIT_CODES: &[&str] = &[
    "InstanceLimitExceeded",
    "VcpuLimitExceeded",
    "MaxSpotInstanceCountExceeded",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if CAPACITY_CODES.contains(&c) => AwsError::InsufficientCapacity {
            code: c.to_string(),
        },
        Some(c) if LIMIT_CODES.contains(&c) => AwsError::LimitExceeded {
            code: c.to_string(),
        },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify one link of an error chain if it is an `SdkError<E>`
fn classify_sdk_error<E>(cause: &(dyn std::error::Error + 'static)) -> Option<AwsError>
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    cause.downcast_ref::<SdkError<E>>().map(|e| {
        let meta = ProvideErrorMetadata::meta(e);
        classify_aws_error(meta.code(), meta.message())
    })
}

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain looking for the SDK operation errors this tool can
/// produce. Falls back to string matching on the Debug representation if no
/// typed error is found.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    use aws_sdk_ec2::operation::{
        cancel_spot_instance_requests::CancelSpotInstanceRequestsError,
        describe_instance_types::DescribeInstanceTypesError,
        describe_spot_instance_requests::DescribeSpotInstanceRequestsError,
        request_spot_instances::RequestSpotInstancesError, run_instances::RunInstancesError,
    };
    use aws_sdk_pricing::operation::get_products::GetProductsError;
    use aws_sdk_ssm::operation::get_parameter::GetParameterError;

    for cause in error.chain() {
        let classified = classify_sdk_error::<RunInstancesError>(cause)
            .or_else(|| classify_sdk_error::<RequestSpotInstancesError>(cause))
            .or_else(|| classify_sdk_error::<DescribeSpotInstanceRequestsError>(cause))
            .or_else(|| classify_sdk_error::<CancelSpotInstanceRequestsError>(cause))
            .or_else(|| classify_sdk_error::<DescribeInstanceTypesError>(cause))
            .or_else(|| classify_sdk_error::<GetProductsError>(cause))
            .or_else(|| classify_sdk_error::<GetParameterError>(cause));

        if let Some(classified) = classified {
            return classified;
        }
    }

    // Fallback: extract error code from debug string representation
    let debug_str = format!("{:?}", error);
    if let Some(code) = extract_error_code(&debug_str) {
        return classify_aws_error(Some(&code), Some(&debug_str));
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// All known AWS error codes for extraction from debug strings (flat list)
const ALL_KNOWN_CODES: &[&str] = &[
    // Not found
    "InvalidSpotInstanceRequestID.NotFound",
    "InvalidInstanceID.NotFound",
    "ParameterNotFound",
    // Throttling
    "ThrottlingException",
    "RequestLimitExceeded",
    "Throttling",
    // Capacity
    "InsufficientInstanceCapacity",
    "InsufficientHostCapacity",
    "InsufficientCapacity",
    // Limits
    "InstanceLimitExceeded",
    "VcpuLimitExceeded",
    "MaxSpotInstanceCountExceeded",
    // Permissions
    "UnauthorizedOperation",
    "AccessDeniedException",
    // Unsupported
    "UnsupportedOperation",
    "Unsupported",
];

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    for code in ALL_KNOWN_CODES {
        if debug_str.contains(code) {
            return Some((*code).to_string());
        }
    }

    // Try to extract any code from `code: Some("...")` pattern
    if let Some(start) = debug_str.find("code: Some(\"") {
        let rest = &debug_str[start + 12..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    None
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "InsufficientInstanceCapacity",
        "Try again later, or widen the vCPU/memory bounds to allow another instance type.",
    ),
    (
        "InsufficientHostCapacity",
        "Try again later, or widen the vCPU/memory bounds to allow another instance type.",
    ),
    (
        "InsufficientCapacity",
        "Try again later, or widen the vCPU/memory bounds to allow another instance type.",
    ),
    (
        "InstanceLimitExceeded",
        "Request a service limit increase via AWS Service Quotas console.",
    ),
    (
        "VcpuLimitExceeded",
        "Request a service limit increase via AWS Service Quotas console.",
    ),
    (
        "MaxSpotInstanceCountExceeded",
        "Cancel unused spot requests, use --on-demand, or request a limit increase.",
    ),
    (
        "UnauthorizedOperation",
        "Check that the credentials allow ec2:RunInstances and ec2:RequestSpotInstances.",
    ),
    (
        "AccessDeniedException",
        "Check that the credentials allow pricing:GetProducts and ssm:GetParameter.",
    ),
    (
        "Unsupported",
        "This instance type may not be available in this region/AZ.",
    ),
    (
        "UnsupportedOperation",
        "This instance type may not be available in this region/AZ.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Wait a moment and run again.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}
