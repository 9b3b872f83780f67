//! AWS test utilities
//!
//! Provides region detection for AWS integration tests.

/// Region used when no AWS region variable is set
pub const FALLBACK_TEST_REGION: &str = "ap-southeast-2";

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to ap-southeast-2
///
/// # Example
///
/// ```
/// use ec2_launcher_test_utils::aws::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| FALLBACK_TEST_REGION.to_string())
}
