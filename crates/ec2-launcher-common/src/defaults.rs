//! Default configuration values
//!
//! These constants keep the CLI, the library and the tests in agreement.

use std::path::PathBuf;

/// Default minimum number of vCPUs
pub const DEFAULT_MIN_VCPU: u32 = 1;

/// Default maximum number of vCPUs
pub const DEFAULT_MAX_VCPU: u32 = 2;

/// Default minimum memory in GiB
pub const DEFAULT_MIN_MEMORY_GIB: u32 = 1;

/// Default maximum memory in GiB
pub const DEFAULT_MAX_MEMORY_GIB: u32 = 2;

/// Default AWS region
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// File name of the catalog snapshot inside the temp directory
pub const CATALOG_CACHE_FILE_NAME: &str = "instance_types.json";

/// SSM parameter holding the latest Amazon Linux 2 (x86_64, gp2) AMI id
pub const LATEST_AMI_PARAMETER: &str =
    "/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2";

/// Default time to wait for a spot request to be fulfilled (10 minutes)
pub const DEFAULT_SPOT_TIMEOUT_SECS: u64 = 600;

/// Initial delay between spot request status checks
pub const SPOT_POLL_INITIAL_DELAY_SECS: u64 = 5;

/// Cap on the delay between spot request status checks
pub const SPOT_POLL_MAX_DELAY_SECS: u64 = 15;

/// Default location of the catalog snapshot: `<temp dir>/instance_types.json`
pub fn default_catalog_path() -> PathBuf {
    std::env::temp_dir().join(CATALOG_CACHE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_path() {
        let path = default_catalog_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(CATALOG_CACHE_FILE_NAME));
    }

    #[test]
    fn test_default_bounds_are_ordered() {
        assert!(DEFAULT_MIN_VCPU <= DEFAULT_MAX_VCPU);
        assert!(DEFAULT_MIN_MEMORY_GIB <= DEFAULT_MAX_MEMORY_GIB);
        assert!(SPOT_POLL_INITIAL_DELAY_SECS <= SPOT_POLL_MAX_DELAY_SECS);
    }
}
