//! Shared test utilities for ec2-launcher
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection for integration tests
//! - [`catalog`]: Catalog record and snapshot builders

pub mod aws;
pub mod catalog;

// Re-export commonly used items
pub use aws::get_test_region;
pub use catalog::{InstanceTypeBuilder, sample_catalog, snapshot_json};
