//! Configuration and selection errors
//!
//! Typed errors for the points where a run can be rejected before or during
//! instance type selection.

use thiserror::Error;

/// Invalid selection constraints, raised before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    /// min_vcpu is greater than max_vcpu
    #[error("minimum vCPU count ({min}) is greater than maximum ({max})")]
    VcpuRange { min: u32, max: u32 },

    /// min_memory_gib is greater than max_memory_gib
    #[error("minimum memory ({min} GiB) is greater than maximum ({max} GiB)")]
    MemoryRange { min: u32, max: u32 },

    /// max_vcpu is zero
    #[error("maximum vCPU count must be at least 1")]
    ZeroMaxVcpu,

    /// max_memory_gib is zero
    #[error("maximum memory must be at least 1 GiB")]
    ZeroMaxMemory,

    /// Region outside the supported set
    #[error("unsupported region '{region}' (supported: {supported})")]
    UnsupportedRegion { region: String, supported: String },
}

/// Price lookup failures for a single instance type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The Pricing API returned no product for the filter set
    #[error("no on-demand price found for '{instance_type}' in {location}")]
    NotFound {
        instance_type: String,
        location: String,
    },

    /// A product was returned but its price could not be read
    #[error("malformed price data for '{instance_type}': {reason}")]
    Malformed {
        instance_type: String,
        reason: String,
    },
}

/// Selection failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// No catalog entry satisfied the constraints
    #[error(
        "no instance type matches {min_vcpu}-{max_vcpu} vCPU and {min_memory_gib}-{max_memory_gib} GiB memory \
         (checked {catalog_size} instance types); try widening --min-cpu/--max-cpu or --min-mem/--max-mem"
    )]
    NoMatchingInstanceType {
        min_vcpu: u32,
        max_vcpu: u32,
        min_memory_gib: u32,
        max_memory_gib: u32,
        catalog_size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConstraintError::VcpuRange { min: 4, max: 2 }.to_string(),
            "minimum vCPU count (4) is greater than maximum (2)"
        );
        assert_eq!(
            PriceError::NotFound {
                instance_type: "t3.micro".to_string(),
                location: "Asia Pacific (Sydney)".to_string(),
            }
            .to_string(),
            "no on-demand price found for 't3.micro' in Asia Pacific (Sydney)"
        );
    }

    #[test]
    fn test_no_match_suggests_wider_bounds() {
        let err = SelectionError::NoMatchingInstanceType {
            min_vcpu: 64,
            max_vcpu: 64,
            min_memory_gib: 1,
            max_memory_gib: 1,
            catalog_size: 700,
        };
        let msg = err.to_string();
        assert!(msg.contains("64-64 vCPU"));
        assert!(msg.contains("--min-cpu"));
    }
}
