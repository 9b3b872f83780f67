//! Selection constraints supplied once at startup

use crate::defaults::{
    DEFAULT_MAX_MEMORY_GIB, DEFAULT_MAX_VCPU, DEFAULT_MIN_MEMORY_GIB, DEFAULT_MIN_VCPU,
};
use crate::error::ConstraintError;
use crate::regions::Region;

/// Purchasing model for the launched instance
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PurchaseModel {
    #[default]
    #[strum(serialize = "spot")]
    Spot,
    #[strum(serialize = "on-demand", serialize = "ondemand")]
    OnDemand,
}

/// vCPU/memory bounds, target region and purchase preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConstraints {
    pub min_vcpu: u32,
    pub max_vcpu: u32,
    /// Minimum memory in GiB (inclusive)
    pub min_memory_gib: u32,
    /// Maximum memory in GiB (inclusive)
    pub max_memory_gib: u32,
    pub region: Region,
    pub purchase_preference: PurchaseModel,
}

impl Default for SelectionConstraints {
    fn default() -> Self {
        Self {
            min_vcpu: DEFAULT_MIN_VCPU,
            max_vcpu: DEFAULT_MAX_VCPU,
            min_memory_gib: DEFAULT_MIN_MEMORY_GIB,
            max_memory_gib: DEFAULT_MAX_MEMORY_GIB,
            region: Region::ApSoutheast2,
            purchase_preference: PurchaseModel::Spot,
        }
    }
}

impl SelectionConstraints {
    /// Reject bounds that can never match anything
    pub fn validate(&self) -> Result<(), ConstraintError> {
        if self.max_vcpu == 0 {
            return Err(ConstraintError::ZeroMaxVcpu);
        }
        if self.max_memory_gib == 0 {
            return Err(ConstraintError::ZeroMaxMemory);
        }
        if self.min_vcpu > self.max_vcpu {
            return Err(ConstraintError::VcpuRange {
                min: self.min_vcpu,
                max: self.max_vcpu,
            });
        }
        if self.min_memory_gib > self.max_memory_gib {
            return Err(ConstraintError::MemoryRange {
                min: self.min_memory_gib,
                max: self.max_memory_gib,
            });
        }
        Ok(())
    }

    pub fn vcpu_in_range(&self, vcpus: u32) -> bool {
        (self.min_vcpu..=self.max_vcpu).contains(&vcpus)
    }

    pub fn memory_in_range(&self, memory_gib: f64) -> bool {
        f64::from(self.min_memory_gib) <= memory_gib && memory_gib <= f64::from(self.max_memory_gib)
    }
}
