//! Instance type catalog
//!
//! [`CatalogSnapshot`] is the on-disk form of the catalog. It keeps the key
//! layout of the EC2 `DescribeInstanceTypes` JSON response
//! (`{"InstanceTypes": [...]}`) so a snapshot written by the AWS CLI can be
//! read back as well. Keys this tool does not use are ignored on read.
//!
//! [`InstanceTypeDescriptor`] is the flattened form the filter and launcher
//! work with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Architecture every selected instance type must support
pub const ARCH_X86_64: &str = "x86_64";

/// Usage class marking an instance type as available for spot
pub const USAGE_CLASS_SPOT: &str = "spot";

/// Usage class marking an instance type as available on-demand
pub const USAGE_CLASS_ON_DEMAND: &str = "on-demand";

/// Catalog snapshot as persisted in the cache file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(rename = "InstanceTypes", default)]
    pub instance_types: Vec<InstanceTypeRecord>,
}

impl CatalogSnapshot {
    pub fn new(instance_types: Vec<InstanceTypeRecord>) -> Self {
        Self { instance_types }
    }

    /// Parse a snapshot from its JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot to JSON text
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Flatten every record into a descriptor, keeping catalog order
    pub fn descriptors(&self) -> Vec<InstanceTypeDescriptor> {
        self.instance_types
            .iter()
            .map(InstanceTypeDescriptor::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instance_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instance_types.is_empty()
    }
}

/// One entry of the `InstanceTypes` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTypeRecord {
    #[serde(rename = "InstanceType")]
    pub instance_type: String,

    #[serde(rename = "CurrentGeneration", default)]
    pub current_generation: bool,

    #[serde(rename = "VCpuInfo")]
    pub vcpu_info: VCpuInfo,

    #[serde(rename = "MemoryInfo")]
    pub memory_info: MemoryInfo,

    #[serde(rename = "ProcessorInfo")]
    pub processor_info: ProcessorInfo,

    #[serde(rename = "SupportedUsageClasses", default)]
    pub supported_usage_classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VCpuInfo {
    #[serde(rename = "DefaultVCpus")]
    pub default_vcpus: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    #[serde(rename = "SizeInMiB")]
    pub size_in_mib: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorInfo {
    #[serde(rename = "SupportedArchitectures", default)]
    pub supported_architectures: Vec<String>,
}

/// Flattened view of an instance type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceTypeDescriptor {
    /// Instance type name (e.g., "t3.micro")
    pub name: String,
    pub vcpu_count: u32,
    pub memory_mib: u64,
    pub is_current_generation: bool,
    pub supported_architectures: BTreeSet<String>,
    /// Usage classes ("spot", "on-demand")
    pub supported_purchase_classes: BTreeSet<String>,
}

impl InstanceTypeDescriptor {
    /// Memory in GiB (MiB / 1024, no rounding)
    pub fn memory_gib(&self) -> f64 {
        self.memory_mib as f64 / 1024.0
    }

    pub fn supports_architecture(&self, arch: &str) -> bool {
        self.supported_architectures.contains(arch)
    }

    pub fn supports_spot(&self) -> bool {
        self.supported_purchase_classes.contains(USAGE_CLASS_SPOT)
    }
}

impl From<&InstanceTypeRecord> for InstanceTypeDescriptor {
    fn from(record: &InstanceTypeRecord) -> Self {
        Self {
            name: record.instance_type.clone(),
            vcpu_count: record.vcpu_info.default_vcpus,
            memory_mib: record.memory_info.size_in_mib,
            is_current_generation: record.current_generation,
            supported_architectures: record
                .processor_info
                .supported_architectures
                .iter()
                .cloned()
                .collect(),
            supported_purchase_classes: record.supported_usage_classes.iter().cloned().collect(),
        }
    }
}
