//! Catalog fixtures
//!
//! Builders for [`InstanceTypeRecord`]s shaped like real `DescribeInstanceTypes`
//! entries, so tests read as "a current-generation x86_64 type with 2 vCPUs
//! and 2 GiB" instead of nested struct literals.

use ec2_launcher_common::catalog::{
    ARCH_X86_64, MemoryInfo, ProcessorInfo, USAGE_CLASS_ON_DEMAND, USAGE_CLASS_SPOT, VCpuInfo,
};
use ec2_launcher_common::{CatalogSnapshot, InstanceTypeDescriptor, InstanceTypeRecord};

/// Builder for a single catalog record
#[derive(Debug, Clone)]
pub struct InstanceTypeBuilder {
    record: InstanceTypeRecord,
}

impl InstanceTypeBuilder {
    /// Current-generation x86_64 type available for spot and on-demand
    pub fn new(name: &str, vcpus: u32, memory_mib: u64) -> Self {
        Self {
            record: InstanceTypeRecord {
                instance_type: name.to_string(),
                current_generation: true,
                vcpu_info: VCpuInfo {
                    default_vcpus: vcpus,
                },
                memory_info: MemoryInfo {
                    size_in_mib: memory_mib,
                },
                processor_info: ProcessorInfo {
                    supported_architectures: vec![ARCH_X86_64.to_string()],
                },
                supported_usage_classes: vec![
                    USAGE_CLASS_ON_DEMAND.to_string(),
                    USAGE_CLASS_SPOT.to_string(),
                ],
            },
        }
    }

    pub fn previous_generation(mut self) -> Self {
        self.record.current_generation = false;
        self
    }

    pub fn architectures(mut self, archs: &[&str]) -> Self {
        self.record.processor_info.supported_architectures =
            archs.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn on_demand_only(mut self) -> Self {
        self.record.supported_usage_classes = vec![USAGE_CLASS_ON_DEMAND.to_string()];
        self
    }

    pub fn build(self) -> InstanceTypeRecord {
        self.record
    }

    pub fn descriptor(self) -> InstanceTypeDescriptor {
        InstanceTypeDescriptor::from(&self.record)
    }
}

/// A small catalog with one match for the default 1-2 vCPU / 1-2 GiB bounds
/// that supports spot (`t3.micro`), one that does not (`t3.small`), and
/// entries excluded by each filter predicate.
pub fn sample_catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(vec![
        InstanceTypeBuilder::new("t3.nano", 2, 512).build(),
        InstanceTypeBuilder::new("t3.micro", 2, 1024).build(),
        InstanceTypeBuilder::new("t2.small", 1, 2048)
            .previous_generation()
            .build(),
        InstanceTypeBuilder::new("t3.small", 2, 2048)
            .on_demand_only()
            .build(),
        InstanceTypeBuilder::new("t4g.small", 2, 2048)
            .architectures(&["arm64"])
            .build(),
        InstanceTypeBuilder::new("c5.xlarge", 4, 8192).build(),
        InstanceTypeBuilder::new("r5.large", 2, 16384).build(),
    ])
}

/// Serialize a snapshot the way the cache file stores it
pub fn snapshot_json(snapshot: &CatalogSnapshot) -> String {
    serde_json::to_string(snapshot).expect("catalog snapshot serializes")
}
