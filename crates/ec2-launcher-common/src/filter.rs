//! Instance type filter
//!
//! An instance type is eligible when it is current generation, supports
//! x86_64, and its vCPU count and memory both fall inside the inclusive
//! bounds of the [`SelectionConstraints`].

use crate::catalog::{ARCH_X86_64, InstanceTypeDescriptor};
use crate::constraints::SelectionConstraints;

/// First predicate an instance type failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum Rejection {
    #[strum(serialize = "previous generation")]
    PreviousGeneration,
    #[strum(serialize = "no x86_64 support")]
    UnsupportedArchitecture,
    #[strum(serialize = "vCPU count out of range")]
    VcpuOutOfRange,
    #[strum(serialize = "memory out of range")]
    MemoryOutOfRange,
}

/// Check one descriptor against the constraints
pub fn evaluate(
    descriptor: &InstanceTypeDescriptor,
    constraints: &SelectionConstraints,
) -> Result<(), Rejection> {
    if !descriptor.is_current_generation {
        return Err(Rejection::PreviousGeneration);
    }
    if !descriptor.supports_architecture(ARCH_X86_64) {
        return Err(Rejection::UnsupportedArchitecture);
    }
    if !constraints.vcpu_in_range(descriptor.vcpu_count) {
        return Err(Rejection::VcpuOutOfRange);
    }
    if !constraints.memory_in_range(descriptor.memory_gib()) {
        return Err(Rejection::MemoryOutOfRange);
    }
    Ok(())
}

pub fn matches(descriptor: &InstanceTypeDescriptor, constraints: &SelectionConstraints) -> bool {
    evaluate(descriptor, constraints).is_ok()
}

/// Keep the descriptors that satisfy every predicate, in catalog order
pub fn filter_instance_types(
    descriptors: &[InstanceTypeDescriptor],
    constraints: &SelectionConstraints,
) -> Vec<InstanceTypeDescriptor> {
    descriptors
        .iter()
        .filter(|d| matches(d, constraints))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{USAGE_CLASS_ON_DEMAND, USAGE_CLASS_SPOT};

    fn descriptor(name: &str, vcpus: u32, memory_mib: u64) -> InstanceTypeDescriptor {
        InstanceTypeDescriptor {
            name: name.to_string(),
            vcpu_count: vcpus,
            memory_mib,
            is_current_generation: true,
            supported_architectures: [ARCH_X86_64.to_string()].into(),
            supported_purchase_classes: [
                USAGE_CLASS_ON_DEMAND.to_string(),
                USAGE_CLASS_SPOT.to_string(),
            ]
            .into(),
        }
    }

    fn constraints(min_vcpu: u32, max_vcpu: u32, min_mem: u32, max_mem: u32) -> SelectionConstraints {
        SelectionConstraints {
            min_vcpu,
            max_vcpu,
            min_memory_gib: min_mem,
            max_memory_gib: max_mem,
            ..Default::default()
        }
    }

    fn sample_catalog() -> Vec<InstanceTypeDescriptor> {
        let mut previous = descriptor("t2.small", 1, 2048);
        previous.is_current_generation = false;

        let mut arm = descriptor("t4g.small", 2, 2048);
        arm.supported_architectures = ["arm64".to_string()].into();

        vec![
            descriptor("t3.nano", 2, 512),
            descriptor("t3.micro", 2, 1024),
            previous,
            descriptor("t3.small", 2, 2048),
            arm,
            descriptor("t3a.medium", 2, 4096),
            descriptor("c5.xlarge", 4, 8192),
            descriptor("m5.large", 2, 8192),
            descriptor("r5.large", 2, 16384),
        ]
    }

    #[test]
    fn test_filter_keeps_matching_in_order() {
        let result = filter_instance_types(&sample_catalog(), &constraints(1, 2, 1, 2));
        let names: Vec<_> = result.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["t3.micro", "t3.small"]);
    }

    #[test]
    fn test_filter_output_is_exactly_the_passing_subset() {
        let catalog = sample_catalog();
        for c in [
            constraints(1, 2, 1, 2),
            constraints(1, 4, 1, 8),
            constraints(2, 2, 0, 16),
            constraints(4, 4, 8, 8),
            constraints(8, 16, 32, 64),
        ] {
            let kept = filter_instance_types(&catalog, &c);
            for d in &catalog {
                let passes = d.is_current_generation
                    && d.supported_architectures.contains(ARCH_X86_64)
                    && c.min_vcpu <= d.vcpu_count
                    && d.vcpu_count <= c.max_vcpu
                    && f64::from(c.min_memory_gib) <= d.memory_gib()
                    && d.memory_gib() <= f64::from(c.max_memory_gib);
                assert_eq!(kept.contains(d), passes, "{} under {:?}", d.name, c);
            }
            assert!(kept.iter().all(|d| catalog.contains(d)));
        }
    }

    #[test]
    fn test_memory_upper_bound_is_inclusive() {
        let d = descriptor("t3.small", 2, 2048);
        assert_eq!(evaluate(&d, &constraints(1, 2, 1, 2)), Ok(()));

        let d = descriptor("odd.size", 2, 2049);
        assert_eq!(
            evaluate(&d, &constraints(1, 2, 1, 2)),
            Err(Rejection::MemoryOutOfRange)
        );
    }

    #[test]
    fn test_fractional_memory_is_not_rounded() {
        // 1.5 GiB sits inside [1, 2] but outside [2, 4]
        let d = descriptor("half.size", 1, 1536);
        assert!(matches(&d, &constraints(1, 2, 1, 2)));
        assert_eq!(
            evaluate(&d, &constraints(1, 2, 2, 4)),
            Err(Rejection::MemoryOutOfRange)
        );
    }

    #[test]
    fn test_rejection_reasons() {
        let catalog = sample_catalog();
        let c = constraints(1, 2, 1, 2);
        let reason = |name: &str| {
            let d = catalog.iter().find(|d| d.name == name).unwrap();
            evaluate(d, &c)
        };

        assert_eq!(reason("t2.small"), Err(Rejection::PreviousGeneration));
        assert_eq!(reason("t4g.small"), Err(Rejection::UnsupportedArchitecture));
        assert_eq!(reason("c5.xlarge"), Err(Rejection::VcpuOutOfRange));
        assert_eq!(reason("t3.nano"), Err(Rejection::MemoryOutOfRange));
    }

    #[test]
    fn test_filter_can_be_empty() {
        let result = filter_instance_types(&sample_catalog(), &constraints(96, 128, 1, 2));
        assert!(result.is_empty());
        assert!(filter_instance_types(&[], &constraints(1, 2, 1, 2)).is_empty());
    }
}
