//! Instance type catalog fetch

use super::Ec2Client;
use anyhow::{Context, Result};
use aws_sdk_ec2::types::InstanceTypeInfo;
use ec2_launcher_common::InstanceTypeRecord;
use ec2_launcher_common::catalog::{MemoryInfo, ProcessorInfo, VCpuInfo};
use tracing::{debug, warn};

impl Ec2Client {
    /// Describe every instance type offered in the client's region.
    ///
    /// Follows `NextToken` until the last page.
    pub async fn describe_instance_types(&self) -> Result<Vec<InstanceTypeRecord>> {
        let mut records = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let response = self
                .client
                .describe_instance_types()
                .set_next_token(next_token.take())
                .send()
                .await
                .context("Failed to describe instance types")?;
            pages += 1;

            for info in response.instance_types() {
                match record_from_info(info) {
                    Some(record) => records.push(record),
                    None => warn!(
                        instance_type = ?info.instance_type(),
                        "Skipping instance type with incomplete description"
                    ),
                }
            }

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(pages, count = records.len(), "Fetched instance type catalog");
        Ok(records)
    }
}

/// Convert an SDK description into a catalog record.
///
/// Returns `None` when the name, vCPU count or memory size is missing.
fn record_from_info(info: &InstanceTypeInfo) -> Option<InstanceTypeRecord> {
    let instance_type = info.instance_type()?.as_str().to_string();
    let default_vcpus = info.v_cpu_info()?.default_v_cpus()?;
    let size_in_mib = info.memory_info()?.size_in_mib()?;

    let supported_architectures = info
        .processor_info()
        .map(|p| {
            p.supported_architectures()
                .iter()
                .map(|a| a.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();

    Some(InstanceTypeRecord {
        instance_type,
        current_generation: info.current_generation().unwrap_or(false),
        vcpu_info: VCpuInfo {
            default_vcpus: u32::try_from(default_vcpus).ok()?,
        },
        memory_info: MemoryInfo {
            size_in_mib: u64::try_from(size_in_mib).ok()?,
        },
        processor_info: ProcessorInfo {
            supported_architectures,
        },
        supported_usage_classes: info
            .supported_usage_classes()
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
    })
}
