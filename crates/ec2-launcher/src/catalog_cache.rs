//! Local instance catalog snapshot
//!
//! The first run in a region fetches the full catalog and writes it to disk;
//! later runs read the file. There is no expiry: pass `--refresh-catalog` to
//! re-fetch.

use crate::aws::CatalogSource;
use anyhow::{Context, Result};
use ec2_launcher_common::{CatalogSnapshot, InstanceTypeDescriptor};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalog snapshot stored at a fixed path
#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog, fetching and persisting it first when the snapshot
    /// is missing or `refresh` is set.
    ///
    /// A corrupt snapshot is an error, not a reason to re-fetch.
    pub async fn ensure_catalog<S: CatalogSource>(
        &self,
        source: &S,
        refresh: bool,
    ) -> Result<Vec<InstanceTypeDescriptor>> {
        let snapshot = if !refresh && self.path.exists() {
            self.read()?
        } else {
            let snapshot = CatalogSnapshot::new(source.describe_instance_types().await?);
            self.write(&snapshot)?;
            info!(
                path = %self.path.display(),
                count = snapshot.len(),
                "Saved instance type catalog"
            );
            snapshot
        };

        Ok(snapshot.descriptors())
    }

    fn read(&self) -> Result<CatalogSnapshot> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read catalog cache {}", self.path.display()))?;
        let snapshot = CatalogSnapshot::from_json(&json)
            .with_context(|| format!("Failed to parse catalog cache {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            count = snapshot.len(),
            "Loaded cached instance type catalog"
        );
        Ok(snapshot)
    }

    fn write(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = snapshot
            .to_json()
            .context("Failed to serialize instance type catalog")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write catalog cache {}", self.path.display()))
    }
}
