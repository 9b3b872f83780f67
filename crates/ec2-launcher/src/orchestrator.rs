//! Main orchestration logic for a launcher run
//!
//! catalog cache → filter → price each match → pick the cheapest → resolve
//! the machine image → launch.

use crate::aws::{
    AwsContext, CatalogSource, Ec2Client, Ec2Operations, ImageLookup, PriceLookup, PricingClient,
    SsmClient,
};
use crate::catalog_cache::CatalogCache;
use crate::config::LaunchConfig;
use crate::launcher::{LaunchResult, Launcher};
use crate::wait::WaitConfig;
use anyhow::{Context, Result};
use ec2_launcher_common::filter::evaluate;
use ec2_launcher_common::{
    InstanceTypeDescriptor, PurchaseModel, QuotedInstanceType, SelectionConstraints,
    SelectionError, filter_instance_types, select_cheapest,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Find the cheapest instance type satisfying `constraints`.
///
/// Every matching type is priced before selection; a failed price lookup
/// aborts the run. No pricing call is made when nothing matches.
pub async fn select_instance_type<S, P>(
    cache: &CatalogCache,
    source: &S,
    refresh: bool,
    pricing: &P,
    constraints: &SelectionConstraints,
) -> Result<QuotedInstanceType>
where
    S: CatalogSource,
    P: PriceLookup,
{
    let descriptors = cache.ensure_catalog(source, refresh).await?;
    log_rejections(&descriptors, constraints);

    let matching = filter_instance_types(&descriptors, constraints);
    if matching.is_empty() {
        return Err(no_match(constraints, descriptors.len()).into());
    }
    info!(
        candidates = matching.len(),
        catalog_size = descriptors.len(),
        "Pricing matching instance types"
    );

    let mut quoted = Vec::with_capacity(matching.len());
    for descriptor in matching {
        let price = pricing
            .price_for(&descriptor.name, constraints.region)
            .await
            .with_context(|| format!("Failed to price instance type {}", descriptor.name))?;
        debug!(instance_type = %descriptor.name, price = %price, "Priced instance type");
        quoted.push(QuotedInstanceType::new(descriptor, price));
    }

    select_cheapest(&quoted)
        .cloned()
        .ok_or_else(|| no_match(constraints, descriptors.len()).into())
}

/// Resolve the machine image, then launch `selected`
pub async fn launch_selected<E, I>(
    ec2: &E,
    images: &I,
    selected: &QuotedInstanceType,
    preference: PurchaseModel,
    spot_wait: WaitConfig,
) -> Result<LaunchResult>
where
    E: Ec2Operations,
    I: ImageLookup,
{
    let image_id = images.latest_image_id().await?;
    Launcher::new(ec2, spot_wait)
        .launch(selected, &image_id, preference)
        .await
}

/// Run the whole selection and launch against AWS.
///
/// Returns `None` on a dry run.
pub async fn run(config: LaunchConfig) -> Result<Option<LaunchResult>> {
    let constraints = &config.constraints;
    println!("{}", describe_search(constraints));

    let region = constraints.region.code();
    let aws = AwsContext::with_profile(region, config.aws.aws_profile.as_deref()).await;
    let ec2 = Ec2Client::from_context(&aws);
    let pricing = PricingClient::from_context(&aws);
    let cache = CatalogCache::new(&config.catalog.path);

    let selected =
        select_instance_type(&cache, &ec2, config.catalog.refresh, &pricing, constraints).await?;
    println!("{}", describe_selection(&selected));

    if config.dry_run() {
        info!(instance_type = %selected.name(), "Dry run, not launching");
        return Ok(None);
    }

    println!(
        "Launching '{}' ({}) in '{}'",
        selected.name(),
        config.purchase_preference(),
        constraints.region
    );

    let ssm = SsmClient::from_context(&aws);
    let result = launch_selected(
        &ec2,
        &ssm,
        &selected,
        config.purchase_preference(),
        WaitConfig::with_timeout(config.flags.spot_timeout),
    )
    .await?;

    println!("{}", describe_launch(&result, constraints));
    Ok(Some(result))
}

fn no_match(constraints: &SelectionConstraints, catalog_size: usize) -> SelectionError {
    SelectionError::NoMatchingInstanceType {
        min_vcpu: constraints.min_vcpu,
        max_vcpu: constraints.max_vcpu,
        min_memory_gib: constraints.min_memory_gib,
        max_memory_gib: constraints.max_memory_gib,
        catalog_size,
    }
}

fn log_rejections(descriptors: &[InstanceTypeDescriptor], constraints: &SelectionConstraints) {
    let mut counts = HashMap::new();
    for descriptor in descriptors {
        if let Err(rejection) = evaluate(descriptor, constraints) {
            *counts.entry(rejection).or_insert(0usize) += 1;
        }
    }
    for (rejection, count) in counts {
        debug!(reason = %rejection, count, "Rejected instance types");
    }
}

fn describe_search(constraints: &SelectionConstraints) -> String {
    format!(
        "LOOKING FOR: {}-{} vCPU & {}-{} Memory (GiB)",
        constraints.min_vcpu,
        constraints.max_vcpu,
        constraints.min_memory_gib,
        constraints.max_memory_gib
    )
}

fn describe_selection(selected: &QuotedInstanceType) -> String {
    format!(
        "FOUND: {} - vCPU: {} - Mem: {} GiB - Price: ${} USD",
        selected.name(),
        selected.descriptor.vcpu_count,
        selected.descriptor.memory_gib(),
        selected.price()
    )
}

fn describe_launch(result: &LaunchResult, constraints: &SelectionConstraints) -> String {
    let fallback = if result.fell_back {
        " after spot fallback"
    } else {
        ""
    };
    format!(
        "Successfully launched {} instance: '{}' in '{}'{}",
        result.purchase_model, result.instance_id, constraints.region, fallback
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::ec2::{MockCatalogSource, MockEc2Operations};
    use crate::aws::pricing::MockPriceLookup;
    use crate::aws::ssm::MockImageLookup;
    use ec2_launcher_common::Region;
    use ec2_launcher_test_utils::{InstanceTypeBuilder, sample_catalog, snapshot_json};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// A cache pre-populated with the sample catalog
    fn sample_cache(dir: &tempfile::TempDir) -> CatalogCache {
        let path = dir.path().join("instance_types.json");
        std::fs::write(&path, snapshot_json(&sample_catalog())).unwrap();
        CatalogCache::new(path)
    }

    fn no_fetch() -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source.expect_describe_instance_types().times(0);
        source
    }

    #[tokio::test]
    async fn test_selects_cheapest_matching_type() {
        let dir = tempfile::tempdir().unwrap();
        let cache = sample_cache(&dir);

        let mut pricing = MockPriceLookup::new();
        pricing
            .expect_price_for()
            .times(2)
            .returning(|name, region| {
                assert_eq!(region, Region::ApSoutheast2);
                match name {
                    "t3.micro" => Ok(dec("0.0132")),
                    "t3.small" => Ok(dec("0.0264")),
                    other => panic!("unexpected pricing call for {other}"),
                }
            });

        let selected = select_instance_type(
            &cache,
            &no_fetch(),
            false,
            &pricing,
            &SelectionConstraints::default(),
        )
        .await
        .unwrap();

        assert_eq!(selected.name(), "t3.micro");
        assert_eq!(selected.price(), dec("0.0132"));
    }

    #[tokio::test]
    async fn test_first_minimum_wins_on_equal_prices() {
        let dir = tempfile::tempdir().unwrap();
        let cache = sample_cache(&dir);

        let mut pricing = MockPriceLookup::new();
        pricing
            .expect_price_for()
            .returning(|_, _| Ok(dec("0.0200")));

        let selected = select_instance_type(
            &cache,
            &no_fetch(),
            false,
            &pricing,
            &SelectionConstraints::default(),
        )
        .await
        .unwrap();

        assert_eq!(selected.name(), "t3.micro");
    }

    #[tokio::test]
    async fn test_no_match_makes_no_pricing_calls() {
        let dir = tempfile::tempdir().unwrap();
        let cache = sample_cache(&dir);

        let mut pricing = MockPriceLookup::new();
        pricing.expect_price_for().times(0);

        let constraints = SelectionConstraints {
            min_vcpu: 64,
            max_vcpu: 128,
            ..SelectionConstraints::default()
        };
        let err = select_instance_type(&cache, &no_fetch(), false, &pricing, &constraints)
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SelectionError>(),
            Some(&SelectionError::NoMatchingInstanceType {
                min_vcpu: 64,
                max_vcpu: 128,
                min_memory_gib: 1,
                max_memory_gib: 2,
                catalog_size: sample_catalog().len(),
            })
        );
    }

    #[tokio::test]
    async fn test_price_failure_aborts_selection() {
        let dir = tempfile::tempdir().unwrap();
        let cache = sample_cache(&dir);

        let mut pricing = MockPriceLookup::new();
        pricing
            .expect_price_for()
            .times(1)
            .returning(|name, _| {
                Err(ec2_launcher_common::PriceError::NotFound {
                    instance_type: name.to_string(),
                    location: "Asia Pacific (Sydney)".to_string(),
                }
                .into())
            });

        let err = select_instance_type(
            &cache,
            &no_fetch(),
            false,
            &pricing,
            &SelectionConstraints::default(),
        )
        .await
        .unwrap_err();

        assert!(format!("{err:#}").contains("t3.micro"));
    }

    #[tokio::test]
    async fn test_refresh_refetches_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let cache = sample_cache(&dir);

        let mut source = MockCatalogSource::new();
        source
            .expect_describe_instance_types()
            .times(1)
            .returning(|| Ok(vec![InstanceTypeBuilder::new("m7i.large", 2, 2048).build()]));

        let mut pricing = MockPriceLookup::new();
        pricing
            .expect_price_for()
            .times(1)
            .returning(|_, _| Ok(dec("0.1008")));

        let selected = select_instance_type(
            &cache,
            &source,
            true,
            &pricing,
            &SelectionConstraints::default(),
        )
        .await
        .unwrap();

        assert_eq!(selected.name(), "m7i.large");
    }

    #[tokio::test]
    async fn test_launch_selected_resolves_image_once() {
        let mut images = MockImageLookup::new();
        images
            .expect_latest_image_id()
            .times(1)
            .returning(|| Ok("ami-0abc".to_string()));

        let mut ec2 = MockEc2Operations::new();
        ec2.expect_run_instance()
            .times(1)
            .returning(|req| {
                assert_eq!(req.image_id, "ami-0abc");
                Ok("i-0123".to_string())
            });

        let selected = QuotedInstanceType::new(
            InstanceTypeBuilder::new("t3.small", 2, 2048)
                .on_demand_only()
                .descriptor(),
            dec("0.0264"),
        );

        let result = launch_selected(
            &ec2,
            &images,
            &selected,
            PurchaseModel::Spot,
            WaitConfig::with_timeout(Duration::from_secs(60)),
        )
        .await
        .unwrap();

        assert_eq!(result.instance_id, "i-0123");
        assert!(result.fell_back);
    }

    #[tokio::test]
    async fn test_image_lookup_failure_launches_nothing() {
        let mut images = MockImageLookup::new();
        images
            .expect_latest_image_id()
            .returning(|| Err(anyhow::anyhow!("ParameterNotFound")));

        let mut ec2 = MockEc2Operations::new();
        ec2.expect_request_spot_instance().times(0);
        ec2.expect_run_instance().times(0);

        let selected = QuotedInstanceType::new(
            InstanceTypeBuilder::new("t3.micro", 2, 1024).descriptor(),
            dec("0.0132"),
        );

        assert!(
            launch_selected(
                &ec2,
                &images,
                &selected,
                PurchaseModel::Spot,
                WaitConfig::default(),
            )
            .await
            .is_err()
        );
    }

    #[test]
    fn test_output_lines() {
        let constraints = SelectionConstraints::default();
        assert_eq!(
            describe_search(&constraints),
            "LOOKING FOR: 1-2 vCPU & 1-2 Memory (GiB)"
        );

        let selected = QuotedInstanceType::new(
            InstanceTypeBuilder::new("t3.micro", 2, 1024).descriptor(),
            dec("0.0132"),
        );
        assert_eq!(
            describe_selection(&selected),
            "FOUND: t3.micro - vCPU: 2 - Mem: 1 GiB - Price: $0.0132 USD"
        );

        let result = LaunchResult {
            instance_id: "i-0123".to_string(),
            purchase_model: PurchaseModel::OnDemand,
            fell_back: true,
        };
        assert_eq!(
            describe_launch(&result, &constraints),
            "Successfully launched on-demand instance: 'i-0123' in 'ap-southeast-2' after spot fallback"
        );
    }
}
