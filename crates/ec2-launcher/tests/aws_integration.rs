//! AWS integration tests - actually call AWS APIs
//!
//! These tests only read from AWS (no instance is launched) but still need
//! credentials, so they are marked `#[ignore]` and only run with:
//! ```
//! AWS_PROFILE=your_profile cargo test --test aws_integration -- --ignored
//! ```

use ec2_launcher::aws::{AwsContext, Ec2Client, PricingClient, SsmClient};
use ec2_launcher::catalog_cache::CatalogCache;
use ec2_launcher::orchestrator::select_instance_type;
use ec2_launcher_common::{Region, SelectionConstraints};
use ec2_launcher_test_utils::get_test_region;
use rust_decimal::Decimal;

/// Instance type priced in every commercial region
const TEST_INSTANCE_TYPE: &str = "t3.micro";

fn test_region() -> Region {
    Region::parse(&get_test_region()).expect("AWS_REGION must be a supported region")
}

#[tokio::test]
#[ignore]
async fn test_describe_instance_types_follows_pages() {
    let region = test_region();
    let client = Ec2Client::new(region.code()).await;

    let records = client
        .describe_instance_types()
        .await
        .expect("AWS credentials required - set AWS_PROFILE or AWS_ACCESS_KEY_ID");

    // A single page holds at most 100 entries
    assert!(
        records.len() > 100,
        "expected a multi-page catalog, got {} entries",
        records.len()
    );
    assert!(records.iter().any(|r| r.instance_type == TEST_INSTANCE_TYPE));
}

#[tokio::test]
#[ignore]
async fn test_on_demand_price_lookup() {
    let region = test_region();
    let aws = AwsContext::new(region.code()).await;
    let pricing = PricingClient::from_context(&aws);

    let price = pricing
        .price_for(TEST_INSTANCE_TYPE, region)
        .await
        .expect("Should find a price");
    assert!(price > Decimal::ZERO, "price should be positive, got {price}");
}

#[tokio::test]
#[ignore]
async fn test_latest_image_id() {
    let aws = AwsContext::new(test_region().code()).await;
    let ssm = SsmClient::from_context(&aws);

    let image_id = ssm.latest_image_id().await.expect("Should resolve AMI");
    assert!(
        image_id.starts_with("ami-"),
        "AMI ID should start with 'ami-', got: {image_id}"
    );
}

#[tokio::test]
#[ignore]
async fn test_select_cheapest_without_launching() {
    let region = test_region();
    let aws = AwsContext::new(region.code()).await;
    let ec2 = Ec2Client::from_context(&aws);
    let pricing = PricingClient::from_context(&aws);

    let dir = tempfile::tempdir().unwrap();
    let cache = CatalogCache::new(dir.path().join("instance_types.json"));
    let constraints = SelectionConstraints {
        region,
        ..SelectionConstraints::default()
    };

    let selected = select_instance_type(&cache, &ec2, false, &pricing, &constraints)
        .await
        .expect("Should select an instance type");

    assert!((1..=2).contains(&selected.descriptor.vcpu_count));
    assert!(selected.price() > Decimal::ZERO);
    assert!(cache.path().exists());
}
