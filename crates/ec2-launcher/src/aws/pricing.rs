//! On-demand price lookup via the AWS Pricing API

use crate::aws::context::AwsContext;
use anyhow::{Context, Result};
use aws_sdk_pricing::Client;
use aws_sdk_pricing::types::{Filter, FilterType};
use ec2_launcher_common::pricing::{SERVICE_CODE, extract_on_demand_price, term_filters};
use ec2_launcher_common::{PriceError, PriceExtraction, Region};
use rust_decimal::Decimal;
use tracing::debug;

/// Lookup of the hourly on-demand price of an instance type.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait PriceLookup: Send + Sync {
    /// Hourly USD price for Linux, shared tenancy, no pre-installed software
    async fn price_for(&self, instance_type: &str, region: Region) -> Result<Decimal>;
}

/// Pricing client (always talks to the us-east-1 endpoint)
pub struct PricingClient {
    client: Client,
}

impl PricingClient {
    /// Create a Pricing client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.pricing_client(),
        }
    }

    pub async fn price_for(&self, instance_type: &str, region: Region) -> Result<Decimal> {
        let mut request = self.client.get_products().service_code(SERVICE_CODE);

        for term in term_filters(instance_type, region) {
            request = request.filters(
                Filter::builder()
                    .r#type(FilterType::TermMatch)
                    .field(term.field)
                    .value(term.value)
                    .build()
                    .context("Failed to build pricing filter")?,
            );
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to get price for {instance_type}"))?;

        let price = price_from_extraction(
            extract_on_demand_price(response.price_list()),
            instance_type,
            region,
        )?;

        debug!(
            instance_type = %instance_type,
            region = %region,
            price = %price,
            "Resolved on-demand price"
        );
        Ok(price)
    }
}

/// Turn an extraction result into a price or a typed error
fn price_from_extraction(
    extraction: PriceExtraction,
    instance_type: &str,
    region: Region,
) -> Result<Decimal, PriceError> {
    match extraction {
        PriceExtraction::Found(price) => Ok(price),
        PriceExtraction::NotFound => Err(PriceError::NotFound {
            instance_type: instance_type.to_string(),
            location: region.pricing_location().to_string(),
        }),
        PriceExtraction::Malformed(reason) => Err(PriceError::Malformed {
            instance_type: instance_type.to_string(),
            reason,
        }),
    }
}

impl PriceLookup for PricingClient {
    async fn price_for(&self, instance_type: &str, region: Region) -> Result<Decimal> {
        PricingClient::price_for(self, instance_type, region).await
    }
}
