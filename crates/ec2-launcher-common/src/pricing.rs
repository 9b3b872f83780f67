//! Pricing API filter set and price document extraction
//!
//! `GetProducts` returns each product as a JSON document string. The on-demand
//! hourly price lives at
//! `terms.OnDemand.<offer term>.priceDimensions.<rate code>.pricePerUnit.USD`;
//! with the filter set below exactly one product, term and dimension is
//! expected, and the first of each in document order is used.

use crate::regions::Region;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Service code for EC2 in the Pricing API
pub const SERVICE_CODE: &str = "AmazonEC2";

/// The Pricing API is only served from this region
pub const PRICING_API_REGION: &str = "us-east-1";

/// Pricing attribute names and fixed values
pub mod fields {
    pub const CAPACITY_STATUS: &str = "capacitystatus";
    pub const INSTANCE_TYPE: &str = "instanceType";
    pub const LOCATION: &str = "location";
    pub const OPERATING_SYSTEM: &str = "operatingSystem";
    pub const PRE_INSTALLED_SW: &str = "preInstalledSw";
    pub const TENANCY: &str = "tenancy";

    pub const UNUSED_CAPACITY_RESERVATION: &str = "UnusedCapacityReservation";
    pub const LINUX: &str = "Linux";
    pub const NO_SOFTWARE: &str = "NA";
    pub const SHARED: &str = "Shared";
}

/// One TERM_MATCH filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    pub field: &'static str,
    pub value: String,
}

impl TermMatch {
    fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Filters selecting the Linux, shared-tenancy, no-software on-demand rate
pub fn term_filters(instance_type: &str, region: Region) -> Vec<TermMatch> {
    vec![
        TermMatch::new(fields::CAPACITY_STATUS, fields::UNUSED_CAPACITY_RESERVATION),
        TermMatch::new(fields::INSTANCE_TYPE, instance_type),
        TermMatch::new(fields::LOCATION, region.pricing_location()),
        TermMatch::new(fields::OPERATING_SYSTEM, fields::LINUX),
        TermMatch::new(fields::PRE_INSTALLED_SW, fields::NO_SOFTWARE),
        TermMatch::new(fields::TENANCY, fields::SHARED),
    ]
}

/// Result of reading a price out of a `GetProducts` price list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceExtraction {
    Found(Decimal),
    /// The price list was empty
    NotFound,
    /// A product was present but the price path was missing or invalid
    Malformed(String),
}

/// Extract the USD on-demand price from the first product of a price list
pub fn extract_on_demand_price(price_list: &[String]) -> PriceExtraction {
    let Some(first) = price_list.first() else {
        return PriceExtraction::NotFound;
    };

    let product: Value = match serde_json::from_str(first) {
        Ok(v) => v,
        Err(e) => return PriceExtraction::Malformed(format!("invalid product JSON: {e}")),
    };

    match price_from_product(&product) {
        Ok(price) => PriceExtraction::Found(price),
        Err(reason) => PriceExtraction::Malformed(reason),
    }
}

fn price_from_product(product: &Value) -> Result<Decimal, String> {
    let term = first_entry(&product["terms"]["OnDemand"], "terms.OnDemand")?;
    let dimension = first_entry(&term["priceDimensions"], "priceDimensions")?;
    let usd = dimension["pricePerUnit"]["USD"]
        .as_str()
        .ok_or_else(|| "pricePerUnit.USD is missing".to_string())?;

    Decimal::from_str(usd).map_err(|e| format!("invalid USD price '{usd}': {e}"))
}

fn first_entry<'a>(value: &'a Value, path: &str) -> Result<&'a Value, String> {
    value
        .as_object()
        .ok_or_else(|| format!("{path} is missing"))?
        .values()
        .next()
        .ok_or_else(|| format!("{path} is empty"))
}
