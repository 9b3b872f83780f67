//! Supported AWS regions
//!
//! The Pricing API filters on a human-readable location ("Asia Pacific
//! (Sydney)") rather than the region code, so every supported region carries
//! its location name here.

use crate::error::ConstraintError;
use std::str::FromStr;
use strum::VariantNames;

/// AWS regions this tool can launch into
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::VariantNames,
    strum::EnumIter,
)]
pub enum Region {
    #[strum(serialize = "us-east-1")]
    UsEast1,
    #[strum(serialize = "us-east-2")]
    UsEast2,
    #[strum(serialize = "us-west-1")]
    UsWest1,
    #[strum(serialize = "us-west-2")]
    UsWest2,
    #[strum(serialize = "af-south-1")]
    AfSouth1,
    #[strum(serialize = "ap-east-1")]
    ApEast1,
    #[strum(serialize = "ap-south-1")]
    ApSouth1,
    #[strum(serialize = "ap-south-2")]
    ApSouth2,
    #[strum(serialize = "ap-northeast-1")]
    ApNortheast1,
    #[strum(serialize = "ap-northeast-2")]
    ApNortheast2,
    #[strum(serialize = "ap-northeast-3")]
    ApNortheast3,
    #[strum(serialize = "ap-southeast-1")]
    ApSoutheast1,
    #[strum(serialize = "ap-southeast-2")]
    ApSoutheast2,
    #[strum(serialize = "ap-southeast-3")]
    ApSoutheast3,
    #[strum(serialize = "ap-southeast-4")]
    ApSoutheast4,
    #[strum(serialize = "ca-central-1")]
    CaCentral1,
    #[strum(serialize = "ca-west-1")]
    CaWest1,
    #[strum(serialize = "eu-central-1")]
    EuCentral1,
    #[strum(serialize = "eu-central-2")]
    EuCentral2,
    #[strum(serialize = "eu-west-1")]
    EuWest1,
    #[strum(serialize = "eu-west-2")]
    EuWest2,
    #[strum(serialize = "eu-west-3")]
    EuWest3,
    #[strum(serialize = "eu-north-1")]
    EuNorth1,
    #[strum(serialize = "eu-south-1")]
    EuSouth1,
    #[strum(serialize = "eu-south-2")]
    EuSouth2,
    #[strum(serialize = "il-central-1")]
    IlCentral1,
    #[strum(serialize = "me-south-1")]
    MeSouth1,
    #[strum(serialize = "me-central-1")]
    MeCentral1,
    #[strum(serialize = "sa-east-1")]
    SaEast1,
}

impl Region {
    /// Region code as used by the AWS SDK (e.g., "ap-southeast-2")
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Location name used by the Pricing API `location` filter
    pub fn pricing_location(self) -> &'static str {
        match self {
            Region::UsEast1 => "US East (N. Virginia)",
            Region::UsEast2 => "US East (Ohio)",
            Region::UsWest1 => "US West (N. California)",
            Region::UsWest2 => "US West (Oregon)",
            Region::AfSouth1 => "Africa (Cape Town)",
            Region::ApEast1 => "Asia Pacific (Hong Kong)",
            Region::ApSouth1 => "Asia Pacific (Mumbai)",
            Region::ApSouth2 => "Asia Pacific (Hyderabad)",
            Region::ApNortheast1 => "Asia Pacific (Tokyo)",
            Region::ApNortheast2 => "Asia Pacific (Seoul)",
            Region::ApNortheast3 => "Asia Pacific (Osaka)",
            Region::ApSoutheast1 => "Asia Pacific (Singapore)",
            Region::ApSoutheast2 => "Asia Pacific (Sydney)",
            Region::ApSoutheast3 => "Asia Pacific (Jakarta)",
            Region::ApSoutheast4 => "Asia Pacific (Melbourne)",
            Region::CaCentral1 => "Canada (Central)",
            Region::CaWest1 => "Canada West (Calgary)",
            Region::EuCentral1 => "EU (Frankfurt)",
            Region::EuCentral2 => "EU (Zurich)",
            Region::EuWest1 => "EU (Ireland)",
            Region::EuWest2 => "EU (London)",
            Region::EuWest3 => "EU (Paris)",
            Region::EuNorth1 => "EU (Stockholm)",
            Region::EuSouth1 => "EU (Milan)",
            Region::EuSouth2 => "EU (Spain)",
            Region::IlCentral1 => "Israel (Tel Aviv)",
            Region::MeSouth1 => "Middle East (Bahrain)",
            Region::MeCentral1 => "Middle East (UAE)",
            Region::SaEast1 => "South America (Sao Paulo)",
        }
    }

    /// Parse a region code, rejecting anything outside the supported set
    pub fn parse(code: &str) -> Result<Self, ConstraintError> {
        Region::from_str(code).map_err(|_| ConstraintError::UnsupportedRegion {
            region: code.to_string(),
            supported: Self::VARIANTS.join(", "),
        })
    }
}
