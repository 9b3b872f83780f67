//! Price quotes and cheapest-instance selection

use crate::catalog::InstanceTypeDescriptor;
use rust_decimal::Decimal;

/// On-demand hourly price for one instance type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub instance_type_name: String,
    /// USD per hour
    pub hourly_price_usd: Decimal,
}

/// A filtered instance type together with its quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedInstanceType {
    pub descriptor: InstanceTypeDescriptor,
    pub quote: PriceQuote,
}

impl QuotedInstanceType {
    pub fn new(descriptor: InstanceTypeDescriptor, hourly_price_usd: Decimal) -> Self {
        let quote = PriceQuote {
            instance_type_name: descriptor.name.clone(),
            hourly_price_usd,
        };
        Self { descriptor, quote }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn price(&self) -> Decimal {
        self.quote.hourly_price_usd
    }
}

/// Pick the cheapest entry; the first one wins on ties.
///
/// Returns `None` only for an empty slice.
pub fn select_cheapest(quoted: &[QuotedInstanceType]) -> Option<&QuotedInstanceType> {
    let mut iter = quoted.iter();
    let mut cheapest = iter.next()?;
    for candidate in iter {
        if candidate.price() < cheapest.price() {
            cheapest = candidate;
        }
    }
    Some(cheapest)
}
