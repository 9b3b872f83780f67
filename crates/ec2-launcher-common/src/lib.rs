//! ec2-launcher-common - Shared types and selection logic
//!
//! This crate holds everything about picking an instance type that does not
//! need to talk to AWS, without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`catalog`]: On-disk catalog snapshot and instance type descriptors
//! - [`constraints`]: Caller-supplied selection constraints
//! - [`defaults`]: Default configuration values
//! - [`error`]: Typed configuration and selection errors
//! - [`filter`]: Instance type filter predicates
//! - [`pricing`]: Pricing filter set and price document extraction
//! - [`regions`]: Supported regions and their pricing location names
//! - [`selection`]: Price quotes and cheapest-instance selection
//! - [`spot`]: Spot request status classification

pub mod catalog;
pub mod constraints;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod pricing;
pub mod regions;
pub mod selection;
pub mod spot;

// Re-export commonly used types
pub use catalog::{CatalogSnapshot, InstanceTypeDescriptor, InstanceTypeRecord};
pub use constraints::{PurchaseModel, SelectionConstraints};
pub use error::{ConstraintError, PriceError, SelectionError};
pub use filter::{Rejection, filter_instance_types};
pub use pricing::PriceExtraction;
pub use regions::Region;
pub use selection::{PriceQuote, QuotedInstanceType, select_cheapest};
pub use spot::SpotRequestStatus;
