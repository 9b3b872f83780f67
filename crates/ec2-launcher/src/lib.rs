//! ec2-launcher - launch the cheapest EC2 instance for a vCPU/memory range
//!
//! The selection logic lives in `ec2-launcher-common`; this crate wires it to
//! EC2, Pricing and SSM and handles the spot-to-on-demand fallback.

pub mod aws;
pub mod catalog_cache;
pub mod config;
pub mod launcher;
pub mod orchestrator;
pub mod wait;
