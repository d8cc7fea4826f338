//! Core traits for zonesync
//!
//! - [`ZoneProvider`]: list and reconcile the records of a zone
//! - [`ZoneProviderFactory`]: build a provider from configuration

pub mod zone_provider;

pub use zone_provider::{ZoneProvider, ZoneProviderFactory};
