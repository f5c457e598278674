//! Data models for Packwise
//!
//! This module contains the core domain models organized by concern:
//! - Trip: climate buckets, traveler personas and generation requests
//! - Packing: categories, items and the generated list
//! - Location: geocoded destinations

pub mod location;
pub mod packing;
pub mod trip;

// Re-export all public types for convenient access
pub use location::Location;
pub use packing::{PackingCategory, PackingItem, PackingList};
pub use trip::{ClimateCategory, TravelerType, TripRequest, TripSummary};
