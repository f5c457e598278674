//! `Packwise` - Trip packing recommendations
//!
//! A deterministic rule engine turns a destination, trip length and traveler
//! type into a categorized checklist. Optional collaborators (live or simulated
//! weather, a chat-completion assistant, persistent storage) refine and keep
//! the result, falling back to the local engine whenever they fail.

pub mod api;
pub mod assistant;
pub mod cache;
pub mod config;
pub mod error;
pub mod flight;
pub mod http;
pub mod logging;
pub mod models;
pub mod packing;
pub mod planner;
pub mod storage;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::PackwiseConfig;
pub use error::PackwiseError;
pub use models::{ClimateCategory, PackingCategory, PackingItem, PackingList, TravelerType, TripRequest};
pub use packing::{generate, progress_percent, toggle_packed};
pub use planner::{PackingPlanner, PlanOptions, PlanOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PackwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
