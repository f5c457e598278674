//! Trip packing recommendation engine
//!
//! A pure, synchronous rule engine:
//! - Climate classification from destination keywords or a temperature
//! - Catalog lookup keyed by climate and traveler type
//! - Destination keyword rules for bonus gear and tips
//! - Trip-length quantity adjustments
//! - Assembly into a de-duplicated, checkable list

pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod duration;
pub mod heuristics;

pub use assembler::{generate, normalize_categories, progress_percent, toggle_packed};
pub use catalog::{CatalogMatch, resolve_base_items, resolve_clothing};
pub use classifier::{classify, classify_destination, classify_temperature};
pub use duration::{TripLength, apply_duration, duration_tips};
pub use heuristics::{DestinationExtras, derive_extras};
