//! Packing list assembly, toggling and progress

use std::collections::HashSet;

use tracing::debug;

use super::{catalog, classifier, duration, heuristics};
use crate::models::packing::push_unique;
use crate::models::{PackingCategory, PackingList, TripRequest, TripSummary};

/// Generate a packing list for a trip.
///
/// Returns `None` while the request is not ready (blank destination or a
/// non-positive duration); this is reachable from ordinary incremental input.
#[must_use]
pub fn generate(request: &TripRequest) -> Option<PackingList> {
    if !request.is_ready() {
        debug!(?request, "Trip request not ready, skipping generation");
        return None;
    }

    let climate = classifier::classify(&request.destination, request.measured_temp_celsius);
    let base = catalog::resolve_base_items(climate, request.traveler_type);
    let adjusted = duration::apply_duration(&base, request.duration_days);
    let extras = heuristics::derive_extras(&request.destination, request.traveler_type);

    let mut categories = adjusted;
    categories.extend(extras.bonus_categories);

    let mut tips = extras.tips;
    for tip in duration::duration_tips(request.duration_days) {
        push_unique(&mut tips, tip);
    }

    let list = PackingList {
        categories: normalize_categories(categories),
        special_items: extras.special_items,
        destination_tips: tips,
        generated_for: TripSummary {
            destination: request.destination.trim().to_string(),
            duration_days: request.duration_days,
            climate,
            traveler_type: request.traveler_type,
        },
    };

    debug!(
        destination = %list.generated_for.destination,
        %climate,
        categories = list.categories.len(),
        items = list.total_items(),
        "Generated packing list"
    );

    Some(list)
}

/// Merge categories sharing a name and remove duplicate item names.
///
/// The first category with a name keeps its position and absorbs the items of
/// later ones. Item names are compared exactly; the first occurrence across the
/// whole list wins. Categories left without items are dropped.
#[must_use]
pub fn normalize_categories(categories: Vec<PackingCategory>) -> Vec<PackingCategory> {
    let mut merged: Vec<PackingCategory> = Vec::with_capacity(categories.len());

    for category in categories {
        match merged.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => existing.items.extend(category.items),
            None => merged.push(category),
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    for category in &mut merged {
        category.items.retain(|item| seen.insert(item.name.clone()));
    }
    merged.retain(|c| !c.is_empty());

    merged
}

/// Return a copy of `list` with one item's `packed` flag flipped.
///
/// A missing category or item leaves the copy identical to the input.
#[must_use]
pub fn toggle_packed(list: &PackingList, category: &str, item: &str) -> PackingList {
    let mut toggled = list.clone();
    if !toggled.toggle(category, item) {
        debug!(category, item, "Toggle target not found, ignoring");
    }
    toggled
}

/// Percentage of packed items, rounded to the nearest whole number
#[must_use]
pub fn progress_percent(list: &PackingList) -> u8 {
    let total = list.total_items();
    if total == 0 {
        return 0;
    }

    let percent = (100.0 * list.packed_items() as f64 / total as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClimateCategory, PackingItem, TravelerType};
    use crate::packing::catalog::{CLOTHING, FAMILY_ESSENTIALS};
    use crate::packing::duration::{LAUNDRY_DETERGENT, SHORT_TRIP_QUANTITY, has_quantity};
    use crate::packing::heuristics::BEACH_ESSENTIALS;

    fn two_item_list() -> PackingList {
        PackingList {
            categories: vec![PackingCategory::from_names("Clothing", ["Socks", "Hat"])],
            special_items: vec![],
            destination_tips: vec![],
            generated_for: TripSummary {
                destination: "Anywhere".to_string(),
                duration_days: 5,
                climate: ClimateCategory::Temperate,
                traveler_type: TravelerType::Couple,
            },
        }
    }

    #[test]
    fn test_not_ready_requests_generate_nothing() {
        assert!(generate(&TripRequest::new("", 5, TravelerType::Couple)).is_none());
        assert!(generate(&TripRequest::new("  ", 5, TravelerType::Couple)).is_none());
        assert!(generate(&TripRequest::new("Paris", 0, TravelerType::Couple)).is_none());
        assert!(generate(&TripRequest::new("Paris", -3, TravelerType::Couple)).is_none());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let request = TripRequest::new("Santorini, Greece", 9, TravelerType::SoloMale);
        assert_eq!(generate(&request), generate(&request));
    }

    #[test]
    fn test_fresh_list_is_unpacked() {
        let list = generate(&TripRequest::new("Lisbon", 6, TravelerType::Couple)).unwrap();
        assert_eq!(list.packed_items(), 0);
        assert_eq!(progress_percent(&list), 0);
    }

    #[test]
    fn test_item_names_unique_across_list() {
        for traveler in TravelerType::ALL {
            for destination in ["Bali island trail", "Paris", "Zermatt mountain", "Nowhere"] {
                let list = generate(&TripRequest::new(destination, 10, traveler)).unwrap();
                let names: Vec<&str> = list.item_names().collect();
                let unique: HashSet<&str> = names.iter().copied().collect();
                assert_eq!(names.len(), unique.len(), "{destination} / {traveler:?}");
            }
        }
    }

    #[test]
    fn test_short_trip_marks_every_quantity() {
        let list = generate(&TripRequest::new("Chicago", 2, TravelerType::SoloMale)).unwrap();
        let clothing = list.category(CLOTHING).unwrap();
        assert!(clothing.items.iter().any(|i| i.name.contains(SHORT_TRIP_QUANTITY)));
        assert!(clothing.items.iter().all(|i| !has_quantity(&i.name)));
        assert!(list.destination_tips.iter().any(|t| t.contains("carry-on")));
    }

    #[test]
    fn test_beach_scenario() {
        let request = TripRequest::new("Miami Beach", 5, TravelerType::SoloFemale);
        let list = generate(&request).unwrap();

        assert_eq!(list.generated_for.climate, ClimateCategory::Tropical);
        let beach = list.category(BEACH_ESSENTIALS).unwrap();
        for item in ["Beach towel", "Snorkeling gear", "Beach bag"] {
            assert!(beach.contains(item), "missing {item}");
        }
        assert!(list.category(CLOTHING).unwrap().contains("Swimwear"));
    }

    #[test]
    fn test_cold_family_scenario() {
        let request = TripRequest::new("Reykjavik", 21, TravelerType::CoupleWithKids);
        let list = generate(&request).unwrap();

        assert!(matches!(
            list.generated_for.climate,
            ClimateCategory::Subarctic | ClimateCategory::Oceanic
        ));
        assert!(list.category(CLOTHING).unwrap().contains(LAUNDRY_DETERGENT));
        let family = list.category(FAMILY_ESSENTIALS).unwrap();
        assert!(family.contains("Diapers and wipes"));
    }

    #[test]
    fn test_normalize_merges_collisions_and_dedupes() {
        let categories = vec![
            PackingCategory::from_names("Gear", ["Rope", "Tent"]),
            PackingCategory::from_names("Clothing", ["Hat", "Tent"]),
            PackingCategory::from_names("Gear", ["Stove", "Rope"]),
            PackingCategory::from_names("Extras", ["Hat"]),
        ];

        let normalized = normalize_categories(categories);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].name, "Gear");
        let gear: Vec<&str> = normalized[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(gear, vec!["Rope", "Tent", "Stove"]);
        let clothing: Vec<&str> = normalized[1].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(clothing, vec!["Hat"]);
    }

    #[test]
    fn test_dedupe_keeps_first_packed_state() {
        let mut first = PackingCategory::new("Gear");
        first.items.push(PackingItem { name: "Rope".to_string(), packed: true });
        let second = PackingCategory::from_names("Gear", ["Rope"]);

        let normalized = normalize_categories(vec![first, second]);
        assert_eq!(normalized[0].items.len(), 1);
        assert!(normalized[0].items[0].packed);
    }

    #[test]
    fn test_progress_percent() {
        let list = two_item_list();
        assert_eq!(progress_percent(&list), 0);

        let half = toggle_packed(&list, "Clothing", "Socks");
        assert_eq!(progress_percent(&half), 50);

        let full = toggle_packed(&half, "Clothing", "Hat");
        assert_eq!(progress_percent(&full), 100);
    }

    #[test]
    fn test_progress_rounds_to_nearest() {
        let mut list = two_item_list();
        list.categories[0].items.push(PackingItem::new("Scarf"));
        list.toggle("Clothing", "Socks");
        assert_eq!(progress_percent(&list), 33);
        list.toggle("Clothing", "Hat");
        assert_eq!(progress_percent(&list), 67);
    }

    #[test]
    fn test_progress_of_empty_list_is_zero() {
        let mut list = two_item_list();
        list.categories.clear();
        assert_eq!(progress_percent(&list), 0);
    }

    #[test]
    fn test_toggle_all_items_reaches_full_progress() {
        let mut list = generate(&TripRequest::new("Seattle", 8, TravelerType::Business)).unwrap();
        let pairs: Vec<(String, String)> = list
            .categories
            .iter()
            .flat_map(|c| c.items.iter().map(|i| (c.name.clone(), i.name.clone())))
            .collect();

        for (category, item) in &pairs {
            list = toggle_packed(&list, category, item);
        }
        assert_eq!(progress_percent(&list), 100);
    }

    #[test]
    fn test_toggle_missing_item_returns_identical_list() {
        let list = generate(&TripRequest::new("Dublin", 4, TravelerType::SoloMale)).unwrap();
        let toggled = toggle_packed(&list, "Clothing", "Nonexistent Item");
        assert_eq!(toggled, list);
    }
}
