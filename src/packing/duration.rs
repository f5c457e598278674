//! Trip-length adjustments to clothing quantities

use std::sync::LazyLock;

use regex::Regex;

use super::catalog::CLOTHING;
use crate::models::PackingCategory;

pub const SHORT_TRIP_QUANTITY: &str = "(just enough for your short trip)";
pub const LONG_TRIP_QUANTITY: &str = "(enough for 1 week + laundry)";
pub const LAUNDRY_DETERGENT: &str = "Travel-sized laundry detergent";

const SHORT_TRIP_MAX_DAYS: i32 = 3;
const LONG_TRIP_MIN_DAYS: i32 = 14;

/// Matches "(1 per day)" and "(1 per N days)"
static QUANTITY_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(1 per (?:\d+ )?days?\)").expect("quantity pattern is valid")
});

/// How trip length affects the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripLength {
    Short,
    Regular,
    Long,
}

impl TripLength {
    #[must_use]
    pub fn from_days(duration_days: i32) -> Self {
        if duration_days <= SHORT_TRIP_MAX_DAYS {
            TripLength::Short
        } else if duration_days >= LONG_TRIP_MIN_DAYS {
            TripLength::Long
        } else {
            TripLength::Regular
        }
    }
}

/// Whether an item name carries a per-day quantity
#[must_use]
pub fn has_quantity(item: &str) -> bool {
    QUANTITY_PHRASE.is_match(item)
}

/// Rewrite clothing quantities for the trip length.
///
/// Only the Clothing category changes; the input slice is left untouched.
#[must_use]
pub fn apply_duration(categories: &[PackingCategory], duration_days: i32) -> Vec<PackingCategory> {
    let length = TripLength::from_days(duration_days);

    categories
        .iter()
        .map(|category| {
            if category.name == CLOTHING {
                adjust_clothing(category, length)
            } else {
                category.clone()
            }
        })
        .collect()
}

fn adjust_clothing(clothing: &PackingCategory, length: TripLength) -> PackingCategory {
    let replacement = match length {
        TripLength::Short => SHORT_TRIP_QUANTITY,
        TripLength::Long => LONG_TRIP_QUANTITY,
        TripLength::Regular => return clothing.clone(),
    };

    let mut adjusted = clothing.clone();
    for item in &mut adjusted.items {
        item.name = QUANTITY_PHRASE.replace_all(&item.name, replacement).into_owned();
    }

    if length == TripLength::Long {
        adjusted.push(LAUNDRY_DETERGENT);
    }

    adjusted
}

/// Advice that depends only on trip length
#[must_use]
pub fn duration_tips(duration_days: i32) -> Vec<String> {
    match TripLength::from_days(duration_days) {
        TripLength::Short => vec!["Consider packing carry-on only for a short trip.".to_string()],
        TripLength::Long => vec![
            "Plan to do laundry about once a week and pack versatile items you can mix and match."
                .to_string(),
        ],
        TripLength::Regular => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::catalog::TOILETRIES;
    use rstest::rstest;

    fn sample() -> Vec<PackingCategory> {
        vec![
            PackingCategory::from_names(
                CLOTHING,
                ["T-shirts (1 per 2 days)", "Underwear (1 per day)", "Sun hat"],
            ),
            PackingCategory::from_names(TOILETRIES, ["Soap (1 per 2 days)"]),
        ]
    }

    #[rstest]
    #[case(1, TripLength::Short)]
    #[case(3, TripLength::Short)]
    #[case(4, TripLength::Regular)]
    #[case(13, TripLength::Regular)]
    #[case(14, TripLength::Long)]
    #[case(30, TripLength::Long)]
    fn test_trip_length_bands(#[case] days: i32, #[case] expected: TripLength) {
        assert_eq!(TripLength::from_days(days), expected);
    }

    #[test]
    fn test_short_trip_rewrites_quantities() {
        let adjusted = apply_duration(&sample(), 2);
        let names: Vec<&str> = adjusted[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "T-shirts (just enough for your short trip)",
                "Underwear (just enough for your short trip)",
                "Sun hat",
            ]
        );
        assert!(!adjusted[0].contains(LAUNDRY_DETERGENT));
    }

    #[test]
    fn test_long_trip_adds_laundry() {
        let adjusted = apply_duration(&sample(), 20);
        assert_eq!(adjusted[0].items[0].name, "T-shirts (enough for 1 week + laundry)");
        assert_eq!(adjusted[0].items.last().unwrap().name, LAUNDRY_DETERGENT);
    }

    #[test]
    fn test_regular_trip_is_unchanged() {
        let original = sample();
        assert_eq!(apply_duration(&original, 7), original);
    }

    #[test]
    fn test_only_clothing_is_touched() {
        let original = sample();
        let adjusted = apply_duration(&original, 1);
        assert_eq!(adjusted[1], original[1]);
        assert_eq!(original[0].items[0].name, "T-shirts (1 per 2 days)");
    }

    #[test]
    fn test_duration_tips() {
        assert!(duration_tips(2)[0].contains("carry-on"));
        assert!(duration_tips(15)[0].contains("laundry"));
        assert!(duration_tips(8).is_empty());
    }
}
