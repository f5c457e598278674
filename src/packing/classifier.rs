//! Climate classification from destination text or a measured temperature

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ClimateCategory;

/// Destination keywords per climate, in evaluation order.
///
/// The first rule whose keywords match wins, so overlapping places belong to
/// the earliest category listed here. A keyword matches at the start of a
/// word and may be followed by more letters ("Hawaiian", "Icelandic").
const KEYWORD_RULES: &[(ClimateCategory, &[&str])] = &[
    (
        ClimateCategory::Tropical,
        &[
            "thailand", "bangkok", "phuket", "bali", "singapore", "malaysia", "indonesia",
            "philippines", "vietnam", "cambodia", "caribbean", "jamaica", "bahamas", "hawaii",
            "honolulu", "fiji", "maldives", "costa rica", "rio de janeiro", "miami", "cancun",
            "puerto rico", "sri lanka", "tahiti", "nicaragua",
        ],
    ),
    (
        ClimateCategory::Desert,
        &[
            "egypt", "cairo", "dubai", "abu dhabi", "sahara", "morocco", "marrakech", "arizona",
            "phoenix", "las vegas", "qatar", "doha", "oman", "jordan", "petra", "riyadh",
            "saudi arabia", "atacama",
        ],
    ),
    (
        ClimateCategory::Mediterranean,
        &[
            "greece", "athens", "santorini", "italy", "rome", "sicily", "spain", "barcelona",
            "madrid", "portugal", "lisbon", "croatia", "dubrovnik", "malta", "cyprus", "nice",
            "provence", "istanbul", "los angeles", "california",
        ],
    ),
    (
        ClimateCategory::HumidContinental,
        &[
            "new york", "chicago", "boston", "toronto", "montreal", "beijing", "seoul", "moscow",
            "warsaw", "kyiv", "minneapolis", "detroit",
        ],
    ),
    (
        ClimateCategory::Subarctic,
        &[
            "iceland", "reykjavik", "alaska", "anchorage", "fairbanks", "lapland", "finland",
            "yukon", "siberia", "greenland", "tromso",
        ],
    ),
    (
        ClimateCategory::Oceanic,
        &[
            "london", "england", "scotland", "edinburgh", "ireland", "dublin", "wales",
            "amsterdam", "netherlands", "brussels", "paris", "seattle", "vancouver",
            "new zealand", "wellington", "tasmania", "bergen",
        ],
    ),
    (
        ClimateCategory::Alpine,
        &[
            "alps", "switzerland", "zermatt", "chamonix", "innsbruck", "aspen", "whistler",
            "himalaya", "nepal", "kathmandu", "dolomites", "andes", "rockies", "patagonia",
        ],
    ),
];

/// Compiled `(pattern, category)` pairs, evaluated in order
static CLIMATE_PATTERNS: LazyLock<Vec<(Regex, ClimateCategory)>> = LazyLock::new(|| {
    KEYWORD_RULES
        .iter()
        .map(|(category, keywords)| {
            let pattern = format!(r"(?i)\b(?:{})", keywords.join("|"));
            let regex = Regex::new(&pattern).expect("climate keyword pattern is valid");
            (regex, *category)
        })
        .collect()
});

/// Temperature bands, highest threshold first. A temperature strictly above the
/// threshold selects the category.
const TEMPERATURE_LADDER: &[(f64, ClimateCategory)] = &[
    (30.0, ClimateCategory::Tropical),
    (25.0, ClimateCategory::Desert),
    (20.0, ClimateCategory::Mediterranean),
    (15.0, ClimateCategory::Temperate),
    (5.0, ClimateCategory::HumidContinental),
    (0.0, ClimateCategory::Oceanic),
    (-10.0, ClimateCategory::Subarctic),
];

/// Classify a destination into one climate category.
///
/// A measured temperature takes precedence over the destination keywords.
/// Unmatched destinations are `Temperate`.
#[must_use]
pub fn classify(destination: &str, measured_temp_celsius: Option<f64>) -> ClimateCategory {
    match measured_temp_celsius.filter(|t| !t.is_nan()) {
        Some(temperature) => classify_temperature(temperature),
        None => classify_destination(destination),
    }
}

/// Threshold ladder over a temperature in Celsius.
///
/// Everything at or below -10 is also `Subarctic`, so the two coldest bands
/// yield the same category.
#[must_use]
pub fn classify_temperature(celsius: f64) -> ClimateCategory {
    TEMPERATURE_LADDER
        .iter()
        .find(|(threshold, _)| celsius > *threshold)
        .map_or(ClimateCategory::Subarctic, |(_, category)| *category)
}

/// Keyword ladder over free destination text
#[must_use]
pub fn classify_destination(destination: &str) -> ClimateCategory {
    CLIMATE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(destination))
        .map_or(ClimateCategory::Temperate, |(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bangkok, Thailand", ClimateCategory::Tropical)]
    #[case("Miami Beach", ClimateCategory::Tropical)]
    #[case("DUBAI", ClimateCategory::Desert)]
    #[case("Lisbon, Portugal", ClimateCategory::Mediterranean)]
    #[case("New York City", ClimateCategory::HumidContinental)]
    #[case("Reykjavik", ClimateCategory::Subarctic)]
    #[case("Edinburgh, Scotland", ClimateCategory::Oceanic)]
    #[case("Zermatt", ClimateCategory::Alpine)]
    #[case("Random Town, Nowhere", ClimateCategory::Temperate)]
    #[case("", ClimateCategory::Temperate)]
    fn test_keyword_classification(#[case] destination: &str, #[case] expected: ClimateCategory) {
        assert_eq!(classify(destination, None), expected);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Tropical is evaluated before Mediterranean.
        assert_eq!(classify("Bali or Rome", None), ClimateCategory::Tropical);
        // Oceanic is evaluated before Alpine.
        assert_eq!(classify("London then the Alps", None), ClimateCategory::Oceanic);
    }

    #[rstest]
    #[case("Hawaiian Islands", ClimateCategory::Tropical)]
    #[case("Balinese villa", ClimateCategory::Tropical)]
    #[case("Icelandic fjords", ClimateCategory::Subarctic)]
    #[case("Parisian cafes", ClimateCategory::Oceanic)]
    #[case("Nice, France", ClimateCategory::Mediterranean)]
    #[case("Nicaragua", ClimateCategory::Tropical)]
    fn test_keywords_match_name_fragments(#[case] destination: &str, #[case] expected: ClimateCategory) {
        assert_eq!(classify(destination, None), expected);
    }

    #[test]
    fn test_keywords_must_start_a_word() {
        // "nice" inside "Venice" and "oman" inside "Romania" do not count
        assert_eq!(classify("Venice", None), ClimateCategory::Temperate);
        assert_eq!(classify("Romania", None), ClimateCategory::Temperate);
    }

    #[rstest]
    #[case(35.0, ClimateCategory::Tropical)]
    #[case(30.0, ClimateCategory::Desert)]
    #[case(26.0, ClimateCategory::Desert)]
    #[case(22.5, ClimateCategory::Mediterranean)]
    #[case(18.0, ClimateCategory::Temperate)]
    #[case(10.0, ClimateCategory::HumidContinental)]
    #[case(3.0, ClimateCategory::Oceanic)]
    #[case(0.0, ClimateCategory::Subarctic)]
    #[case(-5.0, ClimateCategory::Subarctic)]
    fn test_temperature_ladder(#[case] celsius: f64, #[case] expected: ClimateCategory) {
        assert_eq!(classify_temperature(celsius), expected);
    }

    #[test]
    fn test_coldest_bands_collapse_to_subarctic() {
        // Documented quirk: above -10 and at/below -10 give the same answer.
        assert_eq!(classify_temperature(-9.9), ClimateCategory::Subarctic);
        assert_eq!(classify_temperature(-10.0), ClimateCategory::Subarctic);
        assert_eq!(classify_temperature(-40.0), ClimateCategory::Subarctic);
    }

    #[test]
    fn test_temperature_overrides_keywords() {
        assert_eq!(classify("Reykjavik", Some(32.0)), ClimateCategory::Tropical);
        assert_eq!(classify("Bali", Some(f64::NAN)), ClimateCategory::Tropical);
    }
}
