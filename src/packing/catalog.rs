//! Static item catalog keyed by climate and traveler type

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ClimateCategory, PackingCategory, TravelerType};

pub const CLOTHING: &str = "Clothing";
pub const TOILETRIES: &str = "Toiletries";
pub const HEALTH_AND_SAFETY: &str = "Health & Safety";
pub const TECHNOLOGY: &str = "Technology";
pub const MISCELLANEOUS: &str = "Miscellaneous";
pub const FAMILY_ESSENTIALS: &str = "Family Essentials";
pub const BUSINESS_ESSENTIALS: &str = "Business Essentials";

type Items = &'static [&'static str];

/// Clothing variants of one climate. `None` is the climate's default traveler.
type ClothingVariants = &'static [(Option<TravelerType>, Items)];

const CLOTHING_TABLE: &[(ClimateCategory, ClothingVariants)] = &[
    (
        ClimateCategory::Tropical,
        &[
            (
                None,
                &[
                    "Lightweight T-shirts (1 per 2 days)",
                    "Shorts (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Breathable socks (1 per day)",
                    "Swimwear",
                    "Sun hat",
                    "Sandals",
                    "Light rain jacket",
                ],
            ),
            (
                Some(TravelerType::SoloFemale),
                &[
                    "Lightweight tops (1 per 2 days)",
                    "Breezy dresses (1 per 3 days)",
                    "Shorts or skirts (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Swimwear",
                    "Beach cover-up",
                    "Sun hat",
                    "Sandals",
                    "Light rain jacket",
                ],
            ),
            (
                Some(TravelerType::CoupleWithKids),
                &[
                    "Lightweight T-shirts (1 per 2 days)",
                    "Shorts (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Kids' outfits (1 per day)",
                    "Swimwear",
                    "Kids' UV-protective swimwear",
                    "Sun hats for everyone",
                    "Water shoes",
                    "Light rain jackets",
                ],
            ),
            (
                Some(TravelerType::Business),
                &[
                    "Lightweight dress shirts (1 per day)",
                    "Linen trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Business attire for meetings",
                    "Loafers",
                    "Swimwear",
                    "Sun hat",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::Desert,
        &[
            (
                None,
                &[
                    "Loose long-sleeve shirts (1 per 2 days)",
                    "Lightweight long pants (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Moisture-wicking socks (1 per day)",
                    "Wide-brim sun hat",
                    "Scarf or shemagh",
                    "Warm layer for cold nights",
                    "Closed-toe walking shoes",
                ],
            ),
            (
                Some(TravelerType::SoloFemale),
                &[
                    "Loose long-sleeve tops (1 per 2 days)",
                    "Maxi skirts or long pants (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Lightweight scarf for head covering",
                    "Wide-brim sun hat",
                    "Warm layer for cold nights",
                    "Closed-toe walking shoes",
                ],
            ),
            (
                Some(TravelerType::Business),
                &[
                    "Breathable dress shirts (1 per day)",
                    "Lightweight suit",
                    "Underwear (1 per day)",
                    "Dress shoes",
                    "Warm layer for air-conditioned offices",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::Mediterranean,
        &[
            (
                None,
                &[
                    "T-shirts (1 per 2 days)",
                    "Light trousers or chinos (1 per 3 days)",
                    "Shorts (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Light sweater for evenings",
                    "Swimwear",
                    "Comfortable walking shoes",
                ],
            ),
            (
                Some(TravelerType::SoloFemale),
                &[
                    "Tops (1 per 2 days)",
                    "Sundresses (1 per 3 days)",
                    "Light trousers or skirts (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Light cardigan for evenings",
                    "Swimwear",
                    "Comfortable walking sandals",
                ],
            ),
            (
                Some(TravelerType::Business),
                &[
                    "Dress shirts (1 per day)",
                    "Light suit",
                    "Chinos (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Dress shoes",
                    "Light sweater for evenings",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::HumidContinental,
        &[
            (
                None,
                &[
                    "Shirts (1 per 2 days)",
                    "Jeans or trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Sweater or fleece",
                    "Insulated jacket",
                    "Waterproof boots",
                    "Hat, scarf and gloves",
                ],
            ),
            (
                Some(TravelerType::Business),
                &[
                    "Dress shirts (1 per day)",
                    "Suit",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Wool overcoat",
                    "Dress shoes",
                    "Gloves and scarf",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::Subarctic,
        &[
            (
                None,
                &[
                    "Thermal base layers (1 per 2 days)",
                    "Wool socks (1 per day)",
                    "Underwear (1 per day)",
                    "Fleece mid-layer",
                    "Insulated parka",
                    "Waterproof snow pants",
                    "Insulated winter boots",
                    "Warm hat, neck gaiter and mittens",
                ],
            ),
            (
                Some(TravelerType::CoupleWithKids),
                &[
                    "Thermal base layers (1 per 2 days)",
                    "Wool socks (1 per day)",
                    "Underwear (1 per day)",
                    "Kids' thermal base layers (1 per day)",
                    "Fleece mid-layers",
                    "Insulated parkas",
                    "Kids' snowsuits",
                    "Insulated winter boots",
                    "Kids' mittens and hats",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::Temperate,
        &[
            (
                None,
                &[
                    "T-shirts (1 per 2 days)",
                    "Long-sleeve shirts (1 per 3 days)",
                    "Jeans or trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Light jacket",
                    "Sweater",
                    "Comfortable walking shoes",
                ],
            ),
            (
                Some(TravelerType::SoloFemale),
                &[
                    "Tops (1 per 2 days)",
                    "Jeans or trousers (1 per 3 days)",
                    "Dress or skirt",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Light jacket",
                    "Cardigan",
                    "Comfortable walking shoes",
                ],
            ),
            (
                Some(TravelerType::CoupleWithKids),
                &[
                    "T-shirts (1 per 2 days)",
                    "Jeans or trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Kids' outfits (1 per day)",
                    "Kids' pajamas",
                    "Extra change of clothes for kids",
                    "Light jackets",
                    "Comfortable walking shoes",
                ],
            ),
            (
                Some(TravelerType::Business),
                &[
                    "Dress shirts (1 per day)",
                    "Suit",
                    "Trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Dress shoes",
                    "Light jacket",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::Oceanic,
        &[
            (
                None,
                &[
                    "Shirts (1 per 2 days)",
                    "Trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Waterproof rain jacket",
                    "Warm sweater",
                    "Compact umbrella",
                    "Water-resistant walking shoes",
                ],
            ),
            (
                Some(TravelerType::SoloFemale),
                &[
                    "Tops (1 per 2 days)",
                    "Trousers or leggings (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Trench coat or rain jacket",
                    "Warm cardigan",
                    "Compact umbrella",
                    "Water-resistant ankle boots",
                ],
            ),
            (
                Some(TravelerType::Business),
                &[
                    "Dress shirts (1 per day)",
                    "Suit",
                    "Underwear (1 per day)",
                    "Socks (1 per day)",
                    "Trench coat",
                    "Compact umbrella",
                    "Dress shoes",
                ],
            ),
        ],
    ),
    (
        ClimateCategory::Alpine,
        &[
            (
                None,
                &[
                    "Moisture-wicking base layers (1 per 2 days)",
                    "Hiking trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Wool socks (1 per day)",
                    "Fleece jacket",
                    "Waterproof shell jacket",
                    "Warm hat and gloves",
                    "Sturdy waterproof boots",
                ],
            ),
            (
                Some(TravelerType::CoupleWithKids),
                &[
                    "Moisture-wicking base layers (1 per 2 days)",
                    "Hiking trousers (1 per 3 days)",
                    "Underwear (1 per day)",
                    "Wool socks (1 per day)",
                    "Kids' base layers (1 per day)",
                    "Fleece jackets",
                    "Waterproof shell jackets",
                    "Warm hats and gloves",
                    "Sturdy waterproof boots",
                ],
            ),
        ],
    ),
];

/// A traveler-invariant table with per-traveler additions
struct CategoryTable {
    name: &'static str,
    base: Items,
    additions: &'static [(&'static [TravelerType], Items)],
}

const SHARED_TABLES: &[CategoryTable] = &[
    CategoryTable {
        name: TOILETRIES,
        base: &[
            "Toothbrush and toothpaste",
            "Deodorant",
            "Shampoo and conditioner",
            "Body wash or soap",
            "Hairbrush or comb",
        ],
        additions: &[
            (
                &[TravelerType::SoloFemale, TravelerType::Couple, TravelerType::CoupleWithKids],
                &["Feminine hygiene products"],
            ),
            (
                &[TravelerType::SoloMale, TravelerType::Couple, TravelerType::Business],
                &["Razor and shaving cream"],
            ),
            (&[TravelerType::CoupleWithKids], &["Kids' toothbrushes and toothpaste"]),
        ],
    },
    CategoryTable {
        name: HEALTH_AND_SAFETY,
        base: &[
            "Prescription medications",
            "Pain relievers",
            "Adhesive bandages",
            "Hand sanitizer",
            "Sunscreen",
            "Travel insurance documents",
        ],
        additions: &[],
    },
    CategoryTable {
        name: TECHNOLOGY,
        base: &["Phone and charger", "Power bank", "Universal travel adapter", "Headphones"],
        additions: &[
            (&[TravelerType::Business], &["Laptop and charger", "Presentation clicker"]),
            (&[TravelerType::CoupleWithKids], &["Tablet with downloaded kids' shows"]),
        ],
    },
    CategoryTable {
        name: MISCELLANEOUS,
        base: &[
            "Passport or ID",
            "Travel documents and tickets",
            "Wallet with cards and some cash",
            "Reusable shopping bag",
            "Snacks for the journey",
        ],
        additions: &[
            (&[TravelerType::SoloFemale, TravelerType::SoloMale], &["Personal safety alarm"]),
            (&[TravelerType::Business], &["Notebook and pen"]),
        ],
    },
];

/// Climate-specific health additions
const HEALTH_BY_CLIMATE: &[(ClimateCategory, Items)] = &[
    (ClimateCategory::Tropical, &["Insect repellent", "After-sun lotion"]),
    (ClimateCategory::Desert, &["Electrolyte tablets", "High-SPF sunscreen"]),
    (ClimateCategory::Mediterranean, &["After-sun lotion"]),
    (ClimateCategory::Subarctic, &["Lip balm with SPF", "Hand warmers"]),
    (ClimateCategory::Alpine, &["Lip balm with SPF", "Altitude sickness medication"]),
];

/// Categories that only exist for one traveler type
const TRAVELER_CATEGORIES: &[(TravelerType, &str, Items)] = &[
    (
        TravelerType::CoupleWithKids,
        FAMILY_ESSENTIALS,
        &[
            "Diapers and wipes",
            "Children's medication",
            "Comfort toy or blanket",
            "Kids' snacks",
            "Child-safe sunscreen",
            "Portable changing pad",
        ],
    ),
    (
        TravelerType::Business,
        BUSINESS_ESSENTIALS,
        &[
            "Business cards",
            "Portfolio with meeting documents",
            "Company ID badge",
            "Expense receipt folder",
        ],
    ),
];

/// Which link of the clothing fallback chain produced the items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogMatch {
    /// The requested climate and traveler variant
    Exact,
    /// The climate's default traveler variant
    ClimateDefault,
    /// The temperate default variant
    TemperateDefault,
}

fn clothing_variants(climate: ClimateCategory) -> Option<ClothingVariants> {
    CLOTHING_TABLE
        .iter()
        .find(|(c, _)| *c == climate)
        .map(|(_, variants)| *variants)
}

fn clothing_variant(climate: ClimateCategory, traveler: Option<TravelerType>) -> Option<Items> {
    clothing_variants(climate)?
        .iter()
        .find(|(t, _)| *t == traveler)
        .map(|(_, items)| *items)
}

/// Clothing for `(climate, traveler)` following the fallback chain
/// exact variant, climate default, temperate default.
#[must_use]
pub fn resolve_clothing(climate: ClimateCategory, traveler: TravelerType) -> (Items, CatalogMatch) {
    if let Some(items) = clothing_variant(climate, Some(traveler)) {
        return (items, CatalogMatch::Exact);
    }

    if let Some(items) = clothing_variant(climate, None) {
        debug!(%climate, ?traveler, "No traveler clothing variant, using climate default");
        return (items, CatalogMatch::ClimateDefault);
    }

    debug!(%climate, ?traveler, "No clothing for climate, using temperate default");
    let items = clothing_variant(ClimateCategory::Temperate, None).unwrap_or(&[]);
    (items, CatalogMatch::TemperateDefault)
}

/// Base categories for a climate and traveler type, in fixed order:
/// Clothing, Toiletries, Health & Safety, Technology, Miscellaneous and an
/// optional traveler-specific category.
#[must_use]
pub fn resolve_base_items(climate: ClimateCategory, traveler: TravelerType) -> Vec<PackingCategory> {
    let (clothing, _) = resolve_clothing(climate, traveler);
    let mut categories = vec![PackingCategory::from_names(CLOTHING, clothing.iter().copied())];

    for table in SHARED_TABLES {
        let mut category = PackingCategory::from_names(table.name, table.base.iter().copied());

        for (travelers, items) in table.additions {
            if travelers.contains(&traveler) {
                items.iter().for_each(|item| category.push(*item));
            }
        }

        if table.name == HEALTH_AND_SAFETY {
            if let Some((_, items)) = HEALTH_BY_CLIMATE.iter().find(|(c, _)| *c == climate) {
                items.iter().for_each(|item| category.push(*item));
            }
        }

        categories.push(category);
    }

    categories.extend(
        TRAVELER_CATEGORIES
            .iter()
            .filter(|(t, _, _)| *t == traveler)
            .map(|(_, name, items)| PackingCategory::from_names(*name, items.iter().copied())),
    );

    categories
}
