//! Destination keyword rules contributing bonus categories, special items and tips

use crate::models::packing::push_unique;
use crate::models::{PackingCategory, TravelerType};

pub const BEACH_ESSENTIALS: &str = "Beach Essentials";
pub const HIKING_GEAR: &str = "Hiking Gear";

type Items = &'static [&'static str];

/// A category contributed when a rule fires
#[derive(Debug)]
pub struct BonusCategory {
    pub name: &'static str,
    pub items: Items,
    /// Appended when the party travels with children
    pub kids_items: Items,
}

/// Keyword set mapped to the extras it contributes
#[derive(Debug)]
pub struct DestinationRule {
    pub name: &'static str,
    pub keywords: Items,
    pub bonus_category: Option<BonusCategory>,
    pub special_items: Items,
    pub tips: Items,
}

impl DestinationRule {
    /// Case-insensitive substring match against already lowercased text
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

pub const DESTINATION_RULES: &[DestinationRule] = &[
    DestinationRule {
        name: "beach",
        keywords: &["beach", "miami", "hawaii", "cancun", "island", "tropical", "bali", "caribbean"],
        bonus_category: Some(BonusCategory {
            name: BEACH_ESSENTIALS,
            items: &["Beach towel", "Snorkeling gear", "Beach bag"],
            kids_items: &["Beach toys", "Floaties"],
        }),
        special_items: &[],
        tips: &["Pack reef-safe sunscreen and reapply after every swim."],
    },
    DestinationRule {
        name: "european-city",
        keywords: &["paris", "rome", "london"],
        bonus_category: None,
        special_items: &[
            "Dress code outfit for churches and upscale venues",
            "Cobblestone-friendly walking shoes",
        ],
        tips: &[
            "Cover shoulders and knees when visiting churches and other religious sites.",
            "Wear your daypack in front in crowded areas and on public transport to deter pickpockets.",
        ],
    },
    DestinationRule {
        name: "hiking",
        keywords: &["mountain", "alps", "andes", "rockies", "hiking", "trail"],
        bonus_category: Some(BonusCategory {
            name: HIKING_GEAR,
            items: &["Hiking boots", "Trekking poles", "Day pack", "Water bottle"],
            kids_items: &["Child carrier", "Kids hiking shoes"],
        }),
        special_items: &[],
        tips: &["Check trail conditions and the local weather forecast before every hike."],
    },
];

const FALLBACK_SPECIAL_ITEMS: Items = &["Reusable water bottle", "Travel pillow", "First aid kit"];

const FALLBACK_TIPS: Items = &[
    "Research the local dress code and customs before you go.",
    "Keep digital copies of your passport and travel documents.",
    "Register your trip with your country's travel advisory service.",
];

/// Everything the destination text contributes beyond the base catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationExtras {
    pub special_items: Vec<String>,
    pub tips: Vec<String>,
    pub bonus_categories: Vec<PackingCategory>,
}

impl DestinationExtras {
    fn absorb(&mut self, rule: &DestinationRule, traveler: TravelerType) {
        if let Some(bonus) = &rule.bonus_category {
            let mut category = PackingCategory::from_names(bonus.name, bonus.items.iter().copied());
            if traveler.with_kids() {
                bonus.kids_items.iter().for_each(|item| category.push(*item));
            }
            self.bonus_categories.push(category);
        }

        for item in rule.special_items {
            push_unique(&mut self.special_items, *item);
        }
        for tip in rule.tips {
            push_unique(&mut self.tips, *tip);
        }
    }
}

/// Apply every destination rule to the raw destination text.
///
/// Rules are independent, so several may fire. When none does, generic
/// special items and tips are returned instead.
#[must_use]
pub fn derive_extras(destination: &str, traveler: TravelerType) -> DestinationExtras {
    let lowered = destination.to_lowercase();
    let mut extras = DestinationExtras::default();
    let mut fired = false;

    for rule in DESTINATION_RULES.iter().filter(|rule| rule.matches(&lowered)) {
        extras.absorb(rule, traveler);
        fired = true;
    }

    if !fired {
        extras.special_items = FALLBACK_SPECIAL_ITEMS.iter().map(ToString::to_string).collect();
        extras.tips = FALLBACK_TIPS.iter().map(ToString::to_string).collect();
    }

    extras
}
