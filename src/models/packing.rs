//! Packing list model: categories of checkable items plus free-text advice

use serde::{Deserialize, Serialize};

use super::trip::TripSummary;

/// A single packable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingItem {
    pub name: String,
    pub packed: bool,
}

impl PackingItem {
    /// Create an unpacked item
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packed: false,
        }
    }
}

/// A named group of packable items, kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingCategory {
    pub name: String,
    pub items: Vec<PackingItem>,
}

impl PackingCategory {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Build a category of unpacked items from names
    #[must_use]
    pub fn from_names<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(PackingItem::new).collect(),
        }
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(PackingItem::new(item));
    }

    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i.name == item)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A generated, checkable packing list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    pub categories: Vec<PackingCategory>,
    pub special_items: Vec<String>,
    pub destination_tips: Vec<String>,
    pub generated_for: TripSummary,
}

impl PackingList {
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&PackingCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Flip one item's `packed` flag in place.
    ///
    /// Returns `false` and leaves the list untouched when the pair does not exist.
    pub fn toggle(&mut self, category: &str, item: &str) -> bool {
        let Some(found) = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .and_then(|c| c.items.iter_mut().find(|i| i.name == item))
        else {
            return false;
        };

        found.packed = !found.packed;
        true
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    #[must_use]
    pub fn packed_items(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|i| i.packed)
            .count()
    }

    /// All item names across categories, in list order
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.name.as_str()))
    }
}

/// Insert into an ordered set backed by a `Vec`
pub(crate) fn push_unique(target: &mut Vec<String>, value: impl Into<String>) {
    let value = value.into();
    if !target.contains(&value) {
        target.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClimateCategory, TravelerType};

    fn sample_list() -> PackingList {
        PackingList {
            categories: vec![
                PackingCategory::from_names("Clothing", ["Socks", "Hat"]),
                PackingCategory::from_names("Technology", ["Charger"]),
            ],
            special_items: vec![],
            destination_tips: vec![],
            generated_for: TripSummary {
                destination: "Somewhere".to_string(),
                duration_days: 3,
                climate: ClimateCategory::Temperate,
                traveler_type: TravelerType::Couple,
            },
        }
    }

    #[test]
    fn test_toggle_flips_single_item() {
        let mut list = sample_list();
        assert!(list.toggle("Clothing", "Hat"));
        assert_eq!(list.packed_items(), 1);
        assert!(list.category("Clothing").unwrap().items[1].packed);

        assert!(list.toggle("Clothing", "Hat"));
        assert_eq!(list.packed_items(), 0);
    }

    #[test]
    fn test_toggle_missing_pair_is_noop() {
        let mut list = sample_list();
        let before = list.clone();
        assert!(!list.toggle("Clothing", "Charger"));
        assert!(!list.toggle("Footwear", "Socks"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_counts_and_names() {
        let list = sample_list();
        assert_eq!(list.total_items(), 3);
        assert_eq!(list.item_names().collect::<Vec<_>>(), vec!["Socks", "Hat", "Charger"]);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(sample_list()).unwrap();
        assert!(json.get("specialItems").is_some());
        assert!(json.get("destinationTips").is_some());
        assert_eq!(json["generatedFor"]["durationDays"], 3);
        assert_eq!(json["generatedFor"]["travelerType"], "Couple");
    }

    #[test]
    fn test_push_unique_keeps_first() {
        let mut values = vec!["a".to_string()];
        push_unique(&mut values, "b");
        push_unique(&mut values, "a");
        assert_eq!(values, vec!["a", "b"]);
    }
}
