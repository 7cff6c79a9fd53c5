//! Display fallbacks for backend records

use crate::types::{OutfitItem, Recommendation, WardrobeItem};

const SEPARATOR: &str = " • ";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Most specific name available for a wardrobe tile
pub fn item_label(item: &WardrobeItem) -> String {
    non_empty(&item.specific_name)
        .or_else(|| non_empty(&item.subcategory))
        .or_else(|| non_empty(&item.category))
        .unwrap_or("Item")
        .to_string()
}

/// `JACKET • navy • wool`, skipping whatever is missing
pub fn item_caption(item: &WardrobeItem) -> String {
    let category = item
        .category
        .as_deref()
        .unwrap_or_default()
        .to_uppercase();
    join_parts([
        Some(category.as_str()),
        non_empty(&item.color),
        non_empty(&item.material),
    ])
}

pub fn recommendation_title(rec: &Recommendation) -> String {
    non_empty(&rec.outfit_name)
        .unwrap_or("Curated Look")
        .to_string()
}

pub fn outfit_item_label(item: &OutfitItem) -> String {
    non_empty(&item.specific_name)
        .or_else(|| non_empty(&item.category))
        .unwrap_or("Item")
        .to_string()
}

pub fn outfit_item_caption(item: &OutfitItem) -> String {
    join_parts([non_empty(&item.category), non_empty(&item.color)])
}

fn join_parts<const N: usize>(parts: [Option<&str>; N]) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
