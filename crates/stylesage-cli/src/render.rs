//! Plain-text rendering of dashboard state

use std::fmt::Write;
use stylesage_core::display;
use stylesage_core::{DashboardState, Recommendation, WardrobeItem};

pub fn item_line(item: &WardrobeItem) -> String {
    let id = item.id.as_deref().unwrap_or("-");
    let caption = display::item_caption(item);
    if caption.is_empty() {
        format!("{}  {}", id, display::item_label(item))
    } else {
        format!("{}  {}  ({})", id, display::item_label(item), caption)
    }
}

/// Filtered wardrobe followed by per-category counts and stats
pub fn wardrobe(state: &DashboardState) -> String {
    let mut out = String::new();
    let items = state.filtered_wardrobe();

    if items.is_empty() {
        out.push_str("Your wardrobe awaits. Add an image with `stylesage add <url>`.\n");
    } else {
        for item in items {
            let _ = writeln!(out, "{}", item_line(item));
        }
    }

    let counts = state.counts_by_category();
    if !counts.is_empty() {
        let summary: Vec<String> = counts
            .iter()
            .map(|(category, n)| format!("{} {}", category, n))
            .collect();
        let _ = writeln!(out, "\nCategories: {}", summary.join(", "));
    }

    let stats = state.stats();
    let _ = write!(
        out,
        "Items: {}  Categories: {}  Filter: {}",
        stats.items, stats.categories, state.filter
    );
    out
}

pub fn recommendation(rec: &Recommendation) -> String {
    let mut out = display::recommendation_title(rec);
    if let Some(why) = rec.justification.as_deref().filter(|j| !j.is_empty()) {
        let _ = write!(out, "\n{}", why);
    }
    for item in &rec.items {
        let caption = display::outfit_item_caption(item);
        let _ = write!(out, "\n  - {}", display::outfit_item_label(item));
        if !caption.is_empty() {
            let _ = write!(out, " ({})", caption);
        }
    }
    out
}
