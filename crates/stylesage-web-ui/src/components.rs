//! Reusable UI Components

use leptos::*;
use stylesage_core::display;
use stylesage_core::{OutfitItem, Recommendation, WardrobeItem};

/// Filter chip
#[component]
pub fn Chip(
    #[prop(into)] active: Signal<bool>,
    #[prop(into)] on_click: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <button class="chip" class:active=move || active.get() on:click=move |_| on_click.call(())>
            {children()}
        </button>
    }
}

/// Labelled number tile
#[component]
pub fn Stat(label: &'static str, #[prop(into)] value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-label">{label}</div>
            <div class="stat-value">{move || value.get()}</div>
        </div>
    }
}

/// Frosted panel
#[component]
pub fn Card(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    view! {
        <div class=format!("card {}", class)>
            {children()}
        </div>
    }
}

/// One wardrobe photo with its label and caption
#[component]
pub fn WardrobeTile(item: WardrobeItem) -> impl IntoView {
    let label = display::item_label(&item);
    let caption = display::item_caption(&item);

    view! {
        <div class="wardrobe-tile">
            {item.image_url.map(|src| view! { <img src=src class="wardrobe-image"/> })}
            <div class="wardrobe-overlay">
                <div class="wardrobe-label">{label}</div>
                <div class="wardrobe-caption">{caption}</div>
            </div>
        </div>
    }
}

/// Placeholder shown while the filtered wardrobe is empty
#[component]
pub fn EmptyWardrobe() -> impl IntoView {
    view! {
        <div class="wardrobe-empty">
            <div class="wardrobe-empty-title">"Your wardrobe awaits"</div>
            <p>"Add images of jackets, tees, pants, shoes, anything, and we'll analyze them automatically."</p>
        </div>
    }
}

#[component]
pub fn OutfitPiece(item: OutfitItem) -> impl IntoView {
    let label = display::outfit_item_label(&item);
    let caption = display::outfit_item_caption(&item);

    view! {
        <div class="outfit-piece">
            {item.image_url.map(|src| view! { <img src=src class="outfit-thumb"/> })}
            <div>
                <div class="outfit-piece-label">{label}</div>
                <div class="outfit-piece-caption">{caption}</div>
            </div>
        </div>
    }
}

#[component]
pub fn RecommendationView(rec: Recommendation) -> impl IntoView {
    let title = display::recommendation_title(&rec);

    view! {
        <div class="recommendation">
            <div>
                <div class="recommendation-title">{title}</div>
                {rec.justification.map(|j| view! { <p class="recommendation-why">{j}</p> })}
            </div>
            <div class="outfit-pieces">
                {rec.items.into_iter().map(|item| view! { <OutfitPiece item=item/> }).collect_view()}
            </div>
        </div>
    }
}

/// Loading spinner
#[component]
pub fn LoadingSpinner(#[prop(default = "Loading...")] message: &'static str) -> impl IntoView {
    view! {
        <div class="loading-spinner">
            <div class="spinner"></div>
            <span>{message}</span>
        </div>
    }
}

/// Error display
#[component]
pub fn ErrorDisplay(message: String) -> impl IntoView {
    view! {
        <div class="error-display">
            <span class="error-icon">"⚠️"</span>
            <span class="error-message">{message}</span>
        </div>
    }
}
