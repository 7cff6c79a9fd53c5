//! Page Components
//!
//! The landing screen and the dashboard.

use leptos::*;
use stylesage_core::{BodyProfile, BodyType, CategoryFilter, ClientConfig};

use crate::components::*;
use crate::state::*;

/// Landing screen; its only job is to emit `on_start`
#[component]
pub fn LandingPage(#[prop(into)] on_start: Callback<()>) -> impl IntoView {
    view! {
        <section class="landing">
            <div class="landing-content">
                <h1 class="landing-title">"Style Sage"</h1>
                <p class="landing-tagline">
                    "Your personal wardrobe curator. Get precise, premium outfit recommendations tailored to you."
                </p>
                <button class="cta" on:click=move |_| on_start.call(())>"Start"</button>
            </div>
        </section>
    }
}

/// Builds the dashboard controller for this mount and renders the page
#[component]
pub fn DashboardRoot() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    provide_context(DashboardContext::new(&config));

    view! { <DashboardPage/> }
}

fn edit_profile(ctx: DashboardContext, edit: impl FnOnce(&mut BodyProfile)) {
    let mut profile = ctx.state.with_untracked(|s| s.profile.clone());
    edit(&mut profile);
    ctx.apply(move |d| d.set_profile(profile));
}

/// Dashboard - wardrobe, add-item form and recommendation panel
#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let state = ctx.state;

    // Ensure the user exists, then load their wardrobe
    ctx.run(|d| async move { d.mount().await });

    let quick_suggest = move |_| ctx.run(|d| async move { d.quick_suggest().await });
    let get_outfit = move |_| ctx.run(|d| async move { d.request_recommendation().await });
    let add_custom = move |_| ctx.run(|d| async move { d.add_custom_item().await });
    let add_demo = move |_| ctx.run(|d| async move { d.add_demo_item().await });

    let adding = move || state.with(|s| s.adding);
    let filtered = move || {
        state.with(|s| {
            s.filtered_wardrobe()
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div>
                    <h1 class="brand">"Style Sage"</h1>
                    <p class="brand-tagline">"Curate your wardrobe and get impeccable, tailored outfits."</p>
                </div>
                <div class="header-actions">
                    <button class="button-gold" on:click=quick_suggest>"Suggest Without Wardrobe"</button>
                    <button class="button-light" on:click=get_outfit>"Get Outfit"</button>
                </div>
            </header>

            {move || ctx.error.get().map(|e| view! { <ErrorDisplay message=e/> })}

            <main class="dashboard-grid">
                <Card class="wardrobe-panel">
                    <div class="controls">
                        <div class="chips">
                            {CategoryFilter::ALL.into_iter().map(|filter| {
                                let active = Signal::derive(move || state.with(|s| s.filter == filter));
                                let badge = move || state.with(|s| s.chip_badge(filter));
                                view! {
                                    <Chip active=active on_click=move |_: ()| ctx.apply(move |d| d.set_filter(filter))>
                                        <span class="chip-label">{filter.tag()}</span>
                                        {move || badge().map(|n| view! { <span class="chip-badge">{n}</span> })}
                                    </Chip>
                                }
                            }).collect_view()}
                        </div>
                        <div class="context-inputs">
                            <input
                                class="field"
                                placeholder="Occasion"
                                prop:value=move || state.with(|s| s.occasion.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    ctx.apply(move |d| d.set_occasion(value));
                                }
                            />
                            <input
                                class="field"
                                placeholder="Weather"
                                prop:value=move || state.with(|s| s.weather.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    ctx.apply(move |d| d.set_weather(value));
                                }
                            />
                        </div>
                    </div>

                    <div class="wardrobe-grid">
                        {move || {
                            let items = filtered();
                            if items.is_empty() {
                                view! { <EmptyWardrobe/> }.into_view()
                            } else {
                                items
                                    .into_iter()
                                    .map(|item| view! { <WardrobeTile item=item/> })
                                    .collect_view()
                            }
                        }}
                    </div>
                </Card>

                <aside class="side-panel">
                    <Card class="add-item">
                        <div class="card-title">"Add wardrobe item"</div>
                        <p class="card-hint">
                            "Paste an image link for any piece: upperwear, jacket, t-shirt, pants, shoes, accessories."
                        </p>
                        <input
                            class="field wide"
                            placeholder="https://image-url"
                            prop:value=move || state.with(|s| s.image_url.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                ctx.apply(move |d| d.set_image_url(value));
                            }
                        />
                        <div class="add-actions">
                            <button
                                class="button-dark"
                                on:click=add_custom
                                disabled=move || !state.with(|s| s.can_add_custom())
                            >
                                {move || if adding() { "Analyzing…" } else { "Analyze & Save" }}
                            </button>
                            <button class="button-gold" on:click=add_demo disabled=adding>
                                "Add demo"
                            </button>
                        </div>
                    </Card>

                    <div class="stats">
                        <Stat label="Items" value=Signal::derive(move || state.with(|s| s.stats().items))/>
                        <Stat label="Categories" value=Signal::derive(move || state.with(|s| s.stats().categories))/>
                        <Stat label="Favorites" value=Signal::derive(move || state.with(|s| s.stats().favorites))/>
                    </div>

                    <Card class="profile">
                        <div class="card-title">"Quick suggest profile"</div>
                        <div class="profile-grid">
                            <input
                                class="field"
                                type="number"
                                placeholder="Height (cm)"
                                prop:value=move || state.with(|s| s.profile.height_cm.to_string())
                                on:change=move |ev| {
                                    if let Ok(height) = event_target_value(&ev).parse::<f64>() {
                                        edit_profile(ctx, |p| p.height_cm = height);
                                    }
                                }
                            />
                            <input
                                class="field"
                                type="number"
                                placeholder="Weight (kg)"
                                prop:value=move || state.with(|s| s.profile.weight_kg.to_string())
                                on:change=move |ev| {
                                    if let Ok(weight) = event_target_value(&ev).parse::<f64>() {
                                        edit_profile(ctx, |p| p.weight_kg = weight);
                                    }
                                }
                            />
                            <select
                                class="field"
                                on:change=move |ev| {
                                    if let Ok(body_type) = event_target_value(&ev).parse::<BodyType>() {
                                        edit_profile(ctx, |p| p.body_type = body_type);
                                    }
                                }
                            >
                                {BodyType::ALL.into_iter().map(|body_type| view! {
                                    <option
                                        value=body_type.as_str()
                                        selected=move || state.with(|s| s.profile.body_type == body_type)
                                    >
                                        {body_type.as_str().replace('_', " ")}
                                    </option>
                                }).collect_view()}
                            </select>
                            <input
                                class="field"
                                placeholder="Style"
                                prop:value=move || state.with(|s| s.profile.style_choice.clone())
                                on:change=move |ev| {
                                    let style = event_target_value(&ev);
                                    edit_profile(ctx, |p| p.style_choice = style);
                                }
                            />
                        </div>
                    </Card>

                    <Card class="recommendation-panel">
                        <div class="card-title">"Recommendation"</div>
                        <p class="card-hint">"Get a complete look tailored to your items, occasion, and weather."</p>
                        {move || {
                            let (loading, rec) = state.with(|s| (s.loading, s.recommendation.clone()));
                            if loading {
                                view! { <LoadingSpinner message="Curating a premium look…"/> }.into_view()
                            } else if let Some(rec) = rec {
                                view! { <RecommendationView rec=rec/> }.into_view()
                            } else {
                                view! { <div class="recommendation-empty">"No look yet. Click “Get Outfit”."</div> }.into_view()
                            }
                        }}
                    </Card>
                </aside>
            </main>
        </div>
    }
}
