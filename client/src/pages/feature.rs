//! Gated feature route (`/{slug}`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Every document tool and administration screen sits behind the session
//! guard and its catalog permission. The screens' own workflows run against
//! the remote services named here; unknown slugs fall back to the profile.

#[cfg(test)]
#[path = "feature_test.rs"]
mod feature_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_params_map;

use crate::components::guards::{AuthGuard, DEFAULT_REDIRECT, RequirePermission};
use crate::components::nav_bar::NavBar;
use crate::config::ApiConfig;
use crate::state::features::{self, Feature, FeatureGroup};

/// Base URL of the service backing `feature`.
pub(crate) fn service_url<'a>(config: &'a ApiConfig, feature: &Feature) -> &'a str {
    match feature.group {
        FeatureGroup::Tool => &config.ai_url,
        FeatureGroup::Admin => &config.backend_url,
    }
}

#[component]
pub fn FeaturePage() -> impl IntoView {
    let params = use_params_map();
    let feature = move || params.read().get("feature").as_deref().and_then(features::find);

    move || match feature() {
        Some(feature) => view! {
            <AuthGuard>
                <NavBar/>
                <RequirePermission name=feature.permission>
                    <FeatureSummary feature=feature/>
                </RequirePermission>
            </AuthGuard>
        }
        .into_any(),
        None => view! { <Redirect path=DEFAULT_REDIRECT/> }.into_any(),
    }
}

#[component]
fn FeatureSummary(feature: &'static Feature) -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let service = service_url(&config, feature).to_owned();

    view! {
        <main class="feature-page">
            <h2>{feature.label}</h2>
            <p>{feature.summary}</p>
            <p class="feature-page__service">
                "Servicio: "
                <code>{service}</code>
            </p>
        </main>
    }
}
