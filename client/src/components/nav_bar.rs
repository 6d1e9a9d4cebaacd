//! Top navigation bar with permission-filtered links.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::guards::{IfPermission, LOGIN_PATH};
use crate::state::auth::AuthState;
use crate::state::features::{self, Feature, FeatureGroup};
use crate::state::permissions::PermissionStore;
use crate::util::auth::end_session;

fn feature_link(feature: &'static Feature) -> impl IntoView {
    view! {
        <a class="nav-bar__link" href=feature.path()>
            {feature.label}
        </a>
    }
}

/// Navigation bar shown on every authenticated page.
///
/// Tool and administration links render only for permissions the user holds.
#[component]
pub fn NavBar() -> impl IntoView {
    let permissions = expect_context::<RwSignal<PermissionStore>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let admin_open = RwSignal::new(false);

    let visible = move |group: FeatureGroup| permissions.with(|s| features::visible(s, group));

    let on_logout = move |_| {
        end_session(permissions, auth);
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <header class="nav-bar">
            <span class="nav-bar__brand">"LegalDesk"</span>
            <nav class="nav-bar__links">
                <a class="nav-bar__link" href="/perfil">
                    "Inicio"
                </a>
                {features::FEATURES
                    .iter()
                    .filter(|f| f.group == FeatureGroup::Tool)
                    .map(|f| {
                        view! {
                            <IfPermission name=f.permission>
                                {feature_link(f)}
                            </IfPermission>
                        }
                    })
                    .collect::<Vec<_>>()}
                <Show when=move || !visible(FeatureGroup::Admin).is_empty()>
                    <div class="nav-bar__admin">
                        <button
                            class="nav-bar__link nav-bar__admin-toggle"
                            on:click=move |_| admin_open.update(|open| *open = !*open)
                        >
                            "Administración "
                            {move || if admin_open.get() { "▲" } else { "▼" }}
                        </button>
                        <Show when=move || admin_open.get()>
                            <div class="nav-bar__dropdown">
                                {move || {
                                    visible(FeatureGroup::Admin)
                                        .into_iter()
                                        .map(feature_link)
                                        .collect::<Vec<_>>()
                                }}
                            </div>
                        </Show>
                    </div>
                </Show>
            </nav>
            <span class="nav-bar__user">
                {move || auth.with(|a| a.user.as_ref().map(|u| u.username.clone()).unwrap_or_default())}
            </span>
            <button class="btn nav-bar__logout" on:click=on_logout>
                "Cerrar sesión"
            </button>
        </header>
    }
}
