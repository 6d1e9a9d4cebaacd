//! Application shell and route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` renders the SSR document; `App` provides shared state and
//! declares the routes. Feature routes resolve through the catalog in
//! `state::features`, so adding a screen means adding a catalog entry.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::{ParamSegment, StaticSegment};

use crate::config::ApiConfig;
use crate::pages::feature::FeaturePage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;
use crate::state::auth::AuthState;
use crate::state::permissions::PermissionStore;

/// SSR document wrapper used by the host router.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::from_build_env();
    let permissions = RwSignal::new(PermissionStore::default());
    let auth = RwSignal::new(AuthState::default());

    provide_context(config.clone());
    provide_context(permissions);
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(crate::state::permissions::refresh_permissions(
        permissions,
        config,
    ));
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <Stylesheet id="leptos" href="/pkg/legaldesk.css"/>
        <Title text="LegalDesk"/>

        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Página no encontrada."</p> }>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("registro") view=RegisterPage/>
                <Route path=StaticSegment("perfil") view=ProfilePage/>
                <Route path=ParamSegment("feature") view=FeaturePage/>
            </Routes>
        </Router>
    }
}
