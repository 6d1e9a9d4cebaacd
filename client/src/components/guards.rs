//! Permission and session guards for views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards read the context `PermissionStore` / `AuthState`. While either is
//! still loading they render a placeholder (or nothing) and never decide
//! early. They only shape the UI; the backend still authorizes each call.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ApiConfig;
use crate::state::auth::{AuthState, SessionStatus};
use crate::state::permissions::PermissionStore;

/// Page a denied route falls back to.
pub const DEFAULT_REDIRECT: &str = "/perfil";
/// Where an unauthenticated visitor is sent.
pub const LOGIN_PATH: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Pending,
    Allow,
    Deny,
}

pub fn guard_decision(store: &PermissionStore, required: &str) -> GuardDecision {
    if store.is_loading() {
        GuardDecision::Pending
    } else if store.has(required) {
        GuardDecision::Allow
    } else {
        GuardDecision::Deny
    }
}

fn replace_history() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Render children only when the user holds `name`.
#[component]
pub fn IfPermission(#[prop(into)] name: String, children: ChildrenFn) -> impl IntoView {
    let permissions = expect_context::<RwSignal<PermissionStore>>();

    view! {
        <Show when=move || permissions.with(|s| guard_decision(s, &name) == GuardDecision::Allow)>
            {children()}
        </Show>
    }
}

/// Route guard: children render only when the user holds `name`; otherwise
/// navigate to `redirect_to` once permissions have loaded.
#[component]
pub fn RequirePermission(
    #[prop(into)] name: String,
    #[prop(into, default = DEFAULT_REDIRECT.to_owned())] redirect_to: String,
    children: ChildrenFn,
) -> impl IntoView {
    let permissions = expect_context::<RwSignal<PermissionStore>>();
    let navigate = use_navigate();
    let decision = Memo::new(move |_| permissions.with(|s| guard_decision(s, &name)));

    Effect::new(move || {
        if decision.get() == GuardDecision::Deny {
            navigate(&redirect_to, replace_history());
        }
    });

    gate_view(decision.into(), children)
}

/// What a route guard shows for `decision`: a placeholder while pending,
/// the children once allowed, nothing when denied.
fn gate_view(decision: Signal<GuardDecision>, children: ChildrenFn) -> impl IntoView {
    move || match decision.get() {
        GuardDecision::Allow => children(),
        GuardDecision::Pending => view! { <p class="guard-loading">"Cargando permisos..."</p> }.into_any(),
        GuardDecision::Deny => ().into_any(),
    }
}

/// Session guard: validates the stored token once per page load and sends
/// the visitor to login when it is missing or rejected.
#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ApiConfig>();
    let navigate = use_navigate();

    Effect::new(move || {
        if auth.with(AuthState::should_redirect) {
            navigate(LOGIN_PATH, replace_history());
        }
    });

    if auth.with_untracked(AuthState::needs_check) {
        auth.update(|a| a.status = SessionStatus::Checking);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::BackendApi;
            use crate::util::auth::check_session;
            use crate::util::token::BrowserTokenStore;

            let status = check_session(&BrowserTokenStore, &BackendApi::new(config)).await;
            auth.update(|a| a.status = status);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = config;
    }

    view! {
        <Show
            when=move || auth.with(AuthState::is_authorized)
            fallback=|| view! { <p class="guard-loading">"Cargando..."</p> }
        >
            {children()}
        </Show>
    }
}
