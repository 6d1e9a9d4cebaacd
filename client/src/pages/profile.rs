//! Profile page: the default landing route after login.

use leptos::prelude::*;

use crate::components::guards::AuthGuard;
use crate::components::nav_bar::NavBar;
use crate::config::ApiConfig;
use crate::net::types::Client;
use crate::state::auth::AuthState;
use crate::state::permissions::PermissionStore;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <AuthGuard>
            <NavBar/>
            <ProfileBody/>
        </AuthGuard>
    }
}

fn client_card(client: Client) -> impl IntoView {
    view! {
        <div class="profile-card__client">
            <h3>{client.full_name()}</h3>
            <p>"CI: " {client.ci}</p>
            <p>"Email: " {client.email}</p>
        </div>
    }
}

/// Client list, signed-in user card, plus the permissions the session loaded.
#[component]
fn ProfileBody() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let permissions = expect_context::<RwSignal<PermissionStore>>();
    let config = expect_context::<ApiConfig>();
    let error = RwSignal::new(None::<String>);
    let clients = RwSignal::new(None::<Vec<Client>>);
    let clients_error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api;
        use crate::util::token::{BrowserTokenStore, TokenStore};

        let fetch_user = auth.with_untracked(|a| a.user.is_none());
        leptos::task::spawn_local(async move {
            let Some(token) = BrowserTokenStore.load() else {
                error.set(Some("No estás autenticado".to_owned()));
                clients.set(Some(Vec::new()));
                return;
            };
            match api::fetch_clients(&config, &token).await {
                Ok(list) => clients.set(Some(list)),
                Err(e) => {
                    log::warn!("client list fetch failed: {e}");
                    clients_error.set(Some("No se pudieron cargar los clientes".to_owned()));
                    clients.set(Some(Vec::new()));
                }
            }
            if fetch_user {
                match api::fetch_current_user(&config, &token).await {
                    Ok(user) => auth.update(|a| a.user = Some(user)),
                    Err(e) => {
                        log::warn!("current user fetch failed: {e}");
                        error.set(Some("No se pudo obtener el usuario".to_owned()));
                    }
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <main class="profile-page">
            <section class="profile-card">
                <h2>"Clientes"</h2>
                <Show when=move || clients_error.get().is_some()>
                    <p class="profile-card__error">{move || clients_error.get().unwrap_or_default()}</p>
                </Show>
                {move || match clients.get() {
                    None => view! { <p>"Cargando..."</p> }.into_any(),
                    Some(list) if list.is_empty() => view! { <p>"No hay clientes registrados."</p> }.into_any(),
                    Some(list) => {
                        let cards = list.into_iter().map(client_card).collect::<Vec<_>>();
                        view! { <div class="profile-card__clients">{cards}</div> }.into_any()
                    }
                }}
            </section>
            <section class="profile-card">
                <h2>"Mi perfil"</h2>
                {move || {
                    auth.with(|a| a.user.clone())
                        .map(|user| {
                            view! {
                                <dl class="profile-card__fields">
                                    <dt>"Usuario"</dt>
                                    <dd>{user.username}</dd>
                                    <dt>"Email"</dt>
                                    <dd>{user.email}</dd>
                                </dl>
                            }
                        })
                }}
                <Show when=move || error.get().is_some()>
                    <p class="profile-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </section>
            <section class="profile-card">
                <h2>"Permisos"</h2>
                {move || {
                    permissions
                        .with(|s| {
                            if s.is_loading() {
                                view! { <p>"Cargando permisos..."</p> }.into_any()
                            } else if s.permissions().is_empty() {
                                view! { <p>"Sin permisos asignados."</p> }.into_any()
                            } else {
                                let items = s
                                    .permissions()
                                    .names()
                                    .iter()
                                    .map(|name| view! { <li>{name.clone()}</li> })
                                    .collect::<Vec<_>>();
                                view! { <ul class="profile-card__permissions">{items}</ul> }.into_any()
                            }
                        })
                }}
            </section>
        </main>
    }
}
