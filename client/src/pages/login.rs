//! Login page: credentials first, then an emailed one-time code.
//!
//! SYSTEM CONTEXT
//! ==============
//! A successful login stores the token, reloads permissions, and only then
//! moves to the profile page, so the navigation renders with the new
//! session's permissions.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::guards::DEFAULT_REDIRECT;
use crate::config::ApiConfig;
use crate::net::types::LoginRequest;
use crate::state::auth::AuthState;
use crate::state::permissions::PermissionStore;

const OTP_LEN: usize = 6;

/// Which form the login card shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum LoginStep {
    #[default]
    Credentials,
    Otp { tx_id: String, email_masked: String },
}

impl LoginStep {
    pub(crate) fn is_otp(&self) -> bool {
        matches!(self, Self::Otp { .. })
    }

    pub(crate) fn tx_id(&self) -> Option<String> {
        match self {
            Self::Otp { tx_id, .. } => Some(tx_id.clone()),
            Self::Credentials => None,
        }
    }

    /// Where the code was sent, for display.
    pub(crate) fn destination(&self) -> String {
        match self {
            Self::Otp { email_masked, .. } if !email_masked.is_empty() => email_masked.clone(),
            _ => "tu correo".to_owned(),
        }
    }

    /// Adopt the transaction id issued by a resend. The previous mask is kept
    /// when the backend omits it.
    pub(crate) fn rotate(&mut self, new_tx_id: String, new_mask: Option<String>) {
        if let Self::Otp { tx_id, email_masked } = self {
            *tx_id = new_tx_id;
            if let Some(mask) = new_mask.filter(|m| !m.is_empty()) {
                *email_masked = mask;
            }
        }
    }
}

pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Ingresá usuario y contraseña.");
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

pub(crate) fn validate_otp(code: &str) -> Result<String, &'static str> {
    let code = code.trim();
    if code.chars().count() != OTP_LEN {
        return Err("El código tiene 6 dígitos.");
    }
    Ok(code.to_owned())
}

pub(crate) fn resend_notice(destination: &str) -> String {
    format!("Se reenvió el código a {destination}.")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let permissions = expect_context::<RwSignal<PermissionStore>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = StoredValue::new(expect_context::<ApiConfig>());
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let step = RwSignal::new(LoginStep::default());
    let error = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let signed_in = RwSignal::new(false);

    Effect::new(move || {
        if signed_in.get() {
            navigate(DEFAULT_REDIRECT, NavigateOptions::default());
        }
    });

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_credentials(&username.get(), &password.get()) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        error.set(None);
        info.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api;
            use crate::net::types::{LoginOutcome, LoginResponse};
            use crate::util::auth::start_session;
            use crate::util::token::{BrowserTokenStore, TokenStore};

            BrowserTokenStore.clear();
            match api::login(&config.get_value(), &request).await.map(LoginResponse::outcome) {
                Ok(LoginOutcome::Challenge { tx_id, email_masked }) => {
                    code.set(String::new());
                    step.set(LoginStep::Otp { tx_id, email_masked });
                }
                Ok(LoginOutcome::Token(token)) => {
                    start_session(&token, permissions, auth, config.get_value()).await;
                    signed_in.set(true);
                }
                Ok(LoginOutcome::Unexpected) => error.set(Some("Respuesta inesperada del servidor.".to_owned())),
                Err(e) => {
                    log::warn!("login failed: {e}");
                    error.set(Some("Credenciales inválidas.".to_owned()));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, config, permissions, auth, signed_in);
    };

    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(tx_id) = step.with(LoginStep::tx_id) else {
            return;
        };
        let code_value = match validate_otp(&code.get()) {
            Ok(code_value) => code_value,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        error.set(None);
        info.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api;
            use crate::net::types::{TokenResponse, VerifyOtpRequest};
            use crate::util::auth::start_session;

            let request = VerifyOtpRequest { tx_id, code: code_value };
            match api::verify_otp(&config.get_value(), &request).await {
                Ok(TokenResponse { token: Some(token) }) if !token.is_empty() => {
                    start_session(&token, permissions, auth, config.get_value()).await;
                    signed_in.set(true);
                }
                Ok(_) => error.set(Some("No se recibió token.".to_owned())),
                Err(e) => {
                    log::warn!("otp verification failed: {e}");
                    error.set(Some("Código inválido o expirado.".to_owned()));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (tx_id, code_value);
    };

    let on_resend = move |_| {
        if busy.get() {
            return;
        }
        let Some(tx_id) = step.with(LoginStep::tx_id) else {
            return;
        };
        error.set(None);
        info.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api;
            use crate::net::types::{ResendOtpRequest, ResendOtpResponse};

            match api::resend_otp(&config.get_value(), &ResendOtpRequest { tx_id }).await {
                Ok(ResendOtpResponse { tx_id: Some(new_tx_id), email_masked }) => {
                    step.update(|s| s.rotate(new_tx_id, email_masked));
                    code.set(String::new());
                    info.set(Some(resend_notice(&step.with(LoginStep::destination))));
                }
                Ok(_) => error.set(Some("No se pudo reenviar el código.".to_owned())),
                Err(e) => {
                    log::warn!("otp resend failed: {e}");
                    error.set(Some("Error al reenviar el código.".to_owned()));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = tx_id;
    };

    let on_back = move |_| {
        step.set(LoginStep::Credentials);
        code.set(String::new());
        error.set(None);
        info.set(None);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"LegalDesk"</h1>
                <p class="login-card__subtitle">"Ingresa para continuar"</p>
                <Show
                    when=move || step.with(LoginStep::is_otp)
                    fallback=move || {
                        view! {
                            <form class="login-form" on:submit=on_login>
                                <input
                                    class="login-input"
                                    type="email"
                                    placeholder="Usuario"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))
                                    disabled=move || busy.get()
                                />
                                <input
                                    class="login-input"
                                    type="password"
                                    placeholder="Contraseña"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                    disabled=move || busy.get()
                                />
                                <button class="login-button" type="submit" disabled=move || busy.get()>
                                    {move || if busy.get() { "Validando..." } else { "Iniciar sesión" }}
                                </button>
                            </form>
                            <p class="login-card__footer">
                                "¿Aún no estás registrado? "
                                <a href="/registro">"Registrarse"</a>
                            </p>
                        }
                    }
                >
                    <form class="login-form" on:submit=on_verify>
                        <p class="login-message">
                            "Te enviamos un código a "
                            <b>{move || step.with(LoginStep::destination)}</b>
                        </p>
                        <input
                            class="login-input login-input--code"
                            type="text"
                            maxlength="6"
                            placeholder="Código de 6 dígitos"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                            disabled=move || busy.get()
                        />
                        <button
                            class="login-button"
                            type="submit"
                            disabled=move || busy.get() || validate_otp(&code.get()).is_err()
                        >
                            {move || if busy.get() { "Verificando..." } else { "Verificar código" }}
                        </button>
                        <button class="login-button" type="button" on:click=on_resend disabled=move || busy.get()>
                            "Reenviar código"
                        </button>
                        <button class="login-button" type="button" on:click=on_back disabled=move || busy.get()>
                            "Volver"
                        </button>
                    </form>
                </Show>
                <Show when=move || info.get().is_some()>
                    <p class="login-message">{move || info.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
