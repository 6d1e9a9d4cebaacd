//! Self-service registration: creates a user and its lawyer record.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::guards::LOGIN_PATH;
use crate::config::ApiConfig;
use crate::net::api::ApiError;
use crate::net::types::RegisterRequest;
use crate::util::ci::{is_valid_ci, normalize_ci};

const INVALID_CI: &str = "La cédula ingresada no es válida en Uruguay.";

/// Raw form input, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegistrationForm {
    pub username: String,
    pub nombre: String,
    pub apellido: String,
    pub ci: String,
    pub email: String,
    pub password: String,
}

/// Inline hint shown under the CI field while typing.
pub(crate) fn ci_feedback(raw: &str) -> Option<&'static str> {
    if raw.trim().is_empty() || is_valid_ci(raw) {
        None
    } else {
        Some("Cédula uruguaya inválida")
    }
}

/// Check the form and build the request. The CI is sent in its 8-digit form.
pub(crate) fn validate_registration(form: &RegistrationForm) -> Result<RegisterRequest, &'static str> {
    let required = [&form.username, &form.nombre, &form.apellido, &form.ci, &form.email];
    if required.iter().any(|v| v.trim().is_empty()) || form.password.is_empty() {
        return Err("Completá todos los campos.");
    }
    let ci = normalize_ci(&form.ci).map_err(|_| INVALID_CI)?;
    Ok(RegisterRequest {
        username: form.username.trim().to_owned(),
        email: form.email.trim().to_owned(),
        password: form.password.clone(),
        nombre: form.nombre.trim().to_owned(),
        apellido: form.apellido.trim().to_owned(),
        ci,
    })
}

pub(crate) fn registration_error_message(err: &ApiError) -> String {
    if let Some(message) = err.backend_message() {
        return message.to_owned();
    }
    match err {
        ApiError::Status { .. } => "Error desconocido en el registro.".to_owned(),
        _ => "Error al registrar usuario/abogado.".to_owned(),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<ApiConfig>());
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::default());
    let show_password = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let registered = RwSignal::new(false);

    Effect::new(move || {
        if registered.get() {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match form.with(validate_registration) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&config.get_value(), &request).await {
                Ok(()) => registered.set(true),
                Err(e) => {
                    log::warn!("registration failed: {e}");
                    error.set(Some(registration_error_message(&e)));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, config, registered);
    };

    view! {
        <div class="register-page">
            <div class="login-card">
                <h1>"Crear una cuenta"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Nombre de usuario"
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Nombre"
                        prop:value=move || form.with(|f| f.nombre.clone())
                        on:input=move |ev| form.update(|f| f.nombre = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Apellido"
                        prop:value=move || form.with(|f| f.apellido.clone())
                        on:input=move |ev| form.update(|f| f.apellido = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Cédula de identidad"
                        prop:value=move || form.with(|f| f.ci.clone())
                        on:input=move |ev| form.update(|f| f.ci = event_target_value(&ev))
                    />
                    <Show when=move || form.with(|f| ci_feedback(&f.ci).is_some())>
                        <p class="login-message login-message--error">
                            {move || form.with(|f| ci_feedback(&f.ci).unwrap_or_default())}
                        </p>
                    </Show>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <div class="login-input-row">
                        <input
                            class="login-input"
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="Contraseña"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                        <button
                            class="btn login-input-row__toggle"
                            type="button"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Ocultar" } else { "Mostrar" }}
                        </button>
                    </div>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Registrarse"
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "¿Ya tenés cuenta? "
                    <a href=LOGIN_PATH>"Iniciar sesión"</a>
                </p>
            </div>
        </div>
    }
}
