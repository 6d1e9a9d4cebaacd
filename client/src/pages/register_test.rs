use super::*;

fn filled_form() -> RegistrationForm {
    RegistrationForm {
        username: " ana ".to_owned(),
        nombre: "Ana".to_owned(),
        apellido: "Pérez".to_owned(),
        ci: "1.234.567-2".to_owned(),
        email: "ana@estudio.uy ".to_owned(),
        password: " secreto ".to_owned(),
    }
}

// =============================================================
// ci_feedback
// =============================================================

#[test]
fn ci_feedback_silent_for_empty_input() {
    assert_eq!(ci_feedback(""), None);
    assert_eq!(ci_feedback("   "), None);
}

#[test]
fn ci_feedback_silent_for_valid_ci() {
    assert_eq!(ci_feedback("1.234.567-2"), None);
}

#[test]
fn ci_feedback_flags_invalid_ci() {
    assert_eq!(ci_feedback("1.234.567-3"), Some("Cédula uruguaya inválida"));
    assert_eq!(ci_feedback("123"), Some("Cédula uruguaya inválida"));
}

// =============================================================
// validate_registration
// =============================================================

#[test]
fn validate_registration_builds_trimmed_request() {
    let request = validate_registration(&filled_form()).expect("valid form");
    assert_eq!(request.username, "ana");
    assert_eq!(request.email, "ana@estudio.uy");
    assert_eq!(request.ci, "12345672");
    // Passwords are sent as typed.
    assert_eq!(request.password, " secreto ");
}

#[test]
fn validate_registration_requires_every_field() {
    let mut form = filled_form();
    form.apellido = "  ".to_owned();
    assert_eq!(validate_registration(&form), Err("Completá todos los campos."));

    let mut form = filled_form();
    form.password = String::new();
    assert_eq!(validate_registration(&form), Err("Completá todos los campos."));
}

#[test]
fn validate_registration_rejects_invalid_ci() {
    let mut form = filled_form();
    form.ci = "1.234.567-9".to_owned();
    assert_eq!(validate_registration(&form), Err(INVALID_CI));
}

// =============================================================
// registration_error_message
// =============================================================

#[test]
fn error_message_prefers_backend_text() {
    let err = ApiError::Status { status: 409, message: Some("El usuario ya existe".to_owned()) };
    assert_eq!(registration_error_message(&err), "El usuario ya existe");
}

#[test]
fn error_message_for_status_without_body() {
    let err = ApiError::Status { status: 500, message: None };
    assert_eq!(registration_error_message(&err), "Error desconocido en el registro.");
}

#[test]
fn error_message_for_transport_failure() {
    let err = ApiError::Network("offline".to_owned());
    assert_eq!(registration_error_message(&err), "Error al registrar usuario/abogado.");
}
