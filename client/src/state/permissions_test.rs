use std::cell::RefCell;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use futures::executor::block_on;

use super::*;

struct FakeTokens(Option<String>);

impl TokenStore for FakeTokens {
    fn load(&self) -> Option<String> {
        self.0.clone()
    }

    fn save(&self, _token: &str) {}

    fn clear(&self) {}
}

struct FakeSource {
    result: Result<Vec<String>, ApiError>,
    calls: RefCell<Vec<(String, String)>>,
}

impl FakeSource {
    fn answering(result: Result<Vec<String>, ApiError>) -> Self {
        Self { result, calls: RefCell::new(Vec::new()) }
    }
}

impl PermissionSource for FakeSource {
    fn fetch_permissions(&self, subject: &str, token: &str) -> impl Future<Output = Result<Vec<String>, ApiError>> {
        self.calls.borrow_mut().push((subject.to_owned(), token.to_owned()));
        std::future::ready(self.result.clone())
    }
}

fn token_for(claims: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================
// PermissionSet
// =============================================================

#[test]
fn set_lookup_is_case_insensitive_and_trimmed() {
    let set = PermissionSet::from_names(["OCR", "Resumidor"]);
    assert!(set.contains("ocr"));
    assert!(set.contains("  RESUMIDOR "));
    assert!(!set.contains("Roles Crud"));
}

#[test]
fn set_matches_backend_names_with_padding() {
    let set = PermissionSet::from_names([" Roles Crud  "]);
    assert!(set.contains("roles crud"));
    assert_eq!(set.names(), ["Roles Crud"]);
}

#[test]
fn set_lists_unique_non_blank_names() {
    let set = PermissionSet::from_names(["OCR", "ocr ", "", "   ", "ChatBot"]);
    assert_eq!(set.names(), ["OCR", "ChatBot"]);
}

#[test]
fn set_contains_blank_name_only_when_fetched() {
    let set = PermissionSet::from_names(["OCR"]);
    assert!(!set.contains(""));
    assert!(!set.contains("   "));

    let set = PermissionSet::from_names(["OCR", "  "]);
    assert!(set.contains(""));
    assert!(set.contains(" "));
    assert_eq!(set.names(), ["OCR"]);
}

#[test]
fn blank_only_set_lists_nothing() {
    let set = PermissionSet::from_names([""]);
    assert!(set.is_empty());
    assert!(set.contains(""));
}

#[test]
fn empty_set_denies_everything() {
    let set = PermissionSet::default();
    assert!(set.is_empty());
    assert!(!set.contains("OCR"));
}

// =============================================================
// PermissionStore phases
// =============================================================

#[test]
fn store_starts_uninitialized_and_loading() {
    let store = PermissionStore::default();
    assert_eq!(store.phase, PermissionPhase::Uninitialized);
    assert!(store.is_loading());
    assert!(!store.has("OCR"));
}

#[test]
fn store_refresh_cycle() {
    let mut store = PermissionStore::default();
    store.begin_refresh();
    assert_eq!(store.phase, PermissionPhase::Loading);
    assert!(store.is_loading());

    store.finish_refresh(PermissionSet::from_names(["OCR"]));
    assert_eq!(store.phase, PermissionPhase::Ready);
    assert!(!store.is_loading());
    assert!(store.has("ocr"));
}

#[test]
fn store_refresh_from_ready_goes_back_to_loading_and_keeps_old_set() {
    let mut store = PermissionStore::default();
    store.finish_refresh(PermissionSet::from_names(["OCR"]));
    store.begin_refresh();
    assert!(store.is_loading());
    assert!(store.has("OCR"));
}

#[test]
fn store_last_finish_wins() {
    let mut store = PermissionStore::default();
    store.begin_refresh();
    store.begin_refresh();
    store.finish_refresh(PermissionSet::from_names(["OCR"]));
    store.finish_refresh(PermissionSet::from_names(["ChatBot"]));
    assert!(!store.has("OCR"));
    assert!(store.has("chatbot"));
}

#[test]
fn store_clear_is_ready_and_empty() {
    let mut store = PermissionStore::default();
    store.finish_refresh(PermissionSet::from_names(["OCR"]));
    store.clear();
    assert!(!store.is_loading());
    assert!(store.permissions().is_empty());
}

// =============================================================
// load_permissions
// =============================================================

#[test]
fn load_without_token_is_empty_and_skips_fetch() {
    let source = FakeSource::answering(Ok(names(&["OCR"])));
    let set = block_on(load_permissions(&FakeTokens(None), &source));
    assert!(set.is_empty());
    assert!(source.calls.borrow().is_empty());
}

#[test]
fn load_uses_id_claim_and_bearer_token() {
    let token = token_for(r#"{"id":42,"sub":"ana@estudio.uy"}"#);
    let source = FakeSource::answering(Ok(names(&["OCR", "Resumidor"])));
    let set = block_on(load_permissions(&FakeTokens(Some(token.clone())), &source));

    assert!(set.contains("ocr"));
    assert!(!set.contains("Roles Crud"));
    assert_eq!(source.calls.borrow().as_slice(), [("42".to_owned(), token)]);
}

#[test]
fn load_falls_back_to_sub_claim() {
    let token = token_for(r#"{"sub":"ana@estudio.uy"}"#);
    let source = FakeSource::answering(Ok(names(&["ChatBot"])));
    block_on(load_permissions(&FakeTokens(Some(token)), &source));
    assert_eq!(source.calls.borrow()[0].0, "ana@estudio.uy");
}

#[test]
fn load_with_undecodable_token_is_empty() {
    let source = FakeSource::answering(Ok(names(&["OCR"])));
    let set = block_on(load_permissions(&FakeTokens(Some("garbage".to_owned())), &source));
    assert!(set.is_empty());
    assert!(source.calls.borrow().is_empty());
}

#[test]
fn load_with_token_missing_subject_is_empty() {
    let source = FakeSource::answering(Ok(names(&["OCR"])));
    let set = block_on(load_permissions(&FakeTokens(Some(token_for(r#"{"exp":1}"#))), &source));
    assert!(set.is_empty());
    assert!(source.calls.borrow().is_empty());
}

#[test]
fn load_with_zero_id_skips_fetch() {
    let source = FakeSource::answering(Ok(names(&["OCR"])));
    let token = token_for(r#"{"id":0,"sub":"ana@estudio.uy"}"#);
    let set = block_on(load_permissions(&FakeTokens(Some(token)), &source));
    assert!(set.is_empty());
    assert!(source.calls.borrow().is_empty());
}

#[test]
fn load_addresses_integral_float_id_as_integer() {
    let source = FakeSource::answering(Ok(names(&["OCR"])));
    block_on(load_permissions(&FakeTokens(Some(token_for(r#"{"id":7.0}"#))), &source));
    assert_eq!(source.calls.borrow()[0].0, "7");
}

#[test]
fn load_with_rejected_status_is_empty() {
    let source = FakeSource::answering(Err(ApiError::Status { status: 403, message: None }));
    let set = block_on(load_permissions(&FakeTokens(Some(token_for(r#"{"id":1}"#))), &source));
    assert!(set.is_empty());
}

#[test]
fn load_with_network_error_is_empty() {
    let source = FakeSource::answering(Err(ApiError::Network("connection refused".to_owned())));
    let set = block_on(load_permissions(&FakeTokens(Some(token_for(r#"{"id":1}"#))), &source));
    assert!(set.is_empty());
}

#[test]
fn load_result_membership_matches_fetched_list() {
    let fetched = names(&["OCR", "Transcripcion", "Asignar roles a usuario"]);
    let source = FakeSource::answering(Ok(fetched.clone()));
    let set = block_on(load_permissions(&FakeTokens(Some(token_for(r#"{"id":9}"#))), &source));

    for name in ["ocr", " TRANSCRIPCION", "asignar ROLES a usuario", "Permisos", "Roles Crud", ""] {
        let expected = fetched
            .iter()
            .any(|n| n.trim().to_lowercase() == name.trim().to_lowercase());
        assert_eq!(set.contains(name), expected, "name {name:?}");
    }
}

#[test]
fn load_result_with_blank_entry_admits_blank_name() {
    let fetched = names(&["OCR", "  "]);
    let source = FakeSource::answering(Ok(fetched.clone()));
    let set = block_on(load_permissions(&FakeTokens(Some(token_for(r#"{"id":9}"#))), &source));

    for name in ["", "   ", "ocr", "Resumidor"] {
        let expected = fetched
            .iter()
            .any(|n| n.trim().to_lowercase() == name.trim().to_lowercase());
        assert_eq!(set.contains(name), expected, "name {name:?}");
    }
}

#[test]
fn permission_error_messages() {
    assert_eq!(PermissionError::MissingSubject.to_string(), "token carries no user id");
    assert_eq!(PermissionError::from(TokenError::Malformed).to_string(), "token has no payload segment");
}
