use super::*;
use crate::state::permissions::PermissionSet;

fn ready_store(names: &[&str]) -> PermissionStore {
    let mut store = PermissionStore::default();
    store.finish_refresh(PermissionSet::from_names(names.iter().copied()));
    store
}

#[test]
fn pending_while_uninitialized() {
    let store = PermissionStore::default();
    assert_eq!(guard_decision(&store, "OCR"), GuardDecision::Pending);
}

#[test]
fn pending_while_refreshing_even_if_previously_allowed() {
    let mut store = ready_store(&["OCR"]);
    store.begin_refresh();
    assert_eq!(guard_decision(&store, "OCR"), GuardDecision::Pending);
}

#[test]
fn allow_when_permission_held_case_insensitively() {
    let store = ready_store(&["OCR", "Resumidor"]);
    assert_eq!(guard_decision(&store, "ocr"), GuardDecision::Allow);
    assert_eq!(guard_decision(&store, " resumidor "), GuardDecision::Allow);
}

#[test]
fn deny_when_permission_missing() {
    let store = ready_store(&["OCR", "Resumidor"]);
    assert_eq!(guard_decision(&store, "Roles Crud"), GuardDecision::Deny);
}

#[test]
fn deny_everything_after_failed_load() {
    let store = ready_store(&[]);
    assert_eq!(guard_decision(&store, "OCR"), GuardDecision::Deny);
}

#[test]
fn default_redirect_is_profile() {
    assert_eq!(DEFAULT_REDIRECT, "/perfil");
    assert_eq!(LOGIN_PATH, "/");
}

// =============================================================
// Rendering
// =============================================================

#[cfg(feature = "ssr")]
mod render {
    use std::sync::Arc;

    use leptos::prelude::*;
    use leptos::reactive::owner::Owner;

    use super::*;

    const PLACEHOLDER: &str = "Cargando permisos...";
    const PANEL: &str = "secret panel";

    fn loading_store() -> PermissionStore {
        let mut store = PermissionStore::default();
        store.begin_refresh();
        store
    }

    fn render_html<V: RenderHtml>(store: PermissionStore, view: impl FnOnce() -> V) -> String {
        Owner::new().with(|| {
            provide_context(RwSignal::new(store));
            view().to_html()
        })
    }

    fn gate_html(store: PermissionStore, required: &'static str) -> String {
        render_html(store, move || {
            let permissions = expect_context::<RwSignal<PermissionStore>>();
            let decision = Signal::derive(move || permissions.with(|s| guard_decision(s, required)));
            let children: ChildrenFn = Arc::new(|| view! { <span>{PANEL}</span> }.into_any());
            gate_view(decision, children)
        })
    }

    fn if_permission_html(store: PermissionStore, required: &'static str) -> String {
        render_html(store, move || {
            view! {
                <IfPermission name=required>
                    <span>{PANEL}</span>
                </IfPermission>
            }
        })
    }

    #[test]
    fn route_gate_shows_placeholder_while_loading() {
        for store in [PermissionStore::default(), loading_store()] {
            let html = gate_html(store, "OCR");
            assert!(html.contains(PLACEHOLDER), "{html}");
            assert!(!html.contains(PANEL), "{html}");
        }
    }

    #[test]
    fn route_gate_hides_children_while_refreshing_a_granted_set() {
        let mut store = ready_store(&["OCR"]);
        store.begin_refresh();
        let html = gate_html(store, "OCR");
        assert!(html.contains(PLACEHOLDER), "{html}");
        assert!(!html.contains(PANEL), "{html}");
    }

    #[test]
    fn route_gate_renders_children_when_allowed() {
        let html = gate_html(ready_store(&["OCR", "Resumidor"]), "ocr");
        assert!(html.contains(PANEL), "{html}");
        assert!(!html.contains(PLACEHOLDER), "{html}");
    }

    #[test]
    fn route_gate_renders_nothing_when_denied() {
        let html = gate_html(ready_store(&["OCR"]), "Roles Crud");
        assert!(!html.contains(PANEL), "{html}");
        assert!(!html.contains(PLACEHOLDER), "{html}");
    }

    #[test]
    fn if_permission_hides_children_while_loading() {
        let html = if_permission_html(loading_store(), "OCR");
        assert!(!html.contains(PANEL), "{html}");
    }

    #[test]
    fn if_permission_renders_children_when_held() {
        let html = if_permission_html(ready_store(&["OCR"]), " ocr ");
        assert!(html.contains(PANEL), "{html}");
    }

    #[test]
    fn if_permission_hides_children_when_missing() {
        let html = if_permission_html(ready_store(&["OCR"]), "Roles Crud");
        assert!(!html.contains(PANEL), "{html}");
    }
}
