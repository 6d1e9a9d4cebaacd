//! Catalog of permission-gated features.
//!
//! DESIGN
//! ======
//! Navigation and the feature route read the same table, so a link is shown
//! exactly when its route would admit the user. Permission names are the
//! backend's, spelled as it stores them.

#[cfg(test)]
#[path = "features_test.rs"]
mod features_test;

use super::permissions::PermissionStore;

/// Where a feature appears in the navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    /// Document tools served by the AI API.
    Tool,
    /// Administration screens served by the backend API.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    /// Single route segment, e.g. `ocr` for `/ocr`.
    pub slug: &'static str,
    pub label: &'static str,
    pub permission: &'static str,
    pub group: FeatureGroup,
    pub summary: &'static str,
}

impl Feature {
    pub fn path(&self) -> String {
        format!("/{}", self.slug)
    }
}

pub const FEATURES: &[Feature] = &[
    Feature {
        slug: "transcripcion",
        label: "Transcripción",
        permission: "Transcripcion",
        group: FeatureGroup::Tool,
        summary: "Transcripción de audio a texto.",
    },
    Feature {
        slug: "redactorautomatico",
        label: "Redacción Asistida",
        permission: "Redaccion Asistida",
        group: FeatureGroup::Tool,
        summary: "Redacción de escritos a partir de documentos de referencia.",
    },
    Feature {
        slug: "chatbot",
        label: "ChatBot Jurídico",
        permission: "ChatBot",
        group: FeatureGroup::Tool,
        summary: "Asistente conversacional sobre consultas jurídicas.",
    },
    Feature {
        slug: "resumidor",
        label: "Resumidor",
        permission: "Resumidor",
        group: FeatureGroup::Tool,
        summary: "Resumen de documentos extensos.",
    },
    Feature {
        slug: "ocr",
        label: "OCR",
        permission: "OCR",
        group: FeatureGroup::Tool,
        summary: "Reconocimiento de texto en documentos escaneados.",
    },
    Feature {
        slug: "transformardocumento",
        label: "Transformar Documento",
        permission: "Transformar Documento",
        group: FeatureGroup::Tool,
        summary: "Conversión de documentos entre formatos.",
    },
    Feature {
        slug: "abogados",
        label: "Abogados",
        permission: "Abogado CRUD",
        group: FeatureGroup::Admin,
        summary: "Alta, baja y modificación de abogados.",
    },
    Feature {
        slug: "usuarios",
        label: "Usuarios",
        permission: "Usuario Crud",
        group: FeatureGroup::Admin,
        summary: "Gestión de usuarios del sistema.",
    },
    Feature {
        slug: "roles",
        label: "Roles",
        permission: "Roles Crud",
        group: FeatureGroup::Admin,
        summary: "Gestión de roles.",
    },
    Feature {
        slug: "permisos",
        label: "Permisos",
        permission: "Permisos",
        group: FeatureGroup::Admin,
        summary: "Gestión del catálogo de permisos.",
    },
    Feature {
        slug: "asignar-permisos",
        label: "Asignar Permisos a Rol",
        permission: "Asignar permisos a rol",
        group: FeatureGroup::Admin,
        summary: "Asignación de permisos a cada rol.",
    },
    Feature {
        slug: "asignar-roles",
        label: "Asignar Roles a Usuario",
        permission: "Asignar roles a usuario",
        group: FeatureGroup::Admin,
        summary: "Asignación de roles a cada usuario.",
    },
];

pub fn find(slug: &str) -> Option<&'static Feature> {
    FEATURES.iter().find(|f| f.slug == slug)
}

/// Features of `group` the store currently admits, in catalog order. Empty
/// while permissions are still loading.
pub fn visible(store: &PermissionStore, group: FeatureGroup) -> Vec<&'static Feature> {
    if store.is_loading() {
        return Vec::new();
    }
    FEATURES
        .iter()
        .filter(|f| f.group == group && store.has(f.permission))
        .collect()
}
