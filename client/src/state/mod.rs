//! Shared client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` constructs one `RwSignal` per state type and provides it to the
//! tree. Nothing here is a process global; every app instance owns its own
//! session and permission state.

pub mod auth;
pub mod features;
pub mod permissions;
