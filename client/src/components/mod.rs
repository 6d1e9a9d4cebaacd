//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared session and permission state from Leptos context
//! providers; pages compose them.

pub mod guards;
pub mod nav_bar;
