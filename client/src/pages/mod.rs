//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates guarding and
//! navigation chrome to `components`.

pub mod feature;
pub mod login;
pub mod profile;
pub mod register;
