//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (local storage, token
//! decoding, session transitions) and pure validation from page logic.

pub mod auth;
pub mod ci;
pub mod token;
