//! egui rendering. Everything here reads [`crate::state::AppState`] and
//! forwards button clicks to its command methods; no logic lives here.

pub mod panels;
pub mod plot;
