//! egui panels for the Page Assistant popup.
//!
//! Panels read `UiState` and return `UiAction`s; they never call the
//! controller directly.

pub mod panels;
pub mod state;
pub mod theme;
