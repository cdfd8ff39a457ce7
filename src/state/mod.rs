//! Application state modules
//!
//! Page state lives in the views; this holds what only the window needs.

mod ui;

pub use ui::{Tab, UiState};
