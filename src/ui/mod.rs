//! UI modules, one per page plus shared components

mod components;
mod details_page;
mod home_page;
mod search_page;
pub mod theme;

pub use components::{render_about_dialog, render_tab};
pub use details_page::render_details_page;
pub use home_page::render_home_page;
pub use search_page::render_search_page;
