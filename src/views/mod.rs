//! Page-level coordination, independent of how pages are drawn.
//!
//! Each view decides whether it needs the network or can answer from the
//! catalog store, and exposes a render state that the GUI and CLI both consume.

mod details;
mod home;
mod search;

pub use details::{DetailsState, DetailsView};
pub use home::{HOME_ERROR_TEXT, HomeState, HomeView, ShowRow};
pub use search::{SearchState, SearchView};
