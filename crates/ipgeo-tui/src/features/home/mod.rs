//! Home feature slice: own-address view, ad-hoc search, logout.

mod render;
mod state;
mod update;

pub use render::render_home;
pub use state::{HomePhase, HomeState};
pub use update::{handle_auth_event, handle_geo_event, handle_key, handle_paste, mount};
