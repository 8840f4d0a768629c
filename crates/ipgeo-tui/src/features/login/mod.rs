//! Login feature slice: email/password form with sign-in and sign-up.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginFocus, LoginState};
pub use update::{VERIFY_EMAIL_MESSAGE, handle_auth_event, handle_key, handle_paste};
