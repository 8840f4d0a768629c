//! Login feature reducer.
//!
//! Handles form editing, submission, and identity results.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ipgeo_core::auth::SignUpOutcome;

use super::state::{LoginFocus, LoginState};
use crate::common::TaskSeq;
use crate::effects::UiEffect;
use crate::events::AuthUiEvent;
use crate::mutations::{RouteRequest, StateMutation};

pub const VERIFY_EMAIL_MESSAGE: &str = "Please check your inbox for email verification!";

/// Handles a key while the login route is active and no overlay is open.
///
/// `busy` is true while a sign-in or sign-up request is in flight; both
/// buttons are disabled then.
pub fn handle_key(
    state: &mut LoginState,
    busy: bool,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> Vec<UiEffect> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Tab if !shift => {
            state.focus = state.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Tab => {
            state.focus = state.focus.prev();
            vec![]
        }
        KeyCode::Down => {
            state.focus = state.focus.next();
            vec![]
        }
        KeyCode::Up => {
            state.focus = state.focus.prev();
            vec![]
        }
        KeyCode::Left | KeyCode::Right if !state.focus.is_field() => {
            state.focus = if state.focus == LoginFocus::SignIn {
                LoginFocus::SignUp
            } else {
                LoginFocus::SignIn
            };
            vec![]
        }
        KeyCode::Enter => match state.focus {
            LoginFocus::Email => {
                state.focus = LoginFocus::Password;
                vec![]
            }
            LoginFocus::Password | LoginFocus::SignIn => submit(state, busy, seq, false),
            LoginFocus::SignUp => submit(state, busy, seq, true),
        },
        _ => {
            if let Some(field) = state.focused_field_mut() {
                field.input(key);
            }
            vec![]
        }
    }
}

/// Handles pasted text into the focused field.
pub fn handle_paste(state: &mut LoginState, text: &str) {
    if let Some(field) = state.focused_field_mut() {
        field.insert_str(text.trim());
    }
}

fn submit(state: &LoginState, busy: bool, seq: &mut TaskSeq, sign_up: bool) -> Vec<UiEffect> {
    if busy {
        return vec![];
    }

    let task = seq.next_id();
    let email = state.email.text().trim().to_string();
    let password = state.password.text().to_string();
    if sign_up {
        vec![UiEffect::SignUp {
            task,
            email,
            password,
        }]
    } else {
        vec![UiEffect::SignIn {
            task,
            email,
            password,
        }]
    }
}

/// Applies a sign-in or sign-up result.
pub fn handle_auth_event(state: &mut LoginState, event: AuthUiEvent) -> Vec<StateMutation> {
    match event {
        AuthUiEvent::SignedIn(Ok(_)) | AuthUiEvent::SignedUp(Ok(SignUpOutcome::SignedIn(_))) => {
            state.password.clear();
            vec![StateMutation::Navigate(RouteRequest::Home)]
        }
        AuthUiEvent::SignedIn(Err(message)) => {
            vec![StateMutation::alert("Login Failed", message)]
        }
        AuthUiEvent::SignedUp(Ok(SignUpOutcome::PendingVerification)) => {
            vec![StateMutation::alert("Verify Your Email", VERIFY_EMAIL_MESSAGE)]
        }
        AuthUiEvent::SignedUp(Err(message)) => {
            vec![StateMutation::alert("Sign-Up Failed", message)]
        }
        AuthUiEvent::SessionChecked(_) | AuthUiEvent::SignedOut(_) => vec![],
    }
}
