//! Home feature reducer.
//!
//! Drives the `Authenticating -> Ready` lifecycle: session check, then
//! self-lookup, then ad-hoc searches until logout.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{HomePhase, HomeState};
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, GeoUiEvent};
use crate::mutations::{RouteRequest, StateMutation};

pub const INVALID_INPUT_MESSAGE: &str = "Please enter a valid IP address";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to continue";
pub const LOGOUT_FAILED_MESSAGE: &str = "Failed to log out";

/// Effects to run when the home route is entered.
pub fn mount(seq: &mut TaskSeq) -> Vec<UiEffect> {
    vec![UiEffect::CheckSession {
        task: seq.next_id(),
    }]
}

/// Handles a key while the home route is active and no overlay is open.
pub fn handle_key(
    state: &mut HomeState,
    tasks: &Tasks,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('l') {
        if tasks.state(TaskKind::SignOut).is_running() {
            return (vec![], vec![]);
        }
        return (
            vec![UiEffect::SignOut {
                task: seq.next_id(),
            }],
            vec![],
        );
    }

    if !state.is_ready() {
        return (vec![], vec![]);
    }

    match key.code {
        KeyCode::Enter => submit_search(state, tasks, seq),
        KeyCode::Esc => {
            state.clear_search();
            (vec![], vec![])
        }
        _ => {
            state.search.input(key);
            (vec![], vec![])
        }
    }
}

/// Handles pasted text into the search box.
pub fn handle_paste(state: &mut HomeState, text: &str) {
    if state.is_ready() {
        state.search.insert_str(text.trim());
    }
}

fn submit_search(
    state: &HomeState,
    tasks: &Tasks,
    seq: &mut TaskSeq,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    let ip = state.search.text().trim();
    if ip.is_empty() {
        return (
            vec![],
            vec![StateMutation::alert("Invalid Input", INVALID_INPUT_MESSAGE)],
        );
    }
    if tasks.state(TaskKind::Search).is_running() {
        return (vec![], vec![]);
    }

    (
        vec![UiEffect::LookupIp {
            task: seq.next_id(),
            ip: ip.to_string(),
        }],
        vec![],
    )
}

/// Applies a session check or sign-out result.
pub fn handle_auth_event(
    state: &mut HomeState,
    seq: &mut TaskSeq,
    event: AuthUiEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        AuthUiEvent::SessionChecked(Ok(Some(session))) => {
            state.session = Some(session);
            (
                vec![UiEffect::LookupSelf {
                    task: seq.next_id(),
                }],
                vec![],
            )
        }
        AuthUiEvent::SessionChecked(Ok(None)) => (
            vec![],
            vec![
                StateMutation::alert("Authentication Error", LOGIN_REQUIRED_MESSAGE),
                StateMutation::Navigate(RouteRequest::Login),
            ],
        ),
        AuthUiEvent::SessionChecked(Err(message)) => (
            vec![],
            vec![
                StateMutation::alert("Error", format!("Authentication check failed: {message}")),
                StateMutation::Navigate(RouteRequest::Login),
            ],
        ),
        AuthUiEvent::SignedOut(Ok(())) => {
            (vec![], vec![StateMutation::Navigate(RouteRequest::Login)])
        }
        AuthUiEvent::SignedOut(Err(_)) => (
            vec![],
            vec![StateMutation::alert("Error", LOGOUT_FAILED_MESSAGE)],
        ),
        AuthUiEvent::SignedIn(_) | AuthUiEvent::SignedUp(_) => (vec![], vec![]),
    }
}

/// Applies a lookup result.
///
/// A self-lookup fills both slots and schedules the log append. A search
/// only replaces `display`.
pub fn handle_geo_event(
    state: &mut HomeState,
    event: GeoUiEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        GeoUiEvent::SelfLoaded(Ok(record)) => {
            state.phase = HomePhase::Ready;
            state.display = Some(record.clone());
            state.self_record = Some(record.clone());

            let effects = match &state.session {
                Some(session) => vec![UiEffect::AppendLog {
                    session: session.clone(),
                    record,
                }],
                None => vec![],
            };
            (effects, vec![])
        }
        GeoUiEvent::SelfLoaded(Err(message)) => {
            state.phase = HomePhase::Ready;
            (vec![], vec![StateMutation::alert("Error", message)])
        }
        GeoUiEvent::SearchLoaded(Ok(record)) => {
            state.display = Some(record);
            (vec![], vec![])
        }
        GeoUiEvent::SearchLoaded(Err(message)) => {
            (vec![], vec![StateMutation::alert("Error", message)])
        }
    }
}
