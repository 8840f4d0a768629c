//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskStarted;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{home, login};
use crate::mutations::{RouteRequest, StateMutation};
use crate::overlays::{self, Overlay};
use crate::state::{AppState, Route, TuiState};

/// Effects for the initial route.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    let effects = match app.tui.route {
        Route::Home(_) => home::mount(&mut app.tui.task_seq),
        Route::Login(_) => vec![],
    };
    mark_started(&mut app.tui, &effects);
    effects
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute. Every task an effect spawns counts as running
/// from this point, so a second key press handled before the runtime's
/// `TaskStarted` arrives already sees it.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = reduce(app, event);
    mark_started(&mut app.tui, &effects);
    effects
}

fn mark_started(tui: &mut TuiState, effects: &[UiEffect]) {
    for (kind, id) in effects.iter().filter_map(UiEffect::task) {
        tui.tasks.state_mut(kind).on_started(&TaskStarted { id });
    }
}

fn reduce(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            app.tui.tasks.state_mut(kind).finish(completed.id);
            reduce(app, *completed.result)
        }
        UiEvent::Auth(event) => {
            let tui = &mut app.tui;
            let (effects, mutations) = match &mut tui.route {
                Route::Login(state) => (vec![], login::handle_auth_event(state, event)),
                Route::Home(state) => home::handle_auth_event(state, &mut tui.task_seq, event),
            };
            let mut effects = effects;
            effects.extend(apply_mutations(app, mutations));
            effects
        }
        UiEvent::Geo(event) => {
            let Route::Home(state) = &mut app.tui.route else {
                tracing::debug!(?event, "dropping lookup result outside home");
                return vec![];
            };
            let (mut effects, mutations) = home::handle_geo_event(state, event);
            effects.extend(apply_mutations(app, mutations));
            effects
        }
    }
}

/// Applies cross-slice mutations in order. Entering home returns its mount
/// effects.
fn apply_mutations(app: &mut AppState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Navigate(request) => {
                tracing::debug!(?request, "navigating");
                app.tui.route = Route::from_request(request);
                if request == RouteRequest::Home {
                    effects.extend(home::mount(&mut app.tui.task_seq));
                }
            }
            StateMutation::ShowAlert(alert) => {
                app.overlay = Some(Overlay::Alert(alert));
            }
        }
    }
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) if app.overlay.is_none() => {
            handle_paste(&mut app.tui, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.tui.should_quit = true;
        return vec![UiEffect::Quit];
    }

    if overlays::handle_overlay_key(&mut app.overlay, key) {
        return vec![];
    }

    let tui = &mut app.tui;
    let (effects, mutations) = match &mut tui.route {
        Route::Login(state) => {
            let busy = tui.tasks.is_auth_running();
            (
                login::handle_key(state, busy, &mut tui.task_seq, key),
                vec![],
            )
        }
        Route::Home(state) => home::handle_key(state, &tui.tasks, &mut tui.task_seq, key),
    };
    let mut effects = effects;
    effects.extend(apply_mutations(app, mutations));
    effects
}

fn handle_paste(tui: &mut TuiState, text: &str) {
    match &mut tui.route {
        Route::Login(state) => login::handle_paste(state, text),
        Route::Home(state) => home::handle_paste(state, text),
    }
}

#[cfg(test)]
mod tests {
    use ipgeo_core::auth::{Session, SignUpOutcome, User};
    use ipgeo_core::geo::GeoRecord;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
    use crate::events::{AuthUiEvent, GeoUiEvent};
    use crate::overlays::AlertState;

    fn session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX,
            user: User {
                id: "user-1".to_string(),
                email: Some("a@b.co".to_string()),
            },
        }
    }

    fn record(ip: &str, country: &str) -> GeoRecord {
        GeoRecord {
            ip: ip.to_string(),
            country: Some(country.to_string()),
            ..GeoRecord::default()
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(app, key(KeyCode::Char(ch)));
        }
    }

    /// Mirrors what the runtime does around a spawned effect.
    fn run_task(app: &mut AppState, kind: TaskKind, id: TaskId, result: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted { id },
            },
        );
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            },
        )
    }

    fn display_rows(app: &AppState) -> Vec<(&'static str, String)> {
        app.tui
            .home()
            .and_then(|home| home.display.as_ref())
            .map(|record| {
                record
                    .sections()
                    .into_iter()
                    .flat_map(|section| section.rows)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Signs in and completes the home mount sequence with `self_record`.
    fn signed_in_home(self_record: GeoRecord) -> AppState {
        let mut app = AppState::new(RouteRequest::Home);
        let effects = start(&mut app);
        let [UiEffect::CheckSession { task }] = effects.as_slice() else {
            panic!("expected session check, got {effects:?}");
        };
        let effects = run_task(
            &mut app,
            TaskKind::SessionCheck,
            *task,
            UiEvent::Auth(AuthUiEvent::SessionChecked(Ok(Some(session())))),
        );
        let [UiEffect::LookupSelf { task }] = effects.as_slice() else {
            panic!("expected self lookup, got {effects:?}");
        };
        run_task(
            &mut app,
            TaskKind::SelfLookup,
            *task,
            UiEvent::Geo(GeoUiEvent::SelfLoaded(Ok(self_record))),
        );
        app
    }

    #[test]
    fn test_sign_in_navigates_home_and_mounts() {
        let mut app = AppState::new(RouteRequest::Login);
        assert!(start(&mut app).is_empty());

        type_text(&mut app, "a@b.co");
        update(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "secret");
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::SignIn { task, .. }] = effects.as_slice() else {
            panic!("expected sign in, got {effects:?}");
        };

        let effects = run_task(
            &mut app,
            TaskKind::SignIn,
            *task,
            UiEvent::Auth(AuthUiEvent::SignedIn(Ok(session()))),
        );
        assert!(app.tui.route.is_home());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CheckSession { .. }]
        ));
        assert!(!app.tui.tasks.is_auth_running());
    }

    #[test]
    fn test_sign_up_pending_shows_alert_and_stays() {
        let mut app = AppState::new(RouteRequest::Login);
        let effects = run_task(
            &mut app,
            TaskKind::SignUp,
            TaskId(0),
            UiEvent::Auth(AuthUiEvent::SignedUp(Ok(SignUpOutcome::PendingVerification))),
        );
        assert!(effects.is_empty());
        assert!(app.tui.login().is_some());
        assert_eq!(
            app.overlay,
            Some(Overlay::Alert(AlertState::new(
                "Verify Your Email",
                login::VERIFY_EMAIL_MESSAGE
            )))
        );
    }

    #[test]
    fn test_lookup_scenario_search_then_clear_restores_self() {
        let mut app = signed_in_home(record("8.8.8.8", "US"));
        let rows = display_rows(&app);
        assert!(rows.contains(&("IP Address", "8.8.8.8".to_string())));
        assert!(rows.contains(&("Country", "US".to_string())));

        type_text(&mut app, "1.1.1.1");
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::LookupIp { task, ip }] = effects.as_slice() else {
            panic!("expected lookup, got {effects:?}");
        };
        assert_eq!(ip, "1.1.1.1");
        let effects = run_task(
            &mut app,
            TaskKind::Search,
            *task,
            UiEvent::Geo(GeoUiEvent::SearchLoaded(Ok(record("1.1.1.1", "AU")))),
        );
        assert!(effects.is_empty(), "searches are never persisted");
        assert!(display_rows(&app).contains(&("Country", "AU".to_string())));

        update(&mut app, key(KeyCode::Esc));
        let rows = display_rows(&app);
        assert!(rows.contains(&("IP Address", "8.8.8.8".to_string())));
        assert!(rows.contains(&("Country", "US".to_string())));

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty(), "blank search must not issue a request");
        assert!(matches!(app.overlay, Some(Overlay::Alert(_))));
        assert_eq!(display_rows(&app), rows);
    }

    #[test]
    fn test_alert_captures_keys_until_dismissed() {
        let mut app = signed_in_home(record("8.8.8.8", "US"));
        update(&mut app, key(KeyCode::Enter));
        assert!(app.overlay.is_some());

        type_text(&mut app, "9");
        assert!(app.tui.home().is_some_and(|home| home.search.is_empty()));

        update(&mut app, key(KeyCode::Enter));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_store_failure_has_no_visible_effect() {
        // The append runs detached and reports nothing back; the only trace
        // of a self-lookup is the AppendLog effect itself.
        let mut app = AppState::new(RouteRequest::Home);
        start(&mut app);
        run_task(
            &mut app,
            TaskKind::SessionCheck,
            TaskId(0),
            UiEvent::Auth(AuthUiEvent::SessionChecked(Ok(Some(session())))),
        );
        let effects = run_task(
            &mut app,
            TaskKind::SelfLookup,
            TaskId(1),
            UiEvent::Geo(GeoUiEvent::SelfLoaded(Ok(record("8.8.8.8", "US")))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::AppendLog { .. }]));
        assert!(app.overlay.is_none());
        assert!(!app.tui.tasks.is_any_running());
    }

    #[test]
    fn test_missing_session_redirects_to_login() {
        let mut app = AppState::new(RouteRequest::Home);
        start(&mut app);
        let effects = run_task(
            &mut app,
            TaskKind::SessionCheck,
            TaskId(0),
            UiEvent::Auth(AuthUiEvent::SessionChecked(Ok(None))),
        );
        assert!(effects.is_empty());
        assert!(app.tui.login().is_some());
        assert!(matches!(app.overlay, Some(Overlay::Alert(_))));
    }

    #[test]
    fn test_sign_out_discards_home_state() {
        let mut app = signed_in_home(record("8.8.8.8", "US"));
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('l'),
                KeyModifiers::CONTROL,
            ))),
        );
        let [UiEffect::SignOut { task }] = effects.as_slice() else {
            panic!("expected sign out, got {effects:?}");
        };
        run_task(
            &mut app,
            TaskKind::SignOut,
            *task,
            UiEvent::Auth(AuthUiEvent::SignedOut(Ok(()))),
        );
        assert!(app.tui.login().is_some());
        assert!(app.tui.home().is_none());
    }

    #[test]
    fn test_lookup_result_after_leaving_home_is_dropped() {
        let mut app = AppState::new(RouteRequest::Login);
        let effects = run_task(
            &mut app,
            TaskKind::Search,
            TaskId(3),
            UiEvent::Geo(GeoUiEvent::SearchLoaded(Ok(record("1.1.1.1", "AU")))),
        );
        assert!(effects.is_empty());
        assert!(app.tui.login().is_some());
        assert!(!app.tui.tasks.is_any_running());
    }

    #[test]
    fn test_ctrl_c_quits_even_with_alert_open() {
        let mut app = AppState::new(RouteRequest::Login);
        app.overlay = Some(Overlay::Alert(AlertState::new("Error", "boom")));
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert_eq!(effects, vec![UiEffect::Quit]);
        assert!(app.tui.should_quit);
    }

    #[test]
    fn test_second_enter_before_task_started_is_ignored() {
        let mut app = signed_in_home(record("8.8.8.8", "US"));
        type_text(&mut app, "1.1.1.1");

        // Both key presses land in one batch, before the runtime reports
        // TaskStarted for the first lookup.
        let first = update(&mut app, key(KeyCode::Enter));
        let second = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::LookupIp { task, .. }] = first.as_slice() else {
            panic!("expected lookup, got {first:?}");
        };
        assert!(second.is_empty(), "duplicate lookup issued: {second:?}");
        assert!(app.tui.tasks.state(TaskKind::Search).is_running());

        run_task(
            &mut app,
            TaskKind::Search,
            *task,
            UiEvent::Geo(GeoUiEvent::SearchLoaded(Ok(record("1.1.1.1", "AU")))),
        );
        let again = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(again.as_slice(), [UiEffect::LookupIp { .. }]));
    }

    #[test]
    fn test_second_sign_in_before_task_started_is_ignored() {
        let mut app = AppState::new(RouteRequest::Login);
        type_text(&mut app, "a@b.co");
        update(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "secret");

        let first = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(first.as_slice(), [UiEffect::SignIn { .. }]));
        assert!(app.tui.tasks.is_auth_running());

        let second = update(&mut app, key(KeyCode::Enter));
        assert!(second.is_empty(), "duplicate sign-in issued: {second:?}");
    }

    /// Known gap: searches are not sequenced, so a search that completes
    /// after the user cleared the box still replaces the display.
    #[test]
    fn test_known_gap_late_search_after_clear_wins() {
        let mut app = signed_in_home(record("8.8.8.8", "US"));
        type_text(&mut app, "1.1.1.1");
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::LookupIp { task, .. }] = effects.as_slice() else {
            panic!("expected lookup, got {effects:?}");
        };
        let task = *task;
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Search,
                started: TaskStarted { id: task },
            },
        );

        update(&mut app, key(KeyCode::Esc));
        assert!(display_rows(&app).contains(&("Country", "US".to_string())));

        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Search,
                completed: TaskCompleted {
                    id: task,
                    result: Box::new(UiEvent::Geo(GeoUiEvent::SearchLoaded(Ok(record(
                        "1.1.1.1", "AU",
                    ))))),
                },
            },
        );
        assert!(display_rows(&app).contains(&("Country", "AU".to_string())));
    }
}
