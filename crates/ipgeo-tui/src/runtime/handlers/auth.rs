use ipgeo_core::auth::AuthClient;

use crate::events::{AuthUiEvent, UiEvent};

/// Signs in with email and password.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn sign_in(auth: AuthClient, email: String, password: String) -> UiEvent {
    let result = auth.sign_in(&email, &password).await.map_err(|e| {
        tracing::info!(error = %e, "sign-in failed");
        e.to_string()
    });
    UiEvent::Auth(AuthUiEvent::SignedIn(result))
}

/// Registers a new account.
pub async fn sign_up(auth: AuthClient, email: String, password: String) -> UiEvent {
    let result = auth.sign_up(&email, &password).await.map_err(|e| {
        tracing::info!(error = %e, "sign-up failed");
        e.to_string()
    });
    UiEvent::Auth(AuthUiEvent::SignedUp(result))
}

/// Loads the cached session and verifies it with the identity service.
pub async fn check_session(auth: AuthClient) -> UiEvent {
    let result = auth.get_session().await.map_err(|e| {
        tracing::warn!(error = %e, "session check failed");
        e.to_string()
    });
    UiEvent::Auth(AuthUiEvent::SessionChecked(result))
}

/// Ends the session remotely and clears the local cache.
pub async fn sign_out(auth: AuthClient) -> UiEvent {
    let result = auth.sign_out().await.map_err(|e| {
        tracing::warn!(error = %e, "sign-out failed");
        e.to_string()
    });
    UiEvent::Auth(AuthUiEvent::SignedOut(result))
}
