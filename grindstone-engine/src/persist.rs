//! Profile persistence through a pluggable string key-value store.
//!
//! The profile is written as one JSON blob under [`STATE_KEY`]; the user
//! name is mirrored to [`USER_NAME_KEY`] so it survives a corrupt or
//! cleared blob. Loading is fail-soft: anything unreadable falls back to
//! a fresh profile rather than surfacing an error to the caller.

use log::warn;

use crate::StateStore;
use crate::constants::{DEFAULT_USER_NAME, STATE_KEY, USER_NAME_KEY};
use crate::state::UserState;

/// Load and validate the stored profile, if any.
///
/// # Errors
///
/// Returns an error when the store cannot be read or the blob is not
/// valid profile JSON. A missing blob is `Ok(None)`, not an error.
pub fn try_load<S>(store: &S) -> Result<Option<UserState>, anyhow::Error>
where
    S: StateStore,
    S::Error: Into<anyhow::Error>,
{
    let Some(raw) = store.get(STATE_KEY).map_err(Into::into)? else {
        return Ok(None);
    };
    let mut state: UserState = serde_json::from_str(&raw)?;
    state.normalize();
    Ok(Some(state))
}

/// Load the profile, falling back to a fresh one on any failure.
///
/// On a true first run (no blob and no remembered name) the
/// `prompt_user_name` closure is asked once; its answer is trimmed and
/// remembered. A corrupt blob never triggers the prompt.
pub fn load_or_default<S, F>(store: &S, prompt_user_name: F) -> UserState
where
    S: StateStore,
    S::Error: Into<anyhow::Error>,
    F: FnOnce() -> Option<String>,
{
    match try_load(store) {
        Ok(Some(state)) => state,
        Ok(None) => {
            let name = stored_user_name(store).unwrap_or_else(|| {
                let name = prompt_user_name()
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
                if let Err(err) = store.set(USER_NAME_KEY, &name) {
                    warn!("failed to remember user name: {err}");
                }
                name
            });
            UserState::for_user(name)
        }
        Err(err) => {
            warn!("failed to load saved profile, starting fresh: {err}");
            let name =
                stored_user_name(store).unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
            UserState::for_user(name)
        }
    }
}

/// Persist the profile. Failures are logged, never surfaced.
pub fn save<S: StateStore>(store: &S, state: &UserState) {
    match serde_json::to_string(state) {
        Ok(raw) => {
            if let Err(err) = store.set(STATE_KEY, &raw) {
                warn!("failed to persist profile: {err}");
            }
        }
        Err(err) => warn!("failed to serialize profile: {err}"),
    }
    if !state.user_name.is_empty() {
        if let Err(err) = store.set(USER_NAME_KEY, &state.user_name) {
            warn!("failed to persist user name: {err}");
        }
    }
}

/// Overwrite the save with a fresh profile, keeping the remembered name.
pub fn reset<S: StateStore>(store: &S) -> UserState {
    let name = stored_user_name(store).unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
    let state = UserState::for_user(name);
    save(store, &state);
    state
}

fn stored_user_name<S: StateStore>(store: &S) -> Option<String> {
    match store.get(USER_NAME_KEY) {
        Ok(name) => name.map(|name| name.trim().to_string()).filter(|name| !name.is_empty()),
        Err(err) => {
            warn!("failed to read remembered user name: {err}");
            None
        }
    }
}
