//! Client-side session state: the access token and the signed-in identity.
//!
//! There is no ambient store. One [`SessionContext`] is created at startup,
//! initialized from localStorage, and handed explicitly to every page and to
//! the API client. Logout (or a 401) goes through [`SessionContext::clear`],
//! which wipes both the signals and the persisted copy.

use leptos::{create_rw_signal, RwSignal, SignalGet, SignalSet};

use crate::{api::types::SessionUser, utils::storage};

const TOKEN_KEY: &str = "access_token";
const USER_KEY: &str = "session_user";

#[derive(Clone, Copy)]
pub struct SessionContext {
    token: RwSignal<Option<String>>,
    user: RwSignal<Option<SessionUser>>,
}

impl SessionContext {
    /// Starts a session from whatever the last visit persisted.
    pub fn init_from_storage() -> Self {
        let (token, user) = read_persisted();
        Self {
            token: create_rw_signal(token),
            user: create_rw_signal(user),
        }
    }

    /// Adopts a freshly issued access token and identity, persisting both.
    pub fn establish(&self, token: &str, user: &SessionUser) {
        self.token.set(Some(token.to_string()));
        self.user.set(Some(user.clone()));

        if let Ok(store) = storage::local_storage() {
            let _ = store.set_item(TOKEN_KEY, token);
            if let Ok(json) = serde_json::to_string(user) {
                let _ = store.set_item(USER_KEY, &json);
            }
        }
    }

    /// Drops the session everywhere: signals and localStorage.
    pub fn clear(&self) {
        self.token.set(None);
        self.user.set(None);

        if let Ok(store) = storage::local_storage() {
            let _ = store.remove_item(TOKEN_KEY);
            let _ = store.remove_item(USER_KEY);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.user.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .get()
            .map(|user| user.is_admin())
            .unwrap_or(false)
    }
}

fn read_persisted() -> (Option<String>, Option<SessionUser>) {
    let Ok(store) = storage::local_storage() else {
        return (None, None);
    };
    let token = store.get_item(TOKEN_KEY).ok().flatten();
    let user = store
        .get_item(USER_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok());
    (token, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn fresh_session_is_unauthenticated() {
        with_runtime(|| {
            let session = SessionContext::init_from_storage();
            assert!(!session.is_authenticated());
            assert!(!session.is_admin());
            assert!(session.user().is_none());
        });
    }

    #[test]
    fn establish_and_clear_roundtrip() {
        with_runtime(|| {
            let session = SessionContext::init_from_storage();
            session.establish(
                "token-123",
                &SessionUser {
                    id: "u1".into(),
                    role: "admin".into(),
                },
            );
            assert!(session.is_authenticated());
            assert!(session.is_admin());
            assert_eq!(session.token().as_deref(), Some("token-123"));

            session.clear();
            assert!(!session.is_authenticated());
            assert!(session.user().is_none());
        });
    }
}
