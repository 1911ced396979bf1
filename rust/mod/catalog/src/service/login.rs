use std::future::Future;
use std::sync::{Arc, Mutex};

use catalog_client::{DataService, Query, Table};
use catalog_flux::StateStore;
use catalog_session::SessionStore;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::captcha::Challenge;
use crate::model::{SessionUser, User};
use crate::state::{LoginPhase, LoginState};

/// Session key holding the logged-in user's JSON.
pub const SESSION_KEY: &str = "user";

pub const CHALLENGE_LENGTH: usize = 6;

const USER_COLUMNS: &str = "id, email, password, is_active, name, role";

/// Why a login attempt was rejected. `Display` is the message shown on the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFailure {
    #[error("Captcha is incorrect. Please try again.")]
    Captcha,

    /// Query failure or session write failure.
    #[error("Server error. Please try again.")]
    Server,

    #[error("User not found.")]
    NotFound,

    #[error("User is not active.")]
    Inactive,

    #[error("Incorrect password.")]
    IncorrectPassword,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(SessionUser),
    Failed(LoginFailure),
    /// The login screen was left before the lookup finished.
    Abandoned,
}

/// Login form: challenge, credential check, session write.
///
/// Checks run in a fixed order and the first failure wins: challenge,
/// lookup, existence, active flag, password.
pub struct LoginController {
    users: Table<User>,
    sessions: Arc<dyn SessionStore>,
    challenge: Mutex<Box<dyn Challenge>>,
    store: Arc<StateStore>,
    cancel: Mutex<CancellationToken>,
}

impl LoginController {
    pub fn new(
        service: Arc<dyn DataService>,
        sessions: Arc<dyn SessionStore>,
        challenge: Box<dyn Challenge>,
        store: Arc<StateStore>,
    ) -> Self {
        Self {
            users: Table::new(service, "users"),
            sessions,
            challenge: Mutex::new(challenge),
            store,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn state(&self) -> LoginState {
        self.store.get_as(LoginState::PATH).unwrap_or_default()
    }

    fn token(&self) -> CancellationToken {
        self.cancel.lock().unwrap().clone()
    }

    fn publish(&self, state: LoginState) {
        if self.token().is_cancelled() {
            debug!("login unmounted; state not published");
            return;
        }
        self.store.set(LoginState::PATH, state);
    }

    async fn guarded<F: Future>(&self, fut: F) -> Option<F::Output> {
        let token = self.token();
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            out = fut => Some(out),
        }
    }

    /// Show the form with a fresh challenge.
    pub fn mount(&self) {
        {
            let mut cancel = self.cancel.lock().unwrap();
            if cancel.is_cancelled() {
                *cancel = CancellationToken::new();
            }
        }
        let rendered = {
            let mut challenge = self.challenge.lock().unwrap();
            challenge.load(CHALLENGE_LENGTH);
            challenge.render()
        };
        self.publish(LoginState {
            challenge: rendered,
            ..LoginState::default()
        });
    }

    pub fn unmount(&self) {
        self.token().cancel();
    }

    /// Run one login attempt. On success the session holds the user;
    /// on failure the form is back to `Idle` with the reason in `error`.
    pub async fn submit(&self, email: &str, password: &str, captcha: &str) -> LoginOutcome {
        let challenge = self.state().challenge;
        self.publish(LoginState {
            phase: LoginPhase::Submitting,
            busy: true,
            error: None,
            challenge: challenge.clone(),
        });

        let Some(result) = self.authenticate(email, password, captcha).await else {
            return LoginOutcome::Abandoned;
        };
        match result {
            Ok(user) => {
                info!(user_id = user.id, "logged in");
                self.publish(LoginState {
                    phase: LoginPhase::Success,
                    busy: false,
                    error: None,
                    challenge,
                });
                LoginOutcome::Success(user)
            }
            Err(failure) => {
                debug!(%failure, "login rejected");
                // A rejected challenge may have been replaced.
                let challenge = self.challenge.lock().unwrap().render();
                self.publish(LoginState {
                    phase: LoginPhase::Idle,
                    busy: false,
                    error: Some(failure.to_string()),
                    challenge,
                });
                LoginOutcome::Failed(failure)
            }
        }
    }

    /// `None` when abandoned by unmount.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        captcha: &str,
    ) -> Option<Result<SessionUser, LoginFailure>> {
        let valid = self.challenge.lock().unwrap().validate(captcha);
        if !valid {
            return Some(Err(LoginFailure::Captcha));
        }

        let query = Query::select(USER_COLUMNS).eq("email", email).limit(1);
        let rows = match self.guarded(self.users.select(&query)).await? {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "user lookup failed");
                return Some(Err(LoginFailure::Server));
            }
        };
        let Some(user) = rows.into_iter().next() else {
            return Some(Err(LoginFailure::NotFound));
        };
        if !user.is_active {
            return Some(Err(LoginFailure::Inactive));
        }
        // Stored in plain text by the users table.
        if user.password != password {
            return Some(Err(LoginFailure::IncorrectPassword));
        }

        let session = SessionUser::from(&user);
        Some(self.write_session(&session).map(|()| session))
    }

    fn write_session(&self, session: &SessionUser) -> Result<(), LoginFailure> {
        let value = serde_json::to_string(session).map_err(|e| {
            warn!(error = %e, "session encode failed");
            LoginFailure::Server
        })?;
        self.sessions.set(SESSION_KEY, &value).map_err(|e| {
            warn!(error = %e, "session write failed");
            LoginFailure::Server
        })
    }

    /// Forget the logged-in user.
    pub fn logout(&self) {
        if let Err(e) = self.sessions.remove(SESSION_KEY) {
            warn!(error = %e, "session remove failed");
        }
        info!("logged out");
    }

    /// The user held in the session, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        let raw = self.sessions.get(SESSION_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::MemoryService;
    use catalog_session::{MemorySessionStore, SessionError};
    use serde_json::json;

    use crate::captcha::TextChallenge;

    const CODE: &str = "aB3xY9";

    fn controller(
        users: Vec<serde_json::Value>,
    ) -> (Arc<MemoryService>, Arc<MemorySessionStore>, LoginController) {
        let svc = Arc::new(MemoryService::new());
        svc.seed("users", users);
        let sessions = Arc::new(MemorySessionStore::new());
        let login = LoginController::new(
            svc.clone() as Arc<dyn DataService>,
            sessions.clone(),
            Box::new(TextChallenge::with_code(CODE)),
            Arc::new(StateStore::new()),
        );
        login.mount();
        (svc, sessions, login)
    }

    fn ana(password: &str, active: bool) -> serde_json::Value {
        json!({
            "id": 7, "email": "a@b.com", "password": password,
            "is_active": active, "name": "Ana", "role": "admin"
        })
    }

    #[tokio::test]
    async fn mount_publishes_challenge() {
        let (_, _, login) = controller(vec![]);
        let s = login.state();
        assert_eq!(s.phase, LoginPhase::Idle);
        assert_eq!(s.challenge, "a B 3 x Y 9");
        assert_eq!(s.submit_label(), "Login");
    }

    #[tokio::test]
    async fn valid_credentials_write_session() {
        let (_, sessions, login) = controller(vec![ana("pw1", true)]);

        let outcome = login.submit("a@b.com", "pw1", CODE).await;

        let expected = SessionUser {
            id: 7,
            email: "a@b.com".into(),
            name: Some("Ana".into()),
            role: Some("admin".into()),
        };
        assert_eq!(outcome, LoginOutcome::Success(expected.clone()));
        let stored = sessions.get(SESSION_KEY).unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&stored).unwrap(),
            json!({"id": 7, "email": "a@b.com", "name": "Ana", "role": "admin"})
        );
        assert_eq!(login.current_user(), Some(expected));
        assert_eq!(login.state().phase, LoginPhase::Success);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_without_session() {
        let (_, sessions, login) = controller(vec![ana("pw2", true)]);

        let outcome = login.submit("a@b.com", "pw1", CODE).await;

        assert_eq!(outcome, LoginOutcome::Failed(LoginFailure::IncorrectPassword));
        let s = login.state();
        assert_eq!(s.phase, LoginPhase::Idle);
        assert!(!s.busy);
        assert_eq!(s.error.as_deref(), Some("Incorrect password."));
        assert_eq!(sessions.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let (_, sessions, login) = controller(vec![ana("pw1", true)]);
        let outcome = login.submit("A@b.com", "pw1", CODE).await;
        assert_eq!(outcome, LoginOutcome::Failed(LoginFailure::NotFound));
        assert_eq!(login.state().error.as_deref(), Some("User not found."));
        assert_eq!(sessions.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn inactive_user_checked_before_password() {
        let (_, _, login) = controller(vec![ana("pw1", false)]);
        let outcome = login.submit("a@b.com", "wrong", CODE).await;
        assert_eq!(outcome, LoginOutcome::Failed(LoginFailure::Inactive));
        assert_eq!(login.state().error.as_deref(), Some("User is not active."));
    }

    /// Hands out `codes` in turn, one per load.
    struct Rotating {
        codes: Vec<&'static str>,
        loads: usize,
    }

    impl Challenge for Rotating {
        fn load(&mut self, _: usize) {
            self.loads += 1;
        }

        fn render(&self) -> String {
            self.current().to_string()
        }

        fn validate(&mut self, input: &str) -> bool {
            if input == self.current() {
                return true;
            }
            self.load(CHALLENGE_LENGTH);
            false
        }
    }

    impl Rotating {
        fn current(&self) -> &'static str {
            self.codes[(self.loads.max(1) - 1) % self.codes.len()]
        }
    }

    #[tokio::test]
    async fn captcha_checked_first_and_replaced_on_mismatch() {
        let svc = Arc::new(MemoryService::new());
        svc.seed("users", vec![ana("pw1", true)]);
        svc.fail_with("down");
        let sessions = Arc::new(MemorySessionStore::new());
        let login = LoginController::new(
            svc.clone() as Arc<dyn DataService>,
            sessions.clone(),
            Box::new(Rotating { codes: vec!["first", "second"], loads: 0 }),
            Arc::new(StateStore::new()),
        );
        login.mount();
        assert_eq!(login.state().challenge, "first");

        let outcome = login.submit("a@b.com", "pw1", "FIRST").await;

        assert_eq!(outcome, LoginOutcome::Failed(LoginFailure::Captcha));
        let s = login.state();
        assert_eq!(s.error.as_deref(), Some("Captcha is incorrect. Please try again."));
        assert_eq!(s.challenge, "second");
        assert_eq!(sessions.get(SESSION_KEY).unwrap(), None);

        // The old code no longer passes; the new one reaches the lookup.
        assert_eq!(
            login.submit("a@b.com", "pw1", "first").await,
            LoginOutcome::Failed(LoginFailure::Captcha)
        );
        svc.clear_failure();
        let code = login.state().challenge;
        assert!(matches!(
            login.submit("a@b.com", "pw1", &code).await,
            LoginOutcome::Success(_)
        ));
    }

    #[tokio::test]
    async fn service_error_is_generic() {
        let (svc, _, login) = controller(vec![ana("pw1", true)]);
        svc.fail_with("relation \"users\" does not exist");
        let outcome = login.submit("a@b.com", "pw1", CODE).await;
        assert_eq!(outcome, LoginOutcome::Failed(LoginFailure::Server));
        assert_eq!(login.state().error.as_deref(), Some("Server error. Please try again."));
    }

    #[tokio::test]
    async fn session_write_failure_is_a_server_error() {
        struct ReadOnly;
        impl SessionStore for ReadOnly {
            fn get(&self, _: &str) -> Result<Option<String>, SessionError> {
                Ok(None)
            }
            fn set(&self, _: &str, _: &str) -> Result<(), SessionError> {
                Err(SessionError::Storage("read-only".into()))
            }
            fn remove(&self, _: &str) -> Result<(), SessionError> {
                Ok(())
            }
        }

        let svc = Arc::new(MemoryService::new());
        svc.seed("users", vec![ana("pw1", true)]);
        let login = LoginController::new(
            svc,
            Arc::new(ReadOnly),
            Box::new(TextChallenge::with_code(CODE)),
            Arc::new(StateStore::new()),
        );
        login.mount();

        let outcome = login.submit("a@b.com", "pw1", CODE).await;
        assert_eq!(outcome, LoginOutcome::Failed(LoginFailure::Server));
        assert_eq!(login.state().phase, LoginPhase::Idle);
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let (_, sessions, login) = controller(vec![ana("pw1", true)]);
        login.submit("a@b.com", "pw1", CODE).await;
        login.logout();
        assert_eq!(sessions.get(SESSION_KEY).unwrap(), None);
        assert_eq!(login.current_user(), None);
    }
}
