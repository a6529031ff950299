//! Session bootstrap: who is logged in.

use bux_api::{ApiError, LoginRequest, WalletBackend};
use bux_types::LoggedInUser;

use crate::notification::Notice;

pub const SUPPORT_SUFFIX: &str =
    ". If you can't log in again, please contact our support or try again later!";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong... Please, try again later!";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Not checked yet.
    #[default]
    Unknown,
    LoggedIn(LoggedInUser),
    /// No valid session; the front-end should show the login screen.
    LoggedOut,
    /// The check itself failed; show the notice.
    Failed(Notice),
}

impl SessionState {
    /// Classify a failed `GET /user`.
    ///
    /// 401 and 400 mean "not logged in" and are not errors. 404 points the
    /// user at support; anything else is a generic retry-later.
    pub fn from_user_error(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } | ApiError::BadRequest { .. } => Self::LoggedOut,
            ApiError::NotFound { body } => Self::Failed(Notice::error_with_reload(format!(
                "{}{SUPPORT_SUFFIX}",
                body.as_deref().unwrap_or("User not found")
            ))),
            other => Self::Failed(Notice::error_with_reload(
                other.body().unwrap_or(SOMETHING_WENT_WRONG),
            )),
        }
    }

    pub fn user(&self) -> Option<&LoggedInUser> {
        match self {
            Self::LoggedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Failed(n) => Some(n),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Ask the backend who we are.
    pub async fn load(&mut self, backend: &dyn WalletBackend) -> &SessionState {
        self.state = match backend.current_user().await {
            Ok(user) => {
                tracing::info!(paymail = %user.paymail, "session active");
                SessionState::LoggedIn(user)
            }
            Err(err) => {
                tracing::debug!(%err, "no active session");
                SessionState::from_user_error(&err)
            }
        };
        &self.state
    }

    pub async fn login(
        &mut self,
        backend: &dyn WalletBackend,
        email: &str,
        password: &str,
    ) -> &SessionState {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.state = match backend.login(&request).await {
            Ok(user) => {
                tracing::info!(paymail = %user.paymail, "logged in");
                SessionState::LoggedIn(user)
            }
            Err(ApiError::Unauthorized { .. } | ApiError::BadRequest { .. }) => {
                SessionState::Failed(Notice::error(INVALID_CREDENTIALS))
            }
            Err(err) => {
                tracing::warn!(%err, "login failed");
                SessionState::Failed(Notice::error_with_reload(
                    err.body().unwrap_or(SOMETHING_WENT_WRONG),
                ))
            }
        };
        &self.state
    }

    /// The backend rejected the session cookie mid-session (HTTP 401).
    /// Drops the user so the front-end asks for credentials again.
    pub fn expire(&mut self) {
        if let SessionState::LoggedIn(user) = &self.state {
            tracing::info!(paymail = %user.paymail, "session expired");
        }
        self.state = SessionState::LoggedOut;
    }

    /// Log out. The local state is cleared even if the backend call fails.
    pub async fn logout(&mut self, backend: &dyn WalletBackend) -> Result<(), ApiError> {
        let result = backend.logout().await;
        self.state = SessionState::LoggedOut;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bux_nullables::NullBackend;

    #[tokio::test]
    async fn loads_user() {
        let backend = NullBackend::new();
        let mut session = Session::new();
        let state = session.load(&backend).await;
        assert_eq!(state.user().unwrap().paymail, "alice@bux.com");
    }

    #[test]
    fn unauthorized_and_bad_request_log_out() {
        for status in [401, 400] {
            assert_eq!(
                SessionState::from_user_error(&ApiError::from_status(status, None)),
                SessionState::LoggedOut
            );
        }
    }

    #[test]
    fn not_found_mentions_support() {
        let state =
            SessionState::from_user_error(&ApiError::from_status(404, Some("User deleted".into())));
        let notice = state.notice().unwrap();
        assert_eq!(
            notice.message,
            "User deleted. If you can't log in again, please contact our support or try again later!"
        );
        assert!(notice.reload);
    }

    #[test]
    fn other_errors_use_backend_message_or_generic() {
        let with_body =
            SessionState::from_user_error(&ApiError::from_status(503, Some("maintenance".into())));
        assert_eq!(with_body.notice().unwrap().message, "maintenance");
        let bare = SessionState::from_user_error(&ApiError::Transport("refused".into()));
        assert_eq!(bare.notice().unwrap().message, SOMETHING_WENT_WRONG);
    }

    #[tokio::test]
    async fn bad_credentials() {
        let backend = NullBackend::new();
        backend.set_user(Err(ApiError::from_status(401, None)));
        let mut session = Session::new();
        let state = session.login(&backend, "alice@example.com", "nope").await;
        assert_eq!(state.notice().unwrap().message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn expire_drops_user_without_backend_call() {
        let backend = NullBackend::new();
        let mut session = Session::new();
        session.load(&backend).await;
        session.expire();
        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert!(session.state().user().is_none());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn logout_clears_state() {
        let backend = NullBackend::new();
        let mut session = Session::new();
        session.load(&backend).await;
        session.logout(&backend).await.unwrap();
        assert_eq!(session.state(), &SessionState::LoggedOut);
    }
}
