//! Auth slice: session lifecycle.
//!
//! The reducer API makes the core invariant unrepresentable: there is no
//! action that sets the user record without the authenticated flag or vice
//! versa — [`Session::Authenticated`] carries both.

use crate::models::{Session, UserAccount};

#[derive(Debug, Default)]
pub struct AuthState {
    pub session: Session,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    Pending,
    /// Login or registration succeeded.
    LoggedIn(UserAccount),
    /// The persisted-credential check ran at startup. `None` means checked
    /// and anonymous.
    SessionChecked(Option<UserAccount>),
    LoggedOut,
    Rejected(String),
}

pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        AuthAction::LoggedIn(user) => {
            state.loading = false;
            state.session = Session::Authenticated(user);
        }
        AuthAction::SessionChecked(found) => {
            state.loading = false;
            state.session = match found {
                Some(user) => Session::Authenticated(user),
                None => Session::Anonymous,
            };
        }
        AuthAction::LoggedOut => {
            state.loading = false;
            state.session = Session::Anonymous;
        }
        AuthAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}
