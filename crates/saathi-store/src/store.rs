//! The aggregate store.
//!
//! [`AppState`] combines the nine slice states under one root. It is
//! created once at application start and injected wherever it is needed;
//! the shared handle is `Arc<Mutex<AppState>>`, and holding the mutex for
//! the duration of a reducer call serialises all writes. Reducers never
//! suspend, so the lock is never held across an await point.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::admin::{self, AdminAction, AdminState};
use crate::auth::{self, AuthAction, AuthState};
use crate::matches::{self, MatchesAction, MatchesState};
use crate::messaging::{self, MessagingAction, MessagingState};
use crate::models::Session;
use crate::notification::{self, NotificationAction, NotificationState};
use crate::profile::{self, ProfileAction, ProfileState};
use crate::search::{self, SearchAction, SearchState};
use crate::subscription::{self, SubscriptionAction, SubscriptionState};
use crate::verification::{self, VerificationAction, VerificationStateSlice};

/// Root action: each variant routes to exactly one slice reducer, except
/// `ResetAll`, which returns every slice to its initial state on logout or
/// session expiry so nothing cached for one user survives into the next.
#[derive(Debug, Clone)]
pub enum Action {
    Auth(AuthAction),
    Profile(ProfileAction),
    Search(SearchAction),
    Matches(MatchesAction),
    Messaging(MessagingAction),
    Subscription(SubscriptionAction),
    Verification(VerificationAction),
    Notification(NotificationAction),
    Admin(AdminAction),
    ResetAll,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub profile: ProfileState,
    pub search: SearchState,
    pub matches: MatchesState,
    pub messaging: MessagingState,
    pub subscription: SubscriptionState,
    pub verification: VerificationStateSlice,
    pub notification: NotificationState,
    pub admin: AdminState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action to the owning slice. No slice reducer reads another
    /// slice's state.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Auth(a) => auth::reduce(&mut self.auth, a),
            Action::Profile(a) => profile::reduce(&mut self.profile, a),
            Action::Search(a) => search::reduce(&mut self.search, a),
            Action::Matches(a) => matches::reduce(&mut self.matches, a),
            Action::Messaging(a) => messaging::reduce(&mut self.messaging, a),
            Action::Subscription(a) => subscription::reduce(&mut self.subscription, a),
            Action::Verification(a) => verification::reduce(&mut self.verification, a),
            Action::Notification(a) => notification::reduce(&mut self.notification, a),
            Action::Admin(a) => admin::reduce(&mut self.admin, a),
            Action::ResetAll => {
                debug!("Resetting all slices");
                *self = AppState::new();
                // the credential check already happened this page session
                self.auth.session = Session::Anonymous;
            }
        }
    }
}

/// Shared handle to the one store instance.
pub type Store = Arc<Mutex<AppState>>;

pub fn new_store() -> Store {
    Arc::new(Mutex::new(AppState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatRoom, UserAccount};

    fn user() -> UserAccount {
        UserAccount {
            id: "u1".into(),
            full_name: "Asha".into(),
            email: "asha@example.com".into(),
            is_admin: false,
            profile_complete: true,
            photo_url: None,
        }
    }

    #[test]
    fn test_dispatch_routes_to_one_slice() {
        let mut state = AppState::new();
        state.dispatch(Action::Auth(AuthAction::LoggedIn(user())));

        assert!(state.auth.session.is_authenticated());
        // untouched slices stay pristine
        assert!(state.messaging.rooms.is_empty());
        assert!(state.matches.all.is_empty());
    }

    #[test]
    fn test_reset_all_purges_every_slice_but_stays_initialized() {
        let mut state = AppState::new();
        state.dispatch(Action::Auth(AuthAction::LoggedIn(user())));
        state.dispatch(Action::Messaging(MessagingAction::RoomsLoaded(vec![
            ChatRoom {
                peer_id: "bob".into(),
                peer_name: "Bob".into(),
                peer_photo_url: None,
                peer_online: false,
                last_message: None,
                last_message_at: None,
                unread: 2,
            },
        ])));

        state.dispatch(Action::ResetAll);

        assert!(!state.auth.session.is_authenticated());
        assert!(state.auth.session.initialized());
        assert!(state.messaging.rooms.is_empty());
    }
}
