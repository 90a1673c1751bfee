// src/services/session.rs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    auth::SessionView,
    profile::{Profile, Role},
};

// Quem está fazendo a requisição. Só existe com perfil resolvido.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
    pub profile: Profile,
    pub role: Role,
}

impl Identity {
    pub fn new(account_id: Uuid, email: impl Into<String>, profile: Profile) -> Self {
        let role = profile.role;
        Self { account_id, email: email.into(), profile, role }
    }

    pub fn profile_id(&self) -> Uuid {
        self.profile.id
    }

    pub fn district(&self) -> Option<&str> {
        self.profile.district.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoginCompleted(Identity),
    LogoutCompleted,
}

impl SessionState {
    pub fn apply(self, event: SessionEvent) -> Self {
        match (self, event) {
            (SessionState::Unauthenticated, SessionEvent::LoginCompleted(identity)) => {
                SessionState::Authenticated(identity)
            }
            (SessionState::Authenticated(_), SessionEvent::LogoutCompleted) => SessionState::Unauthenticated,
            (state, _) => state,
        }
    }

    pub fn view(&self) -> SessionView {
        match self {
            SessionState::Authenticated(identity) => SessionView {
                authenticated: true,
                role: Some(identity.role),
                profile: Some(identity.profile.clone()),
                navigation: identity.role.navigation(),
            },
            SessionState::Unauthenticated => SessionView {
                authenticated: false,
                role: None,
                profile: None,
                navigation: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::profile_service::tests::profile;

    fn identity(role: Role) -> Identity {
        Identity::new(Uuid::new_v4(), "x@example.com", profile("x@example.com", role, None))
    }

    #[test]
    fn login_then_logout() {
        let state = SessionState::default().apply(SessionEvent::LoginCompleted(identity(Role::Owner)));
        assert_eq!(state.view().role, Some(Role::Owner));

        let state = state.apply(SessionEvent::LogoutCompleted);
        assert!(matches!(state, SessionState::Unauthenticated));
    }

    #[test]
    fn other_combinations_keep_the_state() {
        let state = SessionState::Unauthenticated.apply(SessionEvent::LogoutCompleted);
        assert!(matches!(state, SessionState::Unauthenticated));

        let first = identity(Role::ProductionManager);
        let state = SessionState::Authenticated(first.clone())
            .apply(SessionEvent::LoginCompleted(identity(Role::Owner)));
        assert!(matches!(&state, SessionState::Authenticated(i) if i.account_id == first.account_id));
        assert_eq!(state.view().role, Some(Role::ProductionManager));
    }

    #[test]
    fn view_carries_role_navigation() {
        let state = SessionState::Authenticated(identity(Role::MarketingManager));
        let view = state.view();
        assert!(view.authenticated);
        assert_eq!(view.navigation, Role::MarketingManager.navigation());

        let view = SessionState::Unauthenticated.view();
        assert!(!view.authenticated);
        assert!(view.navigation.is_empty());
    }
}
