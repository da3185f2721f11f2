use sawari_core::user::{LoginOutcome, User};

/// An authenticated session: the logged-in account and its bearer token.
///
/// Held for the session lifetime and dropped at logout; there is no local
/// persistence of either the token or the user.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    token: String,
}

impl Session {
    pub fn start(outcome: &LoginOutcome) -> Self {
        Self {
            user: outcome.user.clone(),
            token: outcome.token.clone(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Driver-only screens check this before rendering.
    pub fn is_driver(&self) -> bool {
        self.user.is_driver()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sawari_core::user::Role;

    #[test]
    fn session_carries_role_gate() {
        let outcome = LoginOutcome {
            message: "Login successful".to_string(),
            user: User {
                id: "d1".to_string(),
                name: "Raj".to_string(),
                email: None,
                phone: None,
                role: Role::Driver,
            },
            token: "jwt-token".to_string(),
        };
        let session = Session::start(&outcome);
        assert!(session.is_driver());
        assert_eq!(session.token(), "jwt-token");
    }
}
