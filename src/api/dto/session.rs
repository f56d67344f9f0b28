use serde::Serialize;

use crate::services::auth::AuthState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl From<&AuthState> for SessionResponse {
    fn from(state: &AuthState) -> Self {
        let user = state.identity().map(|identity| SessionUser {
            id: identity.id(),
            email: identity.email(),
            role: identity.role(),
        });

        Self {
            authenticated: user.is_some(),
            user,
        }
    }
}
