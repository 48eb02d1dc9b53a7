//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::models::Role;
use crate::session::Session;

/// `POST /login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// `POST /register` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Success body of both auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct AuthResponse {
    pub email: String,
    pub role: Role,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Session::new(resp.email, resp.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_request_uses_full_name_key() {
        let req = RegisterRequest {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "hunter2".into(),
            role: Role::Owner,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"fullName": "Jane Doe", "email": "jane@example.com", "password": "hunter2", "role": "user"})
        );
    }

    #[test]
    fn auth_response_becomes_session() {
        let resp: AuthResponse =
            serde_json::from_value(json!({"email": "vet@clinic.test", "role": "vet"})).unwrap();
        let session: Session = resp.into();
        assert!(session.is_veterinarian());
    }
}
