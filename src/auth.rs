//! Sign-in and account creation against the backend.

use crate::api::{LoginRequest, RegisterRequest};
use crate::core_state::CoreState;
use crate::error::{AppError, FormError};
use crate::forms;
use crate::models::Role;
use crate::router::View;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            email: forms::email(&self.email)?,
            password: forms::require(&self.password, "Password")?,
            role: self.role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        Ok(RegisterRequest {
            full_name: forms::require(&self.full_name, "Full name")?,
            email: forms::email(&self.email)?,
            password: forms::require(&self.password, "Password")?,
            role: self.role,
        })
    }
}

/// Authenticate, then adopt the returned identity and go home.
/// On any failure the current session is left untouched.
pub fn login(state: &mut CoreState, form: &LoginForm) -> Result<Session, AppError> {
    state.ensure_access(View::Login)?;
    let request = form.validate()?;
    let session = state
        .api()
        .login(&request)
        .inspect_err(|e| tracing::warn!(email = %request.email, error = %e, "Login failed"))?;
    state.sign_in(session.clone());
    Ok(session)
}

pub fn register(state: &mut CoreState, form: &RegisterForm) -> Result<Session, AppError> {
    state.ensure_access(View::Register)?;
    let request = form.validate()?;
    let session = state
        .api()
        .register(&request)
        .inspect_err(|e| tracing::warn!(email = %request.email, error = %e, "Registration failed"))?;
    tracing::info!(email = %session.email, role = %session.role, "Account registered");
    state.sign_in(session.clone());
    Ok(session)
}
