//! Login and signup.
//!
//! Credentials are checked and stored by a hosted provider reached through
//! [`AuthProvider`]. This module only validates the forms, forwards them, and
//! decides where the app lands on start.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AuthError;

/// A signed-in account as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
}

/// Hosted email/password authentication.
pub trait AuthProvider: Send + Sync {
    /// The account signed in on this device, if any.
    fn current_user(&self) -> Option<User>;

    fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_out(&self);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()?;

        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Where the app opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    /// Already signed in; go straight to the chat list.
    ChatList(User),
    Login,
}

/// Drives the login and signup screens against a provider.
pub struct SessionFlow<A> {
    auth: A,
}

impl<A: AuthProvider> SessionFlow<A> {
    pub fn new(auth: A) -> Self {
        Self { auth }
    }

    pub fn provider(&self) -> &A {
        &self.auth
    }

    /// Skip the login screen when a session survives from a previous run.
    pub fn resume(&self) -> Landing {
        match self.auth.current_user() {
            Some(user) => {
                info!(uid = %user.uid, "resuming session");
                Landing::ChatList(user)
            }
            None => Landing::Login,
        }
    }

    pub fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        form.validate()?;

        let user = self
            .auth
            .sign_in(form.email.trim(), &form.password)
            .map_err(|e| {
                warn!(error = %e, "sign-in rejected");
                e
            })?;

        info!(uid = %user.uid, "signed in");
        Ok(user)
    }

    /// Create an account. The caller sends the user back to the login screen
    /// afterwards.
    pub fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        form.validate()?;

        let user = self
            .auth
            .sign_up(form.email.trim(), &form.password)
            .map_err(|e| {
                warn!(error = %e, "sign-up rejected");
                e
            })?;

        info!(uid = %user.uid, "account created");
        Ok(user)
    }

    pub fn logout(&self) {
        self.auth.sign_out();
        info!("signed out");
    }
}
