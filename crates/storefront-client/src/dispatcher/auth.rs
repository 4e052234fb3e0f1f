//! Login, registration and the signed-in user's profile.

use storefront_core::validation::{
    validate_credentials, validate_password_change, validate_phone, validate_registration,
};
use storefront_core::{AuthSession, Credentials, PasswordChange, ProfileUpdate, Registration, User};
use storefront_state::Action;
use tracing::info;

use super::{finish, Dispatcher};
use crate::error::ClientResult;
use crate::outcome::Outcome;
use crate::transport::ApiRequest;

impl Dispatcher {
    /// Signs in and stores the session token and user.
    pub async fn login(&self, email: &str, password: &str) -> Outcome<User> {
        finish("login", self.try_login(email, password).await)
    }

    async fn try_login(&self, email: &str, password: &str) -> ClientResult<User> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate_credentials(&credentials)?;

        let session: AuthSession = self
            .fetch(ApiRequest::post("/api/login", &credentials)?)
            .await?;

        self.store.dispatch(Action::SetToken(Some(session.token)));
        self.store.dispatch(Action::SetUser(Some(session.user.clone())));
        info!(user_id = session.user.id, "Logged in");

        Ok(session.user)
    }

    /// Creates an account. Does not sign in.
    pub async fn register(&self, registration: &Registration) -> Outcome<()> {
        finish("register", self.try_register(registration).await)
    }

    async fn try_register(&self, registration: &Registration) -> ClientResult<()> {
        validate_registration(registration)?;
        self.execute(ApiRequest::post("/api/register", registration)?)
            .await
    }

    /// Clears the session locally. No request is sent.
    pub fn logout(&self) -> Outcome<()> {
        self.store.dispatch(Action::Logout);
        info!("Logged out");
        Outcome::done()
    }

    pub async fn get_profile(&self) -> Outcome<User> {
        finish("get_profile", self.try_get_profile().await)
    }

    async fn try_get_profile(&self) -> ClientResult<User> {
        let token = self.require_token()?;
        let user: User = self
            .fetch(ApiRequest::get("/api/profile").bearer(token))
            .await?;
        self.store.dispatch(Action::SetUser(Some(user.clone())));
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Outcome<User> {
        finish("update_profile", self.try_update_profile(update).await)
    }

    async fn try_update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let token = self.require_token()?;
        validate_phone(update.phone.as_deref())?;

        let user: User = self
            .fetch(ApiRequest::put("/api/profile", update)?.bearer(token))
            .await?;
        self.store.dispatch(Action::SetUser(Some(user.clone())));
        Ok(user)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Outcome<()> {
        finish("change_password", self.try_change_password(change).await)
    }

    async fn try_change_password(&self, change: &PasswordChange) -> ClientResult<()> {
        let token = self.require_token()?;
        validate_password_change(change)?;
        self.execute(ApiRequest::put("/api/profile/password", change)?.bearer(token))
            .await
    }

    /// Deletes the account and ends the session.
    pub async fn delete_account(&self) -> Outcome<()> {
        finish("delete_account", self.try_delete_account().await)
    }

    async fn try_delete_account(&self) -> ClientResult<()> {
        let token = self.require_token()?;
        self.execute(ApiRequest::delete("/api/profile").bearer(token))
            .await?;
        self.store.dispatch(Action::Logout);
        info!("Account deleted");
        Ok(())
    }
}
