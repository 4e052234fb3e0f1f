//! # Account Commands
//!
//! Sign-in, registration and the profile of the signed-in user.

use storefront_client::Dispatcher;
use storefront_core::{PasswordChange, ProfileUpdate, Registration, ValidationError};

use super::{render, Rendered};
use crate::cli::{ProfileCommand, RegisterArgs};
use crate::error::CliResult;

pub async fn login(dispatcher: &Dispatcher, email: &str, password: &str) -> CliResult<Rendered> {
    render(dispatcher.login(email, password).await)
}

pub async fn register(dispatcher: &Dispatcher, args: RegisterArgs) -> CliResult<Rendered> {
    let registration = Registration {
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
        address: args.address,
    };
    render(dispatcher.register(&registration).await)
}

/// `profile` with no action shows the profile.
pub async fn profile(
    dispatcher: &Dispatcher,
    action: Option<ProfileCommand>,
) -> CliResult<Rendered> {
    match action.unwrap_or(ProfileCommand::Show) {
        ProfileCommand::Show => render(dispatcher.get_profile().await),
        ProfileCommand::Update {
            first_name,
            last_name,
            phone,
            address,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                phone,
                address,
            };
            render(dispatcher.update_profile(&update).await)
        }
        ProfileCommand::Password { current, new } => {
            let change = PasswordChange {
                current_password: current,
                new_password: new,
            };
            render(dispatcher.change_password(&change).await)
        }
        ProfileCommand::Delete { yes } => {
            if !yes {
                return Err(ValidationError::Required {
                    field: "--yes".to_string(),
                }
                .into());
            }
            render(dispatcher.delete_account().await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Scripted;
    use crate::error::CliError;
    use serde_json::json;
    use storefront_client::Method;

    #[tokio::test]
    async fn test_login_stores_token() {
        let backend = Scripted::default().on(
            Method::Post,
            "/api/login",
            200,
            json!({"token": "tok-9", "user": {"id": 9, "email": "ana@example.com"}}),
        );
        let dispatcher = backend.dispatcher(None);

        let rendered = login(&dispatcher, "ana@example.com", "secret123")
            .await
            .unwrap();
        assert!(rendered.success);
        assert_eq!(dispatcher.store().token().as_deref(), Some("tok-9"));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let backend = Scripted::default();
        let dispatcher = backend.dispatcher(Some("tok"));

        let err = profile(&dispatcher, Some(ProfileCommand::Delete { yes: false }))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
        assert!(backend.calls().is_empty());
        assert!(dispatcher.store().token().is_some());
    }

    #[tokio::test]
    async fn test_profile_defaults_to_show() {
        let backend = Scripted::default().on(
            Method::Get,
            "/api/profile",
            200,
            json!({"id": 9, "email": "ana@example.com", "address": "Calle Luna 4"}),
        );
        let dispatcher = backend.dispatcher(Some("tok"));

        let rendered = profile(&dispatcher, None).await.unwrap();
        assert!(rendered.success);
        assert_eq!(rendered.json["data"]["address"], json!("Calle Luna 4"));
    }
}
