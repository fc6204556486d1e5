use async_trait::async_trait;
use std::sync::Arc;

use podium_core::{AppError, ApplicationError, DbError};

use crate::{
    auth::verify_password,
    config::Config,
    cqrs::{Query, QueryHandler, queries::AuthenticateUser},
    uow::UnitOfWork,
};

pub struct AuthenticateUserHandler {}

impl AuthenticateUserHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<AuthenticateUser> for AuthenticateUserHandler {
    async fn handle(
        &self,
        query: AuthenticateUser,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<AuthenticateUser as Query>::Output, ApplicationError> {
        let user = match uow.users().get_by_email(&query.email).await {
            Ok(user) => user,
            Err(ApplicationError::Db(DbError::UserByEmailNotFound(_))) => {
                return Err(AppError::WrongAuthCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if !user.is_active() || verify_password(user.password_hash(), &query.password).is_err() {
            return Err(AppError::WrongAuthCredentials.into());
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use podium_game::test_utils::{UserFactoryOptions, user_factory};

    use super::*;
    use crate::{auth::hash_password, test_utils::tests::MockUnitOfWork};

    fn config() -> Arc<Config> {
        Arc::new(Config {
            port: 0,
            auth_cookie_secret: String::new(),
            ranking_page_size: 20,
            ranking_max_page_size: 50,
        })
    }

    fn setup(is_banned: bool) -> Box<dyn UnitOfWork<'static>> {
        let mock = MockUnitOfWork::new();
        mock.user_store().add_user(user_factory(UserFactoryOptions {
            email: Some("ada@example.com"),
            password_hash: Some(hash_password("podium!").unwrap()),
            is_banned: Some(is_banned),
            ..Default::default()
        }));
        Box::new(mock)
    }

    fn query(email: &str, password: &str) -> AuthenticateUser {
        AuthenticateUser {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_user_success() {
        let uow = setup(false);

        let user = AuthenticateUserHandler::new()
            .handle(query("ada@example.com", "podium!"), &uow, &config())
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_user_failures() {
        let uow = setup(false);
        let handler = AuthenticateUserHandler::new();

        for q in [query("ada@example.com", "nope"), query("bob@example.com", "podium!")] {
            let result = handler.handle(q, &uow, &config()).await;
            assert!(matches!(
                result,
                Err(ApplicationError::App(AppError::WrongAuthCredentials))
            ));
        }
    }

    #[tokio::test]
    async fn test_banned_user_cannot_log_in() {
        let uow = setup(true);

        let result = AuthenticateUserHandler::new()
            .handle(query("ada@example.com", "podium!"), &uow, &config())
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::WrongAuthCredentials))
        ));
    }
}
