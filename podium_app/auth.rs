use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use podium_core::{AppError, ApplicationError, Result};
use podium_types::{UserId, common::User};

use crate::uow::UnitOfWork;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hashed = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hashed)
}

pub fn verify_password(hash: &str, password: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash)?)
}

/// Loads the user behind a session. Banned and deleted accounts are treated as
/// logged out even when their session cookie is still valid.
pub async fn session_user(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    user_id: UserId,
) -> Result<User, ApplicationError> {
    let user = uow.users().get_by_id(user_id).await?;
    if !user.is_active() {
        tracing::debug!(user_id, "Session of an inactive account rejected");
        return Err(AppError::AuthenticationRequired.into());
    }

    Ok(user)
}
