use axum::{Json, extract::State};
use axum_extra::extract::{
    SignedCookieJar, WithRejection,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use serde_json::{Value, json};

use podium_app::{cqrs::queries::AuthenticateUser, queries_handlers::AuthenticateUserHandler};
use podium_types::common::UserProfile;

use crate::{
    handlers::{
        ApiError,
        helpers::USER_ID_COOKIE,
        scores_handler::SuccessResponse,
    },
    http::AppState,
};

/// Body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /login – Check credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Json(form), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(SignedCookieJar, Json<SuccessResponse<UserProfile>>), ApiError> {
    let query = AuthenticateUser {
        email: form.email.clone(),
        password: form.password,
    };

    let user = state
        .app_bus
        .query(query, AuthenticateUserHandler::new())
        .await
        .inspect_err(|e| tracing::debug!("Login failed for {}: {}", form.email, e))?;

    let cookie = Cookie::build(Cookie::new(USER_ID_COOKIE, user.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(user_id = user.id, "User logged in");
    Ok((
        jar.add(cookie),
        Json(SuccessResponse {
            success: true,
            data: user.profile,
            pagination: None,
        }),
    ))
}

/// POST /logout – Clear the session cookie.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Json<Value>) {
    let jar = match jar.get(USER_ID_COOKIE) {
        Some(_) => jar.remove(Cookie::build(USER_ID_COOKIE).path("/").build()),
        None => jar,
    };

    (jar, Json(json!({ "success": true })))
}
