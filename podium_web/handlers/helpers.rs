use axum::{
    Json,
    extract::{
        FromRef, FromRequestParts,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{SignedCookieJar, cookie::Key};
use serde::Serialize;

use podium_core::{AppError, ApplicationError, DbError, GameError};
use podium_types::{
    UserId,
    validation::{FieldViolation, ViolationCode},
};

/// Name of the signed cookie carrying the logged in user id.
pub const USER_ID_COOKIE: &str = "user_id";

/// The authenticated user, resolved from the signed session cookie.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));

        jar.get(USER_ID_COOKIE)
            .and_then(|cookie| cookie.value().parse::<UserId>().ok())
            .map(|id| CurrentUser { id })
            .ok_or_else(|| ApiError::from(AppError::AuthenticationRequired))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldViolation]>,
}

/// Error returned by every JSON endpoint.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError(err.into())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        GameError::InvalidSubmission(vec![not_an_object()]).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        GameError::MalformedQuery(rejection.body_text()).into()
    }
}

pub(crate) fn not_an_object() -> FieldViolation {
    FieldViolation::new(
        "body",
        ViolationCode::InvalidType,
        "request body must be a JSON object",
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self.0 {
            ApplicationError::Game(GameError::InvalidSubmission(violations)) => (
                StatusCode::BAD_REQUEST,
                "invalid request data",
                Some(violations.as_slice()),
            ),
            ApplicationError::Game(_) => (StatusCode::BAD_REQUEST, "invalid request parameters", None),
            ApplicationError::App(AppError::AuthenticationRequired) => {
                (StatusCode::UNAUTHORIZED, "login required", None)
            }
            ApplicationError::App(AppError::WrongAuthCredentials) => {
                (StatusCode::UNAUTHORIZED, "invalid email or password", None)
            }
            ApplicationError::Db(DbError::UserByIdNotFound(_)) => {
                (StatusCode::NOT_FOUND, "user not found", None)
            }
            e => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error", None)
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}
