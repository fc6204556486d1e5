use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::{io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use podium_app::{app_bus::AppBus, config::Config};
use podium_core::{AppError, ApplicationError, Result};

use crate::handlers::{login, logout, personal_best, score_ranking, submit_score};

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
    pub cookie_key: Key,
}

impl AppState {
    /// Fails when the cookie secret is shorter than 64 bytes.
    pub fn new(app_bus: Arc<AppBus>, config: &Config) -> Result<AppState, ApplicationError> {
        let cookie_key = Key::try_from(config.auth_cookie_secret.as_bytes())
            .map_err(|e| AppError::InvalidCookieSecret(e.to_string()))?;

        Ok(AppState {
            app_bus,
            cookie_key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/games/scores", get(score_ranking).post(submit_score))
            .route("/games/scores/me", get(personal_best))
            .route("/login", post(login))
            .route("/logout", post(logout))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        Self::run(listener, state).await
    }

    /// Serves on an already bound listener.
    pub async fn run(listener: TcpListener, state: AppState) -> Result<(), ApplicationError> {
        let addr = listener.local_addr().map_err(infra_error)?;
        tracing::info!("HTTP Server started, listening on http://{}", addr);

        axum::serve(listener, Self::router(state))
            .await
            .map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
