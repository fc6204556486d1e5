#[cfg(test)]
pub mod tests {
    use reqwest::{Client, Response};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    use podium_app::{
        app_bus::AppBus, auth::hash_password, config::Config,
        test_utils::tests::MockUnitOfWorkProvider,
    };
    use podium_core::{ApplicationError, Result};
    use podium_game::test_utils::{UserFactoryOptions, user_factory};
    use podium_types::common::User;
    use podium_web::{AppState, WebRouter};

    pub const PASSWORD: &str = "podium!";

    pub fn test_config() -> Arc<Config> {
        Arc::new(Config {
            port: 0,
            auth_cookie_secret: "a-very-long-test-secret-that-is-definitely-longer-than-64-bytes-1234567890".to_string(),
            ranking_page_size: 20,
            ranking_max_page_size: 50,
        })
    }

    /// Spawns the web app on a random local port, backed by in-memory repositories.
    pub async fn setup_web_app() -> Result<(String, MockUnitOfWorkProvider)> {
        let config = test_config();
        let uow_provider = MockUnitOfWorkProvider::new();
        let app_bus = AppBus::new(config.clone(), Arc::new(uow_provider.clone()));
        let state = AppState::new(Arc::new(app_bus), &config)?;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
        tokio::spawn(WebRouter::run(listener, state));

        Ok((format!("http://{addr}"), uow_provider))
    }

    pub fn setup_http_client() -> Client {
        Client::builder().cookie_store(true).build().unwrap()
    }

    /// Stores a user whose password is [`PASSWORD`].
    pub fn setup_user(uow_provider: &MockUnitOfWorkProvider, username: &str) -> User {
        let email = format!("{username}@example.com");
        let user = user_factory(UserFactoryOptions {
            email: Some(&email),
            username: Some(username),
            password_hash: Some(hash_password(PASSWORD).unwrap()),
            ..Default::default()
        });
        uow_provider.uow().user_store().add_user(user.clone());
        user
    }

    pub async fn login(client: &Client, base_url: &str, user: &User) -> Response {
        client
            .post(format!("{base_url}/login"))
            .json(&json!({ "email": user.email, "password": PASSWORD }))
            .send()
            .await
            .unwrap()
    }

    /// A client holding a session for a freshly created user.
    #[allow(dead_code)]
    pub async fn logged_in_client(
        uow_provider: &MockUnitOfWorkProvider,
        base_url: &str,
        username: &str,
    ) -> (Client, User) {
        let user = setup_user(uow_provider, username);
        let client = setup_http_client();
        let res = login(&client, base_url, &user).await;
        assert!(res.status().is_success(), "login failed for {username}");
        (client, user)
    }

    #[allow(dead_code)]
    pub async fn submit_score(client: &Client, base_url: &str, body: Value) -> Response {
        client
            .post(format!("{base_url}/games/scores"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    #[allow(dead_code)]
    pub async fn submit_points(client: &Client, base_url: &str, score: i64) {
        let res = submit_score(
            client,
            base_url,
            json!({
                "game_id": "nag-won",
                "stage_id": "cyber-city",
                "score": score,
                "game_time": 120,
            }),
        )
        .await;
        assert!(res.status().is_success(), "submission of {score} failed");
    }

    #[allow(dead_code)]
    pub async fn get_json(client: &Client, url: &str) -> (reqwest::StatusCode, Value) {
        let res = client.get(url).send().await.unwrap();
        let status = res.status();
        (status, res.json::<Value>().await.unwrap())
    }
}
