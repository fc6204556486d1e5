use dotenvy::dotenv;
use std::env;

/// Default number of ranking entries per page.
pub const DEFAULT_RANKING_PAGE_SIZE: usize = 20;
/// Requests above this size fall back to the default page size.
pub const DEFAULT_RANKING_MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub auth_cookie_secret: String,
    pub ranking_page_size: usize,
    pub ranking_max_page_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = match env::var("PODIUM_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(8080),
            Err(_) => 8080,
        };

        let auth_cookie_secret = match env::var("PODIUM_COOKIE_SECRET") {
            Ok(val) => val,
            Err(_) => panic!("You need to set env PODIUM_COOKIE_SECRET"),
        };

        let ranking_page_size = match env::var("PODIUM_RANKING_PAGE_SIZE") {
            Ok(val) => val
                .parse::<usize>()
                .unwrap_or(DEFAULT_RANKING_PAGE_SIZE)
                .max(1),
            Err(_) => DEFAULT_RANKING_PAGE_SIZE,
        };

        let ranking_max_page_size = match env::var("PODIUM_RANKING_MAX_PAGE_SIZE") {
            Ok(val) => val
                .parse::<usize>()
                .unwrap_or(DEFAULT_RANKING_MAX_PAGE_SIZE)
                .max(ranking_page_size),
            Err(_) => DEFAULT_RANKING_MAX_PAGE_SIZE.max(ranking_page_size),
        };

        Self {
            port,
            auth_cookie_secret,
            ranking_page_size,
            ranking_max_page_size,
        }
    }
}
