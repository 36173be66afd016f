use std::env;

/// Application configuration sourced from the environment. Nothing
/// sensitive lives in the source tree; every external location can be
/// overridden with a `DOCCHAT_*` env var.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub storage_path: String,
    pub db_path: String,
    pub greeting: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("DOCCHAT_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let api_url = env::var("DOCCHAT_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000/api/chat".to_string());
        let greeting = env::var("DOCCHAT_GREETING")
            .unwrap_or_else(|_| "Hi. What would you like to know?".to_string());

        Self {
            api_url,
            storage_path,
            db_path,
            greeting,
        }
    }
}
