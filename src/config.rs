use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Telegram bot token issued by @BotFather
    pub telegram_bot_token: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a poster path to build a poster URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Google Books API key (the volumes endpoint also works without one)
    #[serde(default)]
    pub google_books_api_key: Option<String>,

    /// Google Books API base URL
    #[serde(default = "default_google_books_api_url")]
    pub google_books_api_url: String,

    /// Language used for catalog queries and genre names
    #[serde(default = "default_content_language")]
    pub content_language: String,

    /// Timeout applied to every catalog request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_google_books_api_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_content_language() -> String {
    "ru".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![
            ("TELEGRAM_BOT_TOKEN".to_string(), "123:abc".to_string()),
            ("TMDB_API_KEY".to_string(), "tmdb".to_string()),
        ];

        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.google_books_api_key, None);
        assert_eq!(config.content_language, "ru");
        assert_eq!(config.http_timeout_secs, 10);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let vars = vec![("TMDB_API_KEY".to_string(), "tmdb".to_string())];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
