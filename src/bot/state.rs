use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        providers::{BookCatalog, GoogleBooksProvider, MovieCatalog, TmdbProvider},
        Conversation, GenreRegistry, InMemorySessionStore, Selector, SessionStore,
    },
};

/// Everything a message handler needs, shared across chats
#[derive(Clone)]
pub struct AppContext {
    pub conversation: Arc<Conversation>,
}

impl AppContext {
    /// Wires the state machine to the given catalogs and session store
    pub fn new(
        movies: Arc<dyn MovieCatalog>,
        books: Arc<dyn BookCatalog>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::from_conversation(Self::conversation(movies, books, sessions))
    }

    fn conversation(
        movies: Arc<dyn MovieCatalog>,
        books: Arc<dyn BookCatalog>,
        sessions: Arc<dyn SessionStore>,
    ) -> Conversation {
        let genres = Arc::new(GenreRegistry::new(movies.clone()));
        let selector = Arc::new(Selector::new(genres.clone(), movies, books));
        Conversation::new(genres, selector, sessions)
    }

    fn from_conversation(conversation: Conversation) -> Self {
        Self {
            conversation: Arc::new(conversation),
        }
    }

    /// Builds the production context: TMDB, Google Books and in-memory sessions
    ///
    /// `bot_username` is the bot's own Telegram username, used to skip group-chat
    /// commands addressed to other bots.
    pub fn from_config(config: &Config, bot_username: Option<String>) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let movies = TmdbProvider::new(
            http_client.clone(),
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.content_language.clone(),
        );

        let books = GoogleBooksProvider::new(
            http_client,
            config.google_books_api_key.clone(),
            config.google_books_api_url.clone(),
            config.content_language.clone(),
        );

        tracing::info!(
            movies = movies.name(),
            books = books.name(),
            language = %config.content_language,
            "Catalog providers configured"
        );

        let mut conversation = Self::conversation(
            Arc::new(movies),
            Arc::new(books),
            Arc::new(InMemorySessionStore::new()),
        );
        if let Some(username) = bot_username {
            conversation = conversation.with_bot_username(username);
        }

        Ok(Self::from_conversation(conversation))
    }
}
