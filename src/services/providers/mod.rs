//! Catalog provider abstraction
//!
//! Movies and books come from two unrelated public APIs. Each provider decodes its
//! own wire schema once and hands back a normalized [`Recommendation`], so nothing
//! downstream ever looks at provider JSON.
use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
};
use serde::de::DeserializeOwned;

pub mod google_books;
pub mod tmdb;

pub use google_books::GoogleBooksProvider;
pub use tmdb::TmdbProvider;

/// Outcome of a single catalog fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Recommendation),
    /// Well-formed response without a usable entry
    Empty,
    /// Transport, status or decoding failure, already logged
    Failed(String),
}

impl Lookup {
    pub fn into_recommendation(self) -> Option<Recommendation> {
        match self {
            Lookup::Found(recommendation) => Some(recommendation),
            Lookup::Empty | Lookup::Failed(_) => None,
        }
    }

    /// Converts a provider result, logging the failure case
    pub(crate) fn from_result(result: AppResult<Option<Recommendation>>, provider: &str) -> Self {
        match result {
            Ok(Some(recommendation)) => {
                tracing::info!(
                    provider = provider,
                    title = %recommendation.title,
                    "Recommendation fetched"
                );
                Lookup::Found(recommendation)
            }
            Ok(None) => {
                tracing::info!(provider = provider, "Catalog returned no usable entries");
                Lookup::Empty
            }
            Err(e) => {
                tracing::error!(error = %e, provider = provider, "Catalog fetch failed");
                Lookup::Failed(e.to_string())
            }
        }
    }
}

/// Movie catalog (TMDB)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Picks a random popular movie, optionally restricted to a provider genre code
    async fn fetch_movie(&self, genre_code: Option<u32>) -> Lookup;

    /// Fetches the provider's current genre names in the display language
    async fn fetch_genre_names(&self) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Book catalog (Google Books)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    /// Picks a random complete volume, optionally restricted to a subject keyword
    async fn fetch_book(&self, genre: Option<String>) -> Lookup;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Rejects non-success responses and decodes the body
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    provider: &str,
) -> AppResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalApi(format!(
            "{} API returned status {}: {}",
            provider, status, body
        )));
    }

    let response_text = response.text().await?;
    tracing::debug!(provider = provider, response = %response_text, "Raw catalog response");

    serde_json::from_str(&response_text).map_err(|e| {
        tracing::error!(
            error = %e,
            provider = provider,
            "Failed to deserialize catalog response"
        );
        AppError::Parse(e)
    })
}
