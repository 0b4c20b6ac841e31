use std::sync::Arc;

use crate::{
    models::ContentKind,
    services::{
        genres::GenreRegistry,
        providers::{BookCatalog, Lookup, MovieCatalog},
    },
};

/// Picks one recommendation from the movie or book catalog
///
/// Movies are filtered by provider genre code, books by the raw subject keyword.
/// Without a content kind an unbiased coin decides. There are no retries: a failed
/// or empty fetch is returned as-is.
pub struct Selector {
    genres: Arc<GenreRegistry>,
    movies: Arc<dyn MovieCatalog>,
    books: Arc<dyn BookCatalog>,
}

impl Selector {
    pub fn new(
        genres: Arc<GenreRegistry>,
        movies: Arc<dyn MovieCatalog>,
        books: Arc<dyn BookCatalog>,
    ) -> Self {
        Self {
            genres,
            movies,
            books,
        }
    }

    pub async fn select(&self, genre: Option<&str>, content: Option<ContentKind>) -> Lookup {
        let kind = content.unwrap_or_else(|| {
            if rand::random::<bool>() {
                ContentKind::Movie
            } else {
                ContentKind::Book
            }
        });

        tracing::debug!(genre = ?genre, requested = ?content, chosen = ?kind, "Selecting recommendation");

        match kind {
            ContentKind::Movie => {
                let genre_code = genre.and_then(|name| self.genres.resolve_genre_code(name));
                if genre.is_some() && genre_code.is_none() {
                    tracing::info!(genre = ?genre, "Genre has no provider code, searching unfiltered");
                }
                self.movies.fetch_movie(genre_code).await
            }
            ContentKind::Book => self.books.fetch_book(genre.map(str::to_string)).await,
        }
    }
}
