//! TMDB movie catalog provider
//!
//! API Flow:
//! 1. Discovery: /discover/movie → one page of popular titles (genre ids only)
//! 2. Details: /movie/{id} → genre names for the randomly picked title
//!
//! Genre names for the genre keyboard come from /genre/movie/list.
use crate::{
    error::AppResult,
    models::{
        description_or_placeholder, Rating, Recommendation, RecommendationKind, TmdbDiscoverResponse,
        TmdbGenreList, TmdbMovie, TmdbMovieDetails, NO_CATEGORY,
    },
    services::providers::{read_json, Lookup, MovieCatalog},
};
use rand::Rng;
use reqwest::Client as HttpClient;

const PROVIDER: &str = "tmdb";
const SORT_BY: &str = "popularity.desc";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(
        http_client: HttpClient,
        api_key: String,
        api_url: String,
        image_base_url: String,
        language: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
            image_base_url,
            language,
        }
    }

    /// Query parameters shared by every TMDB request
    fn base_query(&self) -> [(&'static str, &str); 2] {
        [("api_key", self.api_key.as_str()), ("language", self.language.as_str())]
    }

    async fn discover(&self, genre_code: Option<u32>) -> AppResult<Vec<TmdbMovie>> {
        let url = format!("{}/discover/movie", self.api_url);

        let mut request = self
            .http_client
            .get(&url)
            .query(&self.base_query())
            .query(&[("sort_by", SORT_BY), ("include_adult", "false")]);

        if let Some(code) = genre_code {
            request = request.query(&[("with_genres", code)]);
        }

        let page: TmdbDiscoverResponse = read_json(request.send().await?, PROVIDER).await?;

        let movies: Vec<TmdbMovie> = page
            .results
            .into_iter()
            .filter(|movie| movie.title.as_deref().is_some_and(|t| !t.trim().is_empty()))
            .collect();

        tracing::info!(
            genre_code = ?genre_code,
            results = movies.len(),
            provider = PROVIDER,
            "Discovery completed"
        );

        Ok(movies)
    }

    async fn details(&self, movie_id: u64) -> AppResult<TmdbMovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&self.base_query())
            .send()
            .await?;

        read_json(response, PROVIDER).await
    }

    async fn random_movie(&self, genre_code: Option<u32>) -> AppResult<Option<Recommendation>> {
        let mut movies = self.discover(genre_code).await?;
        if movies.is_empty() {
            return Ok(None);
        }

        let index = rand::thread_rng().gen_range(0..movies.len());
        let movie = movies.swap_remove(index);

        let details = self.details(movie.id).await?;

        Ok(self.build_recommendation(movie, details))
    }

    /// Normalizes a discovery entry plus its detail record
    ///
    /// Returns `None` for entries without a title.
    fn build_recommendation(
        &self,
        movie: TmdbMovie,
        details: TmdbMovieDetails,
    ) -> Option<Recommendation> {
        let title = movie.title?;

        let genre_label = if details.genres.is_empty() {
            NO_CATEGORY.to_string()
        } else {
            details
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let image_url = movie
            .poster_path
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", self.image_base_url, path));

        Some(Recommendation {
            kind: RecommendationKind::Movie,
            title,
            genre_label,
            description: description_or_placeholder(movie.overview),
            rating: Rating::from(movie.vote_average),
            image_url,
        })
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbProvider {
    async fn fetch_movie(&self, genre_code: Option<u32>) -> Lookup {
        Lookup::from_result(self.random_movie(genre_code).await, PROVIDER)
    }

    async fn fetch_genre_names(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/genre/movie/list", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&self.base_query())
            .send()
            .await?;

        let list: TmdbGenreList = read_json(response, PROVIDER).await?;

        Ok(list
            .genres
            .into_iter()
            .map(|genre| genre.name.to_lowercase())
            .collect())
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
