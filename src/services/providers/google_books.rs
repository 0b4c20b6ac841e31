//! Google Books catalog provider
//!
//! A single /volumes search per recommendation. Volumes without a title or
//! without authors are dropped before the random pick.
use crate::{
    error::AppResult,
    models::{
        description_or_placeholder, GoogleBooksResponse, GoogleVolumeInfo, Rating, Recommendation,
        RecommendationKind, NO_CATEGORY, UNKNOWN_AUTHOR,
    },
    services::providers::{read_json, BookCatalog, Lookup},
};
use rand::seq::SliceRandom;
use reqwest::Client as HttpClient;

const PROVIDER: &str = "google_books";
const MAX_RESULTS: &str = "40";
const ORDER_BY: &str = "relevance";

#[derive(Clone)]
pub struct GoogleBooksProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    language: String,
}

impl GoogleBooksProvider {
    pub fn new(
        http_client: HttpClient,
        api_key: Option<String>,
        api_url: String,
        language: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
            language,
        }
    }

    async fn search(&self, genre: Option<&str>) -> AppResult<Vec<GoogleVolumeInfo>> {
        let url = format!("{}/volumes", self.api_url);
        let query = genre
            .map(|g| format!("subject:{}", g))
            .unwrap_or_default();

        let mut request = self.http_client.get(&url).query(&[
            ("q", query.as_str()),
            ("orderBy", ORDER_BY),
            ("maxResults", MAX_RESULTS),
            ("langRestrict", self.language.as_str()),
        ]);

        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response: GoogleBooksResponse = read_json(request.send().await?, PROVIDER).await?;
        let total = response.items.len();

        let volumes: Vec<GoogleVolumeInfo> = response
            .items
            .into_iter()
            .filter_map(|item| item.volume_info)
            .filter(is_complete)
            .collect();

        tracing::info!(
            query = %query,
            results = total,
            complete = volumes.len(),
            provider = PROVIDER,
            "Volume search completed"
        );

        Ok(volumes)
    }

    async fn random_book(&self, genre: Option<&str>) -> AppResult<Option<Recommendation>> {
        let volumes = self.search(genre).await?;
        let picked = volumes.choose(&mut rand::thread_rng()).cloned();

        Ok(picked.and_then(|volume| build_recommendation(volume, genre)))
    }
}

/// A volume is usable only with a title and at least one author
fn is_complete(volume: &GoogleVolumeInfo) -> bool {
    volume.title.as_deref().is_some_and(|t| !t.trim().is_empty()) && !volume.authors.is_empty()
}

/// Normalizes a volume; genre label falls back to the requested genre, then the placeholder
fn build_recommendation(volume: GoogleVolumeInfo, genre: Option<&str>) -> Option<Recommendation> {
    let title = volume.title?;

    let authors = if volume.authors.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        volume.authors.join(", ")
    };

    let genre_label = if !volume.categories.is_empty() {
        volume.categories.join(", ")
    } else {
        genre
            .map(str::to_string)
            .unwrap_or_else(|| NO_CATEGORY.to_string())
    };

    // Google Books returns http links often, upgrade to https
    let image_url = volume
        .image_links
        .and_then(|links| links.thumbnail)
        .map(|thumb| thumb.replace("http://", "https://"));

    Some(Recommendation {
        kind: RecommendationKind::Book { authors },
        title,
        genre_label,
        description: description_or_placeholder(volume.description),
        rating: Rating::from(volume.average_rating),
        image_url,
    })
}

#[async_trait::async_trait]
impl BookCatalog for GoogleBooksProvider {
    async fn fetch_book(&self, genre: Option<String>) -> Lookup {
        Lookup::from_result(self.random_book(genre.as_deref()).await, PROVIDER)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoogleImageLinks, NO_DESCRIPTION};

    fn volume(title: Option<&str>, authors: &[&str]) -> GoogleVolumeInfo {
        GoogleVolumeInfo {
            title: title.map(str::to_string),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            categories: Vec::new(),
            description: None,
            average_rating: None,
            image_links: None,
        }
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete(&volume(Some("Пикник на обочине"), &["Аркадий Стругацкий"])));
        assert!(!is_complete(&volume(Some("Без автора"), &[])));
        assert!(!is_complete(&volume(None, &["Аноним"])));
        assert!(!is_complete(&volume(Some(" "), &["Аноним"])));
    }

    #[test]
    fn test_build_recommendation_joins_authors_and_categories() {
        let mut info = volume(
            Some("Пикник на обочине"),
            &["Аркадий Стругацкий", "Борис Стругацкий"],
        );
        info.categories = vec!["Fiction".to_string(), "Science Fiction".to_string()];
        info.average_rating = Some(4.0);
        info.image_links = Some(GoogleImageLinks {
            thumbnail: Some("http://books.google.com/books/content?id=abc".to_string()),
        });

        let result = build_recommendation(info, Some("фантастика")).unwrap();

        assert_eq!(
            result.kind,
            RecommendationKind::Book {
                authors: "Аркадий Стругацкий, Борис Стругацкий".to_string()
            }
        );
        assert_eq!(result.genre_label, "Fiction, Science Fiction");
        assert_eq!(result.rating, Rating::Score(4.0));
        assert_eq!(result.description, NO_DESCRIPTION);
        assert_eq!(
            result.image_url.as_deref(),
            Some("https://books.google.com/books/content?id=abc")
        );
    }

    #[test]
    fn test_genre_label_falls_back_to_requested_genre() {
        let info = volume(Some("Книга"), &["Автор"]);
        let result = build_recommendation(info, Some("фэнтези")).unwrap();
        assert_eq!(result.genre_label, "фэнтези");
    }

    #[test]
    fn test_genre_label_placeholder_without_genre() {
        let info = volume(Some("Книга"), &["Автор"]);
        let result = build_recommendation(info, None).unwrap();
        assert_eq!(result.genre_label, NO_CATEGORY);
        assert_eq!(result.rating, Rating::Unrated);
        assert_eq!(result.image_url, None);
    }
}
