use serde::Deserialize;
use std::fmt::Display;

pub mod conversation;
pub mod reply;

pub use conversation::{ConversationState, SessionId, Step};
pub use reply::{Keyboard, Reply, TextFormat};

pub const NO_DESCRIPTION: &str = "Описание отсутствует";
pub const NO_RATING: &str = "Нет рейтинга";
pub const UNKNOWN_AUTHOR: &str = "Автор неизвестен";
pub const NO_CATEGORY: &str = "Категория не указана";

/// Kind of content a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Movie,
    Book,
}

/// Catalog rating on a 0-10 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    Unrated,
}

impl From<Option<f64>> for Rating {
    fn from(value: Option<f64>) -> Self {
        value.map(Rating::Score).unwrap_or(Rating::Unrated)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{}", score),
            Rating::Unrated => write!(f, "{}", NO_RATING),
        }
    }
}

/// Fields that only exist for one kind of recommendation
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationKind {
    Movie,
    Book {
        /// Comma-joined author names
        authors: String,
    },
}

/// A single normalized item picked from one of the catalogs
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    /// Display string, possibly comma-joined
    pub genre_label: String,
    pub description: String,
    pub rating: Rating,
    pub image_url: Option<String>,
}

impl Recommendation {
    pub fn content_kind(&self) -> ContentKind {
        match self.kind {
            RecommendationKind::Movie => ContentKind::Movie,
            RecommendationKind::Book { .. } => ContentKind::Book,
        }
    }
}

/// Falls back to the placeholder for missing or blank descriptions
pub fn description_or_placeholder(description: Option<String>) -> String {
    description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /discover/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDiscoverResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// One entry of a discovery page
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response from GET /movie/{id}
///
/// Only the genre names are read; discovery entries carry genre ids alone.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

/// Response from GET /genre/movie/list
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

// ============================================================================
// Google Books API Types
// ============================================================================

/// Response from GET /volumes
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleBooksResponse {
    #[serde(default)]
    pub items: Vec<GoogleBookItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBookItem {
    #[serde(default)]
    pub volume_info: Option<GoogleVolumeInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleVolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub image_links: Option<GoogleImageLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleImageLinks {
    pub thumbnail: Option<String>,
    // smallThumbnail is also available but too small for a photo message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::Score(7.5).to_string(), "7.5");
        assert_eq!(Rating::Unrated.to_string(), NO_RATING);
        assert_eq!(Rating::from(None), Rating::Unrated);
    }

    #[test]
    fn test_blank_description_uses_placeholder() {
        assert_eq!(description_or_placeholder(None), NO_DESCRIPTION);
        assert_eq!(description_or_placeholder(Some("  ".to_string())), NO_DESCRIPTION);
        assert_eq!(description_or_placeholder(Some("Сюжет".to_string())), "Сюжет");
    }

    #[test]
    fn test_content_kind_of_book() {
        let book = Recommendation {
            kind: RecommendationKind::Book {
                authors: "Лев Толстой".to_string(),
            },
            title: "Война и мир".to_string(),
            genre_label: "Роман".to_string(),
            description: NO_DESCRIPTION.to_string(),
            rating: Rating::Unrated,
            image_url: None,
        };
        assert_eq!(book.content_kind(), ContentKind::Book);
    }

    #[test]
    fn test_volume_info_deserialization() {
        let json = r#"{
            "volumeInfo": {
                "title": "Мастер и Маргарита",
                "authors": ["Михаил Булгаков"],
                "averageRating": 4.5,
                "imageLinks": {"thumbnail": "http://books.google.com/x.jpg"}
            }
        }"#;

        let item: GoogleBookItem = serde_json::from_str(json).unwrap();
        let info = item.volume_info.unwrap();
        assert_eq!(info.title.as_deref(), Some("Мастер и Маргарита"));
        assert_eq!(info.authors, vec!["Михаил Булгаков".to_string()]);
        assert!(info.categories.is_empty());
        assert_eq!(info.average_rating, Some(4.5));
        assert_eq!(
            info.image_links.unwrap().thumbnail.as_deref(),
            Some("http://books.google.com/x.jpg")
        );
    }
}
