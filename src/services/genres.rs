use std::sync::Arc;

use crate::services::providers::MovieCatalog;

/// Russian genre names mapped to TMDB genre codes
///
/// Only names in this table can filter a movie search; the live TMDB list is
/// display-only.
pub const GENRE_TABLE: &[(&str, u32)] = &[
    ("боевик", 28),
    ("приключения", 12),
    ("анимация", 16),
    ("комедия", 35),
    ("криминал", 80),
    ("документальный", 99),
    ("драма", 18),
    ("семейный", 10751),
    ("фэнтези", 14),
    ("исторический", 36),
    ("ужасы", 27),
    ("музыка", 10402),
    ("детектив", 9648),
    ("мелодрама", 10749),
    ("фантастика", 878),
    ("триллер", 53),
    ("военный", 10752),
    ("вестерн", 37),
];

/// Display name paired with a provider genre code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreEntry {
    pub name: String,
    pub code: u32,
}

/// Genre names for the genre keyboard and name → code resolution
pub struct GenreRegistry {
    entries: Vec<GenreEntry>,
    catalog: Arc<dyn MovieCatalog>,
}

impl GenreRegistry {
    /// Creates a registry backed by the built-in table
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        let entries = GENRE_TABLE
            .iter()
            .map(|(name, code)| GenreEntry {
                name: name.to_string(),
                code: *code,
            })
            .collect();

        Self { entries, catalog }
    }

    /// Names from the built-in table, in table order
    pub fn static_names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    /// Lists genre names, preferring the live provider list
    ///
    /// Never fails and never returns an empty list: any provider problem falls back
    /// to the built-in table.
    pub async fn list_genre_names(&self) -> Vec<String> {
        match self.catalog.fetch_genre_names().await {
            Ok(names) if !names.is_empty() => names,
            Ok(_) => {
                tracing::warn!(
                    provider = self.catalog.name(),
                    "Provider returned no genres, using built-in list"
                );
                self.static_names()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.catalog.name(),
                    "Genre list fetch failed, using built-in list"
                );
                self.static_names()
            }
        }
    }

    /// Case-insensitive lookup of a provider code
    ///
    /// `None` means "no filter", not an error.
    pub fn resolve_genre_code(&self, name: &str) -> Option<u32> {
        let name = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockMovieCatalog;

    fn registry_with(catalog: MockMovieCatalog) -> GenreRegistry {
        GenreRegistry::new(Arc::new(catalog))
    }

    fn offline_catalog() -> MockMovieCatalog {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_fetch_genre_names()
            .returning(|| Err(AppError::ExternalApi("unreachable".to_string())));
        catalog.expect_name().return_const("tmdb");
        catalog
    }

    #[test]
    fn test_resolve_every_documented_code() {
        let registry = registry_with(MockMovieCatalog::new());
        let expected = [
            ("боевик", 28),
            ("приключения", 12),
            ("анимация", 16),
            ("комедия", 35),
            ("криминал", 80),
            ("документальный", 99),
            ("драма", 18),
            ("семейный", 10751),
            ("фэнтези", 14),
            ("исторический", 36),
            ("ужасы", 27),
            ("музыка", 10402),
            ("детектив", 9648),
            ("мелодрама", 10749),
            ("фантастика", 878),
            ("триллер", 53),
            ("военный", 10752),
            ("вестерн", 37),
        ];

        for (name, code) in expected {
            assert_eq!(registry.resolve_genre_code(name), Some(code), "{}", name);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = registry_with(MockMovieCatalog::new());
        assert_eq!(registry.resolve_genre_code("Комедия"), Some(35));
        assert_eq!(registry.resolve_genre_code("  УЖАСЫ "), Some(27));
    }

    #[test]
    fn test_resolve_unknown_is_absent() {
        let registry = registry_with(MockMovieCatalog::new());
        assert_eq!(registry.resolve_genre_code("мультфильм"), None);
        assert_eq!(registry.resolve_genre_code("comedy"), None);
        assert_eq!(registry.resolve_genre_code(""), None);
    }

    #[test]
    fn test_table_names_are_unique() {
        let registry = registry_with(MockMovieCatalog::new());
        let mut names = registry.static_names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), GENRE_TABLE.len());
    }

    #[tokio::test]
    async fn test_list_falls_back_on_failure() {
        let registry = registry_with(offline_catalog());
        let names = registry.list_genre_names().await;

        assert!(!names.is_empty());
        assert_eq!(names, registry.static_names());
    }

    #[tokio::test]
    async fn test_list_falls_back_on_empty_provider_list() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_fetch_genre_names().returning(|| Ok(Vec::new()));
        catalog.expect_name().return_const("tmdb");

        let registry = registry_with(catalog);
        assert_eq!(registry.list_genre_names().await.len(), GENRE_TABLE.len());
    }

    #[tokio::test]
    async fn test_list_prefers_live_names() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_fetch_genre_names()
            .times(1)
            .returning(|| Ok(vec!["боевик".to_string(), "мультфильм".to_string()]));

        let registry = registry_with(catalog);
        assert_eq!(
            registry.list_genre_names().await,
            vec!["боевик".to_string(), "мультфильм".to_string()]
        );
    }
}
