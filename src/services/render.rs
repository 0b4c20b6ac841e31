//! Turns recommendations and choice lists into transport-neutral replies.
use teloxide::utils::html;

use crate::models::{Keyboard, Recommendation, RecommendationKind, Reply};

/// Labels of the content-type keyboard
pub const MOVIE_LABEL: &str = "Фильм";
pub const BOOK_LABEL: &str = "Книга";
pub const ANY_LABEL: &str = "Любой";

/// Keeps a photo caption inside Telegram's 1024-character limit
const CAPTION_DESCRIPTION_LIMIT: usize = 600;

/// Photo reply when the recommendation has an image, HTML text otherwise
///
/// Only the caption gets a shortened description; text replies carry it in full.
pub fn recommendation_reply(recommendation: &Recommendation) -> Reply {
    match &recommendation.image_url {
        Some(url) => {
            let description = truncate_chars(&recommendation.description, CAPTION_DESCRIPTION_LIMIT);
            Reply::Photo {
                url: url.clone(),
                caption: format_recommendation(recommendation, &description),
            }
        }
        None => Reply::html(recommendation_text(recommendation)),
    }
}

pub fn recommendation_text(recommendation: &Recommendation) -> String {
    format_recommendation(recommendation, &recommendation.description)
}

fn format_recommendation(recommendation: &Recommendation, description: &str) -> String {
    let (header, authors_line) = match &recommendation.kind {
        RecommendationKind::Movie => ("🎬 <b>Рекомендация фильма</b>", String::new()),
        RecommendationKind::Book { authors } => (
            "📚 <b>Рекомендация книги</b>",
            format!("\n<b>Автор</b>: {}", html::escape(authors)),
        ),
    };

    format!(
        "{}\n\n<b>Название</b>: {}{}\n<b>Жанр</b>: {}\n<b>Описание</b>: {}\n<b>Рейтинг</b>: {}/10",
        header,
        html::escape(&recommendation.title),
        authors_line,
        html::escape(&recommendation.genre_label),
        html::escape(description),
        recommendation.rating,
    )
}

/// Movie / book on the first row, "any" on the second
pub fn content_type_keyboard() -> Keyboard {
    Keyboard::Choices(vec![
        vec![MOVIE_LABEL.to_string(), BOOK_LABEL.to_string()],
        vec![ANY_LABEL.to_string()],
    ])
}

/// Two capitalized genre names per row
pub fn genre_keyboard(names: &[String]) -> Keyboard {
    Keyboard::Choices(
        names
            .chunks(2)
            .map(|row| row.iter().map(|name| capitalize(name)).collect())
            .collect(),
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push('…');
    truncated
}
