//! Per-chat dialog: content type, optional genre, fetch, reply, reset.
//!
//! ```text
//! Idle ──/recommend──▶ AwaitingContentType ──any text──▶ Idle (reply sent)
//!   └───/genre──▶ AwaitingGenre ──any text──▶ AwaitingContentType
//! ```
use std::sync::Arc;

use crate::{
    models::{ContentKind, ConversationState, Keyboard, Reply, SessionId, Step},
    services::{
        genres::GenreRegistry,
        recommendations::Selector,
        render::{self, BOOK_LABEL, MOVIE_LABEL},
        session::SessionStore,
    },
};

/// Maximum number of genre buttons offered at once
pub const GENRE_CHOICE_LIMIT: usize = 15;

const GREETING_TEXT: &str = "👋 Привет! Я бот, который рекомендует фильмы и книги.\n\n\
    Используйте следующие команды:\n\
    /recommend - получить случайную рекомендацию\n\
    /genre - выбрать жанр для рекомендаций\n\
    /help - инструкция по использованию";

const HELP_TEXT: &str = "📚 Инструкция по использованию бота:\n\n\
    1. /recommend - получить случайную рекомендацию фильма или книги.\n\
    2. /genre - выбрать жанр для рекомендаций. После выбора жанра вы можете \
    указать, хотите ли вы получить рекомендацию фильма или книги.\n\
    3. /help - показать эту инструкцию.\n\n\
    Наслаждайтесь рекомендациями! 🎬📖";

const UNKNOWN_COMMAND_TEXT: &str = "Я не понимаю эту команду. Пожалуйста, используйте:\n\
    /recommend - получить рекомендацию\n\
    /genre - выбрать жанр\n\
    /help - инструкция по использованию";

const CONTENT_TYPE_PROMPT: &str = "Что вы хотите получить в рекомендации?";
const GENRE_PROMPT: &str = "Выберите жанр:";
const SEARCHING_TEXT: &str = "Ищу подходящую рекомендацию... 🔍";
const TRY_AGAIN_HINT: &str = "Попробуйте другой жанр или тип контента.";

/// Commands understood in every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Recommend,
    Genre,
}

impl Command {
    /// Parses `/name` or `/name@botname`; arguments after the command are ignored
    ///
    /// The `@botname` suffix is not checked here, see [`addressed_bot`].
    pub fn parse(text: &str) -> Option<Self> {
        let word = command_word(text)?;
        let name = word.split('@').next().unwrap_or(word);

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "recommend" => Some(Command::Recommend),
            "genre" => Some(Command::Genre),
            _ => None,
        }
    }
}

fn command_word(text: &str) -> Option<&str> {
    text.trim().strip_prefix('/')?.split_whitespace().next()
}

/// Bot username a command is explicitly addressed to (`/genre@picks_bot`)
pub fn addressed_bot(text: &str) -> Option<&str> {
    command_word(text)?
        .split_once('@')
        .map(|(_, bot)| bot)
        .filter(|bot| !bot.is_empty())
}

/// Maps a content-type answer; anything unrecognized means "either"
pub fn parse_content_kind(answer: &str) -> Option<ContentKind> {
    let answer = answer.trim().to_lowercase();
    if answer == MOVIE_LABEL.to_lowercase() {
        Some(ContentKind::Movie)
    } else if answer == BOOK_LABEL.to_lowercase() {
        Some(ContentKind::Book)
    } else {
        None
    }
}

/// Conversation state machine over a [`SessionStore`]
pub struct Conversation {
    genres: Arc<GenreRegistry>,
    selector: Arc<Selector>,
    sessions: Arc<dyn SessionStore>,
    /// Own username; commands addressed to other bots in group chats are ignored
    bot_username: Option<String>,
}

impl Conversation {
    pub fn new(
        genres: Arc<GenreRegistry>,
        selector: Arc<Selector>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            genres,
            selector,
            sessions,
            bot_username: None,
        }
    }

    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    fn is_for_another_bot(&self, text: &str) -> bool {
        match (&self.bot_username, addressed_bot(text)) {
            (Some(own), Some(target)) => !own.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    /// Handles one inbound message; `None` stands for a message without text
    pub async fn handle(&self, session: SessionId, text: Option<&str>) -> Vec<Reply> {
        let state = self.sessions.get(session).await;
        let previous = state.step;

        let (next, replies) = self.transition(state, text).await;

        tracing::debug!(
            session = %session,
            from = ?previous,
            to = ?next.step,
            replies = replies.len(),
            "Conversation step"
        );

        self.sessions.put(session, next).await;
        replies
    }

    async fn transition(
        &self,
        state: ConversationState,
        text: Option<&str>,
    ) -> (ConversationState, Vec<Reply>) {
        let Some(text) = text else {
            return (state, vec![Reply::plain(UNKNOWN_COMMAND_TEXT)]);
        };

        if self.is_for_another_bot(text) {
            tracing::debug!("Command addressed to another bot, ignoring");
            return (state, Vec::new());
        }

        if let Some(command) = Command::parse(text) {
            return self.on_command(command, state).await;
        }

        match state.step {
            Step::Idle => (state, vec![Reply::plain(UNKNOWN_COMMAND_TEXT)]),
            Step::AwaitingGenre => Self::on_genre(text),
            Step::AwaitingContentType => self.on_content_type(text, state.chosen_genre).await,
        }
    }

    async fn on_command(
        &self,
        command: Command,
        state: ConversationState,
    ) -> (ConversationState, Vec<Reply>) {
        match command {
            Command::Start => (state, vec![Reply::plain(GREETING_TEXT)]),
            Command::Help => (state, vec![Reply::plain(HELP_TEXT)]),
            Command::Recommend => (
                ConversationState::awaiting_content_type(None),
                vec![Reply::plain(CONTENT_TYPE_PROMPT).with_keyboard(render::content_type_keyboard())],
            ),
            Command::Genre => {
                let mut names = self.genres.list_genre_names().await;
                names.truncate(GENRE_CHOICE_LIMIT);

                (
                    ConversationState::awaiting_genre(),
                    vec![Reply::plain(GENRE_PROMPT).with_keyboard(render::genre_keyboard(&names))],
                )
            }
        }
    }

    fn on_genre(text: &str) -> (ConversationState, Vec<Reply>) {
        let genre = text.trim().to_lowercase();
        let prompt = format!("Выбран жанр: {}. {}", genre, CONTENT_TYPE_PROMPT);

        (
            ConversationState::awaiting_content_type(Some(genre)),
            vec![Reply::plain(prompt).with_keyboard(render::content_type_keyboard())],
        )
    }

    /// Fetches and renders a recommendation; always ends back in idle
    async fn on_content_type(
        &self,
        text: &str,
        genre: Option<String>,
    ) -> (ConversationState, Vec<Reply>) {
        let answer = text.trim().to_lowercase();
        let content = parse_content_kind(&answer);

        let searching = match &genre {
            Some(genre) => format!("Ищу {} в жанре {}... 🔍", answer, genre),
            None => SEARCHING_TEXT.to_string(),
        };
        let mut replies = vec![Reply::plain(searching).with_keyboard(Keyboard::Remove)];

        let lookup = self.selector.select(genre.as_deref(), content).await;

        match lookup.into_recommendation() {
            Some(recommendation) => {
                tracing::info!(
                    kind = ?recommendation.content_kind(),
                    title = %recommendation.title,
                    "Recommendation found"
                );
                replies.push(render::recommendation_reply(&recommendation));
            }
            None => replies.push(Reply::plain(not_found_text(genre.as_deref(), content))),
        }

        (ConversationState::default(), replies)
    }
}

fn not_found_text(genre: Option<&str>, content: Option<ContentKind>) -> String {
    match genre {
        Some(genre) => {
            let what = match content {
                Some(ContentKind::Movie) => "фильм",
                Some(ContentKind::Book) => "книгу",
                None => "рекомендацию",
            };
            format!(
                "К сожалению, я не смог найти {} в жанре '{}'. {}",
                what, genre, TRY_AGAIN_HINT
            )
        }
        None => format!(
            "К сожалению, я не смог найти подходящую рекомендацию. {}",
            TRY_AGAIN_HINT
        ),
    }
}
