/// How the transport should interpret reply text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// Quick-reply keyboard attached to a text reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the user currently sees
    Unchanged,
    /// Rows of suggested reply labels
    Choices(Vec<Vec<String>>),
    Remove,
}

/// Transport-neutral outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text {
        text: String,
        format: TextFormat,
        keyboard: Keyboard,
    },
    /// Photo with an HTML caption; delivered as plain `Html` text if the photo fails
    Photo { url: String, caption: String },
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            format: TextFormat::Plain,
            keyboard: Keyboard::Unchanged,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            format: TextFormat::Html,
            keyboard: Keyboard::Unchanged,
        }
    }

    pub fn with_keyboard(self, keyboard: Keyboard) -> Self {
        match self {
            Reply::Text { text, format, .. } => Reply::Text {
                text,
                format,
                keyboard,
            },
            photo => photo,
        }
    }

    /// Visible text of the reply (caption for photos)
    pub fn text(&self) -> &str {
        match self {
            Reply::Text { text, .. } => text,
            Reply::Photo { caption, .. } => caption,
        }
    }
}
