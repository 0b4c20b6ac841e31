use teloxide::{
    payloads::{SendMessageSetters, SendPhotoSetters},
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode, ReplyMarkup},
};
use tracing::Instrument;

use crate::{
    middleware::{make_span_with_request_id, RequestId},
    models::{Keyboard, Reply, SessionId, TextFormat},
};

use super::AppContext;

/// Runs one inbound message through the conversation and delivers the replies
pub async fn handle_message(bot: Bot, msg: Message, ctx: AppContext) -> ResponseResult<()> {
    let session = SessionId(msg.chat.id.0);
    let request_id = RequestId::new();
    let span = make_span_with_request_id(&request_id, session);

    process_message(&bot, &msg, &ctx, session)
        .instrument(span)
        .await
}

async fn process_message(
    bot: &Bot,
    msg: &Message,
    ctx: &AppContext,
    session: SessionId,
) -> ResponseResult<()> {
    tracing::info!(has_text = msg.text().is_some(), "Message received");

    let replies = ctx.conversation.handle(session, msg.text()).await;
    for reply in replies {
        tracing::debug!(
            photo = matches!(reply, Reply::Photo { .. }),
            chars = reply.text().chars().count(),
            "Sending reply"
        );
        send_reply(bot, msg.chat.id, reply).await?;
    }

    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    match reply {
        Reply::Text {
            text,
            format,
            keyboard,
        } => {
            let mut request = bot.send_message(chat_id, text);
            if format == TextFormat::Html {
                request = request.parse_mode(ParseMode::Html);
            }
            if let Some(markup) = reply_markup(keyboard) {
                request = request.reply_markup(markup);
            }
            request.await?;
        }
        Reply::Photo { url, caption } => {
            // Telegram fetches the image itself; dead links or oversized captions fail here
            if let Err(e) = send_photo(bot, chat_id, &url, &caption).await {
                tracing::warn!(error = %e, url = %url, "Photo delivery failed, sending text only");
                bot.send_message(chat_id, caption)
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
        }
    }

    Ok(())
}

async fn send_photo(bot: &Bot, chat_id: ChatId, url: &str, caption: &str) -> anyhow::Result<()> {
    let url = reqwest::Url::parse(url)?;

    bot.send_photo(chat_id, InputFile::url(url))
        .caption(caption)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

fn reply_markup(keyboard: Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::Unchanged => None,
        Keyboard::Choices(rows) => {
            let buttons = rows
                .into_iter()
                .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>());
            Some(KeyboardMarkup::new(buttons).resize_keyboard().into())
        }
        Keyboard::Remove => Some(KeyboardRemove::new().into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CHAT: ChatId = ChatId(5);

    fn test_bot(server: &MockServer) -> Bot {
        Bot::new("1:x").set_api_url(reqwest::Url::parse(&server.uri()).unwrap())
    }

    fn sent_message() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 0,
                "chat": {"id": 5, "type": "private", "first_name": "Test"},
                "text": "ok"
            }
        }))
    }

    fn photo_reply() -> Reply {
        Reply::Photo {
            url: "https://image.tmdb.org/t/p/w500/x.jpg".to_string(),
            caption: "<b>T</b>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rejected_photo_falls_back_to_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/sendPhoto$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: wrong file identifier/HTTP URL specified"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/sendMessage$"))
            .and(body_partial_json(json!({
                "chat_id": 5,
                "text": "<b>T</b>",
                "parse_mode": "HTML"
            })))
            .respond_with(sent_message())
            .expect(1)
            .mount(&server)
            .await;

        let result = send_reply(&test_bot(&server), CHAT, photo_reply()).await;

        assert!(result.is_ok());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_delivered_photo_sends_no_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/sendPhoto$"))
            .respond_with(sent_message())
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/sendMessage$"))
            .respond_with(sent_message())
            .expect(0)
            .mount(&server)
            .await;

        let result = send_reply(&test_bot(&server), CHAT, photo_reply()).await;

        assert!(result.is_ok());
        server.verify().await;
    }

    #[test]
    fn test_unchanged_keyboard_has_no_markup() {
        assert!(reply_markup(Keyboard::Unchanged).is_none());
    }

    #[test]
    fn test_remove_keyboard_markup() {
        assert!(matches!(
            reply_markup(Keyboard::Remove),
            Some(ReplyMarkup::KeyboardRemove(_))
        ));
    }

    #[test]
    fn test_choice_rows_are_kept() {
        let markup = reply_markup(Keyboard::Choices(vec![
            vec!["Фильм".to_string(), "Книга".to_string()],
            vec!["Любой".to_string()],
        ]));

        match markup {
            Some(ReplyMarkup::Keyboard(keyboard)) => {
                assert_eq!(keyboard.keyboard.len(), 2);
                assert_eq!(keyboard.keyboard[0].len(), 2);
                assert_eq!(keyboard.keyboard[0][0].text, "Фильм");
                assert_eq!(keyboard.keyboard[1][0].text, "Любой");
            }
            other => panic!("expected reply keyboard, got {:?}", other),
        }
    }
}
