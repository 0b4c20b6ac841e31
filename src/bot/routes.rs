use teloxide::{dispatching::UpdateHandler, prelude::*, RequestError};

use super::handlers;
use super::AppContext;

/// Every message goes to the conversation handler; other update kinds are ignored
pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message().endpoint(handlers::handle_message)
}

/// Polls Telegram until Ctrl-C
///
/// Updates from one chat are handled sequentially, different chats concurrently.
pub async fn run(bot: Bot, ctx: AppContext) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![ctx])
        .default_handler(|update| async move {
            tracing::debug!(update_id = ?update.id, "Ignoring unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error occurred while handling a message",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
