use recommend_bot::{
    bot::{run, AppContext},
    config::Config,
};
use teloxide::{requests::Requester, Bot};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let bot = Bot::new(&config.telegram_bot_token);
    let me = bot.get_me().await?;

    // Initialize application context
    let ctx = AppContext::from_config(&config, me.user.username.clone())?;

    tracing::info!(username = ?me.user.username, "Bot is polling for updates");
    run(bot, ctx).await;

    Ok(())
}
