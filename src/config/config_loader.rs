use anyhow::{Context, Result};

use super::config_model::{Database, DotEnvyConfig, Telegram};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
    };

    let telegram = Telegram {
        bot_token: std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is invalid")?,
    };

    Ok(DotEnvyConfig { database, telegram })
}
