use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::json;

use crate::domain::repositories::notifications::NotificationSender;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API sender used for owner-facing reminder messages.
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str) -> Self {
        Self::with_api_base(TELEGRAM_API_BASE, bot_token)
    }

    pub fn with_api_base(api_base: &str, bot_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
        }
    }
}

#[async_trait]
impl NotificationSender for TelegramNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/sendMessage", self.api_base))
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("telegram sendMessage failed with status {status}: {body}");
        }

        Ok(())
    }
}
