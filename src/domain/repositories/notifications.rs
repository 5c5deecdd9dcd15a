use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Delivers a text message to one chat. Failures are transient from the
/// caller's point of view; the next sweep retries naturally.
#[async_trait]
#[automock]
pub trait NotificationSender {
    async fn send(&self, chat_id: i64, text: &str) -> Result<()>;
}
