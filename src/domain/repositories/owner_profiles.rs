use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::owner_profiles::{OwnerProfileEntity, UpdateReminderSettingsEntity},
    value_objects::reminders::ReminderRecipient,
};

#[async_trait]
#[automock]
pub trait OwnerProfileRepository {
    /// All owners with reminders enabled, joined to their business. Consumed
    /// only by the hourly sweep.
    async fn list_reminder_enabled(&self) -> Result<Vec<ReminderRecipient>>;
    async fn update_reminder_settings(
        &self,
        owner_id: Uuid,
        update: UpdateReminderSettingsEntity,
    ) -> Result<Option<OwnerProfileEntity>>;
}
