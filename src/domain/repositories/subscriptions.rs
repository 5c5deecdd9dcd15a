use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<SubscriptionEntity>>;
    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;
    async fn create(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<Uuid>;
    /// Extends the end date, reactivates the subscription and clears the
    /// reminder flag so the new expiration window is reminded again.
    async fn renew(
        &self,
        subscription_id: Uuid,
        new_end_date: NaiveDate,
    ) -> Result<Option<SubscriptionEntity>>;
    async fn update_status(
        &self,
        subscription_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Option<SubscriptionEntity>>;
    /// Returns `None` when the subscription vanished between read and mark.
    async fn mark_reminder_sent(
        &self,
        subscription_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<Option<SubscriptionEntity>>;
}
