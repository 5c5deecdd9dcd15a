use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::subscriptions},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPool>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::business_id.eq(business_id))
            .order(subscriptions::end_date.asc())
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .filter(subscriptions::id.eq(subscription_id))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(subscriptions::table)
            .values(&insert_subscription_entity)
            .returning(subscriptions::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn renew(
        &self,
        subscription_id: Uuid,
        new_end_date: NaiveDate,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Clearing reminder_sent_at in the same update keeps the "reminded"
        // flag scoped to the old expiration window.
        let result = update(subscriptions::table)
            .filter(subscriptions::id.eq(subscription_id))
            .set((
                subscriptions::end_date.eq(new_end_date),
                subscriptions::status.eq(SubscriptionStatus::Active.to_string()),
                subscriptions::reminder_sent_at.eq(None::<DateTime<Utc>>),
            ))
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_status(
        &self,
        subscription_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(subscriptions::table)
            .filter(subscriptions::id.eq(subscription_id))
            .set(subscriptions::status.eq(status.to_string()))
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn mark_reminder_sent(
        &self,
        subscription_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(subscriptions::table)
            .filter(subscriptions::id.eq(subscription_id))
            .set(subscriptions::reminder_sent_at.eq(Some(sent_at)))
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
