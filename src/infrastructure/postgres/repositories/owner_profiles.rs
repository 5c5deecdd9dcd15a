use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::owner_profiles::{OwnerProfileEntity, UpdateReminderSettingsEntity},
        repositories::owner_profiles::OwnerProfileRepository,
        value_objects::reminders::ReminderRecipient,
    },
    infrastructure::postgres::{
        postgres_connection::PgPool,
        schema::{businesses, owner_profiles},
    },
};

pub struct OwnerProfilePostgres {
    db_pool: Arc<PgPool>,
}

impl OwnerProfilePostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OwnerProfileRepository for OwnerProfilePostgres {
    async fn list_reminder_enabled(&self) -> Result<Vec<ReminderRecipient>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = owner_profiles::table
            .inner_join(businesses::table)
            .filter(owner_profiles::reminder_enabled.eq(true))
            .select((
                businesses::id,
                owner_profiles::telegram_chat_id,
                owner_profiles::reminder_hour,
                owner_profiles::reminder_lead_days,
            ))
            .load::<(Uuid, i64, i32, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(business_id, chat_id, reminder_hour, lead_days)| ReminderRecipient {
                    business_id,
                    chat_id,
                    reminder_hour,
                    lead_days,
                },
            )
            .collect())
    }

    async fn update_reminder_settings(
        &self,
        owner_id: Uuid,
        settings: UpdateReminderSettingsEntity,
    ) -> Result<Option<OwnerProfileEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(owner_profiles::table)
            .filter(owner_profiles::user_id.eq(owner_id))
            .set(&settings)
            .returning(OwnerProfileEntity::as_returning())
            .get_result::<OwnerProfileEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
