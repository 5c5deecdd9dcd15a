use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::owner_profiles;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = owner_profiles)]
#[diesel(primary_key(user_id))]
pub struct OwnerProfileEntity {
    pub user_id: Uuid,
    pub telegram_chat_id: i64,
    pub full_name: Option<String>,
    pub reminder_enabled: bool,
    pub reminder_hour: i32,
    pub reminder_lead_days: i32,
    pub created_at: DateTime<Utc>,
}

/// Partial update for an owner's reminder settings. `None` fields are left
/// untouched by the changeset.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = owner_profiles)]
pub struct UpdateReminderSettingsEntity {
    pub reminder_enabled: Option<bool>,
    pub reminder_hour: Option<i32>,
    pub reminder_lead_days: Option<i32>,
}
