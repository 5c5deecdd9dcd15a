use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub client_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub reminder_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub business_id: Uuid,
    pub client_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}
