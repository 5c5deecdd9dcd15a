use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub subscription_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct NewPaymentEntity {
    pub business_id: Uuid,
    pub subscription_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
}
