use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::clients;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = clients)]
pub struct ClientEntity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}
