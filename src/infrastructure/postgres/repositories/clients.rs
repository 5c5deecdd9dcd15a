use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{entities::clients::ClientEntity, repositories::clients::ClientRepository},
    infrastructure::postgres::{postgres_connection::PgPool, schema::clients},
};

pub struct ClientPostgres {
    db_pool: Arc<PgPool>,
}

impl ClientPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClientRepository for ClientPostgres {
    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = clients::table
            .filter(clients::business_id.eq(business_id))
            .order(clients::created_at.asc())
            .select(ClientEntity::as_select())
            .load::<ClientEntity>(&mut conn)?;

        Ok(results)
    }
}
