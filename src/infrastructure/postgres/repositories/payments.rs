use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::payments::{NewPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::payments},
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPool>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_payment(&self, new_payment_entity: NewPaymentEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(payments::table)
            .values(&new_payment_entity)
            .returning(payments::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .filter(payments::business_id.eq(business_id))
            .order(payments::paid_on.desc())
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }
}
