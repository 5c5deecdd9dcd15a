use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{NewPaymentEntity, PaymentEntity};

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn record_payment(&self, new_payment_entity: NewPaymentEntity) -> Result<Uuid>;
    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<PaymentEntity>>;
}
