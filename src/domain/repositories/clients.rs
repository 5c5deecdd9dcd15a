use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::clients::ClientEntity;

#[async_trait]
#[automock]
pub trait ClientRepository {
    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<ClientEntity>>;
}
