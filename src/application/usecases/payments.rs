use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::payments::NewPaymentEntity, repositories::payments::PaymentRepository,
};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_repo: Arc<P>,
}

impl<P> PaymentUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self { payment_repo }
    }

    pub async fn record_payment(&self, new_payment: NewPaymentEntity) -> PaymentResult<Uuid> {
        if new_payment.amount_minor <= 0 {
            warn!(
                business_id = %new_payment.business_id,
                amount_minor = new_payment.amount_minor,
                "payments: non-positive amount rejected"
            );
            return Err(PaymentError::NonPositiveAmount);
        }

        let business_id = new_payment.business_id;
        let payment_id = self
            .payment_repo
            .record_payment(new_payment)
            .await
            .map_err(|err| {
                error!(
                    %business_id,
                    db_error = ?err,
                    "payments: failed to record payment"
                );
                PaymentError::Internal(err)
            })?;

        info!(%payment_id, %business_id, "payments: recorded");
        Ok(payment_id)
    }

    /// Total recorded revenue for the business in minor units.
    pub async fn total_revenue(&self, business_id: Uuid) -> PaymentResult<i64> {
        let payments = self
            .payment_repo
            .list_for_business(business_id)
            .await
            .map_err(PaymentError::Internal)?;

        Ok(payments.iter().map(|payment| payment.amount_minor).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::payments::PaymentEntity, repositories::payments::MockPaymentRepository,
    };
    use chrono::{Local, Utc};
    use mockall::predicate::eq;

    fn new_payment(business_id: Uuid, amount_minor: i64) -> NewPaymentEntity {
        NewPaymentEntity {
            business_id,
            subscription_id: Uuid::new_v4(),
            amount_minor,
            currency: "RUB".to_string(),
            paid_on: Local::now().date_naive(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let usecase = PaymentUseCase::new(Arc::new(MockPaymentRepository::new()));

        let result = usecase
            .record_payment(new_payment(Uuid::new_v4(), 0))
            .await;
        assert!(matches!(result, Err(PaymentError::NonPositiveAmount)));
    }

    #[tokio::test]
    async fn records_valid_payment() {
        let payment_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_payment()
            .times(1)
            .returning(move |_| Box::pin(async move { Ok(payment_id) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo));

        let recorded = usecase
            .record_payment(new_payment(Uuid::new_v4(), 150_000))
            .await
            .unwrap();
        assert_eq!(recorded, payment_id);
    }

    #[tokio::test]
    async fn total_revenue_sums_payments() {
        let business_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentRepository::new();
        let payments: Vec<PaymentEntity> = [100_000, 50_000]
            .into_iter()
            .map(|amount_minor| PaymentEntity {
                id: Uuid::new_v4(),
                business_id,
                subscription_id: Uuid::new_v4(),
                amount_minor,
                currency: "RUB".to_string(),
                paid_on: Local::now().date_naive(),
                notes: None,
                created_at: Utc::now(),
            })
            .collect();
        payment_repo
            .expect_list_for_business()
            .with(eq(business_id))
            .returning(move |_| {
                let payments = payments.clone();
                Box::pin(async move { Ok(payments) })
            });

        let usecase = PaymentUseCase::new(Arc::new(payment_repo));

        assert_eq!(usecase.total_revenue(business_id).await.unwrap(), 150_000);
    }
}
