use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription not found")]
    NotFound,
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("start date must not be after end date")]
    InvalidPeriod,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type SubscriptionResult<T> = std::result::Result<T, SubscriptionError>;

#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub business_id: Uuid,
    pub client_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// Owner-driven subscription lifecycle: creation, renewal and explicit
/// status transitions. Expiry itself is not driven from here; the reminder
/// core only reads stored statuses.
pub struct SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
}

impl<S> SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>) -> Self {
        Self { subscription_repo }
    }

    pub async fn create_subscription(&self, create: CreateSubscription) -> SubscriptionResult<Uuid> {
        if create.amount_minor <= 0 {
            warn!(
                business_id = %create.business_id,
                amount_minor = create.amount_minor,
                "subscriptions: non-positive amount rejected"
            );
            return Err(SubscriptionError::NonPositiveAmount);
        }
        if create.start_date > create.end_date {
            warn!(
                business_id = %create.business_id,
                start_date = %create.start_date,
                end_date = %create.end_date,
                "subscriptions: start after end rejected"
            );
            return Err(SubscriptionError::InvalidPeriod);
        }

        let subscription_id = self
            .subscription_repo
            .create(InsertSubscriptionEntity {
                business_id: create.business_id,
                client_id: create.client_id,
                amount_minor: create.amount_minor,
                currency: create.currency,
                start_date: create.start_date,
                end_date: create.end_date,
                status: SubscriptionStatus::Active.to_string(),
            })
            .await
            .map_err(|err| {
                error!(
                    business_id = %create.business_id,
                    db_error = ?err,
                    "subscriptions: failed to create subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(
            %subscription_id,
            business_id = %create.business_id,
            "subscriptions: created"
        );
        Ok(subscription_id)
    }

    /// Extends the expiration date and reactivates the subscription. The
    /// store clears `reminder_sent_at` in the same update, otherwise a
    /// renewed subscription would stay "already reminded" forever.
    pub async fn renew_subscription(
        &self,
        subscription_id: Uuid,
        new_end_date: chrono::NaiveDate,
    ) -> SubscriptionResult<SubscriptionEntity> {
        let renewed = self
            .subscription_repo
            .renew(subscription_id, new_end_date)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to renew"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or(SubscriptionError::NotFound)?;

        info!(
            %subscription_id,
            new_end_date = %new_end_date,
            "subscriptions: renewed"
        );
        Ok(renewed)
    }

    pub async fn extend_subscription(
        &self,
        subscription_id: Uuid,
        additional_days: i64,
    ) -> SubscriptionResult<SubscriptionEntity> {
        let current = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(SubscriptionError::Internal)?
            .ok_or(SubscriptionError::NotFound)?;

        let new_end_date = current.end_date + Duration::days(additional_days);
        self.renew_subscription(subscription_id, new_end_date).await
    }

    pub async fn update_status(
        &self,
        subscription_id: Uuid,
        status: SubscriptionStatus,
    ) -> SubscriptionResult<SubscriptionEntity> {
        let updated = self
            .subscription_repo
            .update_status(subscription_id, status)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    status = %status,
                    db_error = ?err,
                    "subscriptions: failed to update status"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or(SubscriptionError::NotFound)?;

        info!(%subscription_id, status = %status, "subscriptions: status updated");
        Ok(updated)
    }

    pub async fn status_counts(
        &self,
        business_id: Uuid,
    ) -> SubscriptionResult<HashMap<SubscriptionStatus, usize>> {
        let subscriptions = self
            .subscription_repo
            .list_for_business(business_id)
            .await
            .map_err(SubscriptionError::Internal)?;

        let mut counts: HashMap<SubscriptionStatus, usize> = SubscriptionStatus::ALL
            .into_iter()
            .map(|status| (status, 0))
            .collect();
        for subscription in &subscriptions {
            *counts
                .entry(SubscriptionStatus::from_str(&subscription.status))
                .or_default() += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::subscriptions::MockSubscriptionRepository;
    use chrono::{Local, Utc};
    use mockall::predicate::eq;

    fn sample_subscription(status: SubscriptionStatus) -> SubscriptionEntity {
        let today = Local::now().date_naive();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            amount_minor: 150_000,
            currency: "RUB".to_string(),
            start_date: today - Duration::days(30),
            end_date: today + Duration::days(5),
            status: status.to_string(),
            reminder_sent_at: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount() {
        let usecase = SubscriptionUseCase::new(Arc::new(MockSubscriptionRepository::new()));
        let today = Local::now().date_naive();

        let result = usecase
            .create_subscription(CreateSubscription {
                business_id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                amount_minor: 0,
                currency: "RUB".to_string(),
                start_date: today,
                end_date: today + Duration::days(30),
            })
            .await;
        assert!(matches!(result, Err(SubscriptionError::NonPositiveAmount)));
    }

    #[tokio::test]
    async fn create_rejects_inverted_period() {
        let usecase = SubscriptionUseCase::new(Arc::new(MockSubscriptionRepository::new()));
        let today = Local::now().date_naive();

        let result = usecase
            .create_subscription(CreateSubscription {
                business_id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                amount_minor: 100,
                currency: "RUB".to_string(),
                start_date: today,
                end_date: today - Duration::days(1),
            })
            .await;
        assert!(matches!(result, Err(SubscriptionError::InvalidPeriod)));
    }

    #[tokio::test]
    async fn created_subscriptions_start_active() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_create()
            .withf(|insert: &InsertSubscriptionEntity| insert.status == "active")
            .times(1)
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo));
        let today = Local::now().date_naive();

        usecase
            .create_subscription(CreateSubscription {
                business_id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                amount_minor: 150_000,
                currency: "RUB".to_string(),
                start_date: today,
                end_date: today + Duration::days(30),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn renew_clears_the_reminder_flag() {
        let subscription_id = Uuid::new_v4();
        let today = Local::now().date_naive();
        let new_end_date = today + Duration::days(30);

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_renew()
            .with(eq(subscription_id), eq(new_end_date))
            .times(1)
            .returning(move |id, end_date| {
                let mut renewed = sample_subscription(SubscriptionStatus::Expired);
                renewed.id = id;
                renewed.end_date = end_date;
                renewed.status = SubscriptionStatus::Active.to_string();
                renewed.reminder_sent_at = None;
                Box::pin(async move { Ok(Some(renewed)) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo));

        let renewed = usecase
            .renew_subscription(subscription_id, new_end_date)
            .await
            .unwrap();
        assert_eq!(renewed.status, "active");
        assert!(renewed.reminder_sent_at.is_none());
        assert_eq!(renewed.end_date, new_end_date);
    }

    #[tokio::test]
    async fn extend_adds_days_to_the_current_end_date() {
        let subscription_id = Uuid::new_v4();
        let current = sample_subscription(SubscriptionStatus::Active);
        let expected_end = current.end_date + Duration::days(10);

        let mut subscription_repo = MockSubscriptionRepository::new();
        let found = current.clone();
        subscription_repo
            .expect_find_by_id()
            .with(eq(subscription_id))
            .times(1)
            .returning(move |_| {
                let found = found.clone();
                Box::pin(async move { Ok(Some(found)) })
            });
        subscription_repo
            .expect_renew()
            .with(eq(subscription_id), eq(expected_end))
            .times(1)
            .returning(move |id, end_date| {
                let mut renewed = sample_subscription(SubscriptionStatus::Active);
                renewed.id = id;
                renewed.end_date = end_date;
                renewed.reminder_sent_at = None;
                Box::pin(async move { Ok(Some(renewed)) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo));

        let renewed = usecase
            .extend_subscription(subscription_id, 10)
            .await
            .unwrap();
        assert_eq!(renewed.end_date, expected_end);
    }

    #[tokio::test]
    async fn status_counts_cover_every_status() {
        let business_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let listed = vec![
            sample_subscription(SubscriptionStatus::Active),
            sample_subscription(SubscriptionStatus::Active),
            sample_subscription(SubscriptionStatus::Frozen),
        ];
        subscription_repo
            .expect_list_for_business()
            .with(eq(business_id))
            .returning(move |_| {
                let listed = listed.clone();
                Box::pin(async move { Ok(listed) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo));

        let counts = usecase.status_counts(business_id).await.unwrap();
        assert_eq!(counts[&SubscriptionStatus::Active], 2);
        assert_eq!(counts[&SubscriptionStatus::Frozen], 1);
        assert_eq!(counts[&SubscriptionStatus::Expired], 0);
        assert_eq!(counts[&SubscriptionStatus::Cancelled], 0);
    }

    #[tokio::test]
    async fn missing_subscription_maps_to_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_update_status()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo));

        let result = usecase
            .update_status(Uuid::new_v4(), SubscriptionStatus::Frozen)
            .await;
        assert!(matches!(result, Err(SubscriptionError::NotFound)));
    }
}
