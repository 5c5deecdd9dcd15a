use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::owner_profiles::{OwnerProfileEntity, UpdateReminderSettingsEntity},
    repositories::owner_profiles::OwnerProfileRepository,
    value_objects::reminders::ReminderSettingsUpdate,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reminder hour must be between 0 and 23")]
    HourOutOfRange,
    #[error("reminder lead time must be between 1 and 30 days")]
    LeadDaysOutOfRange,
    #[error("at least one setting must be provided")]
    EmptyUpdate,
    #[error("owner profile not found")]
    OwnerNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Settings-update boundary for owner reminder preferences. The hour and
/// lead-day bounds are enforced here so the scheduler can trust stored rows.
pub struct ReminderSettingsUseCase<O>
where
    O: OwnerProfileRepository + Send + Sync + 'static,
{
    owner_repo: Arc<O>,
}

impl<O> ReminderSettingsUseCase<O>
where
    O: OwnerProfileRepository + Send + Sync + 'static,
{
    pub fn new(owner_repo: Arc<O>) -> Self {
        Self { owner_repo }
    }

    pub async fn update_reminder_settings(
        &self,
        owner_id: Uuid,
        update: ReminderSettingsUpdate,
    ) -> SettingsResult<OwnerProfileEntity> {
        if update.is_empty() {
            let err = SettingsError::EmptyUpdate;
            warn!(%owner_id, "reminder_settings: empty update rejected");
            return Err(err);
        }
        if let Some(hour) = update.reminder_hour {
            if !(0..=23).contains(&hour) {
                warn!(%owner_id, hour, "reminder_settings: hour out of range");
                return Err(SettingsError::HourOutOfRange);
            }
        }
        if let Some(lead_days) = update.lead_days {
            if !(1..=30).contains(&lead_days) {
                warn!(%owner_id, lead_days, "reminder_settings: lead days out of range");
                return Err(SettingsError::LeadDaysOutOfRange);
            }
        }

        let changeset = UpdateReminderSettingsEntity {
            reminder_enabled: update.enabled,
            reminder_hour: update.reminder_hour,
            reminder_lead_days: update.lead_days,
        };

        let updated = self
            .owner_repo
            .update_reminder_settings(owner_id, changeset)
            .await
            .map_err(SettingsError::Internal)?
            .ok_or(SettingsError::OwnerNotFound)?;

        info!(
            %owner_id,
            reminder_enabled = updated.reminder_enabled,
            reminder_hour = updated.reminder_hour,
            reminder_lead_days = updated.reminder_lead_days,
            "reminder_settings: updated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::owner_profiles::MockOwnerProfileRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_profile(owner_id: Uuid, hour: i32, lead_days: i32) -> OwnerProfileEntity {
        OwnerProfileEntity {
            user_id: owner_id,
            telegram_chat_id: 42,
            full_name: Some("Olga".to_string()),
            reminder_enabled: true,
            reminder_hour: hour,
            reminder_lead_days: lead_days,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn rejects_hour_out_of_range() {
        let usecase = ReminderSettingsUseCase::new(Arc::new(MockOwnerProfileRepository::new()));

        let update = ReminderSettingsUpdate {
            reminder_hour: Some(24),
            ..Default::default()
        };
        let result = usecase
            .update_reminder_settings(Uuid::new_v4(), update)
            .await;
        assert!(matches!(result, Err(SettingsError::HourOutOfRange)));
    }

    #[tokio::test]
    async fn rejects_lead_days_out_of_range() {
        let usecase = ReminderSettingsUseCase::new(Arc::new(MockOwnerProfileRepository::new()));

        for lead_days in [0, 31] {
            let update = ReminderSettingsUpdate {
                lead_days: Some(lead_days),
                ..Default::default()
            };
            let result = usecase
                .update_reminder_settings(Uuid::new_v4(), update)
                .await;
            assert!(matches!(result, Err(SettingsError::LeadDaysOutOfRange)));
        }
    }

    #[tokio::test]
    async fn rejects_empty_update() {
        let usecase = ReminderSettingsUseCase::new(Arc::new(MockOwnerProfileRepository::new()));

        let result = usecase
            .update_reminder_settings(Uuid::new_v4(), ReminderSettingsUpdate::default())
            .await;
        assert!(matches!(result, Err(SettingsError::EmptyUpdate)));
    }

    #[tokio::test]
    async fn valid_update_reaches_the_store() {
        let owner_id = Uuid::new_v4();

        let mut owner_repo = MockOwnerProfileRepository::new();
        owner_repo
            .expect_update_reminder_settings()
            .with(
                eq(owner_id),
                mockall::predicate::function(|c: &UpdateReminderSettingsEntity| {
                    c.reminder_hour == Some(9) && c.reminder_lead_days == Some(5)
                }),
            )
            .times(1)
            .returning(move |_, _| {
                let updated = sample_profile(owner_id, 9, 5);
                Box::pin(async move { Ok(Some(updated)) })
            });

        let usecase = ReminderSettingsUseCase::new(Arc::new(owner_repo));

        let update = ReminderSettingsUpdate {
            reminder_hour: Some(9),
            lead_days: Some(5),
            ..Default::default()
        };
        let updated = usecase
            .update_reminder_settings(owner_id, update)
            .await
            .unwrap();
        assert_eq!(updated.reminder_hour, 9);
        assert_eq!(updated.reminder_lead_days, 5);
    }

    #[tokio::test]
    async fn missing_owner_maps_to_not_found() {
        let mut owner_repo = MockOwnerProfileRepository::new();
        owner_repo
            .expect_update_reminder_settings()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = ReminderSettingsUseCase::new(Arc::new(owner_repo));

        let update = ReminderSettingsUpdate {
            enabled: Some(false),
            ..Default::default()
        };
        let result = usecase
            .update_reminder_settings(Uuid::new_v4(), update)
            .await;
        assert!(matches!(result, Err(SettingsError::OwnerNotFound)));
    }
}
