use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, Utc};
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    repositories::{
        clients::ClientRepository, notifications::NotificationSender,
        owner_profiles::OwnerProfileRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

const UNKNOWN_CLIENT: &str = "Unknown client";

/// Expiration-reminder core: computes each owner's due set, sends one
/// aggregated notification and marks the included subscriptions so a later
/// sweep does not repeat them.
pub struct ReminderUseCase<S, C, O, N>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
    O: OwnerProfileRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    client_repo: Arc<C>,
    owner_repo: Arc<O>,
    notifier: Arc<N>,
}

impl<S, C, O, N> ReminderUseCase<S, C, O, N>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
    O: OwnerProfileRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        client_repo: Arc<C>,
        owner_repo: Arc<O>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            subscription_repo,
            client_repo,
            owner_repo,
            notifier,
        }
    }

    /// One pass over every reminder-enabled owner. Owners whose configured
    /// hour differs from `current_hour` are skipped without side effects; a
    /// failure for one owner is logged and never aborts the rest.
    pub async fn run_hourly_sweep(&self, current_hour: u32) -> Result<()> {
        let recipients = self.owner_repo.list_reminder_enabled().await.map_err(|err| {
            error!(error = ?err, "reminders: failed to load reminder-enabled owners");
            err
        })?;

        for recipient in recipients {
            if recipient.reminder_hour != current_hour as i32 {
                trace!(
                    business_id = %recipient.business_id,
                    reminder_hour = recipient.reminder_hour,
                    current_hour,
                    "reminders: not this owner's hour"
                );
                continue;
            }

            if let Err(err) = self
                .send_reminder_for_business(
                    recipient.business_id,
                    recipient.chat_id,
                    recipient.lead_days.into(),
                )
                .await
            {
                error!(
                    business_id = %recipient.business_id,
                    chat_id = recipient.chat_id,
                    error = ?err,
                    "reminders: sweep failed for business; continuing with remaining owners"
                );
            }
        }

        Ok(())
    }

    /// Sends one aggregated reminder for every due subscription of the
    /// business, then marks each one as reminded. Shared by the hourly sweep
    /// and the manual "/remind" triggers, which bypass the hour check.
    pub async fn send_reminder_for_business(
        &self,
        business_id: Uuid,
        chat_id: i64,
        lead_days: i64,
    ) -> Result<()> {
        let subscriptions = self
            .subscription_repo
            .list_for_business(business_id)
            .await
            .map_err(|err| {
                error!(
                    %business_id,
                    db_error = ?err,
                    "reminders: failed to list subscriptions"
                );
                err
            })?;

        let today = Local::now().date_naive();
        let due = due_for_reminder(&subscriptions, today, lead_days);
        if due.is_empty() {
            debug!(%business_id, "reminders: nothing due");
            return Ok(());
        }

        let client_names: HashMap<Uuid, String> = self
            .client_repo
            .list_for_business(business_id)
            .await
            .map_err(|err| {
                error!(
                    %business_id,
                    db_error = ?err,
                    "reminders: failed to list clients"
                );
                err
            })?
            .into_iter()
            .map(|client| (client.id, client.full_name))
            .collect();

        let message = render_reminder_message(&due, &client_names, lead_days);
        // No markings on a failed send: the invariant is "marked iff delivered".
        self.notifier.send(chat_id, &message).await.map_err(|err| {
            error!(
                %business_id,
                chat_id,
                error = ?err,
                "reminders: failed to send notification"
            );
            err
        })?;

        let sent_at = Utc::now();
        for subscription in &due {
            match self
                .subscription_repo
                .mark_reminder_sent(subscription.id, sent_at)
                .await
            {
                Ok(Some(_)) => {
                    debug!(subscription_id = %subscription.id, "reminders: marked reminder sent");
                }
                Ok(None) => {
                    warn!(
                        subscription_id = %subscription.id,
                        "reminders: subscription vanished before marking; skipping"
                    );
                }
                // Known at-least-once gap: the message went out but this
                // subscription stays unmarked and may be re-reminded later.
                Err(err) => {
                    error!(
                        subscription_id = %subscription.id,
                        db_error = ?err,
                        "reminders: failed to mark reminder sent"
                    );
                }
            }
        }

        info!(
            %business_id,
            chat_id,
            due_count = due.len(),
            lead_days,
            "reminders: reminder delivered"
        );

        Ok(())
    }
}

/// The due set: active subscriptions expiring within `[today, today + lead_days]`
/// (both edges inclusive) that have not been reminded for the current window.
fn due_for_reminder(
    subscriptions: &[SubscriptionEntity],
    today: NaiveDate,
    lead_days: i64,
) -> Vec<SubscriptionEntity> {
    let cutoff = today + Duration::days(lead_days);
    subscriptions
        .iter()
        .filter(|subscription| {
            let active = match SubscriptionStatus::from_str(&subscription.status) {
                SubscriptionStatus::Active => true,
                SubscriptionStatus::Expired
                | SubscriptionStatus::Cancelled
                | SubscriptionStatus::Frozen => false,
            };
            active
                && subscription.reminder_sent_at.is_none()
                && subscription.end_date >= today
                && subscription.end_date <= cutoff
        })
        .cloned()
        .collect()
}

fn render_reminder_message(
    due: &[SubscriptionEntity],
    client_names: &HashMap<Uuid, String>,
    lead_days: i64,
) -> String {
    let mut lines = vec![
        "<b>Expiring subscriptions</b>".to_string(),
        format!("Due within the next <b>{lead_days} days</b>:"),
        String::new(),
    ];

    for subscription in due {
        let client_name = client_names
            .get(&subscription.client_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CLIENT);
        lines.push(format!(
            "  - {}: {} ({})",
            client_name,
            subscription.end_date.format("%d.%m.%Y"),
            format_amount(subscription.amount_minor, &subscription.currency),
        ));
    }

    lines.push(String::new());
    lines.push("Use the subscriptions menu to renew or freeze them.".to_string());
    lines.join("\n")
}

fn format_amount(amount_minor: i64, currency: &str) -> String {
    format!("{}.{:02} {}", amount_minor / 100, amount_minor % 100, currency)
}
