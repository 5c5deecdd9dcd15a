use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local, Timelike};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::usecases::reminders::ReminderUseCase;
use crate::domain::repositories::{
    clients::ClientRepository, notifications::NotificationSender,
    owner_profiles::OwnerProfileRepository, subscriptions::SubscriptionRepository,
};

/// Owns the hourly reminder timer. One instance is constructed at process
/// start and handed to whatever needs the manual trigger; the process runs a
/// single active scheduler, there is no leader election.
pub struct ReminderScheduler<S, C, O, N>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
    O: OwnerProfileRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + 'static,
{
    usecase: Arc<ReminderUseCase<S, C, O, N>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S, C, O, N> ReminderScheduler<S, C, O, N>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
    O: OwnerProfileRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + 'static,
{
    pub fn new(usecase: Arc<ReminderUseCase<S, C, O, N>>) -> Self {
        Self {
            usecase,
            timer: Mutex::new(None),
        }
    }

    /// Registers the hourly tick. Calling start on a running scheduler is a
    /// logged no-op.
    pub fn start(&self) {
        let mut timer = self.timer.lock().expect("reminder scheduler lock poisoned");
        if timer.is_some() {
            warn!("reminder_scheduler: already running; start ignored");
            return;
        }

        let usecase = Arc::clone(&self.usecase);
        let handle = tokio::spawn(async move {
            let delay = secs_until_next_hour(Local::now());
            tokio::time::sleep(Duration::from_secs(delay)).await;

            let mut ticker = tokio::time::interval(Duration::from_secs(60 * 60));
            loop {
                ticker.tick().await;
                // The hour is read at invocation time, never cached across ticks.
                let current_hour = Local::now().hour();
                if let Err(err) = usecase.run_hourly_sweep(current_hour).await {
                    error!(
                        current_hour,
                        error = ?err,
                        "reminder_scheduler: hourly sweep failed"
                    );
                }
            }
        });

        *timer = Some(handle);
        info!("reminder_scheduler: started");
    }

    /// Cancels future timer firings. An in-flight sweep is not rolled back;
    /// stopping a stopped scheduler is a no-op.
    pub fn stop(&self) {
        let mut timer = self.timer.lock().expect("reminder scheduler lock poisoned");
        match timer.take() {
            Some(handle) => {
                handle.abort();
                info!("reminder_scheduler: stopped");
            }
            None => {
                warn!("reminder_scheduler: not running; stop ignored");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .expect("reminder scheduler lock poisoned")
            .is_some()
    }

    /// Manual trigger shared with the command layer; ignores the owner's
    /// configured hour and fires immediately.
    pub async fn send_reminder_for_business(
        &self,
        business_id: Uuid,
        chat_id: i64,
        lead_days: i64,
    ) -> Result<()> {
        self.usecase
            .send_reminder_for_business(business_id, chat_id, lead_days)
            .await
    }
}

/// Seconds from `now` to the next top of the hour. A tick landing exactly on
/// the boundary waits for the following hour.
fn secs_until_next_hour(now: DateTime<Local>) -> u64 {
    let past_the_hour = u64::from(now.minute()) * 60 + u64::from(now.second());
    3600 - past_the_hour
}
