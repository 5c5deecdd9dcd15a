use anyhow::Result;
use gym_crm::application::scheduler::ReminderScheduler;
use gym_crm::application::usecases::reminders::ReminderUseCase;
use gym_crm::config::config_loader;
use gym_crm::infrastructure::postgres::{
    postgres_connection,
    repositories::{
        clients::ClientPostgres, owner_profiles::OwnerProfilePostgres,
        subscriptions::SubscriptionPostgres,
    },
};
use gym_crm::infrastructure::telegram::TelegramNotifier;
use gym_crm::observability;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("gym-crm exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    observability::init_observability()?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    let db_pool = Arc::new(postgres_pool);

    let subscription_repo = Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool)));
    let client_repo = Arc::new(ClientPostgres::new(Arc::clone(&db_pool)));
    let owner_repo = Arc::new(OwnerProfilePostgres::new(Arc::clone(&db_pool)));
    let notifier = Arc::new(TelegramNotifier::new(&dotenvy_env.telegram.bot_token));

    let reminder_usecase = Arc::new(ReminderUseCase::new(
        subscription_repo,
        client_repo,
        owner_repo,
        notifier,
    ));

    let scheduler = ReminderScheduler::new(reminder_usecase);
    scheduler.start();

    tokio::signal::ctrl_c().await?;
    scheduler.stop();

    Ok(())
}
