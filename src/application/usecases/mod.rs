pub mod payments;
pub mod reminder_settings;
pub mod reminders;
pub mod subscriptions;
