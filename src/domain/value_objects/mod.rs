pub mod enums;
pub mod reminders;
