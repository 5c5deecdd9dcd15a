use uuid::Uuid;

/// Lead time used by the manual "/remind" trigger.
pub const DEFAULT_LEAD_DAYS: i64 = 7;
/// Lead time used by the manual "/remind3" trigger.
pub const SHORT_LEAD_DAYS: i64 = 3;

/// One reminder-enabled owner as seen by the hourly sweep: the business to
/// scan, where to deliver, and the owner's schedule preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecipient {
    pub business_id: Uuid,
    pub chat_id: i64,
    pub reminder_hour: i32,
    pub lead_days: i32,
}

/// Settings patch accepted at the owner-settings boundary before validation.
#[derive(Debug, Clone, Default)]
pub struct ReminderSettingsUpdate {
    pub enabled: Option<bool>,
    pub reminder_hour: Option<i32>,
    pub lead_days: Option<i32>,
}

impl ReminderSettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.reminder_hour.is_none() && self.lead_days.is_none()
    }
}
