pub mod clients;
pub mod notifications;
pub mod owner_profiles;
pub mod payments;
pub mod subscriptions;
