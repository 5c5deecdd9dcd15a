pub mod clients;
pub mod owner_profiles;
pub mod payments;
pub mod subscriptions;
