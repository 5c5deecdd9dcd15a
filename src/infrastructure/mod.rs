pub mod postgres;
pub mod telegram;
