pub mod scheduler;
pub mod usecases;
