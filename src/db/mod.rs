pub mod budget_repository;
pub mod connection;
pub mod store;
