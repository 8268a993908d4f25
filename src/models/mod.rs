pub mod budget;
pub mod notification;
pub mod snapshot;
