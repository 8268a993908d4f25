pub mod dashboard;
pub mod editor;
pub mod notify;
pub mod panel;
pub mod snapshot;
pub mod summary;
pub mod totals;
pub mod tracker;
