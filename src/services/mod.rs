pub mod entry_service;
pub mod stats_service;
pub mod suggestion_service;
