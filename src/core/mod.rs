pub mod dashboard;
pub mod status;

pub use dashboard::{ActionGate, Dashboard, DetailStore, JobListStore, TriggerOutcome};
pub use status::{StatusKind, classify, display_text, short_id};
