pub mod analytics;
pub mod candidate;
pub mod email;
pub mod job;
pub mod shortlist;
