pub mod aggregator;
pub mod report;
