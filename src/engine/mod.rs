pub mod aggregator;
pub mod permission;
pub mod projector;
pub mod reconcile;
