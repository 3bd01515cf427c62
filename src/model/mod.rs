pub mod attendance;
pub mod permission;
pub mod schedule;
