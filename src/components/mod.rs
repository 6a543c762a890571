// Export components
pub mod hours_grid;
pub mod schedule;

// Re-export the schedule handle
pub use schedule::ScheduleHandle;
