mod actor;
mod handle;
pub mod api;
pub mod client;
pub mod models;
pub mod pipeline;
mod time;

pub use handle::ScheduleHandle;
pub use models::{AggregateResult, Event, EventsByLocation, HoursWindow, Token};
