pub mod client;
pub mod models;

pub use client::fetch_week;
pub use models::GridDay;
