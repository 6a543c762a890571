use crate::config::CalendarQuery;
use crate::error::WidgetResult;
use async_trait::async_trait;

use super::models::{Event, HoursWindow, Token};

/// HTTP surface of the scheduling API.
///
/// The pipeline only talks to this trait; tests drive it with programmable
/// mock implementations instead of a live server.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// Exchange the configured client credentials for a bearer token
    async fn fetch_token(&self) -> WidgetResult<Token>;

    /// Fetch and normalize one calendar's events
    async fn fetch_location_events(
        &self,
        token: &Token,
        query: &CalendarQuery,
    ) -> WidgetResult<Vec<Event>>;

    /// Fetch and decode the day's operating hours for a location
    async fn fetch_hours(&self, token: &Token, location_id: u32) -> WidgetResult<HoursWindow>;
}
