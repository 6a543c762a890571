use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bearer token from the client-credentials exchange
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
}

/// Normalized event record for one calendar entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Events keyed by widget location name.
///
/// A location whose fetch failed is absent from the map entirely; an empty
/// vector means the fetch succeeded and the calendar had no events.
pub type EventsByLocation = BTreeMap<String, Vec<Event>>;

/// The day's open/close window for the hours location
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HoursWindow {
    Open {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
    Closed,
    /// The hours fetch failed or returned an undecodable body. Kept distinct
    /// from `Closed` so the widget can tell an outage from a real closure.
    #[default]
    Unknown,
}

/// Combined output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AggregateResult {
    pub events: EventsByLocation,
    pub hours: HoursWindow,
}
