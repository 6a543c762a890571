use crate::error::{env_error, WidgetResult};
use chrono::FixedOffset;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;

/// Default LibCal instance the widgets are built against
pub const DEFAULT_BASE_URL: &str = "https://calendar.library.ucla.edu";

/// Default per-request deadline in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// The hours API returns bare local time strings; they are pinned to this
/// offset when building timestamps. -07:00 is Pacific Daylight Time only,
/// so values are an hour off during standard time. Known limitation.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -7;

/// Location whose operating hours gate the schedule grid
pub const DEFAULT_HOURS_LOCATION_ID: u32 = 2609;

/// Number of weeks requested from the weekly grid endpoint
pub const DEFAULT_GRID_WEEKS: u32 = 2;

/// One calendar to fetch events for, keyed by the widget's location name
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarQuery {
    pub location: String,
    pub calendar_id: u32,
    #[serde(default)]
    pub days_ahead: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

/// Shape of the optional config/calendars.toml file
#[derive(Debug, Deserialize)]
struct CalendarsFile {
    calendars: Vec<CalendarQuery>,
}

/// Main configuration structure for the widget feed
#[derive(Debug, Clone)]
pub struct Config {
    /// LibCal API client ID
    pub client_id: String,
    /// LibCal API client secret
    pub client_secret: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Events endpoint
    pub events_url: String,
    /// Operating-hours endpoint (location id is appended as a path segment)
    pub hours_url: String,
    /// Token-free weekly hours grid endpoint
    pub grid_url: String,
    /// Calendars to fan out over, one per widget location
    pub calendars: Vec<CalendarQuery>,
    /// Location whose operating hours are fetched
    pub hours_location_id: u32,
    /// Location shown in the weekly grid
    pub grid_location_id: u32,
    /// Weeks requested from the grid endpoint
    pub grid_weeks: u32,
    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,
    /// Fixed UTC offset for decoding the hours API's local time strings
    pub utc_offset_hours: i32,
}

impl Config {
    /// Load configuration from environment and the optional calendars file
    pub fn load() -> WidgetResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required credentials
        let client_id = env::var("LIBCAL_CLIENT_ID").map_err(|_| env_error("LIBCAL_CLIENT_ID"))?;
        let client_secret =
            env::var("LIBCAL_CLIENT_SECRET").map_err(|_| env_error("LIBCAL_CLIENT_SECRET"))?;

        let base_url =
            env::var("LIBCAL_BASE_URL").unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));
        let base_url = base_url.trim_end_matches('/');

        let hours_location_id = env::var("LIBCAL_HOURS_LOCATION")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_HOURS_LOCATION_ID);

        let grid_location_id = env::var("LIBCAL_GRID_LOCATION")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_HOURS_LOCATION_ID);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        // Calendar set comes from the config file if present
        let calendars = match fs::read_to_string("config/calendars.toml") {
            Ok(content) => toml::from_str::<CalendarsFile>(&content)?.calendars,
            Err(_) => default_calendars(),
        };

        Ok(Config {
            client_id,
            client_secret,
            token_url: format!("{}/1.1/oauth/token", base_url),
            events_url: format!("{}/1.1/events", base_url),
            hours_url: format!("{}/1.1/hours", base_url),
            grid_url: format!("{}/widget/hours/grid", base_url),
            calendars,
            hours_location_id,
            grid_location_id,
            grid_weeks: DEFAULT_GRID_WEEKS,
            request_timeout_secs,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        })
    }

    /// Fixed offset used when the API hands back bare local times
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::west_opt(7 * 3600).unwrap())
    }
}

/// Built-in calendar set matching the classroom widgets
pub fn default_calendars() -> Vec<CalendarQuery> {
    vec![
        CalendarQuery {
            location: "classA".to_string(),
            calendar_id: 3363,
            days_ahead: 0,
            limit: 100,
        },
        CalendarQuery {
            location: "classB".to_string(),
            calendar_id: 4357,
            days_ahead: 0,
            limit: 100,
        },
        CalendarQuery {
            location: "classC".to_string(),
            calendar_id: 4358,
            days_ahead: 0,
            limit: 100,
        },
        CalendarQuery {
            location: "inq3".to_string(),
            calendar_id: 4799,
            days_ahead: 0,
            limit: 100,
        },
    ]
}
