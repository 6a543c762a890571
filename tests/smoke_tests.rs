use serde_json::json;
use studygrid::components::schedule::{AggregateResult, Event, HoursWindow};
use studygrid::config::{default_calendars, Config};
use studygrid::error::{auth_error, fetch_error};

fn test_config() -> Config {
    Config {
        client_id: "1301".to_string(),
        client_secret: String::new(),
        token_url: "https://calendar.library.ucla.edu/1.1/oauth/token".to_string(),
        events_url: "https://calendar.library.ucla.edu/1.1/events".to_string(),
        hours_url: "https://calendar.library.ucla.edu/1.1/hours".to_string(),
        grid_url: "https://calendar.library.ucla.edu/widget/hours/grid".to_string(),
        calendars: default_calendars(),
        hours_location_id: 2609,
        grid_location_id: 2609,
        grid_weeks: 2,
        request_timeout_secs: 10,
        utc_offset_hours: -7,
    }
}

/// Smoke test to verify the built-in calendar set matches the widgets
#[test]
fn default_calendar_set_matches_the_classroom_widgets() {
    let calendars = default_calendars();

    let ids: Vec<(String, u32)> = calendars
        .iter()
        .map(|q| (q.location.clone(), q.calendar_id))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("classA".to_string(), 3363),
            ("classB".to_string(), 4357),
            ("classC".to_string(), 4358),
            ("inq3".to_string(), 4799),
        ]
    );

    for query in &calendars {
        assert_eq!(query.days_ahead, 0);
        assert_eq!(query.limit, 100);
    }
}

#[test]
fn config_offset_is_pacific_daylight_time() {
    let config = test_config();
    assert_eq!(config.utc_offset().local_minus_utc(), -7 * 3600);
}

/// The feed's hours field carries its state in a "status" tag, with
/// timestamps present only when open
#[test]
fn hours_window_serializes_with_status_tag() {
    assert_eq!(
        serde_json::to_value(HoursWindow::Closed).unwrap(),
        json!({"status": "closed"})
    );
    assert_eq!(
        serde_json::to_value(HoursWindow::Unknown).unwrap(),
        json!({"status": "unknown"})
    );

    let open = HoursWindow::Open {
        start: "2024-01-15T09:00:00-07:00".parse().unwrap(),
        end: "2024-01-15T17:00:00-07:00".parse().unwrap(),
    };
    let value = serde_json::to_value(open).unwrap();
    assert_eq!(value["status"], "open");
    assert_eq!(value["start"], "2024-01-15T09:00:00-07:00");
    assert_eq!(value["end"], "2024-01-15T17:00:00-07:00");
}

#[test]
fn aggregate_result_serializes_events_by_location() {
    let mut result = AggregateResult::default();
    result.events.insert(
        "classA".to_string(),
        vec![Event {
            title: "Study Session".to_string(),
            start: "2024-01-15T10:00:00-07:00".parse().unwrap(),
            end: "2024-01-15T12:00:00-07:00".parse().unwrap(),
        }],
    );

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["events"]["classA"][0]["title"], "Study Session");
    assert_eq!(value["hours"]["status"], "unknown");
}

#[test]
fn error_display_carries_context() {
    assert_eq!(
        auth_error("HTTP 401").to_string(),
        "Token exchange failed: HTTP 401"
    );
    assert_eq!(
        fetch_error("HTTP 500").to_string(),
        "Fetch failed: HTTP 500"
    );
}
