use crate::config::Config;
use crate::error::{fetch_error, parse_error, WidgetResult};
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::models::GridDay;

/// Fetch the weekly hours grid. This endpoint needs no token.
pub async fn fetch_week(config: &Config) -> WidgetResult<Vec<GridDay>> {
    let mut url = Url::parse(&config.grid_url)
        .map_err(|e| fetch_error(&format!("Failed to parse URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("lid", &config.grid_location_id.to_string())
        .append_pair("weeks", &config.grid_weeks.to_string())
        .append_pair("format", "json");

    let response = Client::new()
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(&format!("Failed to fetch hours grid: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(fetch_error(&format!(
            "Failed to fetch hours grid: HTTP {} - {}",
            status, error_body
        )));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| parse_error(&format!("Failed to parse grid response: {}", e)))?;

    week_from_body(&body)
}

/// Flatten two weeks of weekday entries into the next seven days.
///
/// The grid response starts on the current week's first day, so the leading
/// (already past) entry is dropped before taking the seven-day window. Days
/// are sorted chronologically regardless of the API's weekday ordering.
pub fn week_from_body(body: &Value) -> WidgetResult<Vec<GridDay>> {
    let weeks = body
        .as_object()
        .and_then(|o| o.values().next())
        .and_then(|location| location.get("weeks"))
        .and_then(|w| w.as_array())
        .ok_or_else(|| parse_error("No weeks in grid response"))?;

    let mut days = weeks
        .iter()
        .take(2)
        .filter_map(|week| week.as_object())
        .flat_map(|week| week.values())
        .skip(1)
        .take(7)
        .map(|entry| {
            let date_str = entry
                .get("date")
                .and_then(|d| d.as_str())
                .ok_or_else(|| parse_error("Grid day missing date"))?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map_err(|e| parse_error(&format!("Failed to parse date '{}': {}", date_str, e)))?;
            let rendered = entry
                .get("rendered")
                .and_then(|r| r.as_str())
                .unwrap_or("")
                .to_string();

            Ok(GridDay { date, rendered })
        })
        .collect::<WidgetResult<Vec<GridDay>>>()?;

    days.sort_by_key(|day| day.date);

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(date: &str, rendered: &str) -> Value {
        json!({"date": date, "rendered": rendered})
    }

    #[test]
    fn drops_the_leading_day_and_keeps_the_next_seven() {
        let body = json!({
            "loc_2609": {
                "weeks": [
                    {
                        "Sunday": day("2024-01-14", "Closed"),
                        "Monday": day("2024-01-15", "9am - 5pm"),
                        "Tuesday": day("2024-01-16", "9am - 5pm"),
                        "Wednesday": day("2024-01-17", "9am - 5pm"),
                        "Thursday": day("2024-01-18", "9am - 5pm"),
                        "Friday": day("2024-01-19", "9am - 5pm"),
                        "Saturday": day("2024-01-20", "Closed"),
                    },
                    {
                        "Sunday": day("2024-01-21", "Closed"),
                        "Monday": day("2024-01-22", "9am - 5pm"),
                    },
                ]
            }
        });

        let days = week_from_body(&body).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date.to_string(), "2024-01-15");
        assert_eq!(days[0].rendered, "9am - 5pm");
        assert_eq!(days[6].date.to_string(), "2024-01-21");
    }

    #[test]
    fn week_is_sorted_by_date() {
        let body = json!({
            "loc_2609": {
                "weeks": [{
                    "a": day("2024-01-14", ""),
                    "b": day("2024-01-18", ""),
                    "c": day("2024-01-16", ""),
                    "d": day("2024-01-17", ""),
                }]
            }
        });

        let days = week_from_body(&body).unwrap();
        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-16", "2024-01-17", "2024-01-18"]);
    }

    #[test]
    fn missing_weeks_is_a_parse_error() {
        assert!(week_from_body(&json!({})).is_err());
        assert!(week_from_body(&json!({"loc_2609": {}})).is_err());
    }
}
