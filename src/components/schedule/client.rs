use crate::config::{CalendarQuery, Config};
use crate::error::{auth_error, fetch_error, parse_error, WidgetResult};
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

use super::api::ScheduleApi;
use super::models::{Event, HoursWindow, Token};
use super::time::{decode_local, parse_event_timestamp};

/// Live client for the LibCal REST API
pub struct LibCalClient {
    config: Arc<Config>,
    client: Client,
}

impl LibCalClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ScheduleApi for LibCalClient {
    /// Exchange client credentials for a bearer token.
    /// Any failure here is pipeline-fatal; no downstream call is attempted.
    async fn fetch_token(&self) -> WidgetResult<Token> {
        let body = json!({
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
            "grant_type": "client_credentials",
        });

        let response = self
            .client
            .post(&self.config.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| auth_error(&format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Token exchange returned HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json::<Token>()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))
    }

    async fn fetch_location_events(
        &self,
        token: &Token,
        query: &CalendarQuery,
    ) -> WidgetResult<Vec<Event>> {
        let mut url = Url::parse(&self.config.events_url)
            .map_err(|e| fetch_error(&format!("Failed to parse URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("cal_id", &query.calendar_id.to_string())
            .append_pair("days", &query.days_ahead.to_string())
            .append_pair("limit", &query.limit.to_string());

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", token.access_token))
            .send()
            .await
            .map_err(|e| fetch_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(fetch_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| parse_error(&format!("Failed to parse events response: {}", e)))?;

        events_from_body(&body, self.config.utc_offset())
    }

    async fn fetch_hours(&self, token: &Token, location_id: u32) -> WidgetResult<HoursWindow> {
        let url = format!("{}/{}", self.config.hours_url, location_id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token.access_token))
            .send()
            .await
            .map_err(|e| fetch_error(&format!("Failed to fetch hours: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(fetch_error(&format!(
                "Failed to fetch hours: HTTP {} - {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| parse_error(&format!("Failed to parse hours response: {}", e)))?;

        hours_from_body(&body, self.config.utc_offset())
    }
}

/// Normalize the events endpoint's body into event records.
/// Order follows the API response; no sorting is applied.
pub fn events_from_body(body: &Value, offset: FixedOffset) -> WidgetResult<Vec<Event>> {
    let events = body
        .get("events")
        .and_then(|e| e.as_array())
        .ok_or_else(|| parse_error("No events in response"))?;

    events
        .iter()
        .map(|event| {
            let title = event
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("")
                .to_string();
            let start = event
                .get("start")
                .and_then(|s| s.as_str())
                .ok_or_else(|| parse_error("Event missing start timestamp"))?;
            let end = event
                .get("end")
                .and_then(|s| s.as_str())
                .ok_or_else(|| parse_error("Event missing end timestamp"))?;

            Ok(Event {
                title,
                start: parse_event_timestamp(start, offset)?,
                end: parse_event_timestamp(end, offset)?,
            })
        })
        .collect()
}

/// Decode the hours endpoint's body into the day's open/close window.
///
/// The body is an array of locations; only the first location's first dates
/// entry is consulted, matching what the widget displays.
pub fn hours_from_body(body: &Value, offset: FixedOffset) -> WidgetResult<HoursWindow> {
    let dates = body
        .get(0)
        .and_then(|location| location.get("dates"))
        .and_then(|d| d.as_object())
        .ok_or_else(|| parse_error("No dates in hours response"))?;

    let (date_str, day) = dates
        .iter()
        .next()
        .ok_or_else(|| parse_error("Empty dates in hours response"))?;

    let status = day
        .get("status")
        .and_then(|s| s.as_str())
        .ok_or_else(|| parse_error("Day entry missing status"))?;

    if status != "open" {
        return Ok(HoursWindow::Closed);
    }

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| parse_error(&format!("Failed to parse date '{}': {}", date_str, e)))?;

    let interval = day
        .get("hours")
        .and_then(|h| h.get(0))
        .ok_or_else(|| parse_error("Open day has no hours interval"))?;
    let from = interval
        .get("from")
        .and_then(|v| v.as_str())
        .ok_or_else(|| parse_error("Hours interval missing 'from'"))?;
    let to = interval
        .get("to")
        .and_then(|v| v.as_str())
        .ok_or_else(|| parse_error("Hours interval missing 'to'"))?;

    Ok(HoursWindow::Open {
        start: decode_local(date, from, offset)?,
        end: decode_local(date, to, offset)?,
    })
}
