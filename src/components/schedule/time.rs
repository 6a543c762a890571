use crate::error::{parse_error, WidgetResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Parse a "H:MMam"/"H:MMpm" clock string into a 24-hour (hour, minute) pair.
///
/// The hours API hands back bare 12-hour strings. The previous widget code
/// added 12 to every "pm" hour and zero-padded every "am" hour, which turned
/// 12:00pm into hour 24 and 12:00am into a malformed "0012"; both noon and
/// midnight are handled correctly here.
pub fn parse_clock(time_str: &str) -> Option<(u32, u32)> {
    let time_str = time_str.trim();
    if time_str.len() < 2 || !time_str.is_char_boundary(time_str.len() - 2) {
        return None;
    }
    let (clock, meridiem) = time_str.split_at(time_str.len() - 2);
    let (hour_str, minute_str) = clock.split_once(':')?;
    let hour = hour_str.parse::<u32>().ok()?;
    let minute = minute_str.parse::<u32>().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour = match meridiem {
        "am" => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        "pm" => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        _ => return None,
    };
    Some((hour, minute))
}

/// Build a fixed-offset timestamp from an API date and a 12-hour clock string
pub fn decode_local(
    date: NaiveDate,
    time_str: &str,
    offset: FixedOffset,
) -> WidgetResult<DateTime<FixedOffset>> {
    let (hour, minute) = parse_clock(time_str)
        .ok_or_else(|| parse_error(&format!("Invalid clock string: {}", time_str)))?;
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| parse_error("Failed to create datetime"))?;
    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| parse_error("Invalid local time"))
}

/// Parse an event timestamp as-is, with no timezone correction.
///
/// The events API usually includes an offset; when it sends a bare local
/// datetime the configured fixed offset is attached unchanged.
pub fn parse_event_timestamp(
    raw: &str,
    offset: FixedOffset,
) -> WidgetResult<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| parse_error(&format!("Failed to parse datetime '{}': {}", raw, e)))?;
    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| parse_error("Invalid local time"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdt() -> FixedOffset {
        FixedOffset::west_opt(7 * 3600).unwrap()
    }

    #[test]
    fn parses_morning_and_afternoon_clocks() {
        assert_eq!(parse_clock("9:00am"), Some((9, 0)));
        assert_eq!(parse_clock("5:00pm"), Some((17, 0)));
        assert_eq!(parse_clock("11:45am"), Some((11, 45)));
        assert_eq!(parse_clock("1:30pm"), Some((13, 30)));
    }

    #[test]
    fn handles_noon_and_midnight() {
        assert_eq!(parse_clock("12:00pm"), Some((12, 0)));
        assert_eq!(parse_clock("12:00am"), Some((0, 0)));
        assert_eq!(parse_clock("12:30am"), Some((0, 30)));
    }

    #[test]
    fn rejects_malformed_clocks() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("9am"), None);
        assert_eq!(parse_clock("13:00pm"), None);
        assert_eq!(parse_clock("9:75am"), None);
        assert_eq!(parse_clock("9:00xx"), None);
        assert_eq!(parse_clock("0:30am"), None);
    }

    #[test]
    fn decodes_open_window_at_fixed_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let start = decode_local(date, "9:00am", pdt()).unwrap();
        let end = decode_local(date, "5:00pm", pdt()).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-15T09:00:00-07:00");
        assert_eq!(end.to_rfc3339(), "2024-01-15T17:00:00-07:00");
    }

    #[test]
    fn event_timestamp_with_offset_is_untouched() {
        let dt = parse_event_timestamp("2024-01-15T10:00:00-08:00", pdt()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:00:00-08:00");
    }

    #[test]
    fn bare_event_timestamp_gets_configured_offset() {
        let dt = parse_event_timestamp("2024-01-15T10:00:00", pdt()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:00:00-07:00");
    }

    #[test]
    fn event_timestamp_garbage_is_an_error() {
        assert!(parse_event_timestamp("not a date", pdt()).is_err());
    }
}
