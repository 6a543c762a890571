use chrono::NaiveDate;
use serde::Serialize;

/// One weekday row of the hours grid, as rendered by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    pub rendered: String,
}
