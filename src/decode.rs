use crate::error::MonitorError;
use crate::model::{ResourceMonitor, Row};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Decodes a threshold list such as `51%,63%,123%` (or bare `51,63`).
///
/// A null or empty column yields an empty list. The first piece that is not
/// an integer fails the whole call.
pub fn extract_trigger_ints(raw: Option<&str>) -> Result<Vec<i32>, MonitorError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(|piece| {
            let digits = piece.strip_suffix('%').unwrap_or(piece);
            digits.parse::<i32>().map_err(|source| MonitorError::Decode {
                token: digits.to_string(),
                source,
            })
        })
        .collect()
}

/// Splits the `notify_users` column. Blank entries are dropped.
pub fn split_notify_users(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn column<'a>(row: &'a Row, name: &str) -> Option<&'a str> {
    row.get(name).and_then(|v| v.as_deref())
}

fn row_error(column: &str, reason: impl ToString) -> MonitorError {
    MonitorError::Row {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_f64(row: &Row, name: &str) -> Result<Option<f64>, MonitorError> {
    match column(row, name).map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|e| row_error(name, e)),
    }
}

fn parse_enum<T>(row: &Row, name: &str) -> Result<Option<T>, MonitorError>
where
    T: std::str::FromStr<Err = MonitorError>,
{
    match column(row, name).filter(|s| !s.trim().is_empty()) {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|e| row_error(name, e)),
    }
}

fn first_threshold(row: &Row, name: &str) -> Result<Option<i32>, MonitorError> {
    Ok(extract_trigger_ints(column(row, name))?.first().copied())
}

/// Accepts RFC 3339 as well as the warehouse's `2024-01-31 08:15:00.123 -0800`.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl TryFrom<&Row> for ResourceMonitor {
    type Error = MonitorError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let name = column(row, "name")
            .ok_or_else(|| row_error("name", "missing"))?
            .to_string();

        let created_on = match column(row, "created_on").filter(|s| !s.is_empty()) {
            None => None,
            Some(s) => Some(
                parse_timestamp(s)
                    .ok_or_else(|| row_error("created_on", format!("bad timestamp {s}")))?,
            ),
        };

        Ok(ResourceMonitor {
            name,
            credit_quota: parse_f64(row, "credit_quota")?,
            used_credits: parse_f64(row, "used_credits")?,
            remaining_credits: parse_f64(row, "remaining_credits")?,
            level: parse_enum(row, "level")?,
            frequency: parse_enum(row, "frequency")?,
            start_time: column(row, "start_time").map(str::to_string),
            end_time: column(row, "end_time").map(str::to_string),
            notify_triggers: extract_trigger_ints(column(row, "notify_at"))?,
            suspend_at: first_threshold(row, "suspend_at")?,
            suspend_immediate_at: first_threshold(row, "suspend_immediately_at")?,
            created_on,
            owner: column(row, "owner").unwrap_or_default().to_string(),
            comment: column(row, "comment").map(str::to_string),
            notify_users: split_notify_users(column(row, "notify_users")),
        })
    }
}
