//! Data models for the DocShare client.
//!
//! These models match the service's JSON contract field for field.

mod document;
mod invitation;
mod project;
mod user;

pub use document::*;
pub use invitation::*;
pub use project::*;
pub use user::*;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a server timestamp.
///
/// The service emits RFC 3339 timestamps with an offset as well as naive UTC timestamps
/// without one; both are accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
