use crate::geo::Coordinate;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance session status, stored as a string column.
///
/// `CheckedIn` is the single allowed "active" state per employee; a record
/// transitions to `CheckedOut` exactly once and is then immutable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum_macros::Display,
    strum_macros::EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckInStatus {
    CheckedIn,
    CheckedOut,
}

impl CheckInStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CheckInStatus::CheckedIn)
    }
}

/// One attendance session. Retained as history, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 2,
        "client_id": 1,
        "checkin_time": "2026-08-26T09:00:00",
        "checkout_time": null,
        "latitude": 28.4946,
        "longitude": 77.0887,
        "distance_from_client": 0.0,
        "notes": "Regular visit",
        "status": "checked_in"
    })
)]
pub struct CheckInRecord {
    pub id: u64,
    pub employee_id: u64,
    pub client_id: u64,

    #[schema(value_type = String, format = "date-time")]
    pub checkin_time: NaiveDateTime,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub checkout_time: Option<NaiveDateTime>,

    pub latitude: f64,
    pub longitude: f64,

    /// Kilometers from the client's stored position, rounded to 2 decimals.
    /// Computed once at check-in, never recomputed.
    pub distance_from_client: f64,

    pub notes: Option<String>,
    pub status: CheckInStatus,
}

/// Insert payload for a new active check-in.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub employee_id: u64,
    pub client_id: u64,
    pub checkin_time: NaiveDateTime,
    pub coordinate: Coordinate,
    pub distance_from_client: f64,
    pub notes: Option<String>,
}
