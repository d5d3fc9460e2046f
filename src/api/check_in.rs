use crate::checkin::{CheckInService, MySqlCheckInStore};
use crate::geo::Coordinate;
use crate::model::check_in::CheckInStatus;
use crate::model::client::Client;
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateCheckIn {
    #[schema(example = 2)]
    pub employee_id: u64,

    #[schema(example = 1)]
    pub client_id: u64,

    #[schema(example = 28.4946)]
    pub latitude: f64,

    #[schema(example = 77.0887)]
    pub longitude: f64,

    #[schema(example = "Regular visit", nullable = true)]
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CheckOutReq {
    #[schema(example = 2)]
    pub employee_id: u64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HistoryFilter {
    #[schema(example = "2026-08-01", value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,

    #[schema(example = "2026-08-26", value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
}

/// Check-in row joined with client info, as listed in history/active views.
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct CheckInWithClient {
    pub id: u64,
    pub employee_id: u64,
    pub client_id: u64,

    #[schema(value_type = String, format = "date-time")]
    pub checkin_time: NaiveDateTime,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub checkout_time: Option<NaiveDateTime>,

    pub latitude: f64,
    pub longitude: f64,
    pub distance_from_client: f64,
    pub notes: Option<String>,
    pub status: CheckInStatus,
    pub client_name: String,
    pub client_address: Option<String>,

    /// Whole minutes between check-in and checkout; absent while active.
    pub duration_minutes: Option<i64>,
}

const CHECKIN_WITH_CLIENT_COLS: &str = r#"
    ch.id, ch.employee_id, ch.client_id, ch.checkin_time, ch.checkout_time,
    ch.latitude, ch.longitude, ch.distance_from_client, ch.notes, ch.status,
    c.name AS client_name, c.address AS client_address,
    CASE
        WHEN ch.checkout_time IS NOT NULL
        THEN TIMESTAMPDIFF(MINUTE, ch.checkin_time, ch.checkout_time)
    END AS duration_minutes
"#;

/// Create a check-in at an assigned client
#[utoipa::path(
    post,
    path = "/api/v1/check-ins",
    request_body = CreateCheckIn,
    responses(
        (status = 201, description = "Checked in; data carries the record and, only when the employee is beyond the proximity threshold, a warning key", body = Object, example = json!({
            "success": true,
            "data": {
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
            }
        })),
        (status = 400, description = "Missing or out-of-range coordinate"),
        (status = 403, description = "Client not assigned to employee"),
        (status = 409, description = "An active check-in already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-In"
)]
pub async fn create_check_in(
    service: web::Data<CheckInService<MySqlCheckInStore>>,
    payload: web::Json<CreateCheckIn>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let outcome = service
        .create_check_in(
            payload.employee_id,
            payload.client_id,
            Coordinate::new(payload.latitude, payload.longitude),
            payload.notes,
        )
        .await?;

    let mut data = serde_json::to_value(&outcome.record)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    // the warning key exists only when triggered, never as null
    if let Some(warning) = outcome.warning {
        data["warning"] = serde_json::json!(warning);
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": data
    })))
}

/// Close the employee's active check-in
#[utoipa::path(
    put,
    path = "/api/v1/check-ins/checkout",
    request_body = CheckOutReq,
    responses(
        (status = 200, description = "Checked out; data carries the closed record and the session duration in whole minutes", body = Object, example = json!({
            "success": true,
            "data": {
                "id": 1,
                "employee_id": 2,
                "client_id": 1,
                "checkin_time": "2026-08-26T09:00:00",
                "checkout_time": "2026-08-26T11:05:00",
                "latitude": 28.4946,
                "longitude": 77.0887,
                "distance_from_client": 0.0,
                "notes": null,
                "status": "checked_out",
                "duration": 125
            }
        })),
        (status = 404, description = "No active check-in found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-In"
)]
pub async fn check_out(
    service: web::Data<CheckInService<MySqlCheckInStore>>,
    payload: web::Json<CheckOutReq>,
) -> actix_web::Result<impl Responder> {
    let outcome = service.check_out(payload.employee_id).await?;

    let mut data = serde_json::to_value(&outcome.record)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    data["duration"] = serde_json::json!(outcome.duration_minutes);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": data
    })))
}

/// Current active check-in of an employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/check-ins/active",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Active check-in with client info, or data: null", body = Object),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-In"
)]
pub async fn active_check_in(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let sql = format!(
        r#"
        SELECT {CHECKIN_WITH_CLIENT_COLS}
        FROM checkins ch
        INNER JOIN clients c ON ch.client_id = c.id
        WHERE ch.employee_id = ? AND ch.status = 'checked_in'
        "#
    );

    let record = sqlx::query_as::<_, CheckInWithClient>(&sql)
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch active check-in");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": record
    })))
}

/// Check-in history of an employee, newest first
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/check-ins",
    params(
        ("employee_id", description = "Employee ID"),
        HistoryFilter
    ),
    responses(
        (status = 200, description = "History rows with client info and completed-session durations", body = Object),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-In"
)]
pub async fn history(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    query: web::Query<HistoryFilter>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let mut where_sql = String::from(" WHERE ch.employee_id = ?");
    let mut args: Vec<NaiveDate> = Vec::new();

    if let Some(start) = query.start_date {
        where_sql.push_str(" AND DATE(ch.checkin_time) >= ?");
        args.push(start);
    }

    if let Some(end) = query.end_date {
        where_sql.push_str(" AND DATE(ch.checkin_time) <= ?");
        args.push(end);
    }

    let sql = format!(
        r#"
        SELECT {CHECKIN_WITH_CLIENT_COLS}
        FROM checkins ch
        INNER JOIN clients c ON ch.client_id = c.id
        {where_sql}
        ORDER BY ch.checkin_time DESC
        "#
    );

    let mut q = sqlx::query_as::<_, CheckInWithClient>(&sql).bind(employee_id);
    for arg in args {
        q = q.bind(arg);
    }

    let records = q.fetch_all(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch check-in history");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": records
    })))
}

/// Clients assigned to an employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/clients",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Assigned clients", body = Object),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-In"
)]
pub async fn assigned_clients(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let clients = sqlx::query_as::<_, Client>(
        r#"
        SELECT c.id, c.name, c.address, c.latitude, c.longitude
        FROM clients c
        INNER JOIN employee_clients ec ON c.id = ec.client_id
        WHERE ec.employee_id = ?
        ORDER BY c.name
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch assigned clients");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": clients
    })))
}
