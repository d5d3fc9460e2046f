use crate::api::check_in::{
    CheckInWithClient, CheckOutReq, CreateCheckIn, HistoryFilter,
};
use crate::geo::Coordinate;
use crate::model::check_in::{CheckInRecord, CheckInStatus};
use crate::model::client::Client;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Field Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Field Attendance Tracker

This API powers a field-employee attendance tracker: employees check in and
out at assigned client sites via GPS coordinates.

### 🔹 Key Features
- **Check-In / Check-Out**
  - One active session per employee, enforced end to end
  - Haversine distance from the client's stored position, computed at check-in
  - Proximity warning when checking in beyond the configured threshold
- **History**
  - Per-employee session history with client info and durations
- **Assignments**
  - Employees can only check in at clients assigned to them

### 📦 Response Format
- JSON-based RESTful responses (`{"success": ..., "data": ...}`)

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::check_in::create_check_in,
        crate::api::check_in::check_out,
        crate::api::check_in::active_check_in,
        crate::api::check_in::history,
        crate::api::check_in::assigned_clients
    ),
    components(
        schemas(
            CreateCheckIn,
            CheckOutReq,
            HistoryFilter,
            CheckInRecord,
            CheckInStatus,
            CheckInWithClient,
            Client,
            Coordinate
        )
    ),
    tags(
        (name = "Check-In", description = "Check-in lifecycle and history APIs"),
    )
)]
pub struct ApiDoc;
