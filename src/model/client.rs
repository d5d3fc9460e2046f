use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A client site an employee can check in at. Managed externally,
/// read-only to this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "ABC Corp",
        "address": "Cyber City, Gurugram",
        "latitude": 28.4946,
        "longitude": 77.0887
    })
)]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}
