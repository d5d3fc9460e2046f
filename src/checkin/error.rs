use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;

/// Typed outcomes of the check-in lifecycle. Every variant is deterministic
/// given the same inputs and store state except `Store`, which wraps a
/// database failure unchanged.
#[derive(Debug, Display)]
pub enum CheckInError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "You are not assigned to this client")]
    NotAssigned,

    #[display(fmt = "You already have an active check-in. Please checkout first")]
    AlreadyCheckedIn,

    #[display(fmt = "No active check-in found")]
    NoActiveCheckIn,

    #[display(fmt = "Client not found")]
    ClientNotFound,

    #[display(fmt = "Internal Server Error")]
    Store(sqlx::Error),
}

impl From<sqlx::Error> for CheckInError {
    fn from(e: sqlx::Error) -> Self {
        // MySQL duplicate-key on the unique active-check-in index: two
        // concurrent check-ins raced and this one lost.
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                return CheckInError::AlreadyCheckedIn;
            }
        }
        CheckInError::Store(e)
    }
}

impl actix_web::ResponseError for CheckInError {
    fn status_code(&self) -> StatusCode {
        match self {
            CheckInError::Validation(_) => StatusCode::BAD_REQUEST,
            CheckInError::NotAssigned => StatusCode::FORBIDDEN,
            CheckInError::AlreadyCheckedIn => StatusCode::CONFLICT,
            CheckInError::NoActiveCheckIn => StatusCode::NOT_FOUND,
            CheckInError::ClientNotFound => StatusCode::NOT_FOUND,
            CheckInError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let CheckInError::Store(e) = self {
            tracing::error!(error = %e, "check-in store failure");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string()
        }))
    }
}
