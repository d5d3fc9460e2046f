pub mod error;
pub mod mysql;
pub mod service;
pub mod store;

pub use error::CheckInError;
pub use mysql::MySqlCheckInStore;
pub use service::{CheckInOutcome, CheckInService, CheckOutOutcome};
pub use store::CheckInStore;
