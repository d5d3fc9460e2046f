use crate::checkin::error::CheckInError;
use crate::checkin::store::CheckInStore;
use crate::geo::{self, Coordinate};
use crate::model::check_in::{CheckInRecord, CheckInStatus, NewCheckIn};
use chrono::Utc;

/// Successful check-in: the created record plus the proximity warning, which
/// is present only when the employee is beyond the threshold.
#[derive(Debug)]
pub struct CheckInOutcome {
    pub record: CheckInRecord,
    pub warning: Option<&'static str>,
}

#[derive(Debug)]
pub struct CheckOutOutcome {
    pub record: CheckInRecord,
    pub duration_minutes: i64,
}

/// The per-employee check-in state machine:
/// no active session → (check-in) → active session → (checkout) → no active
/// session. All validation, duplicate prevention and lifecycle bookkeeping
/// lives here; persistence goes through the [`CheckInStore`] boundary.
pub struct CheckInService<S> {
    store: S,
    warn_threshold_m: f64,
}

impl<S: CheckInStore> CheckInService<S> {
    pub fn new(store: S, warn_threshold_m: f64) -> Self {
        Self {
            store,
            warn_threshold_m,
        }
    }

    /// Check an employee in at an assigned client.
    ///
    /// Fails with `Validation` for an out-of-range coordinate, `NotAssigned`
    /// when the client is not among the employee's assignments, and
    /// `AlreadyCheckedIn` when any active record exists for the employee,
    /// whichever client it targets. On success the distance from the client
    /// is computed once and stored on the record.
    pub async fn create_check_in(
        &self,
        employee_id: u64,
        client_id: u64,
        coordinate: Coordinate,
        notes: Option<String>,
    ) -> Result<CheckInOutcome, CheckInError> {
        if !coordinate.is_valid() {
            return Err(CheckInError::Validation(
                "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
            ));
        }

        if !self.store.is_client_assigned(employee_id, client_id).await? {
            return Err(CheckInError::NotAssigned);
        }

        if self.store.active_check_in(employee_id).await?.is_some() {
            return Err(CheckInError::AlreadyCheckedIn);
        }

        let client_coordinate = self
            .store
            .client_coordinate(client_id)
            .await?
            .ok_or(CheckInError::ClientNotFound)?;

        let distance = geo::calculate_distance(coordinate, client_coordinate);
        let warning = geo::check_distance_warning(distance, Some(self.warn_threshold_m));

        let record = self
            .store
            .insert_check_in(NewCheckIn {
                employee_id,
                client_id,
                checkin_time: Utc::now().naive_utc(),
                coordinate,
                distance_from_client: distance,
                notes,
            })
            .await?;

        tracing::info!(
            employee_id,
            client_id,
            distance_km = distance,
            warned = warning.should_warn,
            "check-in created"
        );

        Ok(CheckInOutcome {
            record,
            warning: warning.message,
        })
    }

    /// Close the employee's active session.
    ///
    /// Fails with `NoActiveCheckIn` when the employee has no active record.
    /// Duration is whole minutes, floor of checkout minus check-in; a
    /// sub-minute session yields 0, never a negative value.
    pub async fn check_out(&self, employee_id: u64) -> Result<CheckOutOutcome, CheckInError> {
        let mut record = self
            .store
            .active_check_in(employee_id)
            .await?
            .ok_or(CheckInError::NoActiveCheckIn)?;

        // guard against a checkout time before the stored check-in time
        let checkout_time = Utc::now().naive_utc().max(record.checkin_time);

        self.store.close_check_in(record.id, checkout_time).await?;

        let duration_minutes = (checkout_time - record.checkin_time).num_minutes();

        record.checkout_time = Some(checkout_time);
        record.status = CheckInStatus::CheckedOut;

        tracing::info!(employee_id, record_id = record.id, duration_minutes, "checked out");

        Ok(CheckOutOutcome {
            record,
            duration_minutes,
        })
    }
}
