use crate::checkin::error::CheckInError;
use crate::geo::Coordinate;
use crate::model::check_in::{CheckInRecord, NewCheckIn};
use chrono::NaiveDateTime;

/// Persistence boundary of the check-in lifecycle. Reads and writes for a
/// single employee must be serialized by the implementation (the MySQL store
/// relies on a unique index over active records); operations for different
/// employees are independent.
#[allow(async_fn_in_trait)]
pub trait CheckInStore {
    /// Stored position of a client, `None` for an unknown client id.
    async fn client_coordinate(&self, client_id: u64) -> Result<Option<Coordinate>, CheckInError>;

    async fn is_client_assigned(
        &self,
        employee_id: u64,
        client_id: u64,
    ) -> Result<bool, CheckInError>;

    /// The employee's record with status `checked_in`, if any. At most one
    /// exists at any time.
    async fn active_check_in(
        &self,
        employee_id: u64,
    ) -> Result<Option<CheckInRecord>, CheckInError>;

    async fn insert_check_in(&self, new: NewCheckIn) -> Result<CheckInRecord, CheckInError>;

    /// Sets the checkout timestamp and flips status to `checked_out`.
    /// Fails with `NoActiveCheckIn` if the record is not active anymore.
    async fn close_check_in(
        &self,
        record_id: u64,
        checkout_time: NaiveDateTime,
    ) -> Result<(), CheckInError>;
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use crate::model::check_in::CheckInStatus;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory store for state machine tests. Single-lock, so the
    /// check/insert pair is trivially serialized per test.
    #[derive(Default)]
    pub struct MemoryStore {
        pub clients: Vec<(u64, Coordinate)>,
        pub assignments: HashSet<(u64, u64)>,
        pub records: Mutex<Vec<CheckInRecord>>,
    }

    impl MemoryStore {
        pub fn with_client(mut self, client_id: u64, coordinate: Coordinate) -> Self {
            self.clients.push((client_id, coordinate));
            self
        }

        pub fn with_assignment(mut self, employee_id: u64, client_id: u64) -> Self {
            self.assignments.insert((employee_id, client_id));
            self
        }

        pub fn record(&self, id: u64) -> Option<CheckInRecord> {
            self.records.lock().unwrap().iter().find(|r| r.id == id).cloned()
        }

        /// Seed an already-active record, e.g. one that started in the past.
        pub fn seed_active(&self, employee_id: u64, client_id: u64, checkin_time: NaiveDateTime) {
            let mut records = self.records.lock().unwrap();
            let id = records.len() as u64 + 1;
            records.push(CheckInRecord {
                id,
                employee_id,
                client_id,
                checkin_time,
                checkout_time: None,
                latitude: 0.0,
                longitude: 0.0,
                distance_from_client: 0.0,
                notes: None,
                status: CheckInStatus::CheckedIn,
            });
        }
    }

    impl CheckInStore for MemoryStore {
        async fn client_coordinate(
            &self,
            client_id: u64,
        ) -> Result<Option<Coordinate>, CheckInError> {
            Ok(self
                .clients
                .iter()
                .find(|(id, _)| *id == client_id)
                .map(|(_, c)| *c))
        }

        async fn is_client_assigned(
            &self,
            employee_id: u64,
            client_id: u64,
        ) -> Result<bool, CheckInError> {
            Ok(self.assignments.contains(&(employee_id, client_id)))
        }

        async fn active_check_in(
            &self,
            employee_id: u64,
        ) -> Result<Option<CheckInRecord>, CheckInError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.employee_id == employee_id && r.status.is_active())
                .cloned())
        }

        async fn insert_check_in(&self, new: NewCheckIn) -> Result<CheckInRecord, CheckInError> {
            let mut records = self.records.lock().unwrap();
            if records
                .iter()
                .any(|r| r.employee_id == new.employee_id && r.status.is_active())
            {
                // mirrors the unique-index backstop of the MySQL store
                return Err(CheckInError::AlreadyCheckedIn);
            }

            let record = CheckInRecord {
                id: records.len() as u64 + 1,
                employee_id: new.employee_id,
                client_id: new.client_id,
                checkin_time: new.checkin_time,
                checkout_time: None,
                latitude: new.coordinate.latitude,
                longitude: new.coordinate.longitude,
                distance_from_client: new.distance_from_client,
                notes: new.notes,
                status: CheckInStatus::CheckedIn,
            };
            records.push(record.clone());
            Ok(record)
        }

        async fn close_check_in(
            &self,
            record_id: u64,
            checkout_time: NaiveDateTime,
        ) -> Result<(), CheckInError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.id == record_id && r.status.is_active())
                .ok_or(CheckInError::NoActiveCheckIn)?;
            record.checkout_time = Some(checkout_time);
            record.status = CheckInStatus::CheckedOut;
            Ok(())
        }
    }
}
