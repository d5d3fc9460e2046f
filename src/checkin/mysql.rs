use crate::checkin::error::CheckInError;
use crate::checkin::store::CheckInStore;
use crate::geo::Coordinate;
use crate::model::check_in::{CheckInRecord, CheckInStatus, NewCheckIn};
use crate::utils::client_cache;
use chrono::NaiveDateTime;
use sqlx::MySqlPool;

/// MySQL-backed store. The schema carries a unique index over
/// `(employee_id)` restricted to `checked_in` rows (via a generated column),
/// so two racing check-ins for the same employee cannot both commit; the
/// loser surfaces as `AlreadyCheckedIn` through the duplicate-key mapping.
#[derive(Clone)]
pub struct MySqlCheckInStore {
    pool: MySqlPool,
}

impl MySqlCheckInStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl CheckInStore for MySqlCheckInStore {
    async fn client_coordinate(&self, client_id: u64) -> Result<Option<Coordinate>, CheckInError> {
        if let Some(coordinate) = client_cache::get(client_id).await {
            return Ok(Some(coordinate));
        }

        let row = sqlx::query_as::<_, (f64, f64)>(
            r#"
            SELECT latitude, longitude
            FROM clients
            WHERE id = ?
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((latitude, longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                client_cache::put(client_id, coordinate).await;
                Ok(Some(coordinate))
            }
            None => Ok(None),
        }
    }

    async fn is_client_assigned(
        &self,
        employee_id: u64,
        client_id: u64,
    ) -> Result<bool, CheckInError> {
        let assigned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM employee_clients
                WHERE employee_id = ? AND client_id = ?
            )
            "#,
        )
        .bind(employee_id)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(assigned)
    }

    async fn active_check_in(
        &self,
        employee_id: u64,
    ) -> Result<Option<CheckInRecord>, CheckInError> {
        let record = sqlx::query_as::<_, CheckInRecord>(
            r#"
            SELECT id, employee_id, client_id, checkin_time, checkout_time,
                   latitude, longitude, distance_from_client, notes, status
            FROM checkins
            WHERE employee_id = ? AND status = 'checked_in'
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_check_in(&self, new: NewCheckIn) -> Result<CheckInRecord, CheckInError> {
        let result = sqlx::query(
            r#"
            INSERT INTO checkins
            (employee_id, client_id, checkin_time, latitude, longitude,
             distance_from_client, notes, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, 'checked_in')
            "#,
        )
        .bind(new.employee_id)
        .bind(new.client_id)
        .bind(new.checkin_time)
        .bind(new.coordinate.latitude)
        .bind(new.coordinate.longitude)
        .bind(new.distance_from_client)
        .bind(new.notes.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(CheckInRecord {
            id: result.last_insert_id(),
            employee_id: new.employee_id,
            client_id: new.client_id,
            checkin_time: new.checkin_time,
            checkout_time: None,
            latitude: new.coordinate.latitude,
            longitude: new.coordinate.longitude,
            distance_from_client: new.distance_from_client,
            notes: new.notes,
            status: CheckInStatus::CheckedIn,
        })
    }

    async fn close_check_in(
        &self,
        record_id: u64,
        checkout_time: NaiveDateTime,
    ) -> Result<(), CheckInError> {
        let result = sqlx::query(
            r#"
            UPDATE checkins
            SET checkout_time = ?, status = 'checked_out'
            WHERE id = ? AND status = 'checked_in'
            "#,
        )
        .bind(checkout_time)
        .bind(record_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CheckInError::NoActiveCheckIn);
        }

        Ok(())
    }
}
