use async_trait::async_trait;
use bb8_postgres::tokio_postgres;
use thiserror::Error;
use crate::models::holiday::{Holiday, HolidayFilter, HolidayWithLocation};
use crate::models::location::Location;
use crate::models::reservation::{Reservation, ReservationWithHoliday};

#[cfg(test)]
pub mod memory_repo;
pub mod migrations;
pub mod postgres_repo;
pub mod sql;

/// Why a storage call failed, classified so callers can tell bad input from outages.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },

    /// The database refused the written values (SQLSTATE class 23).
    #[error("rejected by the database: {0}")]
    Constraint(String),

    /// The row is still referenced elsewhere and cannot be removed.
    #[error("still in use: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(tokio_postgres::Error),

    #[error("failed to retrieve a postgres connection: {0}")]
    Pool(String),
}

impl StoreError {
    /// Reclassifies a constraint violation raised by a DELETE as a conflict.
    pub fn on_delete(self) -> Self {
        match self {
            Self::Constraint(message) => Self::Conflict(message),
            other => other,
        }
    }
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        let integrity_violation = err
            .code()
            .map(|state| state.code().starts_with("23"))
            .unwrap_or(false);

        if integrity_violation {
            let message = err
                .as_db_error()
                .map(|db_err| db_err.message().to_string())
                .unwrap_or_else(|| err.to_string());
            Self::Constraint(message)
        } else {
            Self::Database(err)
        }
    }
}

/// Persistence for locations, holidays and reservations.
#[async_trait]
pub trait TravelStore: Send + Sync {
    async fn location_get_all(&self) -> Result<Vec<Location>, StoreError>;
    async fn location(&self, location_id: i32) -> Result<Location, StoreError>;
    async fn insert_location(&self, location: &Location) -> Result<i32, StoreError>;
    async fn update_location(&self, location: &Location) -> Result<Location, StoreError>;
    async fn delete_location(&self, location_id: i32) -> Result<Location, StoreError>;

    async fn holidays_get_all(
        &self,
        filter: &HolidayFilter,
    ) -> Result<Vec<HolidayWithLocation>, StoreError>;
    async fn holiday(&self, holiday_id: i32) -> Result<Holiday, StoreError>;
    async fn insert_holiday(&self, holiday: &Holiday) -> Result<i32, StoreError>;
    async fn update_holiday(&self, holiday: &Holiday) -> Result<Holiday, StoreError>;
    async fn delete_holiday(&self, holiday_id: i32) -> Result<Holiday, StoreError>;

    async fn reservation_get_all(&self) -> Result<Vec<ReservationWithHoliday>, StoreError>;
    async fn reservation(&self, reservation_id: i32) -> Result<Reservation, StoreError>;
    async fn insert_reservation(&self, reservation: &Reservation) -> Result<i32, StoreError>;
    async fn update_reservation(&self, reservation: &Reservation)
        -> Result<Reservation, StoreError>;
    async fn delete_reservation(&self, reservation_id: i32) -> Result<Reservation, StoreError>;
}
