use async_trait::async_trait;
use bb8_postgres::bb8::{Pool, PooledConnection};
use bb8_postgres::tokio_postgres::types::ToSql;
use bb8_postgres::tokio_postgres::NoTls;
use bb8_postgres::PostgresConnectionManager;
use tracing::{debug, warn};
use crate::models::holiday::{Holiday, HolidayFilter, HolidayWithLocation};
use crate::models::location::Location;
use crate::models::reservation::{Reservation, ReservationWithHoliday};
use crate::repositories::sql::{self, escape_like, FromRow, Record, Select};
use crate::repositories::{StoreError, TravelStore};

pub type PostgresPool = Pool<PostgresConnectionManager<NoTls>>;

pub struct PostgresConnectionRepo {
    postgres_connection: PostgresPool,
}

impl PostgresConnectionRepo {
    pub fn new(
        postgres_connection: PostgresPool,
    ) -> Self {
        Self {
            postgres_connection
        }
    }

    async fn get_postgres_connection(
        &self,
    ) -> Result<PooledConnection<'_, PostgresConnectionManager<NoTls>>, StoreError> {
        self.postgres_connection.get().await.map_err(|e| {
            warn!("Failed to retrieve postgres connection due to: {}", e);
            StoreError::Pool(e.to_string())
        })
    }

    async fn fetch_all<T: FromRow>(&self, query: Select) -> Result<Vec<T>, StoreError> {
        let conn = self.get_postgres_connection().await?;
        let stmt = query.to_sql();
        debug!("{}", stmt);

        let rows = conn.query(stmt.as_str(), &query.params()).await?;
        rows.iter()
            .map(|row| T::from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn fetch_by_id<R: Record>(&self, entity: &'static str, id: i32) -> Result<R, StoreError> {
        let conn = self.get_postgres_connection().await?;
        let query = Select::from::<R>().and_where(&format!("{}.id = {{}}", R::TABLE), id);
        let stmt = query.to_sql();
        debug!("{}", stmt);

        match conn.query_opt(stmt.as_str(), &query.params()).await? {
            Some(row) => Ok(R::from_row(&row)?),
            None => Err(StoreError::NotFound { entity, id }),
        }
    }

    async fn insert<R: Record>(&self, record: &R) -> Result<i32, StoreError> {
        let conn = self.get_postgres_connection().await?;
        let bindings = record.bindings();
        let stmt = sql::insert::<R>(&bindings);
        debug!("{}", stmt);

        let params: Vec<&(dyn ToSql + Sync)> = bindings.iter().map(|b| b.value).collect();
        let row = conn.query_one(stmt.as_str(), &params).await?;
        Ok(row.try_get("id")?)
    }

    async fn update<R: Record>(&self, entity: &'static str, record: &R) -> Result<R, StoreError> {
        let conn = self.get_postgres_connection().await?;
        let bindings = record.bindings();
        let stmt = sql::update::<R>(&bindings);
        debug!("{}", stmt);

        let mut params: Vec<&(dyn ToSql + Sync)> = bindings.iter().map(|b| b.value).collect();
        params.push(record.key());

        match conn.query_opt(stmt.as_str(), &params).await? {
            Some(row) => Ok(R::from_row(&row)?),
            None => Err(StoreError::NotFound { entity, id: *record.key() }),
        }
    }

    async fn delete<R: Record>(&self, entity: &'static str, id: i32) -> Result<R, StoreError> {
        let conn = self.get_postgres_connection().await?;
        let stmt = sql::delete::<R>();
        debug!("{}", stmt);

        let deleted = conn
            .query_opt(stmt.as_str(), &[&id])
            .await
            .map_err(|e| StoreError::from(e).on_delete())?;

        match deleted {
            Some(row) => Ok(R::from_row(&row)?),
            None => Err(StoreError::NotFound { entity, id }),
        }
    }
}

/// Builds the joined holiday listing, AND-ing each filter term that is present.
pub fn holidays_query(filter: &HolidayFilter) -> Select {
    let mut query = Select::from::<Holiday>()
        .inner_join::<Location>("holiday.location_id = location.id");

    if let Some(location) = &filter.location {
        query = query.and_where(
            "(location.city LIKE {} OR location.country LIKE {})",
            format!("%{}%", escape_like(location)),
        );
    }
    if let Some(duration) = filter.duration {
        query = query.and_where("holiday.duration = {}", duration);
    }
    if let Some(start_date) = filter.start_date {
        query = query.and_where("holiday.start_date = {}", start_date);
    }

    query.order_by("holiday.id")
}

pub fn reservations_query() -> Select {
    Select::from::<Reservation>()
        .inner_join::<Holiday>("reservation.holiday_id = holiday.id")
        .inner_join::<Location>("holiday.location_id = location.id")
        .order_by("reservation.id")
}

#[async_trait]
impl TravelStore for PostgresConnectionRepo {
    async fn location_get_all(&self) -> Result<Vec<Location>, StoreError> {
        self.fetch_all(Select::from::<Location>().order_by("location.id")).await
    }

    async fn location(&self, location_id: i32) -> Result<Location, StoreError> {
        self.fetch_by_id("location", location_id).await
    }

    async fn insert_location(&self, location: &Location) -> Result<i32, StoreError> {
        self.insert(location).await
    }

    async fn update_location(&self, location: &Location) -> Result<Location, StoreError> {
        self.update("location", location).await
    }

    async fn delete_location(&self, location_id: i32) -> Result<Location, StoreError> {
        self.delete("location", location_id).await
    }

    async fn holidays_get_all(
        &self,
        filter: &HolidayFilter,
    ) -> Result<Vec<HolidayWithLocation>, StoreError> {
        self.fetch_all(holidays_query(filter)).await
    }

    async fn holiday(&self, holiday_id: i32) -> Result<Holiday, StoreError> {
        self.fetch_by_id("holiday", holiday_id).await
    }

    async fn insert_holiday(&self, holiday: &Holiday) -> Result<i32, StoreError> {
        self.insert(holiday).await
    }

    async fn update_holiday(&self, holiday: &Holiday) -> Result<Holiday, StoreError> {
        self.update("holiday", holiday).await
    }

    async fn delete_holiday(&self, holiday_id: i32) -> Result<Holiday, StoreError> {
        self.delete("holiday", holiday_id).await
    }

    async fn reservation_get_all(&self) -> Result<Vec<ReservationWithHoliday>, StoreError> {
        self.fetch_all(reservations_query()).await
    }

    async fn reservation(&self, reservation_id: i32) -> Result<Reservation, StoreError> {
        self.fetch_by_id("reservation", reservation_id).await
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> Result<i32, StoreError> {
        self.insert(reservation).await
    }

    async fn update_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<Reservation, StoreError> {
        self.update("reservation", reservation).await
    }

    async fn delete_reservation(&self, reservation_id: i32) -> Result<Reservation, StoreError> {
        self.delete("reservation", reservation_id).await
    }
}
