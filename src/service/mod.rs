//! Translation between storage records and transfer objects.
//!
//! Each endpoint family answers with its own reply type, so the shape of every
//! response body is fixed at compile time.

use std::sync::Arc;
use serde::Serialize;
use crate::models::holiday::HolidayFilter;
use crate::repositories::{StoreError, TravelStore};
use crate::service::dto::{
    HolidayDto, HolidayWithLocationDto, LocationDto, ReservationDto, ReservationWithHolidayDto,
};

pub mod dto;

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum LocationReply {
    List(Vec<LocationDto>),
    One(LocationDto),
    Created(i32),
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum HolidayReply {
    List(Vec<HolidayWithLocationDto>),
    One(HolidayDto),
    Created(i32),
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum ReservationReply {
    List(Vec<ReservationWithHolidayDto>),
    One(ReservationDto),
    Created(i32),
}

pub struct TravelService {
    store: Arc<dyn TravelStore>,
}

impl TravelService {
    pub fn new(store: Arc<dyn TravelStore>) -> Self {
        Self { store }
    }

    pub async fn location_get_all(&self) -> Result<LocationReply, StoreError> {
        let locations = self.store.location_get_all().await?;
        Ok(LocationReply::List(locations.into_iter().map(Into::into).collect()))
    }

    pub async fn location(&self, location_id: i32) -> Result<LocationReply, StoreError> {
        let location = self.store.location(location_id).await?;
        Ok(LocationReply::One(location.into()))
    }

    pub async fn insert_location(&self, location: LocationDto) -> Result<LocationReply, StoreError> {
        let id = self.store.insert_location(&location.into()).await?;
        Ok(LocationReply::Created(id))
    }

    pub async fn update_location(&self, location: LocationDto) -> Result<LocationReply, StoreError> {
        let updated = self.store.update_location(&location.into()).await?;
        Ok(LocationReply::One(updated.into()))
    }

    pub async fn delete_location(&self, location_id: i32) -> Result<LocationReply, StoreError> {
        let deleted = self.store.delete_location(location_id).await?;
        Ok(LocationReply::One(deleted.into()))
    }

    /// The filter goes to storage untouched.
    pub async fn holiday_get_all(&self, filter: HolidayFilter) -> Result<HolidayReply, StoreError> {
        let holidays = self.store.holidays_get_all(&filter).await?;
        Ok(HolidayReply::List(holidays.into_iter().map(Into::into).collect()))
    }

    pub async fn holiday(&self, holiday_id: i32) -> Result<HolidayReply, StoreError> {
        let holiday = self.store.holiday(holiday_id).await?;
        Ok(HolidayReply::One(holiday.into()))
    }

    pub async fn insert_holiday(&self, holiday: HolidayDto) -> Result<HolidayReply, StoreError> {
        let id = self.store.insert_holiday(&holiday.into()).await?;
        Ok(HolidayReply::Created(id))
    }

    pub async fn update_holiday(&self, holiday: HolidayDto) -> Result<HolidayReply, StoreError> {
        let updated = self.store.update_holiday(&holiday.into()).await?;
        Ok(HolidayReply::One(updated.into()))
    }

    pub async fn delete_holiday(&self, holiday_id: i32) -> Result<HolidayReply, StoreError> {
        let deleted = self.store.delete_holiday(holiday_id).await?;
        Ok(HolidayReply::One(deleted.into()))
    }

    pub async fn reservation_get_all(&self) -> Result<ReservationReply, StoreError> {
        let reservations = self.store.reservation_get_all().await?;
        Ok(ReservationReply::List(reservations.into_iter().map(Into::into).collect()))
    }

    pub async fn reservation(&self, reservation_id: i32) -> Result<ReservationReply, StoreError> {
        let reservation = self.store.reservation(reservation_id).await?;
        Ok(ReservationReply::One(reservation.into()))
    }

    // Reservations never touch the holiday's free_slots.
    pub async fn insert_reservation(
        &self,
        reservation: ReservationDto,
    ) -> Result<ReservationReply, StoreError> {
        let id = self.store.insert_reservation(&reservation.into()).await?;
        Ok(ReservationReply::Created(id))
    }

    pub async fn update_reservation(
        &self,
        reservation: ReservationDto,
    ) -> Result<ReservationReply, StoreError> {
        let updated = self.store.update_reservation(&reservation.into()).await?;
        Ok(ReservationReply::One(updated.into()))
    }

    pub async fn delete_reservation(
        &self,
        reservation_id: i32,
    ) -> Result<ReservationReply, StoreError> {
        let deleted = self.store.delete_reservation(reservation_id).await?;
        Ok(ReservationReply::One(deleted.into()))
    }
}
