//! In-process stand-ins for the postgres repository, used to drive the service and
//! HTTP layers in tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use async_trait::async_trait;
use crate::models::holiday::{Holiday, HolidayFilter, HolidayWithLocation};
use crate::models::location::Location;
use crate::models::reservation::{Reservation, ReservationWithHoliday};
use crate::repositories::{StoreError, TravelStore};

#[derive(Default)]
struct Tables {
    next_id: i32,
    locations: BTreeMap<i32, Location>,
    holidays: BTreeMap<i32, Holiday>,
    reservations: BTreeMap<i32, Reservation>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn holiday_with_location(&self, holiday: &Holiday) -> Option<HolidayWithLocation> {
        let location = self.locations.get(&holiday.location_id)?;
        Some(HolidayWithLocation::new(holiday.clone(), location.clone()))
    }

    fn check_location_exists(&self, location_id: i32) -> Result<(), StoreError> {
        if self.locations.contains_key(&location_id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "location {} is not present in table \"location\"",
                location_id
            )))
        }
    }

    fn check_holiday_exists(&self, holiday_id: i32) -> Result<(), StoreError> {
        if self.holidays.contains_key(&holiday_id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "holiday {} is not present in table \"holiday\"",
                holiday_id
            )))
        }
    }
}

/// Mirrors the postgres schema's foreign keys, including ON DELETE RESTRICT.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &HolidayFilter, holiday: &HolidayWithLocation) -> bool {
    let location_matches = filter.location.as_ref().map_or(true, |location| {
        holiday.location.city.contains(location.as_str())
            || holiday.location.country.contains(location.as_str())
    });
    let duration_matches = filter.duration.map_or(true, |d| holiday.duration == d);
    let start_date_matches = filter.start_date.map_or(true, |d| holiday.start_date == d);

    location_matches && duration_matches && start_date_matches
}

fn not_found(entity: &'static str, id: i32) -> StoreError {
    StoreError::NotFound { entity, id }
}

#[async_trait]
impl TravelStore for MemoryStore {
    async fn location_get_all(&self) -> Result<Vec<Location>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.locations.values().cloned().collect())
    }

    async fn location(&self, location_id: i32) -> Result<Location, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .locations
            .get(&location_id)
            .cloned()
            .ok_or_else(|| not_found("location", location_id))
    }

    async fn insert_location(&self, location: &Location) -> Result<i32, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.locations.insert(id, Location { id, ..location.clone() });
        Ok(id)
    }

    async fn update_location(&self, location: &Location) -> Result<Location, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.locations.get_mut(&location.id) {
            Some(stored) => {
                *stored = location.clone();
                Ok(location.clone())
            }
            None => Err(not_found("location", location.id)),
        }
    }

    async fn delete_location(&self, location_id: i32) -> Result<Location, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.holidays.values().any(|h| h.location_id == location_id) {
            return Err(StoreError::Conflict(format!(
                "location {} is still referenced from table \"holiday\"",
                location_id
            )));
        }
        tables
            .locations
            .remove(&location_id)
            .ok_or_else(|| not_found("location", location_id))
    }

    async fn holidays_get_all(
        &self,
        filter: &HolidayFilter,
    ) -> Result<Vec<HolidayWithLocation>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .holidays
            .values()
            .filter_map(|holiday| tables.holiday_with_location(holiday))
            .filter(|holiday| matches(filter, holiday))
            .collect())
    }

    async fn holiday(&self, holiday_id: i32) -> Result<Holiday, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .holidays
            .get(&holiday_id)
            .cloned()
            .ok_or_else(|| not_found("holiday", holiday_id))
    }

    async fn insert_holiday(&self, holiday: &Holiday) -> Result<i32, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_location_exists(holiday.location_id)?;
        let id = tables.next_id();
        tables.holidays.insert(id, Holiday { id, ..holiday.clone() });
        Ok(id)
    }

    async fn update_holiday(&self, holiday: &Holiday) -> Result<Holiday, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.holidays.contains_key(&holiday.id) {
            return Err(not_found("holiday", holiday.id));
        }
        tables.check_location_exists(holiday.location_id)?;
        tables.holidays.insert(holiday.id, holiday.clone());
        Ok(holiday.clone())
    }

    async fn delete_holiday(&self, holiday_id: i32) -> Result<Holiday, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.reservations.values().any(|r| r.holiday_id == holiday_id) {
            return Err(StoreError::Conflict(format!(
                "holiday {} is still referenced from table \"reservation\"",
                holiday_id
            )));
        }
        tables
            .holidays
            .remove(&holiday_id)
            .ok_or_else(|| not_found("holiday", holiday_id))
    }

    async fn reservation_get_all(&self) -> Result<Vec<ReservationWithHoliday>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .reservations
            .values()
            .filter_map(|reservation| {
                let holiday = tables.holidays.get(&reservation.holiday_id)?;
                let holiday = tables.holiday_with_location(holiday)?;
                Some(ReservationWithHoliday::new(reservation.clone(), holiday))
            })
            .collect())
    }

    async fn reservation(&self, reservation_id: i32) -> Result<Reservation, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .reservations
            .get(&reservation_id)
            .cloned()
            .ok_or_else(|| not_found("reservation", reservation_id))
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> Result<i32, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_holiday_exists(reservation.holiday_id)?;
        let id = tables.next_id();
        tables.reservations.insert(id, Reservation { id, ..reservation.clone() });
        Ok(id)
    }

    async fn update_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<Reservation, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.reservations.contains_key(&reservation.id) {
            return Err(not_found("reservation", reservation.id));
        }
        tables.check_holiday_exists(reservation.holiday_id)?;
        tables.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation.clone())
    }

    async fn delete_reservation(&self, reservation_id: i32) -> Result<Reservation, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .reservations
            .remove(&reservation_id)
            .ok_or_else(|| not_found("reservation", reservation_id))
    }
}

/// A store whose database is always unreachable.
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T, StoreError> {
    Err(StoreError::Pool("timed out waiting for connection".to_string()))
}

#[async_trait]
impl TravelStore for UnavailableStore {
    async fn location_get_all(&self) -> Result<Vec<Location>, StoreError> {
        unavailable()
    }

    async fn location(&self, _id: i32) -> Result<Location, StoreError> {
        unavailable()
    }

    async fn insert_location(&self, _location: &Location) -> Result<i32, StoreError> {
        unavailable()
    }

    async fn update_location(&self, _location: &Location) -> Result<Location, StoreError> {
        unavailable()
    }

    async fn delete_location(&self, _id: i32) -> Result<Location, StoreError> {
        unavailable()
    }

    async fn holidays_get_all(
        &self,
        _filter: &HolidayFilter,
    ) -> Result<Vec<HolidayWithLocation>, StoreError> {
        unavailable()
    }

    async fn holiday(&self, _id: i32) -> Result<Holiday, StoreError> {
        unavailable()
    }

    async fn insert_holiday(&self, _holiday: &Holiday) -> Result<i32, StoreError> {
        unavailable()
    }

    async fn update_holiday(&self, _holiday: &Holiday) -> Result<Holiday, StoreError> {
        unavailable()
    }

    async fn delete_holiday(&self, _id: i32) -> Result<Holiday, StoreError> {
        unavailable()
    }

    async fn reservation_get_all(&self) -> Result<Vec<ReservationWithHoliday>, StoreError> {
        unavailable()
    }

    async fn reservation(&self, _id: i32) -> Result<Reservation, StoreError> {
        unavailable()
    }

    async fn insert_reservation(&self, _reservation: &Reservation) -> Result<i32, StoreError> {
        unavailable()
    }

    async fn update_reservation(&self, _reservation: &Reservation) -> Result<Reservation, StoreError> {
        unavailable()
    }

    async fn delete_reservation(&self, _id: i32) -> Result<Reservation, StoreError> {
        unavailable()
    }
}
