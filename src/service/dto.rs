//! Transfer objects exchanged with HTTP clients, and their translation to and from
//! storage records.

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;
use crate::models::holiday::{Holiday, HolidayWithLocation};
use crate::models::location::Location;
use crate::models::reservation::{Reservation, ReservationWithHoliday};

// Dates travel as `YYYY-MM-DD` in every JSON shape.
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocationDto {
    #[serde(default)]
    pub id: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub country: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDto {
    #[serde(default)]
    pub id: i32,
    pub title: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    pub duration: i32,
    pub price: f64,
    pub free_slots: i32,
    #[serde(rename = "location")]
    pub location_id: i32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HolidayWithLocationDto {
    pub id: i32,
    pub title: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    pub duration: i32,
    pub price: f64,
    pub free_slots: i32,
    pub location: LocationDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    #[serde(default)]
    pub id: i32,
    pub contact_name: String,
    pub phone_number: String,
    #[serde(rename = "holiday")]
    pub holiday_id: i32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWithHolidayDto {
    pub id: i32,
    pub contact_name: String,
    pub phone_number: String,
    pub holiday: HolidayWithLocationDto,
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            street: location.street,
            number: location.number,
            city: location.city,
            country: location.country,
        }
    }
}

impl From<LocationDto> for Location {
    fn from(location: LocationDto) -> Self {
        Self {
            id: location.id,
            street: location.street,
            number: location.number,
            city: location.city,
            country: location.country,
        }
    }
}

impl From<Holiday> for HolidayDto {
    fn from(holiday: Holiday) -> Self {
        Self {
            id: holiday.id,
            title: holiday.title,
            start_date: holiday.start_date,
            duration: holiday.duration,
            price: holiday.price,
            free_slots: holiday.free_slots,
            location_id: holiday.location_id,
        }
    }
}

impl From<HolidayDto> for Holiday {
    fn from(holiday: HolidayDto) -> Self {
        Self {
            id: holiday.id,
            title: holiday.title,
            duration: holiday.duration,
            start_date: holiday.start_date,
            price: holiday.price,
            free_slots: holiday.free_slots,
            location_id: holiday.location_id,
        }
    }
}

impl From<HolidayWithLocation> for HolidayWithLocationDto {
    fn from(holiday: HolidayWithLocation) -> Self {
        Self {
            id: holiday.id,
            title: holiday.title,
            start_date: holiday.start_date,
            duration: holiday.duration,
            price: holiday.price,
            free_slots: holiday.free_slots,
            location: holiday.location.into(),
        }
    }
}

impl From<Reservation> for ReservationDto {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            contact_name: reservation.contact_name,
            phone_number: reservation.phone_number,
            holiday_id: reservation.holiday_id,
        }
    }
}

impl From<ReservationDto> for Reservation {
    fn from(reservation: ReservationDto) -> Self {
        Self {
            id: reservation.id,
            contact_name: reservation.contact_name,
            phone_number: reservation.phone_number,
            holiday_id: reservation.holiday_id,
        }
    }
}

impl From<ReservationWithHoliday> for ReservationWithHolidayDto {
    fn from(reservation: ReservationWithHoliday) -> Self {
        Self {
            id: reservation.id,
            contact_name: reservation.contact_name,
            phone_number: reservation.phone_number,
            holiday: reservation.holiday.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn holiday_uses_camel_case_and_plain_dates() {
        let holiday = HolidayDto {
            id: 4,
            title: "Alps".to_string(),
            start_date: date!(2025 - 06 - 01),
            duration: 7,
            price: 12.5,
            free_slots: 3,
            location_id: 2,
        };

        assert_eq!(
            serde_json::to_value(&holiday).unwrap(),
            json!({
                "id": 4,
                "title": "Alps",
                "startDate": "2025-06-01",
                "duration": 7,
                "price": 12.5,
                "freeSlots": 3,
                "location": 2
            })
        );
    }

    #[test]
    fn reservation_accepts_a_body_without_id() {
        let reservation: ReservationDto = serde_json::from_value(json!({
            "contactName": "Ana",
            "phoneNumber": "+34 600 000 000",
            "holiday": 9
        }))
        .unwrap();

        assert_eq!(reservation.id, 0);
        assert_eq!(reservation.holiday_id, 9);
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("01/06/2025").is_err());
        assert_eq!(parse_date("2025-06-01").unwrap(), date!(2025 - 06 - 01));
    }
}
