use bb8_postgres::tokio_postgres::{Error, Row};
use crate::models::holiday::HolidayWithLocation;
use crate::repositories::sql::{read, Binding, FromRow, Record};

#[derive(Clone, Debug, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub contact_name: String,
    pub phone_number: String,
    pub holiday_id: i32,
}

impl FromRow for Reservation {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            id: read(row, Self::TABLE, "id")?,
            contact_name: read(row, Self::TABLE, "contact_name")?,
            phone_number: read(row, Self::TABLE, "phone_number")?,
            holiday_id: read(row, Self::TABLE, "holiday_id")?,
        })
    }
}

impl Record for Reservation {
    const TABLE: &'static str = "reservation";
    const COLUMNS: &'static [&'static str] = &["id", "contact_name", "phone_number", "holiday_id"];

    fn key(&self) -> &i32 {
        &self.id
    }

    fn bindings(&self) -> Vec<Binding<'_>> {
        vec![
            Binding::new("contact_name", &self.contact_name),
            Binding::new("phone_number", &self.phone_number),
            Binding::new("holiday_id", &self.holiday_id),
        ]
    }
}

/// A reservation with its holiday, and that holiday's location, embedded.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationWithHoliday {
    pub id: i32,
    pub contact_name: String,
    pub phone_number: String,
    pub holiday: HolidayWithLocation,
}

impl ReservationWithHoliday {
    pub fn new(reservation: Reservation, holiday: HolidayWithLocation) -> Self {
        Self {
            id: reservation.id,
            contact_name: reservation.contact_name,
            phone_number: reservation.phone_number,
            holiday,
        }
    }
}

impl FromRow for ReservationWithHoliday {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self::new(
            Reservation::from_row(row)?,
            HolidayWithLocation::from_row(row)?,
        ))
    }
}
