use bb8_postgres::tokio_postgres::{Error, Row};
use time::Date;
use crate::models::location::Location;
use crate::repositories::sql::{read, Binding, FromRow, Record};

#[derive(Clone, Debug, PartialEq)]
pub struct Holiday {
    pub id: i32,
    pub title: String,
    /// Number of days. Informational only, never checked against `start_date`.
    pub duration: i32,
    pub start_date: Date,
    pub price: f64,
    pub free_slots: i32,
    pub location_id: i32,
}

impl FromRow for Holiday {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            id: read(row, Self::TABLE, "id")?,
            title: read(row, Self::TABLE, "title")?,
            duration: read(row, Self::TABLE, "duration")?,
            start_date: read(row, Self::TABLE, "start_date")?,
            price: read(row, Self::TABLE, "price")?,
            free_slots: read(row, Self::TABLE, "free_slots")?,
            location_id: read(row, Self::TABLE, "location_id")?,
        })
    }
}

impl Record for Holiday {
    const TABLE: &'static str = "holiday";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "duration",
        "start_date",
        "price",
        "free_slots",
        "location_id",
    ];

    fn key(&self) -> &i32 {
        &self.id
    }

    fn bindings(&self) -> Vec<Binding<'_>> {
        vec![
            Binding::new("title", &self.title),
            Binding::new("duration", &self.duration),
            Binding::new("start_date", &self.start_date),
            Binding::new("price", &self.price),
            Binding::new("free_slots", &self.free_slots),
            Binding::new("location_id", &self.location_id),
        ]
    }
}

/// A holiday joined with the location it references.
#[derive(Clone, Debug, PartialEq)]
pub struct HolidayWithLocation {
    pub id: i32,
    pub title: String,
    pub duration: i32,
    pub start_date: Date,
    pub price: f64,
    pub free_slots: i32,
    pub location: Location,
}

impl HolidayWithLocation {
    pub fn new(holiday: Holiday, location: Location) -> Self {
        Self {
            id: holiday.id,
            title: holiday.title,
            duration: holiday.duration,
            start_date: holiday.start_date,
            price: holiday.price,
            free_slots: holiday.free_slots,
            location,
        }
    }
}

impl FromRow for HolidayWithLocation {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self::new(Holiday::from_row(row)?, Location::from_row(row)?))
    }
}

/// Optional narrowing of the holiday listing. Every present term must match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HolidayFilter {
    /// Substring of the location's city or country, case-sensitive.
    pub location: Option<String>,
    pub duration: Option<i32>,
    pub start_date: Option<Date>,
}
