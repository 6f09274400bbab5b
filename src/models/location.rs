use bb8_postgres::tokio_postgres::{Error, Row};
use crate::repositories::sql::{read, Binding, FromRow, Record};

/// A street address holidays take place at.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub id: i32,
    pub street: String,
    /// Kept as text so unit letters such as `12b` survive.
    pub number: String,
    pub city: String,
    pub country: String,
}

impl FromRow for Location {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            id: read(row, Self::TABLE, "id")?,
            street: read(row, Self::TABLE, "street")?,
            number: read(row, Self::TABLE, "number")?,
            city: read(row, Self::TABLE, "city")?,
            country: read(row, Self::TABLE, "country")?,
        })
    }
}

impl Record for Location {
    const TABLE: &'static str = "location";
    const COLUMNS: &'static [&'static str] = &["id", "street", "number", "city", "country"];

    fn key(&self) -> &i32 {
        &self.id
    }

    fn bindings(&self) -> Vec<Binding<'_>> {
        vec![
            Binding::new("street", &self.street),
            Binding::new("number", &self.number),
            Binding::new("city", &self.city),
            Binding::new("country", &self.country),
        ]
    }
}
