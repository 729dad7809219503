use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use travelingo_shared::pii::Masked;

/// Column limits shared by validation and the SQL schema.
pub mod limits {
    pub const FIRST_NAME: usize = 100;
    pub const LAST_NAME: usize = 100;
    pub const EMAIL: usize = 254;
    pub const PHONE: usize = 20;
    pub const DESTINATION: usize = 255;
    pub const BUDGET_RANGE: usize = 50;
    pub const TRAVEL_TYPE: usize = 100;
    /// Upper bound of a Postgres INTEGER column.
    pub const TRAVELERS_MAX: i64 = 2_147_483_647;
}

/// A validated travel inquiry, ready to be stored.
///
/// Only [`crate::validation::validate_inquiry`] builds these from client
/// input, so `return_date > departure_date` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelInquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
    pub budget_range: String,
    pub travel_type: String,
}

impl fmt::Display for TravelInquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.first_name, self.last_name, self.destination)
    }
}

/// An inquiry as persisted, with the id assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInquiry {
    pub id: i64,
    #[serde(flatten)]
    pub inquiry: TravelInquiry,
}
