//! Booking domain entity: a client's request for a cleaning service.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{
    BOOKING_CREATED_AT_FORMAT, BOOKING_DATE_FORMAT, BOOKING_STATUS_ASSIGNED, BOOKING_STATUS_NEW,
    BOOKING_TIME_FORMATS, BOOKING_TIME_OUTPUT_FORMAT,
};
use crate::errors::{AppError, AppResult};

/// Booking domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Area in square meters
    pub area: i32,
    pub service_type: String,
    pub comment: String,
    pub status: String,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: Option<NaiveTime>,
    pub assignee_id: Option<i32>,
    /// Full name of the assigned staff member, resolved on read
    pub assignee_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Status a booking takes once `assignee` is set or cleared.
    ///
    /// Only untouched (`new`) bookings move to `assigned`; anything staff
    /// already moved along keeps its status.
    pub fn status_after_assignment(&self, assignee: Option<i32>) -> String {
        match assignee {
            Some(_) if self.status == BOOKING_STATUS_NEW => BOOKING_STATUS_ASSIGNED.to_string(),
            _ => self.status.clone(),
        }
    }
}

/// Staff edits to a booking; `None` leaves the field as stored.
///
/// `assignee_id: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingChanges {
    pub status: Option<String>,
    pub assignee_id: Option<Option<i32>>,
}

impl BookingChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assignee_id.is_none()
    }
}

/// Raw booking submission from the public form.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(default)]
    #[validate(length(max = 255, message = "Name is too long"))]
    #[schema(example = "A")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 64, message = "Phone is too long"))]
    #[schema(example = "1")]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Email is too long"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 512, message = "Address is too long"))]
    #[schema(example = "Addr")]
    pub address: String,
    /// Area in square meters, must be positive. Numeric strings are accepted.
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    #[schema(example = 50)]
    pub area: i64,
    #[serde(default)]
    #[validate(length(max = 128, message = "Service type is too long"))]
    #[schema(example = "standard")]
    pub service_type: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Comment is too long"))]
    pub comment: Option<String>,
    /// Desired date, `YYYY-MM-DD`
    #[serde(default)]
    #[schema(example = "2024-01-01")]
    pub date: Option<String>,
    /// Desired time, `HH:MM`
    #[serde(default)]
    #[schema(example = "10:00")]
    pub time: Option<String>,
}

/// Validated booking ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub area: i32,
    pub service_type: String,
    pub comment: String,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: Option<NaiveTime>,
}

impl BookingDraft {
    /// Validate and normalize a submission.
    ///
    /// Date and time go together: both present, or both absent for
    /// submissions from forms that predate scheduling.
    pub fn validate(self) -> AppResult<NewBooking> {
        let name = self.name.trim().to_string();
        let phone = self.phone.trim().to_string();
        let email = self.email.trim().to_string();
        let address = self.address.trim().to_string();
        let service_type = self.service_type.trim().to_string();

        if name.is_empty()
            || phone.is_empty()
            || email.is_empty()
            || address.is_empty()
            || service_type.is_empty()
        {
            return Err(AppError::validation(
                "Name, phone, email, address and service type are required",
            ));
        }

        let area = i32::try_from(self.area)
            .ok()
            .filter(|a| *a > 0)
            .ok_or_else(|| AppError::validation("Area must be a positive number"))?;

        let date = self.date.as_deref().map(str::trim).filter(|d| !d.is_empty());
        let time = self.time.as_deref().map(str::trim).filter(|t| !t.is_empty());

        let (booking_date, booking_time) = match (date, time) {
            (Some(d), Some(t)) => (Some(parse_date(d)?), Some(parse_time(t)?)),
            (None, None) => (None, None),
            _ => {
                return Err(AppError::validation(
                    "Booking date and time must be provided together",
                ))
            }
        };

        Ok(NewBooking {
            name,
            phone,
            email,
            address,
            area,
            service_type,
            comment: self.comment.unwrap_or_default().trim().to_string(),
            booking_date,
            booking_time,
        })
    }
}

/// Web forms send the area either as a JSON number or as the raw input text.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Area {
        Number(i64),
        Text(String),
    }

    match Area::deserialize(deserializer)? {
        Area::Number(n) => Ok(n),
        Area::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom("Area must be a number")),
    }
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, BOOKING_DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid booking date: {}", value)))
}

fn parse_time(value: &str) -> AppResult<NaiveTime> {
    BOOKING_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| AppError::validation(format!("Invalid booking time: {}", value)))
}

/// Booking as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[schema(example = 50)]
    pub area: i32,
    #[schema(example = "standard")]
    pub service_type: String,
    pub comment: String,
    #[schema(example = "new")]
    pub status: String,
    #[schema(example = "2024-01-01")]
    pub booking_date: Option<String>,
    #[schema(example = "10:00")]
    pub booking_time: Option<String>,
    pub assignee_id: Option<i32>,
    #[schema(example = "Anna Petrova")]
    pub assignee_name: Option<String>,
    /// Submission time, `YYYY-MM-DD HH:MM` UTC
    #[schema(example = "2024-01-01 09:30")]
    pub created_at: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            name: b.name,
            phone: b.phone,
            email: b.email,
            address: b.address,
            area: b.area,
            service_type: b.service_type,
            comment: b.comment,
            status: b.status,
            booking_date: b.booking_date.map(|d| d.format(BOOKING_DATE_FORMAT).to_string()),
            booking_time: b
                .booking_time
                .map(|t| t.format(BOOKING_TIME_OUTPUT_FORMAT).to_string()),
            assignee_id: b.assignee_id,
            assignee_name: b.assignee_name,
            created_at: b.created_at.format(BOOKING_CREATED_AT_FORMAT).to_string(),
            updated_at: b.updated_at,
        }
    }
}

/// Booking counts for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookingStats {
    pub total: u64,
    /// Count per status value, including statuses staff invented
    pub by_status: BTreeMap<String, u64>,
}

impl BookingStats {
    /// Build stats from `(status, count)` pairs.
    pub fn from_counts(counts: impl IntoIterator<Item = (String, u64)>) -> Self {
        let by_status: BTreeMap<String, u64> = counts.into_iter().collect();
        Self {
            total: by_status.values().sum(),
            by_status,
        }
    }
}
