// src/models/booking.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'bookings' table in the database.
///
/// `title`, `date`, `venue`, `price` and `image` are copied from the event when
/// the booking is made and are not touched by later event edits.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub created_at: chrono::NaiveDateTime,
    pub title: String,
    pub date: String,
    pub venue: String,
    pub price: f64,
    pub image: Option<String>,
}

/// DTO for booking an event.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[serde(rename = "eventId", alias = "event_id", default)]
    #[validate(range(min = 1, message = "Event ID must be positive"))]
    pub event_id: Option<i64>,
}
