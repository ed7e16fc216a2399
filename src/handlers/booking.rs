// src/handlers/booking.rs

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    handlers::events::fetch_event,
    models::{
        booking::{Booking, CreateBookingRequest},
        user::User,
    },
    utils::extract::ValidatedJson,
};

const BOOKING_COLUMNS: &str = "id, user_id, event_id, created_at, title, date, venue, price, image";
const ALREADY_BOOKED: &str = "You have already booked this event";

/// Books `event_id` for `user_id`.
///
/// The snapshot copy and the insert are one statement, so it takes SQLite's
/// write lock up front and waits out the busy timeout under contention instead
/// of failing a lock upgrade. `ON CONFLICT ... DO NOTHING` turns a duplicate,
/// including a lost race, into `Conflict`. Nothing is written on any error path.
pub async fn book_event(
    pool: &SqlitePool,
    user_id: i64,
    event_id: i64,
) -> Result<Booking, AppError> {
    let booking = sqlx::query_as::<_, Booking>(&format!(
        r#"
        INSERT INTO bookings (user_id, event_id, title, date, venue, price, image)
        SELECT ?, id, title, date, venue, price, image FROM events WHERE id = ?
        ON CONFLICT (user_id, event_id) DO NOTHING
        RETURNING {}
        "#,
        BOOKING_COLUMNS
    ))
    .bind(user_id)
    .bind(event_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(ALREADY_BOOKED.to_string())
        } else {
            tracing::error!("Failed to create booking: {:?}", e);
            AppError::from(e)
        }
    })?;

    let Some(booking) = booking else {
        // No row: either the event is missing or the pair already exists.
        return match fetch_event(pool, event_id).await? {
            Some(_) => Err(AppError::Conflict(ALREADY_BOOKED.to_string())),
            None => Err(AppError::NotFound("Event not found".to_string())),
        };
    };

    tracing::info!(
        booking_id = booking.id,
        user_id,
        event_id,
        "Booking created"
    );
    Ok(booking)
}

/// Books an event for the current user.
pub async fn create_booking(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<User>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = payload
        .event_id
        .ok_or_else(|| AppError::Validation("Event ID is required".to_string()))?;

    let booking = book_event(&pool, user.id, event_id).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Lists the current user's bookings, newest first.
pub async fn list_bookings(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {} FROM bookings WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        BOOKING_COLUMNS
    ))
    .bind(user.id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(bookings))
}
