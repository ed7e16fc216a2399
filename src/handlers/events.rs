// src/handlers/events.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    listing::derive,
    models::event::{Event, EventListParams, EventRequest},
    utils::extract::{ValidatedJson, ValidatedPath, ValidatedQuery},
};

const EVENT_COLUMNS: &str =
    "id, title, description, category, date, venue, price, image, created_at, updated_at";

/// All events, soonest first.
pub(crate) async fn fetch_all_events(pool: &SqlitePool) -> Result<Vec<Event>, AppError> {
    let events = sqlx::query_as::<_, Event>(&format!(
        "SELECT {} FROM events ORDER BY date ASC, id ASC",
        EVENT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(events)
}

pub(crate) async fn fetch_event<'e, E>(executor: E, id: i64) -> Result<Option<Event>, AppError>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let event = sqlx::query_as::<_, Event>(&format!(
        "SELECT {} FROM events WHERE id = ?",
        EVENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(event)
}

/// Lists all events ordered by date.
pub async fn list_events(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(fetch_all_events(&pool).await?))
}

/// Searches, filters, sorts and paginates the catalogue.
pub async fn browse_events(
    State(pool): State<SqlitePool>,
    ValidatedQuery(params): ValidatedQuery<EventListParams>,
) -> Result<impl IntoResponse, AppError> {
    let events = fetch_all_events(&pool).await?;
    Ok(Json(derive(&events, &params.query(), &params.pagination())))
}

/// Categories currently in use, alphabetically.
pub async fn list_categories(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let categories =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM events ORDER BY category")
            .fetch_all(&pool)
            .await?;

    Ok(Json(categories))
}

/// Retrieves a single event by ID.
pub async fn get_event(
    State(pool): State<SqlitePool>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let event = fetch_event(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// Creates a new event.
/// Admin only.
pub async fn create_event(
    State(pool): State<SqlitePool>,
    ValidatedJson(payload): ValidatedJson<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;

    let event = sqlx::query_as::<_, Event>(&format!(
        r#"
        INSERT INTO events (title, description, category, date, venue, price, image)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        EVENT_COLUMNS
    ))
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.category)
    .bind(&fields.date)
    .bind(&fields.venue)
    .bind(fields.price)
    .bind(&fields.image)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create event: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(event_id = event.id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// Replaces every editable field of an event.
/// Admin only. Existing bookings keep the details copied at booking time.
pub async fn update_event(
    State(pool): State<SqlitePool>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(payload): ValidatedJson<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;

    let event = sqlx::query_as::<_, Event>(&format!(
        r#"
        UPDATE events
        SET title = ?, description = ?, category = ?, date = ?, venue = ?, price = ?, image = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING {}
        "#,
        EVENT_COLUMNS
    ))
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.category)
    .bind(&fields.date)
    .bind(&fields.venue)
    .bind(fields.price)
    .bind(&fields.image)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update event: {:?}", e);
        AppError::from(e)
    })?
    .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// Deletes an event by ID; its bookings go with it.
/// Admin only.
pub async fn delete_event(
    State(pool): State<SqlitePool>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete event: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    tracing::info!(event_id = id, "Event deleted");
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
