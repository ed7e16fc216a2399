// src/models/event.rs

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::Validate;

use crate::error::AppError;
use crate::listing::{DEFAULT_PAGE_SIZE, ListQuery, Listable, Pagination, SortDirection, SortValue};

/// Storage and wire format of event dates.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Represents the 'events' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Local date-time, `YYYY-MM-DDTHH:MM:SS`.
    pub date: String,
    pub venue: String,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Categories an admin can file an event under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Concert,
    Conference,
    Workshop,
    Exhibition,
    Sports,
    Festival,
    Entertainment,
    Business,
    Wellness,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Concert => "Concert",
            EventCategory::Conference => "Conference",
            EventCategory::Workshop => "Workshop",
            EventCategory::Exhibition => "Exhibition",
            EventCategory::Sports => "Sports",
            EventCategory::Festival => "Festival",
            EventCategory::Entertainment => "Entertainment",
            EventCategory::Business => "Business",
            EventCategory::Wellness => "Wellness",
            EventCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSortKey {
    Id,
    Title,
    #[default]
    Date,
    Price,
}

impl Listable for Event {
    type SortKey = EventSortKey;
    type Filter = EventCategory;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.venue.as_str(),
        ]
    }

    fn sort_value(&self, key: EventSortKey) -> SortValue<'_> {
        match key {
            EventSortKey::Id => SortValue::Number(self.id as f64),
            EventSortKey::Title => SortValue::Text(&self.title),
            // Normalized ISO dates order correctly as text.
            EventSortKey::Date => SortValue::Text(&self.date),
            EventSortKey::Price => SortValue::Number(self.price),
        }
    }

    fn matches_filter(&self, category: &EventCategory) -> bool {
        self.category == category.as_str()
    }
}

/// DTO for creating or replacing an event. Admin only.
#[derive(Debug, Deserialize, Validate)]
pub struct EventRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be at least 3 characters"))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 10000,
        message = "Description must be at least 10 characters"
    ))]
    pub description: String,

    pub category: EventCategory,

    #[validate(custom(function = validate_event_date))]
    pub date: String,

    #[validate(length(min = 3, max = 200, message = "Venue must be at least 3 characters"))]
    pub venue: String,

    #[validate(range(min = 0.0, message = "Price must be 0 or greater"))]
    pub price: f64,

    /// Empty string means "no image". Checked in [`EventRequest::into_fields`].
    #[serde(default)]
    pub image: Option<String>,
}

/// Event columns as they are written to storage.
#[derive(Debug, Clone)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub date: String,
    pub venue: String,
    pub price: f64,
    pub image: Option<String>,
}

impl EventRequest {
    /// Trims text, normalizes the date, and drops an empty image.
    pub fn into_fields(self) -> Result<EventFields, AppError> {
        let date = parse_event_date(&self.date)
            .ok_or_else(|| AppError::Validation(DATE_MESSAGE.to_string()))?
            .format(EVENT_DATE_FORMAT)
            .to_string();

        let image = self
            .image
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty());
        if let Some(image) = &image {
            if image.len() > 500 || Url::parse(image).is_err() {
                return Err(AppError::Validation(
                    "image: Please enter a valid URL".to_string(),
                ));
            }
        }

        Ok(EventFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.as_str(),
            date,
            venue: self.venue.trim().to_string(),
            price: self.price,
            image,
        })
    }
}

const DATE_MESSAGE: &str = "Date is required (YYYY-MM-DDTHH:MM)";

/// Accepts `YYYY-MM-DDTHH:MM[:SS]` (what a datetime-local input sends) or RFC 3339.
pub fn parse_event_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, EVENT_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|date| date.naive_local())
        })
}

fn validate_event_date(value: &str) -> Result<(), validator::ValidationError> {
    if parse_event_date(value).is_none() {
        let mut error = validator::ValidationError::new("invalid_date");
        error.message = Some(DATE_MESSAGE.into());
        return Err(error);
    }
    Ok(())
}

/// Query parameters for browsing events.
#[derive(Debug, Deserialize, Validate)]
pub struct EventListParams {
    /// Free-text search over title, description and venue.
    pub q: Option<String>,

    pub category: Option<EventCategory>,

    /// Sort key (default: date).
    pub sort: Option<EventSortKey>,

    /// Sort direction (default: asc, soonest first).
    pub order: Option<SortDirection>,

    #[validate(range(min = 1))]
    pub page: Option<usize>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<usize>,
}

impl EventListParams {
    pub fn query(&self) -> ListQuery<EventSortKey, EventCategory> {
        ListQuery::new(
            self.sort.unwrap_or_default(),
            self.order.unwrap_or(SortDirection::Asc),
        )
        .with_search(self.q.clone().unwrap_or_default())
        .with_filter(self.category)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::at(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}
