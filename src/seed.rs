// src/seed.rs

//! Startup data: the admin account and a starter catalogue of events.

use sqlx::SqlitePool;

use crate::{
    config::AdminSeed,
    error::AppError,
    models::user::{ADMIN_ROLE, normalize_email},
    utils::hash::hash_password,
};

struct SampleEvent {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    date: &'static str,
    venue: &'static str,
    price: f64,
    image: &'static str,
}

const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        title: "Summer Music Festival",
        description: "A weekend of amazing music performances featuring top artists from around the world.",
        category: "Concert",
        date: "2025-07-15T18:00:00",
        venue: "Central Park, New York",
        price: 89.99,
        image: "https://images.pexels.com/photos/1105666/pexels-photo-1105666.jpeg",
    },
    SampleEvent {
        title: "Tech Conference 2025",
        description: "The biggest tech conference of the year with speakers from leading technology companies.",
        category: "Conference",
        date: "2025-09-20T09:00:00",
        venue: "Convention Center, San Francisco",
        price: 299.99,
        image: "https://images.pexels.com/photos/2774556/pexels-photo-2774556.jpeg",
    },
    SampleEvent {
        title: "Art Exhibition: Modern Masters",
        description: "Explore the works of contemporary artists pushing the boundaries of modern art.",
        category: "Exhibition",
        date: "2025-08-10T10:00:00",
        venue: "Metropolitan Museum, New York",
        price: 24.99,
        image: "https://images.pexels.com/photos/1509534/pexels-photo-1509534.jpeg",
    },
    SampleEvent {
        title: "Basketball Championship Final",
        description: "The culmination of the season as the two best teams battle for the championship title.",
        category: "Sports",
        date: "2025-06-30T19:30:00",
        venue: "Madison Square Garden, New York",
        price: 129.99,
        image: "https://images.pexels.com/photos/945471/pexels-photo-945471.jpeg",
    },
    SampleEvent {
        title: "Web Development Workshop",
        description: "Learn the latest techniques and tools for modern web development in this hands-on workshop.",
        category: "Workshop",
        date: "2025-08-05T10:00:00",
        venue: "Tech Hub, Boston",
        price: 49.99,
        image: "https://images.pexels.com/photos/574069/pexels-photo-574069.jpeg",
    },
    SampleEvent {
        title: "Food & Wine Festival",
        description: "Experience culinary delights from renowned chefs and taste exceptional wines from around the world.",
        category: "Festival",
        date: "2025-07-25T12:00:00",
        venue: "Waterfront Park, San Diego",
        price: 75.99,
        image: "https://images.pexels.com/photos/1267320/pexels-photo-1267320.jpeg",
    },
    SampleEvent {
        title: "Photography Workshop",
        description: "Master the art of photography with hands-on training from professional photographers.",
        category: "Workshop",
        date: "2025-08-15T09:00:00",
        venue: "Creative Studio, Los Angeles",
        price: 149.99,
        image: "https://images.pexels.com/photos/1264210/pexels-photo-1264210.jpeg",
    },
    SampleEvent {
        title: "Comedy Night Special",
        description: "An evening of laughter with top comedians performing their best material.",
        category: "Entertainment",
        date: "2025-06-20T20:00:00",
        venue: "Laugh Factory, Chicago",
        price: 35.99,
        image: "https://images.pexels.com/photos/713149/pexels-photo-713149.jpeg",
    },
    SampleEvent {
        title: "Startup Networking Event",
        description: "Connect with entrepreneurs, investors, and industry experts in this exclusive networking event.",
        category: "Business",
        date: "2025-09-10T18:00:00",
        venue: "Innovation Hub, Austin",
        price: 0.0,
        image: "https://images.pexels.com/photos/1181396/pexels-photo-1181396.jpeg",
    },
    SampleEvent {
        title: "Yoga & Wellness Retreat",
        description: "A weekend of relaxation, meditation, and yoga sessions with expert instructors.",
        category: "Wellness",
        date: "2025-07-05T08:00:00",
        venue: "Mountain Resort, Colorado",
        price: 199.99,
        image: "https://images.pexels.com/photos/1472887/pexels-photo-1472887.jpeg",
    },
];

/// Creates the admin account unless a user with that email already exists.
pub async fn seed_admin_user(pool: &SqlitePool, admin: &AdminSeed) -> Result<(), AppError> {
    let email = normalize_email(&admin.email);

    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        tracing::info!("Seeding admin user: {}", email);
        let hashed_password = hash_password(&admin.password)?;

        sqlx::query("INSERT INTO users (name, email, password, role) VALUES (?, ?, ?, ?)")
            .bind(&admin.name)
            .bind(&email)
            .bind(hashed_password)
            .bind(ADMIN_ROLE)
            .execute(pool)
            .await?;
        tracing::info!("Admin user created successfully.");
    }

    Ok(())
}

/// Inserts the sample catalogue when the events table is empty.
/// Returns how many events were added.
pub async fn seed_sample_events(pool: &SqlitePool) -> Result<usize, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for event in SAMPLE_EVENTS {
        sqlx::query(
            "INSERT INTO events (title, description, category, date, venue, price, image) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.title)
        .bind(event.description)
        .bind(event.category)
        .bind(event.date)
        .bind(event.venue)
        .bind(event.price)
        .bind(event.image)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!("Sample events added: {}", SAMPLE_EVENTS.len());
    Ok(SAMPLE_EVENTS.len())
}
