// tests/api_tests.rs

mod common;

use common::{ADMIN_EMAIL, event_body, spawn_app};
use eventhub::seed;
use serde_json::{Value, json};

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_returns_user_and_token() {
    let app = spawn_app().await;

    let response = app.register("Ada", "Ada@Example.com", "password123").await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn registering_the_same_email_twice_fails() {
    let app = spawn_app().await;

    let first = app.register("Admin", ADMIN_EMAIL, "admin123").await;
    assert_eq!(first.status().as_u16(), 201);

    let second = app.register("Admin Again", ADMIN_EMAIL, "admin123").await;
    assert_eq!(second.status().as_u16(), 400);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn register_fails_validation() {
    let app = spawn_app().await;

    // Missing name, short password
    let response = app
        .client
        .post(app.url("/api/auth/register"))
        .json(&json!({ "email": "x@example.com", "password": "123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Not JSON at all
    let response = app
        .client
        .post(app.url("/api/auth/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = spawn_app().await;
    app.register("Grace", "grace@example.com", "password123").await;

    let ok = app.login("GRACE@example.com", "password123").await;
    assert_eq!(ok.status().as_u16(), 200);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["user"]["name"], "Grace");

    let wrong_password = app.login("grace@example.com", "nope-nope").await;
    assert_eq!(wrong_password.status().as_u16(), 401);
    let body: Value = wrong_password.json().await.unwrap();
    assert_eq!(body["message"], "Invalid email or password");

    let unknown = app.login("nobody@example.com", "password123").await;
    assert_eq!(unknown.status().as_u16(), 401);

    let missing = app.login("", "").await;
    assert_eq!(missing.status().as_u16(), 400);
}

#[tokio::test]
async fn current_user_requires_a_valid_token() {
    let app = spawn_app().await;
    let token = app.user_token("me@example.com").await;

    let anonymous = app.client.get(app.url("/api/auth/user")).send().await.unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);
    let body: Value = anonymous.json().await.unwrap();
    assert_eq!(body["message"], "Authentication required");

    let forged = app
        .client
        .get(app.url("/api/auth/user"))
        .bearer_auth("not.a.jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(forged.status().as_u16(), 401);

    let me = app
        .client
        .get(app.url("/api/auth/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(me.status().as_u16(), 200);
    let body: Value = me.json().await.unwrap();
    assert_eq!(body["email"], "me@example.com");
}

#[tokio::test]
async fn token_of_deleted_user_is_rejected() {
    let app = spawn_app().await;
    let token = app.user_token("gone@example.com").await;

    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind("gone@example.com")
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .client
        .get(app.url("/api/auth/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn events_are_listed_soonest_first() {
    let app = spawn_app().await;
    seed::seed_sample_events(&app.pool).await.unwrap();

    let events: Vec<Value> = app
        .client
        .get(app.url("/api/events"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(events.len(), 10);
    let dates: Vec<&str> = events.iter().map(|e| e["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(events[0]["title"], "Comedy Night Special");
}

#[tokio::test]
async fn sample_events_are_seeded_once() {
    let app = spawn_app().await;
    assert_eq!(seed::seed_sample_events(&app.pool).await.unwrap(), 10);
    assert_eq!(seed::seed_sample_events(&app.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_event_is_404() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/api/events/999")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn only_admins_manage_events() {
    let app = spawn_app().await;
    let user_token = app.user_token("user@example.com").await;

    let anonymous = app
        .client
        .post(app.url("/api/events"))
        .json(&event_body("Jazz Night"))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);

    let forbidden = app.create_event(&user_token, &event_body("Jazz Night")).await;
    assert_eq!(forbidden.status().as_u16(), 403);
    let body: Value = forbidden.json().await.unwrap();
    assert_eq!(body["message"], "Admin access required");

    let delete = app
        .client
        .delete(app.url("/api/events/1"))
        .bearer_auth(&user_token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 403);
}

#[tokio::test]
async fn admin_event_lifecycle() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    // Create
    let created = app.create_event(&token, &event_body("Jazz Night")).await;
    assert_eq!(created.status().as_u16(), 201);
    let event: Value = created.json().await.unwrap();
    let id = event["id"].as_i64().unwrap();
    assert_eq!(event["date"], "2025-07-15T18:00:00");
    assert_eq!(event["category"], "Concert");
    assert!(event["image"].is_null());

    // Update
    let mut changes = event_body("Jazz Night (Moved)");
    changes["venue"] = json!("Harbour Hall");
    changes["price"] = json!(0);
    let updated = app
        .client
        .put(app.url(&format!("/api/events/{}", id)))
        .bearer_auth(&token)
        .json(&changes)
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status().as_u16(), 200);
    let event: Value = updated.json().await.unwrap();
    assert_eq!(event["title"], "Jazz Night (Moved)");
    assert_eq!(event["venue"], "Harbour Hall");
    assert_eq!(event["price"], 0.0);

    // Update of a missing event
    let missing = app
        .client
        .put(app.url("/api/events/9999"))
        .bearer_auth(&token)
        .json(&changes)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    // Delete
    let deleted = app
        .client
        .delete(app.url(&format!("/api/events/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 200);
    let body: Value = deleted.json().await.unwrap();
    assert_eq!(body["message"], "Event deleted successfully");

    let again = app
        .client
        .delete(app.url(&format!("/api/events/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn invalid_event_payloads_are_rejected() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let mut negative_price = event_body("Jazz Night");
    negative_price["price"] = json!(-5);
    assert_eq!(app.create_event(&token, &negative_price).await.status().as_u16(), 400);

    let mut bad_category = event_body("Jazz Night");
    bad_category["category"] = json!("Rave");
    assert_eq!(app.create_event(&token, &bad_category).await.status().as_u16(), 400);

    let mut bad_image = event_body("Jazz Night");
    bad_image["image"] = json!("not a url");
    assert_eq!(app.create_event(&token, &bad_image).await.status().as_u16(), 400);

    let missing_fields = json!({ "title": "Jazz Night" });
    assert_eq!(app.create_event(&token, &missing_fields).await.status().as_u16(), 400);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn browse_searches_filters_and_paginates() {
    let app = spawn_app().await;
    seed::seed_sample_events(&app.pool).await.unwrap();

    let page: Value = app
        .client
        .get(app.url("/api/events/browse?q=new%20york"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total_items"], 3);

    let page: Value = app
        .client
        .get(app.url("/api/events/browse?category=Workshop&sort=price&order=desc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Photography Workshop", "Web Development Workshop"]);

    // 10 events, 3 per page: page 9 clamps to the last page (4) holding one event.
    let page: Value = app
        .client
        .get(app.url("/api/events/browse?page_size=3&page=9"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total_pages"], 4);
    assert_eq!(page["current_page"], 4);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["start_index"], 10);
    assert_eq!(page["end_index"], 10);
    assert_eq!(page["page_links"], json!([1, 2, 3, 4]));

    let bad = app
        .client
        .get(app.url("/api/events/browse?page_size=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status().as_u16(), 400);
}

#[tokio::test]
async fn categories_in_use_are_listed() {
    let app = spawn_app().await;
    seed::seed_sample_events(&app.pool).await.unwrap();

    let categories: Vec<String> = app
        .client
        .get(app.url("/api/events/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(categories.len(), 9);
    assert_eq!(categories[0], "Business");
    assert!(categories.contains(&"Workshop".to_string()));
}

#[tokio::test]
async fn non_numeric_event_id_is_a_json_400() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let get = app.client.get(app.url("/api/events/abc")).send().await.unwrap();
    assert_eq!(get.status().as_u16(), 400);
    let body: Value = get.json().await.unwrap();
    assert!(body["message"].is_string());

    let delete = app
        .client
        .delete(app.url("/api/events/abc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 400);
    let body: Value = delete.json().await.unwrap();
    assert!(body["message"].is_string());

    let put = app
        .client
        .put(app.url("/api/events/abc"))
        .bearer_auth(&token)
        .json(&event_body("Jazz Night"))
        .send()
        .await
        .unwrap();
    assert_eq!(put.status().as_u16(), 400);
    let body: Value = put.json().await.unwrap();
    assert!(body["message"].is_string());
}
