//! Integration tests for the Canvas root context.
//!
//! These tests verify that every entity handed out by a [`Canvas`] is bound
//! to it and locked, and that navigation from a user to its courses works.

use canvas_tools::{
    AccessToken, BaseUrl, Canvas, Course, Entity, EntityLockedError, HttpError, ListOptions,
    Lockable,
};
use futures_util::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, Canvas) {
    let server = MockServer::start().await;
    let canvas = Canvas::builder(BaseUrl::new(server.uri()).unwrap())
        .token(AccessToken::new("test-token").unwrap())
        .build();
    (server, canvas)
}

fn courses(ids: std::ops::RangeInclusive<u64>) -> serde_json::Value {
    ids.map(|id| {
        json!({
            "id": id,
            "course_code": format!("CS-{id:03}"),
            "name": format!("Course {id}"),
        })
    })
    .collect()
}

// ============================================================================
// Retrieval
// ============================================================================

#[tokio::test]
async fn test_retrieve_course_is_bound_and_locked() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/42"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "course_code": "CS-101",
            "name": "Intro to Rust",
            "term": {"id": 7, "name": "Fall", "start_at": "2024-09-01T00:00:00Z", "end_at": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut course = canvas.retrieve_course(42, None).await.unwrap().unwrap();

    assert_eq!(course.id(), 42);
    assert_eq!(course.code(), "CS-101");
    assert_eq!(course.name(), "Intro to Rust");
    assert!(course.is_locked());
    assert!(course.canvas().unwrap().ptr_eq(&canvas));

    assert_eq!(course.term().id(), 7);
    assert!(course.term().is_locked());
    assert!(course.term().canvas().unwrap().ptr_eq(&canvas));

    assert_eq!(course.set_name("Changed"), Err(EntityLockedError));
    assert_eq!(course.name(), "Intro to Rust");
}

#[tokio::test]
async fn test_retrieve_course_not_found() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(canvas.retrieve_course(404, None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_retrieve_term_is_bound_and_locked() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/1/terms/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Fall",
            "start_at": "2024-09-01T00:00:00Z",
            "end_at": "2024-12-20T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let term = canvas.retrieve_term(1, 7, None).await.unwrap().unwrap();

    assert_eq!(term.name(), "Fall");
    assert!(term.when_starts().is_some());
    assert!(term.when_ends().is_some());
    assert!(term.is_locked());
    assert!(Entity::canvas(&term).unwrap().ptr_eq(&canvas));
}

#[tokio::test]
async fn test_retrieve_term_not_found() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/1/terms/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(canvas.retrieve_term(1, 99, None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_retrieve_current_user_is_bound_and_locked() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Bob",
            "sortable_name": "Bob"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = canvas.retrieve_current_user(None).await.unwrap().unwrap();

    assert_eq!(user.id(), 5);
    assert_eq!(user.name(), "Bob");
    assert!(user.is_locked());
    assert!(user.canvas().unwrap().ptr_eq(&canvas));
}

#[tokio::test]
async fn test_retrieve_current_user_unauthorized() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "Invalid access token."}]
        })))
        .mount(&server)
        .await;

    let result = canvas.retrieve_current_user(None).await;
    match result {
        Err(HttpError::Response(e)) => {
            assert_eq!(e.code, 401);
            assert!(e.message.contains("Invalid access token."));
        }
        other => panic!("expected Response error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_each_retrieval_returns_a_fresh_instance() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "course_code": "CS-101",
            "name": "Intro"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let first = canvas.retrieve_course(1, None).await.unwrap().unwrap();
    let second = canvas.retrieve_course(1, None).await.unwrap().unwrap();

    assert_eq!(first, second);
    assert!(first.is_locked() && second.is_locked());
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_courses_for_current_user() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses(1..=3)))
        .expect(1)
        .mount(&server)
        .await;

    let courses: Vec<Course> = canvas
        .list_courses_for_current_user(ListOptions::new(), None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0].code(), "CS-001");
    assert!(courses.iter().all(Lockable::is_locked));
    assert!(courses
        .iter()
        .all(|course| course.canvas().unwrap().ptr_eq(&canvas)));
}

#[tokio::test]
async fn test_user_list_courses_goes_through_its_canvas() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "name": "Bob"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/5/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses(10..=11)))
        .expect(1)
        .mount(&server)
        .await;

    let user = canvas.retrieve_current_user(None).await.unwrap().unwrap();
    let courses: Vec<Course> = user
        .list_courses(ListOptions::new(), None)
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<u64> = courses.iter().map(Course::id).collect();
    assert_eq!(ids, vec![10, 11]);
    assert!(courses.iter().all(|course| course.is_locked()));
    assert!(courses
        .iter()
        .all(|course| course.canvas().unwrap().ptr_eq(&canvas)));
}

#[tokio::test]
async fn test_list_courses_follows_pages() {
    let (server, canvas) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses(11..=12)))
        .expect(1)
        .mount(&server)
        .await;

    let next = format!(r#"<{}/api/v1/courses?page=2>; rel="next""#, server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(courses(1..=10))
                .insert_header("link", next.as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let courses: Vec<Course> = canvas
        .list_courses_for_current_user(ListOptions::new(), None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(courses.len(), 12);
    assert_eq!(courses[11].code(), "CS-012");
}
