//! Catalog, enrollment and certification flows over HTTP.

mod support;

use serde_json::{json, Value};

use axum::http::StatusCode;
use learnhub::domain::profile::Role;
use support::app::TestApp;

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|c| c["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

async fn add_module(app: &TestApp, token: &str, course_id: &str, title: &str) -> String {
    let (status, body) = app
        .post(
            &format!("/courses/{course_id}/modules"),
            token,
            json!({ "title": title, "duration_minutes": 25 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "module creation failed: {body}");
    body["id"].as_str().expect("module id").to_string()
}

#[tokio::test]
async fn faculty_creates_courses_and_students_cannot() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;

    let course_id = app.course(&faculty, "Rust Fundamentals", "Programming").await;
    let (status, body) = app.get(&format!("/courses/{course_id}"), &student).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instructor_name"], "Test User");
    assert_eq!(body["difficulty"], "beginner");
    assert_eq!(body["is_active"], true);

    let (status, _) = app
        .post(
            "/courses",
            &student,
            json!({ "title": "Sneaky", "category": "Hacking", "difficulty": "beginner" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn course_validation_errors_are_bad_requests() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;

    let (status, body) = app
        .post(
            "/courses",
            &faculty,
            json!({ "title": "Odd", "category": "Misc", "difficulty": "legendary" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("difficulty"));

    let (status, _) = app
        .post(
            "/courses",
            &faculty,
            json!({ "title": "   ", "category": "Misc", "difficulty": "beginner" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_the_instructor_or_an_admin_may_edit() {
    let app = TestApp::new();
    let owner = app.user("owner@example.com", Role::Faculty).await;
    let other = app.user("other@example.com", Role::Faculty).await;
    let admin = app.admin("admin@example.com").await;
    let course_id = app.course(&owner, "Databases", "Data").await;
    let uri = format!("/courses/{course_id}");

    let (status, _) = app.put(&uri, &other, json!({ "title": "Mine now" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(&uri, &owner, json!({ "title": "Relational Databases" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Relational Databases");

    let (status, body) = app.put(&uri, &admin, json!({ "is_active": false })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (status, body) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    let (status, _) = app.get(&uri, &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_filters_by_category_and_hides_inactive_courses() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    app.course(&faculty, "Python Basics", "Programming").await;
    app.course(&faculty, "Statistics", "Data").await;
    let retired = app.course(&faculty, "COBOL", "Programming").await;
    app.put(&format!("/courses/{retired}"), &faculty, json!({ "is_active": false }))
        .await;

    let (_, body) = app.get("/courses", &student).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = app.get("/courses?category=Programming", &student).await;
    assert_eq!(titles(&body), vec!["Python Basics"]);

    // Students never see retired courses, even when they ask.
    let (_, body) = app.get("/courses?include_inactive=true", &student).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    let (_, body) = app.get("/courses?include_inactive=true", &faculty).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn retired_courses_are_hidden_from_students_by_id() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    let retired = app.course(&faculty, "COBOL", "Programming").await;
    add_module(&app, &faculty, &retired, "Divisions").await;
    let (status, _) = app
        .post(
            "/ai/quiz",
            &faculty,
            json!({ "course_id": retired, "topic": "records" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    app.put(&format!("/courses/{retired}"), &faculty, json!({ "is_active": false }))
        .await;

    for path in ["", "/modules", "/quizzes"] {
        let uri = format!("/courses/{retired}{path}");
        let (status, _) = app.get(&uri, &student).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        let (status, _) = app.get(&uri, &faculty).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn modules_are_appended_in_order() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    let course_id = app.course(&faculty, "Algorithms", "Programming").await;

    add_module(&app, &faculty, &course_id, "Sorting").await;
    add_module(&app, &faculty, &course_id, "Graphs").await;

    let (status, _) = app
        .post(
            &format!("/courses/{course_id}/modules"),
            &student,
            json!({ "title": "Cheating 101" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .get(&format!("/courses/{course_id}/modules"), &student)
        .await;
    assert_eq!(status, StatusCode::OK);
    let modules = body.as_array().unwrap();
    assert_eq!(titles(&body), vec!["Sorting", "Graphs"]);
    assert!(modules[0]["order_index"].as_i64() < modules[1]["order_index"].as_i64());
}

#[tokio::test]
async fn enrolling_twice_conflicts_and_sends_a_welcome() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    let course_id = app.course(&faculty, "Networking", "Systems").await;

    app.enroll(&student, &course_id).await;
    let (status, body) = app
        .post("/enrollments", &student, json!({ "course_id": course_id }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (_, body) = app.get("/notifications", &student).await;
    let notes = body.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Welcome to Networking!");
    assert_eq!(notes[0]["is_read"], false);
}

#[tokio::test]
async fn available_excludes_enrolled_and_inactive_courses() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    let taken = app.course(&faculty, "Taken", "Programming").await;
    app.course(&faculty, "Open", "Programming").await;
    let closed = app.course(&faculty, "Closed", "Programming").await;
    app.put(&format!("/courses/{closed}"), &faculty, json!({ "is_active": false }))
        .await;
    app.enroll(&student, &taken).await;

    let (status, body) = app.get("/courses/available", &student).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Open"]);

    let (status, _) = app
        .post("/enrollments", &student, json!({ "course_id": closed }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn reaching_full_progress_issues_one_certificate() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    let course_id = app.course(&faculty, "Compilers", "Programming").await;
    let enrollment_id = app.enroll(&student, &course_id).await;
    let uri = format!("/enrollments/{enrollment_id}/progress");

    let (status, _) = app.put(&uri, &student, json!({ "progress": 120.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.put(&uri, &student, json!({ "progress": 40.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrollment"]["status"], "active");
    assert!(body["certification"].is_null());

    let (_, body) = app.put(&uri, &student, json!({ "progress": 100.0 })).await;
    assert_eq!(body["enrollment"]["status"], "completed");
    let number = body["certification"]["certificate_number"]
        .as_str()
        .expect("certificate issued");
    assert!(number.starts_with("LH-"));

    // Completion is final and certifies only once.
    let (_, body) = app.put(&uri, &student, json!({ "progress": 100.0 })).await;
    assert!(body["certification"].is_null());
    let (_, body) = app.put(&uri, &student, json!({ "progress": 10.0 })).await;
    assert_eq!(body["enrollment"]["progress"], 100.0);

    let (status, body) = app.get("/certifications", &student).await;
    assert_eq!(status, StatusCode::OK);
    let certs = body.as_array().unwrap();
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0]["course_title"], "Compilers");
}

#[tokio::test]
async fn completing_modules_drives_progress() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let student = app.user("kid@example.com", Role::Student).await;
    let course_id = app.course(&faculty, "Operating Systems", "Systems").await;
    let first = add_module(&app, &faculty, &course_id, "Processes").await;
    let second = add_module(&app, &faculty, &course_id, "Memory").await;
    let enrollment_id = app.enroll(&student, &course_id).await;
    let complete = |module: &str| format!("/enrollments/{enrollment_id}/modules/{module}/complete");

    let (status, body) = app.post(&complete(&first), &student, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrollment"]["progress"], 50.0);

    // Repeating a module does not count twice.
    let (_, body) = app.post(&complete(&first), &student, json!({})).await;
    assert_eq!(body["enrollment"]["progress"], 50.0);

    let (_, body) = app.post(&complete(&second), &student, json!({})).await;
    assert_eq!(body["enrollment"]["progress"], 100.0);
    assert_eq!(body["enrollment"]["status"], "completed");
    assert!(body["certification"].is_object());

    let other_course = app.course(&faculty, "Elsewhere", "Systems").await;
    let foreign = add_module(&app, &faculty, &other_course, "Unrelated").await;
    let (status, _) = app.post(&complete(&foreign), &student, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enrollments_are_private_to_their_student() {
    let app = TestApp::new();
    let faculty = app.user("prof@example.com", Role::Faculty).await;
    let alice = app.user("alice@example.com", Role::Student).await;
    let bob = app.user("bob@example.com", Role::Student).await;
    let course_id = app.course(&faculty, "Security", "Systems").await;
    let enrollment_id = app.enroll(&alice, &course_id).await;

    let (status, _) = app
        .put(
            &format!("/enrollments/{enrollment_id}/progress"),
            &bob,
            json!({ "progress": 100.0 }),
        )
        .await;
    assert!(matches!(status, StatusCode::FORBIDDEN | StatusCode::NOT_FOUND));

    let (_, body) = app.get("/enrollments", &alice).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["course"]["title"], "Security");
    assert_eq!(list[0]["progress"], 0.0);

    let (status, _) = app
        .delete(&format!("/enrollments/{enrollment_id}"), &alice)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = app.get("/enrollments", &alice).await;
    assert!(body.as_array().unwrap().is_empty());
}
