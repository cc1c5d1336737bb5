//! Account lifecycle over HTTP: sign-up, sign-in, sessions and password
//! recovery.

mod support;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use learnhub::domain::profile::Role;
use support::app::{TestApp, PASSWORD};

#[tokio::test]
async fn signup_defaults_to_student_and_normalizes_email() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({
                "email": "  Ada.Lovelace@Example.COM ",
                "password": PASSWORD,
                "full_name": "Ada Lovelace",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ada.lovelace@example.com");
    assert_eq!(body["role"], "student");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn signup_rejects_duplicates_admins_and_short_passwords() {
    let app = TestApp::new();
    app.user("dup@example.com", Role::Student).await;

    let signup = |email: &str, password: &str, role: &str| {
        json!({
            "email": email,
            "password": password,
            "full_name": "Someone",
            "role": role,
        })
    };

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(signup("DUP@example.com", PASSWORD, "student")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(signup("boss@example.com", PASSWORD, "admin")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(signup("short@example.com", "abc", "student")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn signin_issues_token_that_resolves_profile() {
    let app = TestApp::new();
    let token = app.user("grace@example.com", Role::Faculty).await;

    let (status, body) = app.get("/profile", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "grace@example.com");
    assert_eq!(body["role"], "faculty");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new();
    app.user("known@example.com", Role::Student).await;

    let (wrong_status, wrong_body) = app.sign_in("known@example.com", "not-the-password").await;
    let (unknown_status, unknown_body) = app.sign_in("nobody@example.com", PASSWORD).await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.get("/dashboard", "forged-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signout_revokes_the_session() {
    let app = TestApp::new();
    let token = app.user("leaving@example.com", Role::Student).await;

    let (status, body) = app
        .send(Method::POST, "/auth/signout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signed_out"], true);

    let (status, _) = app.get("/profile", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_reset_round_trip() {
    let app = TestApp::new();
    let old_session = app.user("forgetful@example.com", Role::Student).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/password-reset",
            None,
            Some(json!({ "email": "forgetful@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let token = app
        .mailer
        .last_token_for("forgetful@example.com")
        .expect("reset token delivered");

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/password-reset/confirm",
            None,
            Some(json!({ "token": token, "new_password": "a-brand-new-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Existing sessions are revoked and the old password stops working.
    let (status, _) = app.get("/profile", &old_session).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.sign_in("forgetful@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .sign_in("forgetful@example.com", "a-brand-new-secret")
        .await;
    assert_eq!(status, StatusCode::OK);

    // Tokens are single use.
    let (status, _) = app
        .send(
            Method::POST,
            "/auth/password-reset/confirm",
            None,
            Some(json!({ "token": token, "new_password": "yet-another-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reset_confirms_redeem_the_token_once() {
    let app = Arc::new(TestApp::new());
    app.user("racer@example.com", Role::Student).await;
    app.send(
        Method::POST,
        "/auth/password-reset",
        None,
        Some(json!({ "email": "racer@example.com" })),
    )
    .await;
    let token = app
        .mailer
        .last_token_for("racer@example.com")
        .expect("reset token delivered");

    let confirms: Vec<_> = (0..4)
        .map(|i| {
            let app = Arc::clone(&app);
            let token = token.clone();
            tokio::spawn(async move {
                let (status, _) = app
                    .send(
                        Method::POST,
                        "/auth/password-reset/confirm",
                        None,
                        Some(json!({ "token": token, "new_password": format!("racing-secret-{i}") })),
                    )
                    .await;
                status
            })
        })
        .collect();

    let mut redeemed = 0;
    for confirm in confirms {
        match confirm.await.unwrap() {
            StatusCode::OK => redeemed += 1,
            StatusCode::UNAUTHORIZED => {}
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(redeemed, 1);
}

#[tokio::test]
async fn password_reset_for_unknown_email_is_accepted_silently() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/password-reset",
            None,
            Some(json!({ "email": "ghost@example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn profile_update_and_admin_role_management() {
    let app = TestApp::new();
    let student = app.user("learner@example.com", Role::Student).await;
    let admin = app.admin("root@example.com").await;

    let (status, body) = app
        .put(
            "/profile",
            &student,
            json!({
                "program": "Computer Science",
                "interests": ["machine learning", "databases"],
                "target_career": "Data Scientist",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["program"], "Computer Science");
    assert_eq!(body["interests"].as_array().unwrap().len(), 2);
    let student_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = app.get("/admin/profiles", &student).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/admin/profiles", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app
        .put(
            &format!("/admin/profiles/{student_id}/role"),
            &admin,
            json!({ "role": "faculty" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "faculty");

    let (status, body) = app.get("/profile", &student).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "faculty");
}
