mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::{
    TEST_PASSWORD, create_test_user, generate_unique_email, login_as, setup_test_app,
};
use instructor_led::instructor_auth::Role;

#[tokio::test]
async fn test_create_user_as_admin() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;
    let email = generate_unique_email();

    let (status, body) = app
        .post(
            "/api/v1/users",
            &token,
            json!({
                "name": "New Trainer",
                "email": email,
                "password": "password123",
                "role": "TRAINER"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"]["code"], 201);
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["role"], "TRAINER");
    assert!(body["data"].get("password").is_none());

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": email, "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = setup_test_app();
    let (admin, token) = login_as(&app, Role::Admin).await;

    let (status, body) = app
        .post(
            "/api/v1/users",
            &token,
            json!({
                "name": "Copy",
                "email": admin.email,
                "password": "password123",
                "role": "PARTICIPANT"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"]["code"], 409);
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;

    let (status, body) = app
        .post(
            "/api/v1/users",
            &token,
            json!({
                "name": "Short Password",
                "email": generate_unique_email(),
                "password": "short",
                "role": "PARTICIPANT"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["status"]["message"],
        "password must be at least 8 characters"
    );

    let (status, _) = app
        .post(
            "/api/v1/users",
            &token,
            json!({
                "name": "Bad Role",
                "email": generate_unique_email(),
                "password": "password123",
                "role": "SUPERUSER"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_rejects_password_over_72_bytes() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;

    let (status, body) = app
        .post(
            "/api/v1/users",
            &token,
            json!({
                "name": "Long Password",
                "email": generate_unique_email(),
                "password": format!("{}correct", "a".repeat(72)),
                "role": "PARTICIPANT"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"]["message"], "password must be at most 72 bytes");
}

#[tokio::test]
async fn test_create_user_forbidden_for_trainer() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Trainer).await;

    let (status, body) = app
        .post(
            "/api/v1/users",
            &token,
            json!({
                "name": "Nope",
                "email": generate_unique_email(),
                "password": "password123",
                "role": "ADMIN"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"]["code"], 403);
}

#[tokio::test]
async fn test_list_users_role_access() {
    let app = setup_test_app();
    let (_, trainer_token) = login_as(&app, Role::Trainer).await;
    let (_, participant_token) = login_as(&app, Role::Participant).await;

    let (status, body) = app.get("/api/v1/users", &trainer_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paging"]["total_rows"], 2);

    let (status, _) = app.get("/api/v1/users", &participant_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_role_filter() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;
    login_as(&app, Role::Participant).await;
    login_as(&app, Role::Participant).await;

    let (status, body) = app.get("/api/v1/users?role=PARTICIPANT", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paging"]["total_rows"], 2);
    for user in body["data"].as_array().unwrap() {
        assert_eq!(user["role"], "PARTICIPANT");
    }

    let (status, _) = app.get("/api/v1/users?role=ROOT", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_profile() {
    let app = setup_test_app();
    let (user, token) = login_as(&app, Role::Participant).await;

    let (status, body) = app.get("/api/v1/users/me", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user.id.to_string());
    assert_eq!(body["data"]["email"], user.email);
}

#[tokio::test]
async fn test_get_user_by_id_and_email() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;
    let email = generate_unique_email();
    let user = create_test_user(app.store(), &email, Role::Trainer).await;

    let (status, body) = app.get(&format!("/api/v1/users/{}", user.id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], email);

    let (status, body) = app
        .get(&format!("/api/v1/users/email/{}", email), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user.id.to_string());

    let (status, body) = app
        .get(&format!("/api/v1/users/{}", Uuid::new_v4()), &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"]["message"], "User not found");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;

    let (status, body) = app.get("/api/v1/users/not-a-uuid", &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"]["code"], 400);
}

#[tokio::test]
async fn test_update_user() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;
    let email = generate_unique_email();
    let user = create_test_user(app.store(), &email, Role::Participant).await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/users/{}", user.id),
            Some(&token),
            Some(json!({ "name": "Renamed", "role": "TRAINER", "password": "newpassword1" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["role"], "TRAINER");
    assert_eq!(body["data"]["email"], email);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": email, "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": email, "password": "newpassword1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_user() {
    let app = setup_test_app();
    let (_, token) = login_as(&app, Role::Admin).await;
    let user = create_test_user(app.store(), &generate_unique_email(), Role::Participant).await;
    let uri = format!("/api/v1/users/{}", user.id);

    let (status, body) = app.delete(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user.id.to_string());

    let (status, _) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_outlives_deleted_user() {
    let app = setup_test_app();
    let (_, admin_token) = login_as(&app, Role::Admin).await;
    let (user, token) = login_as(&app, Role::Trainer).await;

    app.delete(&format!("/api/v1/users/{}", user.id), &admin_token)
        .await;

    // No revocation: the token still authenticates, the profile is just gone.
    let (status, _) = app.get("/api/v1/users/me", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/users", &token).await;
    assert_eq!(status, StatusCode::OK);
}
