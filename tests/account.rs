//! Flows against a real Postgres. Run with `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::*;
use restaurant_backend_rs::{
    app,
    modules::{
        auth::service::{password, reset},
        user::repository::{self, Role},
    },
};
use serde_json::{json, Value};
use sqlx::PgPool;

fn router(pool: PgPool) -> Router {
    app::router(context_with(pool, jwt()))
}

async fn sign_up(router: &Router, email: &str) -> Value {
    let response = send(
        router,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "name": "Ada Lovelace",
                "email": email,
                "password": "correcthorse",
                "passwordConfirm": "correcthorse",
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn log_in(router: &Router, email: &str, candidate: &str) -> (StatusCode, Value) {
    let response = send(
        router,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": candidate }),
        ),
    )
    .await;
    (response.status(), body_json(response).await)
}

async fn admin_token(router: &Router, pool: &PgPool) -> String {
    repository::create(
        pool,
        repository::CreateUserPayload {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: password::hash("administrator").unwrap(),
            role: Role::Admin,
        },
    )
    .await
    .unwrap();

    let (status, body) = log_in(router, "admin@example.com", "administrator").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[sqlx::test]
#[ignore]
async fn signup_login_and_me(pool: PgPool) {
    let router = router(pool);

    let signed_up = sign_up(&router, "Ada@Example.com").await;
    assert_eq!(signed_up["data"]["user"]["role"], "user");
    assert_eq!(signed_up["data"]["user"]["email"], "ada@example.com");
    assert!(signed_up["data"]["user"].get("password").is_none());

    let (status, body) = log_in(&router, "ada@example.com", "correcthorse").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let response = send(&router, authed_request("GET", "/api/users/me", token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user"]["name"], "Ada Lovelace");
}

#[sqlx::test]
#[ignore]
async fn duplicate_email_is_rejected(pool: PgPool) {
    let router = router(pool);
    sign_up(&router, "ada@example.com").await;

    let response = send(
        &router,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "name": "Impostor",
                "email": "ADA@example.com",
                "password": "correcthorse",
                "passwordConfirm": "correcthorse",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    let router = router(pool);
    sign_up(&router, "ada@example.com").await;

    let (status, body) = log_in(&router, "ada@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Incorrect email or password");

    let (status, _) = log_in(&router, "nobody@example.com", "correcthorse").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[ignore]
async fn update_me_refuses_password_changes(pool: PgPool) {
    let router = router(pool);
    let token = sign_up(&router, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &router,
        authed_request(
            "PATCH",
            "/api/users/updateMe",
            &token,
            Some(json!({ "password": "newpassword" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &router,
        authed_request(
            "PATCH",
            "/api/users/updateMe",
            &token,
            Some(json!({ "name": "Countess", "role": "admin" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = &body_json(response).await["data"]["user"];
    assert_eq!(user["name"], "Countess");
    assert_eq!(user["role"], "user");
}

#[sqlx::test]
#[ignore]
async fn reset_token_is_single_use(pool: PgPool) {
    let router = router(pool.clone());
    sign_up(&router, "ada@example.com").await;

    let user = repository::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    let token = reset::generate();
    repository::set_password_reset(&pool, &user.id, &token.digest, token.expires_at)
        .await
        .unwrap();

    let uri = format!("/api/auth/resetPassword/{}", token.plain);
    let body = json!({ "password": "brandnewpass", "passwordConfirm": "brandnewpass" });

    let response = send(&router, json_request("PATCH", &uri, body.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, json_request("PATCH", &uri, body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Token is invalid or has expired"
    );

    let (status, _) = log_in(&router, "ada@example.com", "brandnewpass").await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test]
#[ignore]
async fn concurrent_resets_redeem_a_token_once(pool: PgPool) {
    let router = router(pool.clone());
    sign_up(&router, "ada@example.com").await;

    let user = repository::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();

    for _ in 0..5 {
        let token = reset::generate();
        repository::set_password_reset(&pool, &user.id, &token.digest, token.expires_at)
            .await
            .unwrap();

        let uri = format!("/api/auth/resetPassword/{}", token.plain);
        let body = json!({ "password": "brandnewpass", "passwordConfirm": "brandnewpass" });

        let (first, second) = tokio::join!(
            send(&router, json_request("PATCH", &uri, body.clone())),
            send(&router, json_request("PATCH", &uri, body.clone())),
        );

        let mut statuses = [first.status(), second.status()];
        statuses.sort();
        assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);
    }
}

#[sqlx::test]
#[ignore]
async fn expired_reset_token_is_rejected(pool: PgPool) {
    let router = router(pool.clone());
    sign_up(&router, "ada@example.com").await;

    let user = repository::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    let token = reset::generate();
    let expired_at = (chrono::Utc::now() - chrono::Duration::minutes(1)).naive_utc();
    repository::set_password_reset(&pool, &user.id, &token.digest, expired_at)
        .await
        .unwrap();

    let response = send(
        &router,
        json_request(
            "PATCH",
            &format!("/api/auth/resetPassword/{}", token.plain),
            json!({ "password": "brandnewpass", "passwordConfirm": "brandnewpass" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore]
async fn forgot_password_for_unknown_email_is_404(pool: PgPool) {
    let router = router(pool);

    let response = send(
        &router,
        json_request(
            "POST",
            "/api/auth/forgotPassword",
            json!({ "email": "nobody@example.com" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn forgot_password_stores_a_digest(pool: PgPool) {
    let router = router(pool.clone());
    sign_up(&router, "ada@example.com").await;

    let response = send(
        &router,
        json_request(
            "POST",
            "/api/auth/forgotPassword",
            json!({ "email": "ada@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Token sent to email!");

    let user = repository::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    let stored = user.password_reset_token.unwrap();
    assert_eq!(stored.len(), 64);
    assert!(user.password_reset_expires.is_some());
}

#[sqlx::test]
#[ignore]
async fn failed_reset_email_discards_the_token(pool: PgPool) {
    let router = app::router(context_with_mail(pool.clone(), jwt(), Some(unreachable_mail())));
    sign_up(&router, "ada@example.com").await;

    let response = send(
        &router,
        json_request(
            "POST",
            "/api/auth/forgotPassword",
            json!({ "email": "ada@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["message"],
        "There was an error sending the email. Try again later!"
    );

    let user = repository::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.password_reset_token.is_none());
    assert!(user.password_reset_expires.is_none());
}

#[sqlx::test]
#[ignore]
async fn token_issued_before_password_change_is_rejected(pool: PgPool) {
    let router = router(pool.clone());
    let token = sign_up(&router, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    sqlx::query(
        "UPDATE users SET password_changed_at = NOW() AT TIME ZONE 'UTC' + INTERVAL '1 minute'",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = send(&router, authed_request("GET", "/api/users/me", &token, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "User recently changed password! Please log in again."
    );
}

#[sqlx::test]
#[ignore]
async fn update_my_password_checks_the_current_one(pool: PgPool) {
    let router = router(pool);
    let token = sign_up(&router, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &router,
        authed_request(
            "PATCH",
            "/api/auth/updateMyPassword",
            &token,
            Some(json!({
                "passwordCurrent": "not-my-password",
                "password": "brandnewpass",
                "passwordConfirm": "brandnewpass",
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &router,
        authed_request(
            "PATCH",
            "/api/users/updateMyPassword",
            &token,
            Some(json!({
                "passwordCurrent": "correcthorse",
                "password": "brandnewpass",
                "passwordConfirm": "brandnewpass",
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["token"].is_string());
}

#[sqlx::test]
#[ignore]
async fn delete_me_deactivates_the_account(pool: PgPool) {
    let router = router(pool);
    let token = sign_up(&router, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(&router, authed_request("DELETE", "/api/users/deleteMe", &token, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, authed_request("GET", "/api/users/me", &token, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = log_in(&router, "ada@example.com", "correcthorse").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[ignore]
async fn regular_users_cannot_manage_users(pool: PgPool) {
    let router = router(pool);
    let token = sign_up(&router, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(&router, authed_request("GET", "/api/admin/users", &token, None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "You do not have permission to perform this action"
    );
}

#[sqlx::test]
#[ignore]
async fn admin_manages_users(pool: PgPool) {
    let router = router(pool.clone());
    let token = admin_token(&router, &pool).await;

    let response = send(
        &router,
        authed_request(
            "POST",
            "/api/admin/users",
            &token,
            Some(json!({
                "name": "Chef",
                "email": "chef@example.com",
                "password": "kitchenpass",
                "passwordConfirm": "kitchenpass",
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["user"]["id"].as_str().unwrap().to_string();

    let response = send(&router, authed_request("GET", "/api/admin/users", &token, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["results"], 2);
    assert_eq!(listed["meta"]["total"], 2);

    let response = send(
        &router,
        authed_request(
            "PATCH",
            &format!("/api/admin/users/{}", id),
            &token,
            Some(json!({ "role": "admin" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user"]["role"], "admin");

    let response = send(
        &router,
        authed_request("DELETE", &format!("/api/users/{}", id), &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &router,
        authed_request("GET", &format!("/api/admin/users/{}", id), &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        "No user found with that ID"
    );
}

#[sqlx::test]
#[ignore]
async fn admin_treats_deactivated_users_as_missing(pool: PgPool) {
    let router = router(pool.clone());
    let token = admin_token(&router, &pool).await;
    let user_token = sign_up(&router, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let id = repository::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    let response = send(
        &router,
        authed_request("DELETE", "/api/users/deleteMe", &user_token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for method in ["GET", "DELETE"] {
        let response = send(
            &router,
            authed_request(method, &format!("/api/admin/users/{}", id), &token, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[sqlx::test]
#[ignore]
async fn health_is_ok_with_a_database(pool: PgPool) {
    let router = router(pool);
    let response = send(
        &router,
        Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}
