//! Tests for user account and authentication HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::server::in_memory_state;
use crate::test_support::FixedClock;

const PASSWORD: &str = "correct horse battery staple";

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(in_memory_state(Arc::new(
            FixedClock::default(),
        ))))
        .wrap(crate::inbound::http::test_utils::session_middleware_for_tests())
        .service(
            web::scope("/api/v1")
                .service(register_user)
                .service(login)
                .service(logout)
                .service(list_users)
                .service(get_user)
                .service(update_user)
                .service(delete_user),
        )
}

fn account_payload(name: &str, email: &str, role: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": PASSWORD,
        "role": role,
    })
}

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
    role: &str,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(account_payload("Test User", email, role))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["id"].as_str().expect("user id").to_owned()
}

async fn login_with(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> actix_web::cookie::Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn register_returns_the_new_user_without_secrets() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(account_payload("Ada Lovelace", "Ada@Example.EDU", "STUDENT"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(
        body["id"]
            .as_str()
            .is_some_and(|id| Uuid::parse_str(id).is_ok())
    );
    assert_eq!(body["name"].as_str(), Some("Ada Lovelace"));
    assert_eq!(body["email"].as_str(), Some("ada@example.edu"));
    assert_eq!(body["role"].as_str(), Some("STUDENT"));
    assert_eq!(body["createdAt"].as_str(), Some("2025-03-01T08:00:00+00:00"));
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[rstest]
#[case(json!({}), "name", "missing_field")]
#[case(
    json!({ "name": "Ada", "email": "ada@example.edu", "password": PASSWORD }),
    "role",
    "missing_field"
)]
#[case(
    json!({ "name": "Ada", "email": "ada@example.edu", "password": "", "role": "STUDENT" }),
    "password",
    "empty_password"
)]
#[case(
    json!({ "name": "Ada", "email": "not-an-address", "password": PASSWORD, "role": "STUDENT" }),
    "email",
    "invalid_value"
)]
#[case(
    json!({ "name": "Ada", "email": "ada@example.edu", "password": PASSWORD, "role": "TEACHER" }),
    "role",
    "invalid_role"
)]
#[actix_web::test]
async fn register_rejects_incomplete_or_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"].as_str(), Some("invalid_request"));
    assert_eq!(body["details"]["field"].as_str(), Some(field));
    assert_eq!(body["details"]["code"].as_str(), Some(code));
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = actix_test::init_service(test_app()).await;
    register(&app, "ada@example.edu", "STUDENT").await;

    // Same address in a different case still collides.
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(account_payload("Ada Again", "ADA@EXAMPLE.EDU", "STUDENT"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"].as_str(), Some("conflict"));
    assert_eq!(body["details"]["code"].as_str(), Some("email_taken"));
}

#[actix_web::test]
async fn login_establishes_a_session_and_returns_the_user() {
    let app = actix_test::init_service(test_app()).await;
    let user_id = register(&app, "ada@example.edu", "STUDENT").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": "ADA@Example.EDU", "password": PASSWORD }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"].as_str(), Some(user_id.as_str()));
    assert!(body.get("passwordHash").is_none());

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case("ada@example.edu", "wrong password")]
#[case("nobody@example.edu", PASSWORD)]
#[actix_web::test]
async fn wrong_credentials_and_unknown_accounts_are_indistinguishable(
    #[case] email: &str,
    #[case] password: &str,
) {
    let app = actix_test::init_service(test_app()).await;
    register(&app, "ada@example.edu", "STUDENT").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"].as_str(), Some("unauthorized"));
    assert_eq!(body["message"].as_str(), Some("invalid credentials"));
}

#[rstest]
#[case("not-an-address", PASSWORD, "email", "invalid_email")]
#[case("ada@example.edu", "", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_malformed_credentials(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"].as_str(), Some(field));
    assert_eq!(body["details"]["code"].as_str(), Some(code));
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let app = actix_test::init_service(test_app()).await;
    register(&app, "ada@example.edu", "STUDENT").await;
    let cookie = login_with(&app, "ada@example.edu").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The purged cookie no longer authenticates anything.
    let cleared = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.value().to_owned());
    let mut request = actix_test::TestRequest::get().uri("/api/v1/users");
    if let Some(value) = cleared {
        request = request.cookie(actix_web::cookie::Cookie::new("session", value));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_without_a_session_is_unauthorized() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn users_can_update_their_own_account() {
    let app = actix_test::init_service(test_app()).await;
    let user_id = register(&app, "ada@example.edu", "STUDENT").await;
    let cookie = login_with(&app, "ada@example.edu").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/users/{user_id}"))
        .cookie(cookie.clone())
        .set_json(account_payload(
            "Ada King, Countess of Lovelace",
            "ada@example.edu",
            "STUDENT",
        ))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"].as_str(), Some(user_id.as_str()));
    assert_eq!(
        body["name"].as_str(),
        Some("Ada King, Countess of Lovelace")
    );
}

#[actix_web::test]
async fn students_may_not_touch_other_accounts() {
    let app = actix_test::init_service(test_app()).await;
    let other_id = register(&app, "grace@example.edu", "STUDENT").await;
    register(&app, "ada@example.edu", "STUDENT").await;
    let cookie = login_with(&app, "ada@example.edu").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/users/{other_id}"))
        .cookie(cookie.clone())
        .set_json(account_payload("Hijacked", "grace@example.edu", "STUDENT"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{other_id}"))
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"].as_str(), Some("forbidden"));
}

#[actix_web::test]
async fn admins_may_update_any_account() {
    let app = actix_test::init_service(test_app()).await;
    let student_id = register(&app, "ada@example.edu", "STUDENT").await;
    register(&app, "dean@example.edu", "ADMIN").await;
    let cookie = login_with(&app, "dean@example.edu").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/users/{student_id}"))
        .cookie(cookie.clone())
        .set_json(account_payload("Ada Lovelace", "ada@example.edu", "ADMIN"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["role"].as_str(), Some("ADMIN"));
}

#[actix_web::test]
async fn deleting_the_last_account_empties_the_register() {
    let app = actix_test::init_service(test_app()).await;
    let user_id = register(&app, "ada@example.edu", "STUDENT").await;
    let cookie = login_with(&app, "ada@example.edu").await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{user_id}"))
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The cookie outlives the account; the listing now reads as absent.
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users")
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"].as_str(), Some("no_users"));
}

#[actix_web::test]
async fn unknown_and_malformed_user_ids_are_rejected() {
    let app = actix_test::init_service(test_app()).await;
    register(&app, "dean@example.edu", "ADMIN").await;
    let cookie = login_with(&app, "dean@example.edu").await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", Uuid::new_v4()))
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"].as_str(), Some("user_not_found"));

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/not-a-uuid")
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"].as_str(), Some("invalid_uuid"));
}

#[actix_web::test]
async fn user_reads_require_a_session() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
