//! HTTP tests for interface_api
//!
//! Every test drives a fresh router with an empty store.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_session::{Role, Session, User};
use interface_api::{auth::create_token, config::ApiConfig, create_router, AppState};
use test_utils::{ClaimFormBuilder, FormFixtures};

fn app() -> Router {
    let state = AppState::new(ApiConfig::default()).unwrap();
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn switch_role(app: &Router, token: &str, role: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/v1/session/role", Some(token), Some(json!({ "role": role }))).await
}

async fn submit_car_claim(app: &Router, token: &str) -> String {
    let form = serde_json::to_value(FormFixtures::car_home_trip()).unwrap();
    let (status, body) = send(app, Method::POST, "/api/v1/claims", Some(token), Some(form)).await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

#[test]
fn test_state_rejects_out_of_range_token_lifetime() {
    let config = ApiConfig {
        jwt_expiration_secs: u64::MAX,
        ..Default::default()
    };
    assert!(AppState::new(config).is_err());
}

// ============================================================================
// Health and Login Tests
// ============================================================================

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let (status, body) = send(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "admin@dasi.com", "password": "password123" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["user"]["name"], "Admin User");
        assert_eq!(body["user"]["active_role"], "employee");
        assert_eq!(body["user"]["roles"], json!(["employee", "reviewer"]));
        assert_eq!(body["user"]["can_switch_roles"], true);
    }

    #[tokio::test]
    async fn test_login_with_empty_field() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "employee@dasi.com", "password": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please fill in all fields");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "employee@dasi.com", "password": "letmein" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/v1/dashboard", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/api/v1/dashboard", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Role Tests
// ============================================================================

mod role_tests {
    use super::*;

    #[tokio::test]
    async fn test_switch_role_issues_new_token() {
        let app = app();
        let token = login(&app, "manager@dasi.com").await;

        let (status, body) = switch_role(&app, &token, "reviewer").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["active_role"], "reviewer");

        let reviewer_token = body["token"].as_str().unwrap();
        let (status, body) = send(&app, Method::GET, "/api/v1/dashboard", Some(reviewer_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "reviewer");
    }

    #[tokio::test]
    async fn test_switch_to_missing_role_is_forbidden() {
        let app = app();
        let token = login(&app, "employee@dasi.com").await;

        let (status, _) = switch_role(&app, &token, "reviewer").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_reviewer_routes_need_reviewer_role() {
        let app = app();
        let token = login(&app, "employee@dasi.com").await;

        let (status, _) = send(&app, Method::GET, "/api/v1/claims/pending", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_employee_routes_need_employee_role() {
        let app = app();
        let token = login(&app, "hr@dasi.com").await;
        let form = serde_json::to_value(FormFixtures::car_home_trip()).unwrap();

        let (status, _) = send(&app, Method::POST, "/api/v1/claims", Some(&token), Some(form)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

// ============================================================================
// Claim Tests
// ============================================================================

mod claim_tests {
    use super::*;

    #[tokio::test]
    async fn test_preview_recalculates_amounts() {
        let app = app();
        let token = login(&app, "employee@dasi.com").await;
        let form = serde_json::to_value(ClaimFormBuilder::car().erp("1.5").build()).unwrap();

        let (status, body) = send(&app, Method::POST, "/api/v1/claims/preview", Some(&token), Some(form)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["computed_amount"], "4.70");
        assert_eq!(body["final_amount"], "8.20");
        assert_eq!(body["shows_home_fields"], true);
        assert_eq!(body["shows_receipt_fields"], false);
    }

    #[tokio::test]
    async fn test_preview_accepts_partial_form() {
        let app = app();
        let token = login(&app, "employee@dasi.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/claims/preview",
            Some(&token),
            Some(json!({ "mode": "Taxi / Private Hire", "receipt_amount": "abc", "parking_fee": "3" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["computed_amount"], "0.00");
        assert_eq!(body["final_amount"], "3.00");
    }

    #[tokio::test]
    async fn test_submit_car_home_trip() {
        let app = app();
        let token = login(&app, "employee@dasi.com").await;
        let form = serde_json::to_value(FormFixtures::car_home_trip()).unwrap();

        let (status, body) = send(&app, Method::POST, "/api/v1/claims", Some(&token), Some(form)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["computed_amount"], "4.70");
        assert_eq!(body["final_amount"], "6.70");
        assert_eq!(body["employee_email"], "employee@dasi.com");
        assert_eq!(body["mode"], "Car");
        assert_eq!(body["rejection_reason"], Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_form_lists_every_problem() {
        let app = app();
        let token = login(&app, "employee@dasi.com").await;
        let form = serde_json::to_value(FormFixtures::blank()).unwrap();

        let (status, body) = send(&app, Method::POST, "/api/v1/claims", Some(&token), Some(form)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert!(body["details"].as_array().unwrap().len() >= 8);

        let (_, mine) = send(&app, Method::GET, "/api/v1/claims/mine", Some(&token), None).await;
        assert_eq!(mine["summary"]["total"], 0);
    }

    #[tokio::test]
    async fn test_employees_see_only_their_claims() {
        let app = app();
        let john = login(&app, "employee@dasi.com").await;
        let jane = login(&app, "employee2@dasi.com").await;

        let johns_claim = submit_car_claim(&app, &john).await;
        submit_car_claim(&app, &jane).await;
        submit_car_claim(&app, &john).await;

        let (_, mine) = send(&app, Method::GET, "/api/v1/claims/mine", Some(&john), None).await;
        assert_eq!(mine["summary"]["total"], 2);
        assert_eq!(mine["claims"][0]["id"], johns_claim.as_str());

        let uri = format!("/api/v1/claims/{}", johns_claim);
        let (status, _) = send(&app, Method::GET, &uri, Some(&jane), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, &uri, Some(&john), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], johns_claim.as_str());
    }

    #[tokio::test]
    async fn test_claim_lookup_needs_directory_account() {
        let app = app();
        let employee = login(&app, "john@dasi.com").await;
        let id = submit_car_claim(&app, &employee).await;

        let ghost = User::new("ghost@dasi.com", "Ghost Reviewer", &[Role::Reviewer]);
        let session = Session::start(ghost).unwrap();
        let config = ApiConfig::default();
        let token = create_token(&session, &config.jwt_secret, 60).unwrap();

        let uri = format!("/api/v1/claims/{}", id);
        let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_claim_id() {
        let app = app();
        let token = login(&app, "hr@dasi.com").await;

        let (status, _) = send(&app, Method::GET, "/api/v1/claims/not-an-id", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Review Tests
// ============================================================================

mod review_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_records_reviewer() {
        let app = app();
        let employee = login(&app, "employee@dasi.com").await;
        let reviewer = login(&app, "recruiter@dasi.com").await;
        let id = submit_car_claim(&app, &employee).await;

        let (_, pending) = send(&app, Method::GET, "/api/v1/claims/pending", Some(&reviewer), None).await;
        assert_eq!(pending["claims"].as_array().unwrap().len(), 1);

        let uri = format!("/api/v1/claims/{}/approve", id);
        let (status, body) = send(&app, Method::POST, &uri, Some(&reviewer), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");
        assert_eq!(body["reviewed_by"], "Sarah Recruiter");
        assert_eq!(body["rejection_reason"], Value::Null);

        let (_, pending) = send(&app, Method::GET, "/api/v1/claims/pending", Some(&reviewer), None).await;
        assert!(pending["claims"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reviewed_claim_cannot_change() {
        let app = app();
        let employee = login(&app, "employee@dasi.com").await;
        let reviewer = login(&app, "hr@dasi.com").await;
        let id = submit_car_claim(&app, &employee).await;

        let approve = format!("/api/v1/claims/{}/approve", id);
        let reject = format!("/api/v1/claims/{}/reject", id);
        send(&app, Method::POST, &approve, Some(&reviewer), None).await;

        let (status, _) = send(&app, Method::POST, &reject, Some(&reviewer), Some(json!({ "reason": "late" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/claims/{}", id), Some(&reviewer), None).await;
        assert_eq!(body["status"], "approved");
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let app = app();
        let employee = login(&app, "employee@dasi.com").await;
        let reviewer = login(&app, "hr@dasi.com").await;
        let id = submit_car_claim(&app, &employee).await;
        let uri = format!("/api/v1/claims/{}/reject", id);

        let (status, _) = send(&app, Method::POST, &uri, Some(&reviewer), Some(json!({ "reason": "   " }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&reviewer),
            Some(json!({ "reason": "Receipt missing" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["rejection_reason"], "Receipt missing");
    }

    #[tokio::test]
    async fn test_unknown_claim_is_not_found() {
        let app = app();
        let reviewer = login(&app, "hr@dasi.com").await;
        let uri = format!("/api/v1/claims/{}/approve", core_kernel::ClaimId::new_v7());

        let (status, body) = send(&app, Method::POST, &uri, Some(&reviewer), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_dashboards_follow_role() {
        let app = app();
        let employee = login(&app, "employee@dasi.com").await;
        let reviewer = login(&app, "recruiter@dasi.com").await;
        submit_car_claim(&app, &employee).await;

        let (_, body) = send(&app, Method::GET, "/api/v1/dashboard", Some(&employee), None).await;
        assert_eq!(body["view"], "employee");
        assert_eq!(body["employee_name"], "John Employee");
        assert_eq!(body["summary"]["pending"], 1);

        let (_, body) = send(&app, Method::GET, "/api/v1/dashboard", Some(&reviewer), None).await;
        assert_eq!(body["view"], "reviewer");
        assert_eq!(body["pending"].as_array().unwrap().len(), 1);
        assert_eq!(body["all"].as_array().unwrap().len(), 1);
    }
}
