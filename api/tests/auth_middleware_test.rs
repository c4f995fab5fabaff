//! Integration tests for token checks, panel separation and the
//! envelope replies of the application's edges.

mod common;

use actix_web::http::header;
use actix_web::test;
use serde_json::{json, Value};

use mb_api::app::create_app;

const NOT_AUTHORIZED: &str = "Not Authorized. Login Again";

#[actix_web::test]
async fn protected_routes_require_a_bearer_token() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/user/get-profile")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], NOT_AUTHORIZED);
}

#[actix_web::test]
async fn garbage_tokens_are_rejected() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/user/appointments")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/doctor/dashboard-stats")
        .insert_header(("dtoken", "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn panel_tokens_do_not_cross_over() {
    let harness = common::harness();
    let doctor = common::seed_doctor(&harness, "richard.james@medibook.example", "docpass123");
    let user = common::seed_verified_user(&harness, "asha.rao@gmail.com", "password123");
    let bearer = common::user_token(&harness, user.id);
    let dtoken = common::doctor_token(&harness, doctor.id);
    let app = test::init_service(create_app(harness.state.clone())).await;

    // A patient token in the doctor panel header is refused.
    let req = test::TestRequest::get()
        .uri("/api/doctor/dashboard-stats")
        .insert_header(("dtoken", bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // A doctor token as a patient bearer is refused too.
    let req = test::TestRequest::get()
        .uri("/api/user/get-profile")
        .insert_header((header::AUTHORIZATION, format!("Bearer {dtoken}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], NOT_AUTHORIZED);
}

#[actix_web::test]
async fn a_bearer_token_is_not_accepted_as_dtoken_prefix_form() {
    let harness = common::harness();
    let doctor = common::seed_doctor(&harness, "richard.james@medibook.example", "docpass123");
    let dtoken = common::doctor_token(&harness, doctor.id);
    let app = test::init_service(create_app(harness.state.clone())).await;

    // The panel header carries the raw token, not the Bearer form.
    let req = test::TestRequest::get()
        .uri("/api/doctor/dashboard-stats")
        .insert_header(("dtoken", format!("Bearer {dtoken}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // The raw token works.
    let req = test::TestRequest::get()
        .uri("/api/doctor/dashboard-stats")
        .insert_header(("dtoken", dtoken))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn health_answers_without_any_token() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "medibook-api");
}

#[actix_web::test]
async fn unknown_routes_answer_the_envelope_404() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "The requested resource was not found");
}

#[actix_web::test]
async fn malformed_json_answers_the_envelope_400() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request data");
}

#[actix_web::test]
async fn malformed_uuid_in_the_body_answers_400() {
    let harness = common::harness();
    let user = common::seed_verified_user(&harness, "asha.rao@gmail.com", "password123");
    let bearer = common::user_token(&harness, user.id);
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/user/cancel-appointment")
        .insert_header((header::AUTHORIZATION, format!("Bearer {bearer}")))
        .set_json(json!({"appointmentId": "not-a-uuid"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid request data");
}
