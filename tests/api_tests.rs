//! End-to-end tests driving the real router against an in-memory database

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use zimmet_server::{
    api,
    config::{AppConfig, AuthConfig, CardConfig, DatabaseConfig, LoggingConfig, ServerConfig},
    repository::Repository,
    services::Services,
    AppState,
};

const ADMIN_PASSWORD: &str = "test-admin-password";

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        auth: AuthConfig {
            admin_password: ADMIN_PASSWORD.to_string(),
            session_secret: "integration-test-session-secret".to_string(),
        },
        logging: LoggingConfig::default(),
        card: CardConfig { font_path: None },
    };

    let repository = Repository::new(pool);
    let services = Services::new(repository, &config.auth, config.card.clone())
        .expect("Failed to create services");
    api::router(AppState::new(config, services))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Pull the session cookie pair out of a login response
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("zimmet_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login_as_guest(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_form("/guest_login", "", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("guest login should set a session cookie")
}

async fn login_as_manager(app: &Router) -> String {
    let body = format!("password={}", ADMIN_PASSWORD);
    let response = app
        .clone()
        .oneshot(post_form("/manager", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("manager login should set a session cookie")
}

#[tokio::test]
async fn health_endpoints_answer() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/ready", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_does_not_create_a_session() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_form("/manager", "password=wrong", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn entry_page_reports_flags_and_consumes_flash() {
    let app = test_app().await;

    let login = app
        .clone()
        .oneshot(post_form("/guest_login", "", None))
        .await
        .unwrap();
    let session = session_cookie(&login).expect("guest login should set a session cookie");
    let flash = login
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("zimmet_flash="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
        .expect("guest login should flash a notice");

    let cookie = format!("{}; {}", session, flash);
    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The notice is cleared as it is delivered
    let cleared = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with("zimmet_flash=") && value.contains("Max-Age=0"));
    assert!(cleared);

    let body = json_body(response).await;
    assert_eq!(body["is_guest"], true);
    assert_eq!(body["is_manager"], false);
    assert_eq!(body["flash"]["level"], "info");
    assert_eq!(
        body["flash"]["message"],
        "Misafir olarak giriş yaptınız (sadece görüntüleme)."
    );
}

#[tokio::test]
async fn anonymous_requests_are_redirected_to_entry() {
    let app = test_app().await;

    for uri in ["/personnel", "/equipment", "/search", "/print_card/1"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), Some("/"), "{}", uri);
    }
}

#[tokio::test]
async fn guest_can_view_but_not_manage() {
    let app = test_app().await;
    let cookie = login_as_guest(&app).await;

    let response = app
        .clone()
        .oneshot(get("/personnel", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Administrator-only page redirects away without granting access
    let response = app
        .clone()
        .oneshot(get("/equipment", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    // Writes are rejected the same way
    let response = app
        .clone()
        .oneshot(post_form(
            "/add_personnel",
            "name=Ali&surname=Veli",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn missing_required_field_is_a_validation_error() {
    let app = test_app().await;
    let cookie = login_as_manager(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/add_personnel",
            "name=&surname=Veli",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_serial_is_a_conflict() {
    let app = test_app().await;
    let cookie = login_as_manager(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/add_equipment",
            "name=Laptop&serial=SN-001",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(post_form(
            "/add_equipment",
            "name=Monitor&serial=SN-001",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn assigning_to_missing_personnel_is_not_found() {
    let app = test_app().await;
    let cookie = login_as_manager(&app).await;

    app.clone()
        .oneshot(post_form(
            "/add_equipment",
            "name=Laptop&serial=SN-001",
            Some(&cookie),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            "/assign_equipment/1",
            "assign_to=999",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(post_form(
            "/assign_equipment/1",
            "assign_to=nonsense",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn full_custody_lifecycle_over_http() {
    let app = test_app().await;
    let cookie = login_as_manager(&app).await;

    // Create personnel and equipment
    let response = app
        .clone()
        .oneshot(post_form(
            "/add_personnel",
            "name=Ali&surname=Veli&duty=Teknisyen&phone=&description=",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/personnel"));

    let response = app
        .clone()
        .oneshot(post_form(
            "/add_equipment",
            "name=Laptop&serial=SN-001&description=",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(
        app.clone()
            .oneshot(get("/personnel", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    let person_id = body["personnels"][0]["id"].as_i64().unwrap();
    assert_eq!(body["personnels"][0]["name"], "Ali");
    // Blank optional fields are stored as NULL
    assert_eq!(body["personnels"][0]["phone"], Value::Null);

    let body = json_body(
        app.clone()
            .oneshot(get("/equipment", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    let eq_id = body["equipments"][0]["id"].as_i64().unwrap();
    assert_eq!(body["equipments"][0]["in_depot"], true);

    // Assign to the person
    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/assign_equipment/{}", eq_id),
            &format!("assign_to={}", person_id),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(
        app.clone()
            .oneshot(get(&format!("/equipment_detail/{}", eq_id), Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["eq"]["assigned_to"].as_i64(), Some(person_id));
    assert_eq!(body["eq"]["in_depot"], false);
    assert_eq!(body["owner"]["name"], "Ali");

    // The person's detail page lists the held item
    let body = json_body(
        app.clone()
            .oneshot(get(
                &format!("/personnel_detail/{}", person_id),
                Some(&cookie),
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["equipments"][0]["serial"], "SN-001");

    // Deleting the person returns the item to the depot
    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/delete_personnel/{}", person_id),
            "",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(
        app.clone()
            .oneshot(get("/personnel", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["personnels"].as_array().unwrap().len(), 0);

    let body = json_body(
        app.clone()
            .oneshot(get("/equipment", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["equipments"][0]["assigned_to"], Value::Null);
    assert_eq!(body["equipments"][0]["in_depot"], true);
}

#[tokio::test]
async fn search_is_scoped_to_matching_fields() {
    let app = test_app().await;
    let cookie = login_as_manager(&app).await;

    app.clone()
        .oneshot(post_form(
            "/add_personnel",
            "name=Ali&surname=Veli&duty=Teknisyen",
            Some(&cookie),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form(
            "/add_equipment",
            "name=Laptop&serial=SN-001",
            Some(&cookie),
        ))
        .await
        .unwrap();

    let body = json_body(
        app.clone()
            .oneshot(post_form("/search", "query=teknis", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["persons"].as_array().unwrap().len(), 1);
    assert_eq!(body["eqs"].as_array().unwrap().len(), 0);
    assert_eq!(body["query"], "teknis");

    let body = json_body(
        app.clone()
            .oneshot(post_form("/search", "query=", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["persons"].as_array().unwrap().len(), 0);
    assert_eq!(body["query"], Value::Null);
}

#[tokio::test]
async fn guest_can_download_the_custody_form() {
    let app = test_app().await;
    let manager = login_as_manager(&app).await;

    app.clone()
        .oneshot(post_form(
            "/add_personnel",
            "name=Ali&surname=Veli&duty=Teknisyen",
            Some(&manager),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form(
            "/add_equipment",
            "name=Laptop&serial=SN-001",
            Some(&manager),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form("/assign_equipment/1", "assign_to=1", Some(&manager)))
        .await
        .unwrap();

    let guest = login_as_guest(&app).await;
    let response = app
        .clone()
        .oneshot(get("/print_card/1", Some(&guest)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.contains("zimmet_Ali_Veli.pdf"), "{}", disposition);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));

    // Unknown personnel id is a clean not-found
    let response = app
        .clone()
        .oneshot(get("/print_card/999", Some(&guest)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = test_app().await;
    let cookie = login_as_manager(&app).await;

    let response = app.clone().oneshot(get("/logout", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The logout response removes the cookie; a client that kept the old
    // value would still present a signed manager session, so verify the
    // removal cookie was issued.
    let removed = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("zimmet_session=") && v.contains("Max-Age=0"));
    assert!(removed);
}
