//! API handlers for the Zimmet HTTP surface

pub mod auth;
pub mod card;
pub mod equipment;
pub mod health;
pub mod personnel;
pub mod search;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tower_http::trace::TraceLayer;
use validator::ValidationErrors;

use crate::{
    error::AppError,
    models::session::{Flash, FlashLevel, Session},
    AppState,
};

/// Name of the signed role-flag cookie
pub const SESSION_COOKIE: &str = "zimmet_session";
/// Name of the plain one-shot notice cookie
pub const FLASH_COOKIE: &str = "zimmet_flash";

/// Build the session from the signed cookie; anonymous when absent or
/// tampered with. Constructed once per request at extraction time.
#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = match SignedCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        Ok(jar
            .get(SESSION_COOKIE)
            .map(|cookie| Session::from_cookie_value(cookie.value()))
            .unwrap_or_else(Session::anonymous))
    }
}

/// Persist the session flags into the signed jar
pub(crate) fn save_session(jar: SignedCookieJar, session: &Session) -> SignedCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, session.to_cookie_value()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Drop the session cookie entirely
pub(crate) fn clear_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// One-shot notice cookie; payload is base64 JSON so the copy survives
/// cookie-value character restrictions.
pub(crate) fn flash_cookie(level: FlashLevel, message: &str) -> Cookie<'static> {
    let payload = serde_json::to_vec(&Flash {
        level,
        message: message.to_string(),
    })
    .unwrap_or_default();
    Cookie::build((FLASH_COOKIE, BASE64.encode(payload)))
        .path("/")
        .build()
}

/// Read and clear the pending flash notice
pub(crate) fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar.get(FLASH_COOKIE).and_then(|cookie| {
        let bytes = BASE64.decode(cookie.value()).ok()?;
        serde_json::from_slice(&bytes).ok()
    });
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, flash)
}

/// Redirect carrying a one-shot notice
pub(crate) fn redirect_with_flash(
    to: &str,
    level: FlashLevel,
    message: &str,
) -> (CookieJar, Redirect) {
    (
        CookieJar::new().add(flash_cookie(level, message)),
        Redirect::to(to),
    )
}

/// Collect form validation messages into a single user-visible error
pub(crate) fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .into_values()
        .flat_map(|field_errors| field_errors.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    if message.is_empty() {
        AppError::Validation("Geçersiz form verisi".to_string())
    } else {
        AppError::Validation(message)
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Entry page and session
        .route("/", get(auth::index))
        .route("/manager", post(auth::manager_login))
        .route("/guest_login", post(auth::guest_login))
        .route("/logout", get(auth::logout))
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Personnel
        .route("/personnel", get(personnel::list_personnel))
        .route("/personnel_detail/:id", get(personnel::personnel_detail))
        .route(
            "/add_personnel",
            get(personnel::add_personnel_form).post(personnel::add_personnel),
        )
        .route(
            "/edit_personnel/:id",
            get(personnel::edit_personnel_form).post(personnel::edit_personnel),
        )
        .route("/delete_personnel/:id", post(personnel::delete_personnel))
        // Equipment
        .route("/equipment", get(equipment::list_equipment))
        .route("/equipment_detail/:id", get(equipment::equipment_detail))
        .route(
            "/add_equipment",
            get(equipment::add_equipment_form).post(equipment::add_equipment),
        )
        .route(
            "/edit_equipment/:id",
            get(equipment::edit_equipment_form).post(equipment::edit_equipment),
        )
        .route("/delete_equipment/:id", post(equipment::delete_equipment))
        .route("/assign_equipment/:eq_id", post(equipment::assign_equipment))
        // Search
        .route("/search", get(search::search_form).post(search::search))
        // Custody form download
        .route("/print_card/:id", get(card::print_card))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
