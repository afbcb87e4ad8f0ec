//! Session endpoints: entry page, logins, logout

use axum::{extract::State, response::Redirect, Form, Json};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::session::{Flash, FlashLevel, Session},
    AppState,
};

use super::{clear_session, redirect_with_flash, save_session, take_flash};

/// Entry page view model: role flags plus any pending notice
#[derive(Serialize)]
pub struct IndexView {
    pub is_manager: bool,
    pub is_guest: bool,
    pub flash: Option<Flash>,
}

/// Entry page; consumes the pending flash notice
pub async fn index(session: Session, jar: CookieJar) -> (CookieJar, Json<IndexView>) {
    let (jar, flash) = take_flash(jar);
    (
        jar,
        Json(IndexView {
            is_manager: session.is_manager,
            is_guest: session.is_guest,
            flash,
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Administrator login with the shared secret. A failed attempt leaves the
/// session unchanged and only flashes the failure.
pub async fn manager_login(
    State(state): State<AppState>,
    session: Session,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(SignedCookieJar, CookieJar, Redirect)> {
    if state.services.auth.verify_password(&form.password)? {
        let session = Session {
            is_manager: true,
            ..session
        };
        let (flash, redirect) =
            redirect_with_flash("/", FlashLevel::Success, "Yönetici girişi başarılı!");
        Ok((save_session(jar, &session), flash, redirect))
    } else {
        let (flash, redirect) = redirect_with_flash("/", FlashLevel::Danger, "Yanlış şifre!");
        Ok((jar, flash, redirect))
    }
}

/// Guest login: read-only access, no credential required
pub async fn guest_login(
    session: Session,
    jar: SignedCookieJar,
) -> (SignedCookieJar, CookieJar, Redirect) {
    let session = Session {
        is_guest: true,
        ..session
    };
    let (flash, redirect) = redirect_with_flash(
        "/",
        FlashLevel::Info,
        "Misafir olarak giriş yaptınız (sadece görüntüleme).",
    );
    (save_session(jar, &session), flash, redirect)
}

/// Clear all session flags
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, CookieJar, Redirect) {
    let (flash, redirect) = redirect_with_flash("/", FlashLevel::Info, "Çıkış yapıldı.");
    (clear_session(jar), flash, redirect)
}
