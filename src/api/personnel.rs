//! Personnel endpoints

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        equipment::Equipment,
        personnel::{Personnel, PersonnelForm, PersonnelInput},
        session::{FlashLevel, Session},
    },
    AppState,
};

use super::{redirect_with_flash, validation_error};

/// Personnel list view (administrator or guest)
#[derive(Serialize)]
pub struct PersonnelListView {
    pub personnels: Vec<Personnel>,
    pub is_manager: bool,
    pub is_guest: bool,
}

pub async fn list_personnel(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<PersonnelListView>> {
    session.require_view()?;
    let personnels = state.services.personnel.list().await?;
    Ok(Json(PersonnelListView {
        personnels,
        is_manager: session.is_manager,
        is_guest: session.is_guest,
    }))
}

/// Personnel detail view: the record, its held equipment and the full
/// personnel list for the reassignment dropdown
#[derive(Serialize)]
pub struct PersonnelDetailView {
    pub person: Personnel,
    pub equipments: Vec<Equipment>,
    pub personnels: Vec<Personnel>,
    pub is_manager: bool,
    pub is_guest: bool,
}

pub async fn personnel_detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<PersonnelDetailView>> {
    session.require_view()?;
    let (person, equipments) = state.services.personnel.detail(id).await?;
    let personnels = state.services.personnel.list().await?;
    Ok(Json(PersonnelDetailView {
        person,
        equipments,
        personnels,
        is_manager: session.is_manager,
        is_guest: session.is_guest,
    }))
}

/// Add/edit form view model; `person` is the record being edited, absent for
/// a blank add form
#[derive(Serialize)]
pub struct PersonnelFormView {
    pub person: Option<Personnel>,
}

pub async fn add_personnel_form(session: Session) -> AppResult<Json<PersonnelFormView>> {
    session.require_manager()?;
    Ok(Json(PersonnelFormView { person: None }))
}

pub async fn add_personnel(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PersonnelForm>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    form.validate().map_err(validation_error)?;
    let input = PersonnelInput::from(form);
    state.services.personnel.create(&input).await?;
    Ok(redirect_with_flash(
        "/personnel",
        FlashLevel::Success,
        "Personel eklendi.",
    ))
}

pub async fn edit_personnel_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<PersonnelFormView>> {
    session.require_manager()?;
    let person = state.services.personnel.get_by_id(id).await?;
    Ok(Json(PersonnelFormView {
        person: Some(person),
    }))
}

pub async fn edit_personnel(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<PersonnelForm>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    form.validate().map_err(validation_error)?;
    let input = PersonnelInput::from(form);
    state.services.personnel.update(id, &input).await?;
    Ok(redirect_with_flash(
        "/personnel",
        FlashLevel::Success,
        "Personel güncellendi.",
    ))
}

/// Delete a personnel record; held equipment is returned to the depot first
pub async fn delete_personnel(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    state.services.personnel.delete(id).await?;
    Ok(redirect_with_flash(
        "/personnel",
        FlashLevel::Success,
        "Personel silindi.",
    ))
}
