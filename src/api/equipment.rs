//! Equipment endpoints (administrator only)

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{AssignForm, AssignTarget, Equipment, EquipmentForm, EquipmentInput},
        personnel::Personnel,
        session::{FlashLevel, Session},
    },
    AppState,
};

use super::{redirect_with_flash, validation_error};

/// Equipment list view; the personnel list feeds the assignment dropdown
#[derive(Serialize)]
pub struct EquipmentListView {
    pub equipments: Vec<Equipment>,
    pub personnels: Vec<Personnel>,
}

pub async fn list_equipment(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<EquipmentListView>> {
    session.require_manager()?;
    let equipments = state.services.equipment.list().await?;
    let personnels = state.services.personnel.list().await?;
    Ok(Json(EquipmentListView {
        equipments,
        personnels,
    }))
}

/// Equipment detail view with the current holder, if any
#[derive(Serialize)]
pub struct EquipmentDetailView {
    pub eq: Equipment,
    pub owner: Option<Personnel>,
    pub personnels: Vec<Personnel>,
}

pub async fn equipment_detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<EquipmentDetailView>> {
    session.require_manager()?;
    let (eq, owner) = state.services.equipment.detail(id).await?;
    let personnels = state.services.personnel.list().await?;
    Ok(Json(EquipmentDetailView {
        eq,
        owner,
        personnels,
    }))
}

/// Add/edit form view model; `eq` is the record being edited, absent for a
/// blank add form
#[derive(Serialize)]
pub struct EquipmentFormView {
    pub eq: Option<Equipment>,
}

pub async fn add_equipment_form(session: Session) -> AppResult<Json<EquipmentFormView>> {
    session.require_manager()?;
    Ok(Json(EquipmentFormView { eq: None }))
}

pub async fn add_equipment(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EquipmentForm>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    form.validate().map_err(validation_error)?;
    let input = EquipmentInput::from(form);
    state.services.equipment.create(&input).await?;
    Ok(redirect_with_flash(
        "/equipment",
        FlashLevel::Success,
        "Ekipman eklendi.",
    ))
}

pub async fn edit_equipment_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<EquipmentFormView>> {
    session.require_manager()?;
    let eq = state.services.equipment.get_by_id(id).await?;
    Ok(Json(EquipmentFormView { eq: Some(eq) }))
}

pub async fn edit_equipment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<EquipmentForm>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    form.validate().map_err(validation_error)?;
    let input = EquipmentInput::from(form);
    state.services.equipment.update(id, &input).await?;
    Ok(redirect_with_flash(
        "/equipment",
        FlashLevel::Success,
        "Ekipman güncellendi.",
    ))
}

pub async fn delete_equipment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    state.services.equipment.delete(id).await?;
    Ok(redirect_with_flash(
        "/equipment",
        FlashLevel::Success,
        "Ekipman silindi.",
    ))
}

/// Reassign an item to a personnel or back to the depot; returns to the
/// referring page like the original flow
pub async fn assign_equipment(
    State(state): State<AppState>,
    session: Session,
    Path(eq_id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<AssignForm>,
) -> AppResult<(CookieJar, Redirect)> {
    session.require_manager()?;
    let target = form
        .assign_to
        .parse::<AssignTarget>()
        .map_err(AppError::Validation)?;
    state.services.equipment.assign(eq_id, target).await?;

    let back = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/personnel");
    Ok(redirect_with_flash(
        back,
        FlashLevel::Success,
        "Zimmet aktarıldı.",
    ))
}
