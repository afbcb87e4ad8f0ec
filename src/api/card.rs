//! Custody form download endpoint

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
};

use crate::{
    error::{AppError, AppResult},
    models::session::Session,
    AppState,
};

/// Render and download the custody acknowledgment PDF for a personnel record
pub async fn print_card(
    State(state): State<AppState>,
    session: Session,
    Path(person_id): Path<i64>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    session.require_view()?;
    let card = state.services.cards.render(person_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!("attachment; filename=\"{}\"", card.filename);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(format!("Invalid download filename: {}", e)))?,
    );
    Ok((headers, card.bytes))
}
