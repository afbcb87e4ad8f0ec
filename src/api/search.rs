//! Search endpoints (administrator only)

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{equipment::Equipment, personnel::Personnel, session::Session},
    AppState,
};

/// Search view: both result sets, the echoed query and the personnel
/// dropdown list
#[derive(Serialize)]
pub struct SearchView {
    pub persons: Vec<Personnel>,
    pub eqs: Vec<Equipment>,
    pub query: Option<String>,
    pub personnels: Vec<Personnel>,
}

/// Empty search page
pub async fn search_form(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<SearchView>> {
    session.require_manager()?;
    let personnels = state.services.personnel.list().await?;
    Ok(Json(SearchView {
        persons: Vec::new(),
        eqs: Vec::new(),
        query: None,
        personnels,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchQueryForm {
    pub query: String,
}

/// Case-insensitive substring search over personnel and equipment
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SearchQueryForm>,
) -> AppResult<Json<SearchView>> {
    session.require_manager()?;
    let results = state.services.search.search(&form.query).await?;
    let personnels = state.services.personnel.list().await?;

    let term = form.query.trim();
    Ok(Json(SearchView {
        persons: results.persons,
        eqs: results.equipment,
        query: if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        },
        personnels,
    }))
}
