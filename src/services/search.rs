//! Search service

use crate::{
    error::AppResult,
    models::{equipment::Equipment, personnel::Personnel},
    repository::Repository,
};

/// Matches from both entity searches, unordered
#[derive(Debug, Default)]
pub struct SearchResults {
    pub persons: Vec<Personnel>,
    pub equipment: Vec<Equipment>,
}

#[derive(Clone)]
pub struct SearchService {
    repository: Repository,
}

impl SearchService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Case-insensitive substring search across personnel text fields and,
    /// independently, equipment name/serial. A blank query matches nothing.
    pub async fn search(&self, query: &str) -> AppResult<SearchResults> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(SearchResults::default());
        }

        let pattern = format!("%{}%", term.to_lowercase());
        Ok(SearchResults {
            persons: self.repository.personnel.search(&pattern).await?,
            equipment: self.repository.equipment.search(&pattern).await?,
        })
    }
}
