//! Business logic services

pub mod auth;
pub mod card;
pub mod equipment;
pub mod personnel;
pub mod search;

use crate::{
    config::{AuthConfig, CardConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub auth: auth::AuthService,
    pub personnel: personnel::PersonnelService,
    pub equipment: equipment::EquipmentService,
    pub search: search::SearchService,
    pub cards: card::CardService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: &AuthConfig,
        card_config: CardConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(auth_config)?,
            personnel: personnel::PersonnelService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            search: search::SearchService::new(repository.clone()),
            cards: card::CardService::new(repository.clone(), card_config),
            repository,
        })
    }
}
