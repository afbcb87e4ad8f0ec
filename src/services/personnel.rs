//! Personnel service

use crate::{
    error::AppResult,
    models::{
        equipment::Equipment,
        personnel::{Personnel, PersonnelInput},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PersonnelService {
    repository: Repository,
}

impl PersonnelService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Personnel>> {
        self.repository.personnel.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Personnel> {
        self.repository.personnel.get_by_id(id).await
    }

    /// Personnel record together with the equipment it currently holds
    pub async fn detail(&self, id: i64) -> AppResult<(Personnel, Vec<Equipment>)> {
        let person = self.repository.personnel.get_by_id(id).await?;
        let equipments = self.repository.equipment.list_by_owner(id).await?;
        Ok((person, equipments))
    }

    pub async fn create(&self, data: &PersonnelInput) -> AppResult<Personnel> {
        self.repository.personnel.create(data).await
    }

    pub async fn update(&self, id: i64, data: &PersonnelInput) -> AppResult<Personnel> {
        self.repository.personnel.update(id, data).await
    }

    /// Delete a personnel record; held equipment is returned to the depot
    /// before the row is removed (single transaction in the repository).
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.personnel.delete(id).await
    }
}
