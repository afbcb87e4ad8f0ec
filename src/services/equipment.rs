//! Equipment service

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{AssignTarget, Equipment, EquipmentInput},
        personnel::Personnel,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Equipment record together with its current holder, if any
    pub async fn detail(&self, id: i64) -> AppResult<(Equipment, Option<Personnel>)> {
        let equipment = self.repository.equipment.get_by_id(id).await?;
        let owner = match equipment.assigned_to {
            Some(person_id) => match self.repository.personnel.get_by_id(person_id).await {
                Ok(person) => Some(person),
                Err(AppError::NotFound(_)) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };
        Ok((equipment, owner))
    }

    pub async fn create(&self, data: &EquipmentInput) -> AppResult<Equipment> {
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i64, data: &EquipmentInput) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// Move an item to the depot or hand it to an existing personnel
    pub async fn assign(&self, id: i64, target: AssignTarget) -> AppResult<Equipment> {
        self.repository.equipment.assign(id, target).await
    }
}
