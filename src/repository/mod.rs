//! Repository layer for database operations

pub mod equipment;
pub mod personnel;

use sqlx::{Pool, Sqlite};

use crate::error::AppResult;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub personnel: personnel::PersonnelRepository,
    pub equipment: equipment::EquipmentRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            personnel: personnel::PersonnelRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Readiness probe: verify the database answers a trivial query.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
