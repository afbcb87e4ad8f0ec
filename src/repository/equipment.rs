//! Equipment repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{AssignTarget, Equipment, EquipmentInput},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Sqlite>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all equipment in storage order
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// List equipment currently held by the given personnel
    pub async fn list_by_owner(&self, person_id: i64) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE assigned_to = $1")
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create an equipment record. New items start in the depot. The UNIQUE
    /// constraint on `serial` rejects duplicates atomically with the insert.
    pub async fn create(&self, data: &EquipmentInput) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, serial, description, assigned_to, in_depot)
            VALUES ($1, $2, $3, NULL, TRUE)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| serial_conflict(e, &data.serial))
    }

    /// Overwrite name, serial and description in place
    pub async fn update(&self, id: i64, data: &EquipmentInput) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET name = $1, serial = $2, description = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| serial_conflict(e, &data.serial))?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete an equipment record
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Move an item between a holder and the depot. A personnel target must
    /// exist; the existence check and the update share one transaction so
    /// `assigned_to`/`in_depot` never disagree and never point at a person
    /// deleted mid-flight.
    pub async fn assign(&self, id: i64, target: AssignTarget) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        if let AssignTarget::Person(person_id) = target {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM personnel WHERE id = $1")
                .bind(person_id)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Err(AppError::NotFound(format!(
                    "Personnel {} not found",
                    person_id
                )));
            }
        }

        let assigned_to = target.person_id();
        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET assigned_to = $1, in_depot = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(assigned_to)
        .bind(assigned_to.is_none())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Case-insensitive substring search over name and serial.
    /// `pattern` is a lowercased `%term%` LIKE pattern.
    pub async fn search(&self, pattern: &str) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT * FROM equipment
            WHERE LOWER(name) LIKE $1
               OR LOWER(serial) LIKE $1
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Map a UNIQUE violation on `serial` to a user-visible conflict.
fn serial_conflict(e: sqlx::Error, serial: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return AppError::Conflict(format!("Serial '{}' is already registered", serial));
        }
    }
    AppError::Database(e)
}
