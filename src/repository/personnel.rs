//! Personnel repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::personnel::{Personnel, PersonnelInput},
};

#[derive(Clone)]
pub struct PersonnelRepository {
    pool: Pool<Sqlite>,
}

impl PersonnelRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all personnel in storage order
    pub async fn list(&self) -> AppResult<Vec<Personnel>> {
        let rows = sqlx::query_as::<_, Personnel>("SELECT * FROM personnel")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get personnel by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Personnel> {
        sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Personnel {} not found", id)))
    }

    /// Create a personnel record
    pub async fn create(&self, data: &PersonnelInput) -> AppResult<Personnel> {
        let row = sqlx::query_as::<_, Personnel>(
            r#"
            INSERT INTO personnel (name, surname, duty, phone, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.duty)
        .bind(&data.phone)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite all fields of a personnel record in place
    pub async fn update(&self, id: i64, data: &PersonnelInput) -> AppResult<Personnel> {
        sqlx::query_as::<_, Personnel>(
            r#"
            UPDATE personnel
            SET name = $1, surname = $2, duty = $3, phone = $4, description = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.duty)
        .bind(&data.phone)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Personnel {} not found", id)))
    }

    /// Delete a personnel record, first moving every item it holds back to
    /// the depot. Both steps run in one transaction; the reassignment must
    /// come first so no equipment row ever references a deleted person.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE equipment SET assigned_to = NULL, in_depot = TRUE WHERE assigned_to = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM personnel WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Personnel {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Case-insensitive substring search over name, surname, duty and phone.
    /// `pattern` is a lowercased `%term%` LIKE pattern.
    pub async fn search(&self, pattern: &str) -> AppResult<Vec<Personnel>> {
        let rows = sqlx::query_as::<_, Personnel>(
            r#"
            SELECT * FROM personnel
            WHERE LOWER(name) LIKE $1
               OR LOWER(surname) LIKE $1
               OR LOWER(duty) LIKE $1
               OR LOWER(phone) LIKE $1
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
