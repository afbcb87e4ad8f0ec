//! Personnel model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_blank;

/// Personnel record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Personnel {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub duty: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

impl Personnel {
    /// Display name used on the custody form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Personnel form payload (add and edit share the same fields)
#[derive(Debug, Deserialize, Validate)]
pub struct PersonnelForm {
    #[validate(length(min = 1, message = "Ad alanı zorunludur"))]
    pub name: String,
    #[validate(length(min = 1, message = "Soyad alanı zorunludur"))]
    pub surname: String,
    #[serde(default)]
    pub duty: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub description: String,
}

/// Normalized personnel fields ready to persist
#[derive(Debug, Clone)]
pub struct PersonnelInput {
    pub name: String,
    pub surname: String,
    pub duty: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

impl From<PersonnelForm> for PersonnelInput {
    fn from(form: PersonnelForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            surname: form.surname.trim().to_string(),
            duty: non_blank(form.duty),
            phone: non_blank(form.phone),
            description: non_blank(form.description),
        }
    }
}
