//! Equipment model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_blank;

/// Equipment record
///
/// `in_depot` is true exactly when `assigned_to` is NULL; every write keeps
/// the pair in step and the schema carries a matching CHECK constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    /// Globally unique serial number
    pub serial: String,
    pub description: Option<String>,
    /// Personnel currently holding the item, if any
    pub assigned_to: Option<i64>,
    pub in_depot: bool,
}

/// Equipment form payload (add and edit share the same fields)
#[derive(Debug, Deserialize, Validate)]
pub struct EquipmentForm {
    #[validate(length(min = 1, message = "Ekipman adı zorunludur"))]
    pub name: String,
    #[validate(length(min = 1, message = "Seri numarası zorunludur"))]
    pub serial: String,
    #[serde(default)]
    pub description: String,
}

/// Normalized equipment fields ready to persist
#[derive(Debug, Clone)]
pub struct EquipmentInput {
    pub name: String,
    pub serial: String,
    pub description: Option<String>,
}

impl From<EquipmentForm> for EquipmentInput {
    fn from(form: EquipmentForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            serial: form.serial.trim().to_string(),
            description: non_blank(form.description),
        }
    }
}

/// Custody reassignment target: the depot or a specific personnel id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignTarget {
    Depot,
    Person(i64),
}

impl AssignTarget {
    /// Personnel id to store in `assigned_to` (NULL for the depot).
    pub fn person_id(&self) -> Option<i64> {
        match self {
            AssignTarget::Depot => None,
            AssignTarget::Person(id) => Some(*id),
        }
    }
}

impl std::str::FromStr for AssignTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "depot" => Ok(AssignTarget::Depot),
            other => other
                .parse::<i64>()
                .map(AssignTarget::Person)
                .map_err(|_| format!("Invalid assignment target: {}", other)),
        }
    }
}

/// Reassignment form payload
#[derive(Debug, Deserialize)]
pub struct AssignForm {
    /// `"depot"` or a personnel id
    pub assign_to: String,
}
