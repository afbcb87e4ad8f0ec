//! Session roles and flash notices

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Per-browser-session role flags, carried in a signed cookie.
///
/// Only `is_manager` grants write access; `is_guest` is read-only. Both may
/// be set at once (a guest who later logs in as manager keeps the flag).
#[derive(Debug, Clone, Copy, Default)]
pub struct Session {
    pub is_manager: bool,
    pub is_guest: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Compact cookie value: one letter per active flag.
    pub fn to_cookie_value(&self) -> String {
        let mut value = String::new();
        if self.is_manager {
            value.push('m');
        }
        if self.is_guest {
            value.push('g');
        }
        value
    }

    pub fn from_cookie_value(value: &str) -> Self {
        Self {
            is_manager: value.contains('m'),
            is_guest: value.contains('g'),
        }
    }

    pub fn can_view(&self) -> bool {
        self.is_manager || self.is_guest
    }

    /// Gate for administrator-only operations.
    pub fn require_manager(&self) -> AppResult<()> {
        if self.is_manager {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Bu işlem için yönetici girişi gereklidir.".to_string(),
            ))
        }
    }

    /// Gate for listing/detail/print operations (manager or guest).
    pub fn require_view(&self) -> AppResult<()> {
        if self.can_view() {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Bu sayfa için giriş yapmanız gereklidir.".to_string(),
            ))
        }
    }
}

/// Flash notice severity, mirrored in the view payloads
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
    Info,
}

/// One-shot notice shown after a redirect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}
