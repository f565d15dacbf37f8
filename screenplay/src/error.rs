//! Error types for screenplay

use crate::ability::AbilityKey;
use thiserror::Error;

/// Errors raised while configuring actors or running activities
#[derive(Debug, Error)]
pub enum ScreenplayError {
    /// An ability with the same name and alias was already granted
    #[error("ability '{key}' is already granted to this actor")]
    DuplicateAbility { key: AbilityKey },

    /// An activity asked for an ability the actor was never granted
    #[error("actor does not have the required ability '{}'{}", .key.name(), alias_note(.key.alias()))]
    MissingAbility { key: AbilityKey },

    /// The ability stored under the key is not of the requested type
    #[error("ability '{key}' is not a {expected}")]
    AbilityMismatch {
        key: AbilityKey,
        expected: &'static str,
    },

    /// Anything raised from inside `perform_as` / `answered_by`
    #[error(transparent)]
    ActivityExecution(#[from] anyhow::Error),
}

fn alias_note(alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!(" (with alias '{}')", alias),
        None => String::new(),
    }
}

impl ScreenplayError {
    /// Build an activity execution error from a message
    pub fn execution(message: impl std::fmt::Display) -> Self {
        ScreenplayError::ActivityExecution(anyhow::anyhow!("{}", message))
    }

    pub fn is_missing_ability(&self) -> bool {
        matches!(self, ScreenplayError::MissingAbility { .. })
    }

    pub fn is_duplicate_ability(&self) -> bool {
        matches!(self, ScreenplayError::DuplicateAbility { .. })
    }
}

/// Result type using ScreenplayError
pub type ScreenplayResult<T> = std::result::Result<T, ScreenplayError>;
