use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::model::AppointmentStatus;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Booking conflict: {start_date} to {end_date} at {time} collides with appointment {existing_id}")]
    Conflict {
        start_date: NaiveDate,
        end_date: NaiveDate,
        time: NaiveTime,
        existing_id: Uuid,
    },

    #[error("Notification error: {message}")]
    Notification { message: String },

    #[error("Appointment not found: {id}")]
    NotFound { id: Uuid },

    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Configuration error: {field}: {message}")]
    Config { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 錯誤類別，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Booking,
    Delivery,
    Access,
    System,
}

impl DeskError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    pub fn config(field: &str, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Input,
            Self::Conflict { .. } | Self::NotFound { .. } | Self::InvalidTransition { .. } => {
                ErrorCategory::Booking
            }
            Self::Notification { .. } => ErrorCategory::Delivery,
            Self::Unauthorized { .. } => ErrorCategory::Access,
            Self::Config { .. } | Self::Io(_) | Self::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Check the highlighted field and submit the booking again",
            Self::Conflict { .. } => "Choose a different time or date range",
            Self::Notification { .. } => {
                "The booking was not saved; check the customer's email address and try again"
            }
            Self::NotFound { .. } => "Refresh the appointment list; the entry may have been removed",
            Self::InvalidTransition { .. } => "Reset the appointment to scheduled first",
            Self::Unauthorized { .. } => "Enter the correct PIN",
            Self::Config { .. } => "Fix the configuration file and restart",
            Self::Io(_) => "Check that the file exists and is readable",
            Self::Serialization(_) => "Check that the input file is valid JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { field, reason } => format!("Invalid {}: {}", field, reason),
            Self::Conflict { .. } => "There is a conflict with existing appointments in the selected date range and time".to_string(),
            Self::Notification { .. } => "Failed to send confirmation email. Please try again.".to_string(),
            Self::NotFound { .. } => "That appointment no longer exists".to_string(),
            Self::InvalidTransition { from, to, .. } => {
                format!("A {} appointment cannot be marked {}", from, to)
            }
            Self::Unauthorized { .. } => "Invalid PIN".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            DeskError::validation("service", "required").category(),
            ErrorCategory::Input
        );
        assert_eq!(
            DeskError::notification("timeout").category(),
            ErrorCategory::Delivery
        );
        assert_eq!(
            DeskError::NotFound { id: Uuid::nil() }.category(),
            ErrorCategory::Booking
        );
    }

    #[test]
    fn test_user_friendly_message_names_field() {
        let err = DeskError::validation("customer_name", "cannot be empty");
        assert_eq!(err.user_friendly_message(), "Invalid customer_name: cannot be empty");
    }
}
